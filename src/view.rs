//! Render model of the popup: what the DOM would show.

use ninja_core::settings::Settings;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Message keys rendered as static popup text.
pub const POPUP_TEXT_KEYS: &[&str] = &[
    "loginHeading",
    "loginDescription",
    "googleLoginButton",
    "settingsHeading",
    "sourceInfoLabel",
    "autoDetectLabel",
    "darkModeLabel",
    "languageLabel",
    "timezoneLabel",
    "disconnectButton",
];

/// Which half of the popup is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Login,
    Settings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Value of the body's `data-theme` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// The three preference switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Toggle {
    SourceInfo,
    AutoDetect,
    DarkMode,
}

impl Toggle {
    pub const ALL: [Toggle; 3] = [Toggle::SourceInfo, Toggle::AutoDetect, Toggle::DarkMode];

    /// Effective value in `settings`.
    pub fn is_enabled(&self, settings: &Settings) -> bool {
        match self {
            Self::SourceInfo => settings.show_source_info(),
            Self::AutoDetect => settings.auto_detect_enabled(),
            Self::DarkMode => settings.dark_mode(),
        }
    }

    pub fn set(&self, settings: &mut Settings, enabled: bool) {
        let field = match self {
            Self::SourceInfo => &mut settings.show_source_info,
            Self::AutoDetect => &mut settings.auto_detect_enabled,
            Self::DarkMode => &mut settings.dark_mode,
        };
        *field = Some(enabled);
    }

    /// Message key of the confirmation shown after switching.
    pub fn notify_key(&self, enabled: bool) -> &'static str {
        match (self, enabled) {
            (Self::SourceInfo, true) => "notifySourceEnabled",
            (Self::SourceInfo, false) => "notifySourceDisabled",
            (Self::AutoDetect, true) => "notifyAutoDetectEnabled",
            (Self::AutoDetect, false) => "notifyAutoDetectDisabled",
            (Self::DarkMode, true) => "notifyDarkModeEnabled",
            (Self::DarkMode, false) => "notifyDarkModeDisabled",
        }
    }

    /// Label key describing the toggle itself.
    pub fn label_key(&self) -> &'static str {
        match self {
            Self::SourceInfo => "sourceInfoLabel",
            Self::AutoDetect => "autoDetectLabel",
            Self::DarkMode => "darkModeLabel",
        }
    }
}

/// Visual state of one switch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToggleState {
    pub active: bool,
    /// Localized "on"/"off" text.
    pub label: String,
}

/// Everything the popup currently displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopupView {
    pub title: String,
    pub section: Section,
    pub theme: Theme,
    pub toggles: BTreeMap<Toggle, ToggleState>,
    pub language: String,
    pub timezone: String,
    /// Static texts by message key.
    pub texts: BTreeMap<String, String>,
}

impl PopupView {
    pub fn toggle(&self, toggle: Toggle) -> Option<&ToggleState> {
        self.toggles.get(&toggle)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.texts.get(key).map(String::as_str)
    }

    /// Plain-text rendering for a terminal.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} ({} theme)", self.title, self.theme.as_str());
        let _ = writeln!(out);

        match self.section {
            Section::Login => {
                for key in ["loginHeading", "loginDescription", "googleLoginButton"] {
                    if let Some(text) = self.text(key) {
                        let _ = writeln!(out, "{text}");
                    }
                }
            }
            Section::Settings => {
                if let Some(heading) = self.text("settingsHeading") {
                    let _ = writeln!(out, "{heading}");
                }
                for toggle in Toggle::ALL {
                    let name = self.text(toggle.label_key()).unwrap_or(toggle.label_key());
                    if let Some(state) = self.toggle(toggle) {
                        let mark = if state.active { "x" } else { " " };
                        let _ = writeln!(out, "  [{mark}] {name}: {}", state.label);
                    }
                }
                let language = self.text("languageLabel").unwrap_or("languageLabel");
                let timezone = self.text("timezoneLabel").unwrap_or("timezoneLabel");
                let _ = writeln!(out, "  {language}: {}", self.language);
                let _ = writeln!(out, "  {timezone}: {}", self.timezone);
                if let Some(disconnect) = self.text("disconnectButton") {
                    let _ = writeln!(out, "  <{disconnect}>");
                }
            }
        }
        out
    }
}
