//! Popup controller: toggles, selects, sign-in, and locale-aware rendering.
//!
//! One `Popup` lives for one popup session and owns that session's
//! [`LocaleResolver`]. Every handler is a short read/modify/write against the
//! external services followed by a view update.


use ninja_core::{
    error::NinjaError,
    message::{Notification, TabMessage},
    settings::Settings,
    traits::{IdentityProvider, Notifier, SettingsStore, TabMessenger},
};
use ninja_locale::{detect_default_language, LocaleResolver};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::view::{PopupView, Section, Theme, Toggle, ToggleState, POPUP_TEXT_KEYS};

/// Delay before switching sections after sign-in or disconnect.
pub const DEFAULT_TRANSITION_DELAY: Duration = Duration::from_millis(1000);

/// External services the popup delegates to.
#[derive(Clone)]
pub struct PopupServices {
    pub settings: Arc<dyn SettingsStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub tabs: Arc<dyn TabMessenger>,
    pub notifier: Arc<dyn Notifier>,
}

pub struct Popup {
    services: PopupServices,
    locale: LocaleResolver,
    ui_languages: Vec<String>,
    transition_delay: Duration,
    view: PopupView,
}

impl Popup {
    pub fn new(services: PopupServices, locale: LocaleResolver) -> Self {
        Self {
            services,
            locale,
            ui_languages: Vec::new(),
            transition_delay: DEFAULT_TRANSITION_DELAY,
            view: PopupView::default(),
        }
    }

    /// UI languages used to pick a default when no language is stored.
    pub fn with_ui_languages(mut self, languages: Vec<String>) -> Self {
        self.ui_languages = languages;
        self
    }

    pub fn with_transition_delay(mut self, delay: Duration) -> Self {
        self.transition_delay = delay;
        self
    }

    pub fn view(&self) -> &PopupView {
        &self.view
    }

    pub fn locale(&self) -> &LocaleResolver {
        &self.locale
    }

    /// Localized text for `key`.
    pub fn t(&self, key: &str) -> String {
        self.locale.t(key)
    }

    /// Initial pass when the popup opens.
    pub async fn open(&mut self) -> Result<(), NinjaError> {
        self.apply_i18n().await?;
        self.load_settings().await?;
        self.check_login_status().await;
        Ok(())
    }

    /// Pick the session locale and re-render every localized string.
    ///
    /// Returns the locale in effect.
    pub async fn apply_i18n(&mut self) -> Result<String, NinjaError> {
        let settings = self.services.settings.get().await?;
        let preferred = settings
            .language()
            .map(str::to_string)
            .unwrap_or_else(|| detect_default_language(&self.ui_languages).to_string());
        self.apply_theme(settings.dark_mode());

        let chosen = self.locale.initialize_locale(&preferred).await;
        info!("popup locale: {chosen} (preferred {preferred})");

        self.view.title = self.t("popupTitle");
        for key in POPUP_TEXT_KEYS {
            let text = self.t(key);
            if !text.is_empty() {
                self.view.texts.insert((*key).to_string(), text);
            }
        }
        self.render_toggles(&settings);
        Ok(chosen)
    }

    /// Reflect stored settings in toggles, theme, and selects.
    pub async fn load_settings(&mut self) -> Result<(), NinjaError> {
        let settings = self.services.settings.get().await?;
        self.render_toggles(&settings);
        self.apply_theme(settings.dark_mode());
        self.view.language = settings.language_select().to_string();
        self.view.timezone = settings.timezone_select().to_string();
        Ok(())
    }

    /// Show settings when a cached token exists, the sign-in screen otherwise.
    pub async fn check_login_status(&mut self) -> bool {
        let signed_in = match self.services.identity.get_auth_token(false).await {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!("token lookup failed: {e}");
                false
            }
        };
        if signed_in {
            self.show_settings_section();
        } else {
            self.show_login_section();
        }
        signed_in
    }

    pub fn show_login_section(&mut self) {
        self.view.section = Section::Login;
    }

    pub fn show_settings_section(&mut self) {
        self.view.section = Section::Settings;
    }

    /// Flip a toggle, persist it, and run its side effects.
    ///
    /// Returns the new value.
    pub async fn toggle(&mut self, toggle: Toggle) -> Result<bool, NinjaError> {
        let mut settings = self.services.settings.get().await?;
        let enabled = !toggle.is_enabled(&settings);
        toggle.set(&mut settings, enabled);
        self.services.settings.set(&settings).await?;

        self.set_toggle(toggle, enabled);
        match toggle {
            Toggle::DarkMode => self.apply_theme(enabled),
            Toggle::AutoDetect => {
                self.broadcast(&TabMessage::UpdateAutoDetectSetting { enabled })
                    .await
            }
            Toggle::SourceInfo => {}
        }

        self.notify(Notification::success(self.t(toggle.notify_key(enabled))));
        Ok(enabled)
    }

    pub async fn toggle_source_info(&mut self) -> Result<bool, NinjaError> {
        self.toggle(Toggle::SourceInfo).await
    }

    pub async fn toggle_auto_detect(&mut self) -> Result<bool, NinjaError> {
        self.toggle(Toggle::AutoDetect).await
    }

    pub async fn toggle_dark_mode(&mut self) -> Result<bool, NinjaError> {
        self.toggle(Toggle::DarkMode).await
    }

    /// Persist a new language and re-render in it.
    pub async fn update_language(&mut self, language: &str) -> Result<(), NinjaError> {
        self.update_settings(|s| s.language = Some(language.to_string()))
            .await?;
        self.view.language = language.to_string();
        self.apply_i18n().await?;
        self.notify(Notification::success(self.t("notifyLanguageUpdated")));
        Ok(())
    }

    pub async fn update_timezone(&mut self, timezone: &str) -> Result<(), NinjaError> {
        self.update_settings(|s| s.timezone = Some(timezone.to_string()))
            .await?;
        self.view.timezone = timezone.to_string();
        self.notify(Notification::success(self.t("notifyTimezoneUpdated")));
        Ok(())
    }

    /// Interactive sign-in. Failure is reported as a notification.
    pub async fn login(&mut self) -> bool {
        let token = match self.services.identity.get_auth_token(true).await {
            Ok(token) => token,
            Err(e) => {
                warn!("interactive sign-in failed: {e}");
                None
            }
        };

        if token.is_none() {
            self.notify(Notification::danger(self.t("authFailure")));
            return false;
        }

        self.notify(Notification::success(self.t("authSuccess")));
        self.transition().await;
        self.show_settings_section();
        true
    }

    /// Text of the disconnect confirmation dialog.
    pub fn confirm_prompt(&self) -> String {
        self.t("confirmDisconnect")
    }

    /// Sign out after the user confirmed. Returns whether tokens were cleared.
    pub async fn disconnect(&mut self, confirmed: bool) -> Result<bool, NinjaError> {
        if !confirmed {
            debug!("disconnect cancelled");
            return Ok(false);
        }
        self.services.identity.clear_all_cached_auth_tokens().await?;
        self.notify(Notification::success(self.t("disconnectSuccess")));
        self.transition().await;
        self.show_login_section();
        Ok(true)
    }

    async fn update_settings(&self, update: impl FnOnce(&mut Settings)) -> Result<(), NinjaError> {
        let mut settings = self.services.settings.get().await?;
        update(&mut settings);
        self.services.settings.set(&settings).await
    }

    /// Send to every tab; tabs without a listener are skipped.
    async fn broadcast(&self, message: &TabMessage) {
        let tabs = match self.services.tabs.tabs().await {
            Ok(tabs) => tabs,
            Err(e) => {
                warn!("could not list tabs: {e}");
                return;
            }
        };
        for tab in tabs {
            if let Err(e) = self.services.tabs.send(tab, message).await {
                debug!("tab {tab} skipped: {e}");
            }
        }
    }

    fn render_toggles(&mut self, settings: &Settings) {
        for toggle in Toggle::ALL {
            self.set_toggle(toggle, toggle.is_enabled(settings));
        }
    }

    fn set_toggle(&mut self, toggle: Toggle, active: bool) {
        let label = self.t(if active { "toggleOn" } else { "toggleOff" });
        self.view
            .toggles
            .insert(toggle, ToggleState { active, label });
    }

    fn apply_theme(&mut self, dark_mode: bool) {
        self.view.theme = Theme::from_dark_mode(dark_mode);
    }

    fn notify(&self, notification: Notification) {
        self.services.notifier.notify(&notification);
    }

    async fn transition(&self) {
        if !self.transition_delay.is_zero() {
            tokio::time::sleep(self.transition_delay).await;
        }
    }
}
