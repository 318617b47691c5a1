//! User preferences persisted under the `settings` key of the extension store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Language shown in the language select when none is stored.
pub const DEFAULT_LANGUAGE_SELECT: &str = "ko";
/// Timezone shown in the timezone select when none is stored.
pub const DEFAULT_TIMEZONE: &str = "Asia/Seoul";

/// The popup's view of the shared settings object.
///
/// Every field is optional because other extension components write the same
/// object; unknown fields are carried through `extra` so a read-modify-write
/// never drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_source_info: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_detect_enabled: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Settings {
    /// Source info is shown unless explicitly disabled.
    pub fn show_source_info(&self) -> bool {
        self.show_source_info != Some(false)
    }

    /// Auto-detection is on unless explicitly disabled.
    pub fn auto_detect_enabled(&self) -> bool {
        self.auto_detect_enabled != Some(false)
    }

    /// Dark mode is off unless explicitly enabled.
    pub fn dark_mode(&self) -> bool {
        self.dark_mode == Some(true)
    }

    /// Stored language, ignoring empty strings.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref().filter(|l| !l.is_empty())
    }

    /// Value for the language select.
    pub fn language_select(&self) -> &str {
        self.language().unwrap_or(DEFAULT_LANGUAGE_SELECT)
    }

    /// Value for the timezone select.
    pub fn timezone_select(&self) -> &str {
        self.timezone
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TIMEZONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_defaults_for_empty_settings() {
        let s = Settings::default();
        assert!(s.show_source_info());
        assert!(s.auto_detect_enabled());
        assert!(!s.dark_mode());
        assert_eq!(s.language(), None);
        assert_eq!(s.language_select(), "ko");
        assert_eq!(s.timezone_select(), "Asia/Seoul");
    }

    #[test]
    fn test_camel_case_wire_format() {
        let s: Settings = serde_json::from_str(
            r#"{"language":"en","darkMode":true,"showSourceInfo":false,"autoDetectEnabled":false,"timezone":"UTC"}"#,
        )
        .unwrap();
        assert_eq!(s.language(), Some("en"));
        assert!(s.dark_mode());
        assert!(!s.show_source_info());
        assert!(!s.auto_detect_enabled());
        assert_eq!(s.timezone_select(), "UTC");
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let raw = r#"{"darkMode":false,"calendarId":"primary","syncWindowDays":14}"#;
        let mut s: Settings = serde_json::from_str(raw).unwrap();
        s.dark_mode = Some(true);

        let value = serde_json::to_value(&s).unwrap();
        assert_eq!(value["darkMode"], true);
        assert_eq!(value["calendarId"], "primary");
        assert_eq!(value["syncWindowDays"], 14);
        assert!(value.get("language").is_none(), "unset fields stay absent");
    }

    #[test]
    fn test_empty_language_is_treated_as_unset() {
        let s = Settings {
            language: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(s.language(), None);
        assert_eq!(s.language_select(), "ko");
    }
}
