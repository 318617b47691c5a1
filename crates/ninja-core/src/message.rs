use serde::{Deserialize, Serialize};

/// Identifier of an open browser tab.
pub type TabId = u64;

/// A message broadcast from the popup to content scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum TabMessage {
    /// Auto-detection was switched on or off.
    UpdateAutoDetectSetting { enabled: bool },
}

/// Severity of a popup notification banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Danger,
}

impl NotificationKind {
    /// CSS-style class suffix (e.g. `is-success`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }
}

/// A transient banner shown in the popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Danger,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_message_wire_format() {
        let msg = TabMessage::UpdateAutoDetectSetting { enabled: true };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"action": "updateAutoDetectSetting", "enabled": true})
        );
    }

    #[test]
    fn test_notification_constructors() {
        assert_eq!(Notification::success("ok").kind, NotificationKind::Success);
        assert_eq!(Notification::danger("no").kind.as_str(), "danger");
    }
}
