//! `messages.json` bundles and placeholder expansion.
//!
//! Format follows the WebExtension `_locales` layout:
//!
//! ```json
//! {
//!   "greeting": {
//!     "message": "Hello, $user$!",
//!     "placeholders": { "user": { "content": "$1", "example": "Kim" } }
//!   }
//! }
//! ```

use ninja_core::error::NinjaError;
use serde::Deserialize;
use std::collections::HashMap;

/// A named placeholder referenced as `$name$` from a message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Placeholder {
    /// Replacement text; may reference positional substitutions (`$1`..`$9`).
    pub content: String,
    #[serde(default)]
    pub example: Option<String>,
}

/// One localized message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageEntry {
    pub message: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub placeholders: Option<HashMap<String, Placeholder>>,
}

impl MessageEntry {
    /// Render the message with positional substitutions applied.
    pub fn format(&self, substitutions: &[&str]) -> String {
        expand(&self.message, substitutions, self.placeholders.as_ref())
    }

    /// Named placeholder, matched case-insensitively.
    pub fn placeholder(&self, name: &str) -> Option<&Placeholder> {
        self.placeholders
            .as_ref()?
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, p)| p)
    }
}

/// All messages of one locale. Immutable once parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LocaleBundle {
    entries: HashMap<String, MessageEntry>,
}

impl LocaleBundle {
    /// Parse a `messages.json` body.
    pub fn parse(body: &str) -> Result<Self, NinjaError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn get(&self, key: &str) -> Option<&MessageEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Formatted message for `key`, if present.
    pub fn message(&self, key: &str, substitutions: &[&str]) -> Option<String> {
        self.get(key).map(|e| e.format(substitutions))
    }
}

impl FromIterator<(String, MessageEntry)> for LocaleBundle {
    fn from_iter<T: IntoIterator<Item = (String, MessageEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Expand `$$`, `$1`..`$9`, and (when `placeholders` is given) `$name$`.
///
/// Placeholder content is expanded for positional substitutions only, so a
/// placeholder can never pull in another placeholder.
fn expand(
    text: &str,
    substitutions: &[&str],
    placeholders: Option<&HashMap<String, Placeholder>>,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];

        match tail.as_bytes().first().copied() {
            Some(b'$') => {
                out.push('$');
                rest = &tail[1..];
            }
            Some(d @ b'1'..=b'9') => {
                if let Some(sub) = substitutions.get(usize::from(d - b'1')) {
                    out.push_str(sub);
                }
                rest = &tail[1..];
            }
            _ => {
                let named = placeholders.and_then(|map| {
                    let (name, after) = split_placeholder(tail)?;
                    let content = map
                        .iter()
                        .find(|(k, _)| k.eq_ignore_ascii_case(name))
                        .map(|(_, p)| p.content.as_str())?;
                    Some((content, after))
                });
                match named {
                    Some((content, after)) => {
                        out.push_str(&expand(content, substitutions, None));
                        rest = after;
                    }
                    None => {
                        out.push('$');
                        rest = tail;
                    }
                }
            }
        }
    }

    out.push_str(rest);
    out
}

/// Split `name$rest` into `(name, rest)` when `name` is a valid placeholder name.
fn split_placeholder(tail: &str) -> Option<(&str, &str)> {
    let end = tail.find('$')?;
    let name = &tail[..end];
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '@');
    valid.then(|| (name, &tail[end + 1..]))
}
