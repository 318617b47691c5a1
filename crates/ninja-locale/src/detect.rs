//! Default language detection when the user never picked one.

/// Pick the popup's default language from the UI language list.
///
/// Korean when any candidate is a Korean locale, English otherwise.
pub fn detect_default_language<I, S>(ui_languages: I) -> &'static str
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let korean = ui_languages
        .into_iter()
        .any(|lang| lang.as_ref().to_lowercase().starts_with("ko"));
    if korean {
        "ko"
    } else {
        "en"
    }
}

/// The host's preferred locales, most preferred first.
pub fn system_languages() -> Vec<String> {
    sys_locale::get_locales().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_korean_anywhere_in_list() {
        assert_eq!(detect_default_language(["en-US", "ko-KR"]), "ko");
        assert_eq!(detect_default_language(["KO"]), "ko");
    }

    #[test]
    fn test_defaults_to_english() {
        assert_eq!(detect_default_language(["fr-FR", "de"]), "en");
        assert_eq!(detect_default_language(Vec::<String>::new()), "en");
        assert_eq!(detect_default_language([""]), "en");
    }
}
