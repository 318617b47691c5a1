use super::*;

#[test]
fn test_defaults_when_file_missing() {
    let cfg = load("/nonexistent/__ninja_config__.toml").unwrap();
    assert_eq!(cfg.ninja.log_level, "info");
    assert_eq!(cfg.locale.fallback, "en");
    assert_eq!(cfg.locale.source, BundleSourceKind::Fs);
    assert_eq!(cfg.auth.token_env, "NINJA_AUTH_TOKEN");
    assert_eq!(cfg.popup.transition_delay_ms, 1000);
}

#[test]
fn test_partial_toml_fills_defaults() {
    let toml_str = r#"
        [locale]
        source = "http"
        base_url = "https://example.com/ext"

        [popup]
        transition_delay_ms = 0
    "#;
    let cfg: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(cfg.locale.source, BundleSourceKind::Http);
    assert_eq!(cfg.locale.base_url, "https://example.com/ext");
    assert_eq!(cfg.locale.fallback, "en");
    assert_eq!(cfg.locale.locales_dir, ".");
    assert_eq!(cfg.popup.transition_delay_ms, 0);
    assert_eq!(cfg.ninja.data_dir, "~/.schedule-ninja");
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[ninja]\ndata_dir = \"/tmp/ninja\"\n\n[locale]\nfallback = \"ko\"\n",
    )
    .unwrap();

    let cfg = load(path.to_str().unwrap()).unwrap();
    assert_eq!(cfg.locale.fallback, "ko");
    assert_eq!(cfg.settings_path(), "/tmp/ninja/settings.json");
    assert_eq!(cfg.token_path(), "/tmp/ninja/token");
}

#[test]
fn test_load_rejects_malformed_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[locale\nfallback = ").unwrap();

    let err = load(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, NinjaError::Config(_)));
}

#[test]
fn test_explicit_paths_override_data_dir() {
    let mut cfg = Config::default();
    cfg.storage.settings_path = "/var/lib/ninja/s.json".to_string();
    cfg.auth.token_path = "/var/lib/ninja/t".to_string();
    assert_eq!(cfg.settings_path(), "/var/lib/ninja/s.json");
    assert_eq!(cfg.token_path(), "/var/lib/ninja/t");
}

#[test]
fn test_shellexpand_leaves_plain_paths() {
    assert_eq!(shellexpand("/abs/path"), "/abs/path");
    assert_eq!(shellexpand("relative"), "relative");
}
