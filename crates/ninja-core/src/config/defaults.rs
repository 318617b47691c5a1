// --- Default value functions ---

pub(super) fn default_data_dir() -> String {
    "~/.schedule-ninja".to_string()
}
pub(super) fn default_log_level() -> String {
    "info".to_string()
}
pub(super) fn default_token_env() -> String {
    "NINJA_AUTH_TOKEN".to_string()
}
pub(super) fn default_transition_delay_ms() -> u64 {
    1000
}
pub(super) fn default_fallback_locale() -> String {
    "en".to_string()
}
pub(super) fn default_locales_dir() -> String {
    ".".to_string()
}
