use thiserror::Error;

/// Top-level error type for Schedule Ninja.
#[derive(Debug, Error)]
pub enum NinjaError {
    /// Locale bundle could not be fetched or parsed.
    #[error("locale error: {0}")]
    Locale(String),

    /// Settings storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Identity provider / token cache error.
    #[error("identity error: {0}")]
    Identity(String),

    /// Per-tab message delivery error.
    #[error("messaging error: {0}")]
    Messaging(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
