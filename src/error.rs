use thiserror::Error;

/// Main error type for the statistics engine
#[derive(Error, Debug)]
pub enum ScoutError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Dataset errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset schema error: missing required columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    // Narrative service errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Narrative service error: {0}")]
    Narrative(String),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience result type
pub type Result<T> = std::result::Result<T, ScoutError>;
