use thiserror::Error;

/// Errors raised while turning a capture into a match report.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// No decode strategy produced a JSON document.
    #[error("decode error: {0}")]
    Decode(String),

    /// A required telemetry or player field is absent or has the wrong shape.
    #[error("missing field: {0}")]
    MissingField(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
