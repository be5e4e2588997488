use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("input is empty: a header line is required")]
    EmptyInput,

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failure scoped to a single data row. Never escapes a parse run; it is
/// recorded as a `ParseError` and the run moves on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    #[error("{field} value '{value}' is out of numeric range")]
    NonFinite { field: &'static str, value: String },

    #[error("price range is inverted: min {min} > max {max}")]
    InvertedPriceRange { min: f64, max: f64 },
}

impl RowError {
    /// Canonical field the failure is attributed to.
    pub fn field(&self) -> &'static str {
        match self {
            RowError::NonFinite { field, .. } => field,
            RowError::InvertedPriceRange { .. } => "price",
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
