use thiserror::Error;

/// tunefacts error types
#[derive(Error, Debug)]
pub enum TunefactsError {
    /// A single input file could not be decoded as text
    #[error("could not read {name}: {reason}")]
    Read { name: String, reason: String },

    /// Failed to parse JSON where JSON was expected
    #[error("parse error: {0}")]
    Parse(String),

    /// No history events survived normalization
    #[error("No streaming history found.")]
    NoHistoryFound,

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl TunefactsError {
    pub fn read(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Read {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for tunefacts
pub type Result<T> = std::result::Result<T, TunefactsError>;
