use thiserror::Error;

/// Errors returned by the learners and the table model.
#[derive(Debug, Error)]
pub enum MlError {
    /// A referenced attribute, target or sample field is missing or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("dataset error: {0}")]
    Dataset(String),
}

impl MlError {
    pub(crate) fn missing_column(kind: &str, name: &str) -> Self {
        MlError::InvalidInput(format!("{kind} column '{name}' not found"))
    }
}

impl From<csv::Error> for MlError {
    fn from(err: csv::Error) -> Self {
        MlError::Dataset(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MlError>;
