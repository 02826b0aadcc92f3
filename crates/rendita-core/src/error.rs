use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenditaError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Maturity date {maturity_date} is not after purchase date {purchase_date}")]
    PastMaturity {
        purchase_date: NaiveDate,
        maturity_date: NaiveDate,
    },

    #[error("Unsupported stamp duty mode: {0}")]
    UnsupportedMode(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl RenditaError {
    /// Shorthand used by the validators.
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        RenditaError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field, when the failure is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            RenditaError::InvalidInput { field, .. } => Some(field),
            RenditaError::PastMaturity { .. } => Some("maturity_date"),
            RenditaError::UnsupportedMode(_) => Some("stamp_duty_mode"),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RenditaError {
    fn from(e: serde_json::Error) -> Self {
        RenditaError::SerializationError(e.to_string())
    }
}
