use thiserror::Error;

use crate::domain::TransactionId;

/// Input field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Kind,
    Amount,
    Status,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Date => "date",
            Field::Kind => "kind",
            Field::Amount => "amount",
            Field::Status => "status",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: Field, reason: String },

    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(field: Field, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// The field a validation error refers to, if any.
    pub fn invalid_field(&self) -> Option<Field> {
        match self {
            AppError::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}
