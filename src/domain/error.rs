use crate::domain::query::QueryError;
use thiserror::Error;

/// Message returned for every ownership-gate failure.
pub const NOT_PERMITTED: &str = "operation not permitted for this user";

/// Errors surfaced by the services.
///
/// Authorization failures are kept apart from not-found and field errors so the
/// transport layer can tell "does not exist" from "exists but you can't touch it".
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    InvalidQuery(#[from] QueryError),

    #[error("invalid field '{field}': {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("{0}")]
    Forbidden(String),

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error(transparent)]
    Storage(anyhow::Error),
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn not_permitted() -> Self {
        DomainError::Forbidden(NOT_PERMITTED.to_string())
    }

    pub fn not_found(resource: &'static str, id: i64) -> Self {
        DomainError::NotFound { resource, id }
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, DomainError::Forbidden(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::Validation { .. })
    }
}

impl From<anyhow::Error> for DomainError {
    fn from(err: anyhow::Error) -> Self {
        DomainError::Storage(err)
    }
}
