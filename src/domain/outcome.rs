//! Tagged operation outcomes
//!
//! Every operation on the public surface reports a status, an optional
//! payload and an optional human-readable message.

use serde::Serialize;

use super::DomainError;

/// Outcome status of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeStatus {
    Ok,
    Created,
    NoContent,
    BadRequest,
    NotFound,
    InternalError,
}

impl From<&DomainError> for OutcomeStatus {
    fn from(error: &DomainError) -> Self {
        match error {
            DomainError::Validation { .. } => Self::BadRequest,
            DomainError::NotFound { .. } => Self::NotFound,
            DomainError::Internal { .. }
            | DomainError::Conflict { .. }
            | DomainError::Storage { .. } => Self::InternalError,
        }
    }
}

/// Result of an operation on the public surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<T> {
    pub status: OutcomeStatus,
    pub payload: Option<T>,
    pub message: Option<String>,
}

impl<T> Outcome<T> {
    pub fn ok(payload: T, message: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Ok,
            payload: Some(payload),
            message: Some(message.into()),
        }
    }

    pub fn created(payload: T, message: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Created,
            payload: Some(payload),
            message: Some(message.into()),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: OutcomeStatus::NoContent,
            payload: None,
            message: None,
        }
    }

    pub fn failure(error: &DomainError) -> Self {
        Self {
            status: OutcomeStatus::from(error),
            payload: None,
            message: Some(error.message().to_string()),
        }
    }

    /// Map a rule result, using `on_success` to build the success outcome
    pub fn from_result<U>(
        result: Result<U, DomainError>,
        on_success: impl FnOnce(U) -> Self,
    ) -> Self {
        match result {
            Ok(value) => on_success(value),
            Err(error) => Self::failure(&error),
        }
    }
}
