//! Response envelope and the HTTP mapping of operation outcomes

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::{Outcome, OutcomeStatus};

/// Response body envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: Option<String>,
    pub data: Option<T>,
}

/// HTTP status for an outcome status
pub fn status_code(status: OutcomeStatus) -> StatusCode {
    match status {
        OutcomeStatus::Ok => StatusCode::OK,
        OutcomeStatus::Created => StatusCode::CREATED,
        OutcomeStatus::NoContent => StatusCode::NO_CONTENT,
        OutcomeStatus::BadRequest => StatusCode::BAD_REQUEST,
        OutcomeStatus::NotFound => StatusCode::NOT_FOUND,
        OutcomeStatus::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl<T> IntoResponse for Outcome<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let status = status_code(self.status);

        if status == StatusCode::NO_CONTENT {
            return status.into_response();
        }

        let body = ApiResponse {
            message: self.message,
            data: self.payload,
        };
        (status, Json(body)).into_response()
    }
}
