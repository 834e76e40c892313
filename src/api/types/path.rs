//! Path parameter parsing

use std::str::FromStr;

use super::error::ApiError;

/// Parse an identifier from a path segment; `what` names it in the error
pub fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid {} id: {}", what, raw)))
}
