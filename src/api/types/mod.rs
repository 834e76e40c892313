//! HTTP types shared by all handlers
//!
//! Every body, success or failure, is a `{ "message": ..., "data": ... }`
//! envelope.

pub mod error;
pub mod json;
pub mod path;
pub mod response;

pub use error::ApiError;
pub use json::Json;
pub use path::parse_id;
pub use response::ApiResponse;
