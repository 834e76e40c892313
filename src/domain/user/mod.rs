//! User domain
//!
//! Users carry an organizational role. Managers lead teams, developers are
//! members of at most one team at a time.

mod entity;
mod repository;
mod validation;

pub use entity::{Role, User, UserId};
pub use repository::UserRepository;
pub use validation::{validate_username, UserValidationError};
