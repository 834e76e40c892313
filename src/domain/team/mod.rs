//! Team domain module
//!
//! A team is led by one manager and works on one project. Developers join
//! a team through their own user record.

mod entity;
mod repository;
mod validation;

pub use entity::{Team, TeamId, TeamPatch};
pub use repository::TeamRepository;
pub use validation::{validate_team_name, TeamValidationError};
