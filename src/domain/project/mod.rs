//! Project domain module
//!
//! A project belongs to one company and spans an inclusive date range.
//! The project named "Default" is a sentinel that teams fall back to; it can
//! be read and referenced but never modified or deleted.

mod entity;
mod repository;
mod validation;

pub use entity::{Project, ProjectId, ProjectPatch};
pub use repository::ProjectRepository;
pub use validation::{
    merge_date_range, validate_date_range, validate_project_name, ProjectValidationError,
};
