//! Company domain module
//!
//! Companies own projects. They are created at startup and only read
//! afterwards.

mod entity;
mod repository;

pub use entity::{Company, CompanyId};
pub use repository::CompanyRepository;
