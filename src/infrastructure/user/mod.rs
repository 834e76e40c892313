//! User infrastructure implementations

mod repository;
mod service;

pub use repository::StorageUserRepository;
pub use service::UserService;
