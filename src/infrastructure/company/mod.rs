//! Company infrastructure implementations

mod repository;
mod service;

pub use repository::StorageCompanyRepository;
pub use service::CompanyService;
