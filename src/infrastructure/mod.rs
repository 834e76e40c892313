//! Infrastructure layer - Storage, audit and rule service implementations

pub mod audit;
pub mod company;
pub mod logging;
pub mod project;
pub mod storage;
pub mod team;
pub mod user;
