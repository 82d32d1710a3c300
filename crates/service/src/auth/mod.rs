//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Password hashing lives here too; `UserService` uses it when registering.

pub mod domain;
pub mod password;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::{AuthService, TokenSettings};
