//! Application users and their password credentials.

pub mod domain;
pub mod repository;
pub mod seaorm;
pub mod service;

pub use service::UserService;
