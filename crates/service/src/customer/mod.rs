//! Customers: domain types, repository abstraction (SeaORM + in-memory) and
//! the business service.

pub mod domain;
pub mod repository;
pub mod seaorm;
pub mod service;

pub use service::CustomerService;
