//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access (repository traits per resource).
//! - Every repository has a SeaORM implementation and an in-memory one for tests.
//! - Errors are folded into [`errors::ServiceError`] with a stable `kind()` tag.

pub mod auth;
pub mod customer;
pub mod errors;
pub mod invoice;
pub mod login;
pub mod repositories;
pub mod user;
pub mod vendor;

#[cfg(test)]
pub mod test_support;
