//! SeaORM entities for the business backend plus small write helpers that
//! translate unique-index violations into [`errors::ModelError::Conflict`].

pub mod errors;
pub mod db;
pub mod customer_type_static;
pub mod customer;
pub mod vendor;
pub mod invoice;
pub mod invoice_item;
pub mod user;
pub mod user_credentials;
pub mod login;

#[cfg(test)]
mod tests;
