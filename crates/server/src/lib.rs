pub mod errors;
pub mod extract;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod startup;
pub mod state;
pub mod validators;

pub use startup::{load_config, run};
