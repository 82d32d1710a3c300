//! Shared building blocks used by every layer of the backend.
//!
//! - `types`: response envelopes and the health payload
//! - `validation`: declarative request field rules
//! - `pagination`: limit / page-number normalization
//! - `utils::logging`: tracing bootstrap

pub mod types;
pub mod utils;
pub mod pagination;
pub mod validation;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }
}
