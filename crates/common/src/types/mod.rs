use serde::{Deserialize, Serialize};

use crate::validation::FieldError;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Uniform success body: `{ status, message, data }`.
///
/// `data` is left out of the JSON when there is nothing to return (deletes).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self { status: 200, message: message.into(), data: Some(data) }
    }
}

impl Envelope<()> {
    pub fn message_only(message: impl Into<String>) -> Self {
        Self { status: 200, message: message.into(), data: None }
    }
}

/// Uniform error body. `errors` is only present for input validation failures.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorEnvelope {
    pub status: u16,
    pub message: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_only_envelope_omits_data() {
        let v = serde_json::to_value(Envelope::message_only("Customer deleted successfully.")).unwrap();
        assert_eq!(v, serde_json::json!({"status": 200, "message": "Customer deleted successfully."}));
    }

    #[test]
    fn error_envelope_omits_empty_errors() {
        let e = ErrorEnvelope { status: 404, message: "Customer not found.".into(), kind: "NOT_FOUND".into(), errors: None };
        let v = serde_json::to_value(e).unwrap();
        assert!(v.get("errors").is_none());
        assert_eq!(v["kind"], "NOT_FOUND");
    }
}
