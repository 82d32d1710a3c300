use common::validation::FieldError;
use models::errors::ModelError;
use sea_orm::DbErr;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("input validation failed ({} field errors)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid credentials")]
    Unauthorized,
    #[error("database error while trying to {operation}: {source}")]
    Database {
        operation: &'static str,
        #[source]
        source: DbErr,
    },
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("token error: {0}")]
    Token(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Single body-field validation failure.
    pub fn invalid(param: &str, msg: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Validation(vec![FieldError::body(param, msg, value.into())])
    }

    /// Stable tag used in the error envelope and in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "INPUT_VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Database { .. } => "DB_OPERATION_ERROR",
            Self::Hash(_) => "HASH_ERROR",
            Self::Token(_) => "TOKEN_ERROR",
        }
    }

    /// Map a model error that the caller has no specific handling for.
    ///
    /// Conflicts on a column without a dedicated message are reported against
    /// the column name.
    pub fn from_model(operation: &'static str, err: ModelError) -> Self {
        match err {
            ModelError::Validation(msg) => Self::invalid("body", msg, Value::Null),
            ModelError::Conflict { field } => Self::invalid(field, format!("The {field} already exists."), Value::Null),
            ModelError::ForeignKey { field } => {
                Self::invalid(field, format!("The {field} refers to a missing or dependent record."), Value::Null)
            }
            ModelError::Db(source) => Self::Database { operation, source },
        }
    }
}

/// Closure form of [`ServiceError::from_model`] for `map_err`.
pub fn db(operation: &'static str) -> impl FnOnce(ModelError) -> ServiceError {
    move |e| ServiceError::from_model(operation, e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(ServiceError::invalid("Email", "bad", "x").kind(), "INPUT_VALIDATION_ERROR");
        assert_eq!(ServiceError::Unauthorized.kind(), "UNAUTHORIZED");
        let e = ServiceError::from_model("list customers", ModelError::Db(DbErr::Custom("down".into())));
        assert_eq!(e.kind(), "DB_OPERATION_ERROR");
        assert!(e.to_string().contains("list customers"));
    }

    #[test]
    fn database_error_keeps_source() {
        use std::error::Error as _;
        let e = ServiceError::from_model("add customer", ModelError::Db(DbErr::Custom("down".into())));
        assert!(e.source().is_some());
    }

    #[test]
    fn foreign_key_violation_is_a_client_error() {
        let e = ServiceError::from_model("add invoice", ModelError::ForeignKey { field: "shop_id" });
        assert_eq!(e.kind(), "INPUT_VALIDATION_ERROR");
        match e {
            ServiceError::Validation(errs) => assert_eq!(errs[0].param, "shop_id"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn generic_conflict_names_the_column() {
        match ServiceError::from_model("add", ModelError::Conflict { field: "invoice_number" }) {
            ServiceError::Validation(errs) => assert_eq!(errs[0].param, "invoice_number"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
