use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    /// A unique index rejected the write; `field` is the column it guards.
    #[error("duplicate value for {field}")]
    Conflict { field: &'static str },
    /// A foreign key rejected the write or delete; `field` is the referencing column.
    #[error("foreign key violation on {field}")]
    ForeignKey { field: &'static str },
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

/// `(constraint name, column)` pairs for the named constraints of one table.
pub type Constraints = &'static [(&'static str, &'static str)];

/// Turn a unique or foreign-key violation on one of `constraints` into
/// [`ModelError::Conflict`] / [`ModelError::ForeignKey`]; anything else stays
/// a database error.
pub fn map_write_err(err: DbErr, constraints: Constraints) -> ModelError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => match violated_column(&msg, constraints) {
            Some(field) => ModelError::Conflict { field },
            None => ModelError::Db(err),
        },
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => match violated_column(&msg, constraints) {
            Some(field) => ModelError::ForeignKey { field },
            None => ModelError::Db(err),
        },
        _ => ModelError::Db(err),
    }
}

fn violated_column(msg: &str, constraints: Constraints) -> Option<&'static str> {
    constraints
        .iter()
        .find(|(name, _)| msg.contains(&format!("\"{name}\"")))
        .map(|(_, column)| *column)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONSTRAINTS: Constraints = &[
        ("uniq_customer_mobile_active", "customer_mobile_number"),
        ("uniq_customer_email_active", "customer_email_id"),
        ("fk_invoice_customer", "customer_id"),
    ];

    #[test]
    fn finds_column_from_postgres_message() {
        let msg = r#"duplicate key value violates unique constraint "uniq_customer_email_active""#;
        assert_eq!(violated_column(msg, CONSTRAINTS), Some("customer_email_id"));
    }

    #[test]
    fn finds_column_for_blocked_delete() {
        let msg = r#"update or delete on table "customer" violates foreign key constraint "fk_invoice_customer" on table "invoice""#;
        assert_eq!(violated_column(msg, CONSTRAINTS), Some("customer_id"));
    }

    #[test]
    fn unknown_constraint_is_not_mapped() {
        let msg = r#"duplicate key value violates unique constraint "customer_pkey""#;
        assert_eq!(violated_column(msg, CONSTRAINTS), None);
    }

    #[test]
    fn non_sql_errors_stay_database_errors() {
        let err = map_write_err(DbErr::Custom("boom".into()), CONSTRAINTS);
        assert!(matches!(err, ModelError::Db(_)));
    }
}
