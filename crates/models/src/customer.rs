//! `customer` entity. `customer_status = false` marks a soft-deleted row.
use sea_orm::entity::prelude::*;
use sea_orm::{sea_query::Expr, ConnectionTrait};
use serde::{Deserialize, Serialize};

use crate::errors::{map_write_err, Constraints, ModelError};
use crate::customer_type_static;

pub const MOBILE_UNIQUE_INDEX: &str = "uniq_customer_mobile_active";
pub const EMAIL_UNIQUE_INDEX: &str = "uniq_customer_email_active";

pub const CONSTRAINTS: Constraints = &[
    (MOBILE_UNIQUE_INDEX, "customer_mobile_number"),
    (EMAIL_UNIQUE_INDEX, "customer_email_id"),
    ("fk_customer_customer_type", "customer_type_id"),
    // invoices referencing this customer block a hard delete
    ("fk_invoice_customer", "customer_id"),
];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub customer_id: i32,
    pub customer_name: String,
    pub customer_owner_name: Option<String>,
    pub customer_mobile_number: String,
    pub customer_email_id: String,
    pub customer_address: String,
    pub customer_gst_no: String,
    pub logo: Option<String>,
    pub customer_status: bool,
    pub customer_type_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    CustomerType,
    Invoice,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::CustomerType => Entity::belongs_to(customer_type_static::Entity)
                .from(Column::CustomerTypeId)
                .to(customer_type_static::Column::CustomerTypeId)
                .into(),
            Relation::Invoice => Entity::has_many(crate::invoice::Entity).into(),
        }
    }
}

impl Related<customer_type_static::Entity> for Entity {
    fn to() -> RelationDef { Relation::CustomerType.def() }
}

impl Related<crate::invoice::Entity> for Entity {
    fn to() -> RelationDef { Relation::Invoice.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a new row; a duplicate active mobile/email becomes `ModelError::Conflict`.
pub async fn insert<C: ConnectionTrait>(db: &C, am: ActiveModel) -> Result<Model, ModelError> {
    am.insert(db).await.map_err(|e| map_write_err(e, CONSTRAINTS))
}

/// Persist changes to an existing row with the same conflict mapping as [`insert`].
pub async fn update<C: ConnectionTrait>(db: &C, am: ActiveModel) -> Result<Model, ModelError> {
    am.update(db).await.map_err(|e| map_write_err(e, CONSTRAINTS))
}

/// Flip `customer_status` off for an active row. Returns affected rows.
pub async fn soft_delete<C: ConnectionTrait>(db: &C, customer_id: i32) -> Result<u64, ModelError> {
    let now: DateTimeWithTimeZone = chrono::Utc::now().into();
    let res = Entity::update_many()
        .col_expr(Column::CustomerStatus, Expr::value(false))
        .col_expr(Column::UpdatedAt, Expr::value(now))
        .filter(Column::CustomerId.eq(customer_id))
        .filter(Column::CustomerStatus.eq(true))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

/// Remove the row outright. Returns affected rows; a customer still referenced
/// by invoices fails with `ModelError::ForeignKey { field: "customer_id" }`.
pub async fn hard_delete<C: ConnectionTrait>(db: &C, customer_id: i32) -> Result<u64, ModelError> {
    let res = Entity::delete_by_id(customer_id)
        .exec(db)
        .await
        .map_err(|e| map_write_err(e, CONSTRAINTS))?;
    Ok(res.rows_affected)
}
