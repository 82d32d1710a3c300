//! `invoice` entity with its `invoice_item` children.
use sea_orm::entity::prelude::*;
use sea_orm::{sea_query::Expr, ConnectionTrait};
use serde::{Deserialize, Serialize};

use crate::errors::{map_write_err, Constraints, ModelError};

pub const CONSTRAINTS: Constraints = &[
    ("uniq_invoice_number", "invoice_number"),
    ("fk_invoice_vendor", "shop_id"),
    ("fk_invoice_customer", "customer_id"),
];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoice")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub invoice_id: Uuid,
    pub invoice_number: String,
    pub shop_id: Uuid,
    pub customer_id: i32,
    pub amount: Decimal,
    pub discount: Decimal,
    pub tax_amount: Decimal,
    pub payment_mode: String,
    pub due_date: Option<DateTimeWithTimeZone>,
    pub invoice_status: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Vendor,
    Customer,
    Item,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Vendor => Entity::belongs_to(crate::vendor::Entity)
                .from(Column::ShopId)
                .to(crate::vendor::Column::ShopId)
                .into(),
            Relation::Customer => Entity::belongs_to(crate::customer::Entity)
                .from(Column::CustomerId)
                .to(crate::customer::Column::CustomerId)
                .into(),
            Relation::Item => Entity::has_many(crate::invoice_item::Entity).into(),
        }
    }
}

impl Related<crate::vendor::Entity> for Entity {
    fn to() -> RelationDef { Relation::Vendor.def() }
}

impl Related<crate::customer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Customer.def() }
}

impl Related<crate::invoice_item::Entity> for Entity {
    fn to() -> RelationDef { Relation::Item.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn insert<C: ConnectionTrait>(db: &C, am: ActiveModel) -> Result<Model, ModelError> {
    am.insert(db).await.map_err(|e| map_write_err(e, CONSTRAINTS))
}

pub async fn soft_delete<C: ConnectionTrait>(db: &C, invoice_id: Uuid) -> Result<u64, ModelError> {
    let now: DateTimeWithTimeZone = chrono::Utc::now().into();
    let res = Entity::update_many()
        .col_expr(Column::InvoiceStatus, Expr::value(false))
        .col_expr(Column::UpdatedAt, Expr::value(now))
        .filter(Column::InvoiceId.eq(invoice_id))
        .filter(Column::InvoiceStatus.eq(true))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
