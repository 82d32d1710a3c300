//! `vendor` (shop) entity. `shop_status = false` marks a soft-deleted row.
use sea_orm::entity::prelude::*;
use sea_orm::{sea_query::Expr, ConnectionTrait};
use serde::{Deserialize, Serialize};

use crate::errors::{map_write_err, Constraints, ModelError};

pub const CONSTRAINTS: Constraints = &[
    ("uniq_vendor_mobile_active", "shop_mobile_number"),
    ("uniq_vendor_email_active", "shop_email_id"),
];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vendor")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub shop_id: Uuid,
    pub shop_name: String,
    pub shop_owner_name: Option<String>,
    pub shop_mobile_number: String,
    pub shop_email_id: String,
    pub shop_address: String,
    pub shop_gst_no: Option<String>,
    pub shop_type_id: Option<i32>,
    pub shop_country_id: Option<i32>,
    pub shop_state_id: Option<i32>,
    pub logo: Option<String>,
    pub shop_status: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Invoice,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Invoice => Entity::has_many(crate::invoice::Entity).into(),
        }
    }
}

impl Related<crate::invoice::Entity> for Entity {
    fn to() -> RelationDef { Relation::Invoice.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn insert<C: ConnectionTrait>(db: &C, am: ActiveModel) -> Result<Model, ModelError> {
    am.insert(db).await.map_err(|e| map_write_err(e, CONSTRAINTS))
}

pub async fn update<C: ConnectionTrait>(db: &C, am: ActiveModel) -> Result<Model, ModelError> {
    am.update(db).await.map_err(|e| map_write_err(e, CONSTRAINTS))
}

pub async fn soft_delete<C: ConnectionTrait>(db: &C, shop_id: Uuid) -> Result<u64, ModelError> {
    let now: DateTimeWithTimeZone = chrono::Utc::now().into();
    let res = Entity::update_many()
        .col_expr(Column::ShopStatus, Expr::value(false))
        .col_expr(Column::UpdatedAt, Expr::value(now))
        .filter(Column::ShopId.eq(shop_id))
        .filter(Column::ShopStatus.eq(true))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
