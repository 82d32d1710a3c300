use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoice_item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub invoice_item_id: Uuid,
    pub invoice_id: Uuid,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub total: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Invoice,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Invoice => Entity::belongs_to(crate::invoice::Entity)
                .from(Column::InvoiceId)
                .to(crate::invoice::Column::InvoiceId)
                .into(),
        }
    }
}

impl Related<crate::invoice::Entity> for Entity {
    fn to() -> RelationDef { Relation::Invoice.def() }
}

impl ActiveModelBehavior for ActiveModel {}
