use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer_type_static")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub customer_type_id: i32,
    pub customer_type_short_description: String,
    pub customer_type_description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Customer,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Customer => Entity::has_many(crate::customer::Entity).into(),
        }
    }
}

impl Related<crate::customer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Customer.def() }
}

impl ActiveModelBehavior for ActiveModel {}
