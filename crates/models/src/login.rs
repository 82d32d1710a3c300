use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// One authentication attempt, successful or not.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "login")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub login_id: Uuid,
    pub user_id: Option<Uuid>,
    pub email: String,
    pub success: bool,
    pub logged_in_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(crate::user::Entity)
                .from(Column::UserId)
                .to(crate::user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn record<C: ConnectionTrait>(db: &C, user_id: Option<Uuid>, email: &str, success: bool) -> Result<Model, ModelError> {
    let am = ActiveModel {
        login_id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        email: Set(email.to_string()),
        success: Set(success),
        logged_in_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}
