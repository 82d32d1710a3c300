use sea_orm::{entity::prelude::*, sea_query::Expr, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{self, map_write_err, Constraints};

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_DELETED: &str = "deleted";

pub const CONSTRAINTS: Constraints = &[("uniq_user_email_active", "email")];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub mobile_number: Option<String>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Credentials,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Credentials => Entity::has_one(crate::user_credentials::Entity).into(),
        }
    }
}

impl Related<crate::user_credentials::Entity> for Entity {
    fn to() -> RelationDef { Relation::Credentials.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, email: &str, name: &str, mobile_number: Option<&str>) -> Result<Model, errors::ModelError> {
    if !email.contains('@') { return Err(errors::ModelError::Validation("invalid email".into())); }
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("name required".into())); }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        name: Set(name.to_string()),
        mobile_number: Set(mobile_number.map(str::to_string)),
        status: Set(STATUS_ACTIVE.into()),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    };
    am.insert(db).await.map_err(|e| map_write_err(e, CONSTRAINTS))
}

pub async fn update<C: ConnectionTrait>(db: &C, am: ActiveModel) -> Result<Model, errors::ModelError> {
    am.update(db).await.map_err(|e| map_write_err(e, CONSTRAINTS))
}

/// Mark a live user deleted. Returns affected rows.
pub async fn soft_delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, errors::ModelError> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    let res = Entity::update_many()
        .col_expr(Column::Status, Expr::value(STATUS_DELETED))
        .col_expr(Column::DeletedAt, Expr::value(Some(now)))
        .col_expr(Column::UpdatedAt, Expr::value(now))
        .filter(Column::Id.eq(id))
        .filter(Column::DeletedAt.is_null())
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn hard_delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}
