use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use models::errors::ModelError;
use models::login;

use super::domain::{LoginFilter, LoginRecord};
use super::repository::LoginRepository;

pub struct SeaOrmLoginRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmLoginRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn filter_condition(f: &LoginFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(v) = f.user_id {
        cond = cond.add(login::Column::UserId.eq(v));
    }
    if let Some(v) = &f.email {
        cond = cond.add(login::Column::Email.eq(v.as_str()));
    }
    if let Some(v) = f.success {
        cond = cond.add(login::Column::Success.eq(v));
    }
    cond
}

#[async_trait::async_trait]
impl LoginRepository for SeaOrmLoginRepository {
    async fn record(&self, user_id: Option<Uuid>, email: &str, success: bool) -> Result<LoginRecord, ModelError> {
        Ok(login::record(&self.db, user_id, email, success).await?.into())
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<LoginRecord>, ModelError> {
        self.filter(&LoginFilter::default(), offset, limit).await
    }

    async fn filter(&self, filter: &LoginFilter, offset: u64, limit: u64) -> Result<Vec<LoginRecord>, ModelError> {
        let rows = login::Entity::find()
            .filter(filter_condition(filter))
            .order_by_desc(login::Column::LoggedInAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
