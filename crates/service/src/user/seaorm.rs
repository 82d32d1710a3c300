use chrono::Utc;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
    TransactionTrait,
};
use uuid::Uuid;

use models::errors::ModelError;
use models::{user, user_credentials};

use super::domain::{User, UserFilter, UserPatch, UserProfile};
use super::repository::UserRepository;

pub const PASSWORD_ALGORITHM: &str = "argon2";

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    fn live() -> Select<user::Entity> {
        user::Entity::find().filter(user::Column::DeletedAt.is_null())
    }

    async fn find_model(&self, id: Uuid) -> Result<Option<user::Model>, ModelError> {
        Ok(Self::live().filter(user::Column::Id.eq(id)).one(&self.db).await?)
    }
}

fn filter_condition(f: &UserFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(v) = &f.email {
        cond = cond.add(user::Column::Email.eq(v.as_str()));
    }
    if let Some(v) = &f.name {
        cond = cond.add(user::Column::Name.contains(v));
    }
    if let Some(v) = &f.mobile_number {
        cond = cond.add(user::Column::MobileNumber.eq(v.as_str()));
    }
    cond
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, profile: &UserProfile, password_hash: String) -> Result<User, ModelError> {
        let txn = self.db.begin().await?;
        let created = user::create(&txn, &profile.email, &profile.name, profile.mobile_number.as_deref()).await?;
        user_credentials::upsert_password(&txn, created.id, password_hash, PASSWORD_ALGORITHM).await?;
        txn.commit().await?;
        Ok(created.into())
    }

    async fn find_active_by_id(&self, id: Uuid) -> Result<Option<User>, ModelError> {
        Ok(self.find_model(id).await?.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ModelError> {
        let found = Self::live().filter(user::Column::Email.eq(email)).one(&self.db).await?;
        Ok(found.map(Into::into))
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<User>, ModelError> {
        self.filter(&UserFilter::default(), offset, limit).await
    }

    async fn filter(&self, filter: &UserFilter, offset: u64, limit: u64) -> Result<Vec<User>, ModelError> {
        let rows = Self::live()
            .filter(filter_condition(filter))
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, profile: &UserProfile) -> Result<Option<User>, ModelError> {
        let Some(found) = self.find_model(id).await? else { return Ok(None) };
        let mut am: user::ActiveModel = found.into();
        am.email = Set(profile.email.clone());
        am.name = Set(profile.name.clone());
        am.mobile_number = Set(profile.mobile_number.clone());
        am.updated_at = Set(Utc::now().into());
        Ok(Some(user::update(&self.db, am).await?.into()))
    }

    async fn patch(&self, id: Uuid, patch: &UserPatch) -> Result<Option<User>, ModelError> {
        let Some(found) = self.find_model(id).await? else { return Ok(None) };
        if patch.name.is_none() && patch.mobile_number.is_none() {
            return Ok(Some(found.into()));
        }
        let mut am: user::ActiveModel = found.into();
        if let Some(n) = &patch.name {
            am.name = Set(n.clone());
        }
        if let Some(m) = &patch.mobile_number {
            am.mobile_number = Set(Some(m.clone()));
        }
        am.updated_at = Set(Utc::now().into());
        Ok(Some(user::update(&self.db, am).await?.into()))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<u64, ModelError> {
        user::soft_delete(&self.db, id).await
    }
}
