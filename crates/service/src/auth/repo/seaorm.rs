use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use models::errors::ModelError;
use models::{user, user_credentials};

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, ModelError> {
        let res = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        Ok(res.map(|u| AuthUser { id: u.id, email: u.email, name: u.name }))
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, ModelError> {
        let res = user_credentials::Entity::find()
            .filter(user_credentials::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(res.map(|c| Credentials {
            user_id: c.user_id,
            password_hash: c.password_hash,
            password_algorithm: c.password_algorithm,
        }))
    }
}
