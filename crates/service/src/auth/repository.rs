use async_trait::async_trait;
use models::errors::ModelError;
use uuid::Uuid;

use super::domain::{AuthUser, Credentials};

/// Read-only lookups needed to authenticate. Users are created through
/// `UserRepository`; the in-memory `MockUserRepository` implements both.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Live (not soft-deleted) user with this email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, ModelError>;
    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, ModelError>;
}
