use std::sync::Arc;

use common::pagination::Pagination;
use models::errors::ModelError;
use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{NewUser, User, UserFilter, UserPatch, UserProfile};
use super::repository::UserRepository;
use crate::auth::password::hash_password;
use crate::errors::{db, ServiceError};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self { Self { repo } }

    /// Create a user with an argon2-hashed password.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: NewUser) -> Result<User, ServiceError> {
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ServiceError::invalid(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters long."),
                "",
            ));
        }
        let hash = hash_password(&input.password)?;
        let profile = UserProfile::from(&input);
        let user = self
            .repo
            .create(&profile, hash)
            .await
            .map_err(|e| duplicate_or(e, &profile.email, "register user"))?;
        info!(user_id = %user.id, "user_registered");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        self.repo.find_by_email(email).await.map_err(db("load user"))
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>, ServiceError> {
        self.repo.find_active_by_id(id).await.map_err(db("load user"))
    }

    #[instrument(skip(self))]
    pub async fn get_all_users(&self, page: Pagination) -> Result<Vec<User>, ServiceError> {
        let page = page.normalized();
        self.repo.list(page.offset(), page.limit).await.map_err(db("list users"))
    }

    #[instrument(skip(self))]
    pub async fn filter_users(&self, filter: UserFilter, page: Pagination) -> Result<Vec<User>, ServiceError> {
        let page = page.normalized();
        self.repo.filter(&filter, page.offset(), page.limit).await.map_err(db("filter users"))
    }

    #[instrument(skip(self, profile))]
    pub async fn update_user_by_id(&self, id: Uuid, profile: UserProfile) -> Result<Option<User>, ServiceError> {
        let updated = self
            .repo
            .update(id, &profile)
            .await
            .map_err(|e| duplicate_or(e, &profile.email, "update user"))?;
        if updated.is_some() {
            info!(user_id = %id, "user_updated");
        }
        Ok(updated)
    }

    #[instrument(skip(self, patch))]
    pub async fn patch_user_by_id(&self, id: Uuid, patch: UserPatch) -> Result<Option<User>, ServiceError> {
        let patched = self.repo.patch(id, &patch).await.map_err(db("patch user"))?;
        if patched.is_some() {
            info!(user_id = %id, "user_patched");
        }
        Ok(patched)
    }

    #[instrument(skip(self))]
    pub async fn soft_delete_user(&self, id: Uuid) -> Result<bool, ServiceError> {
        let affected = self.repo.soft_delete(id).await.map_err(db("soft delete user"))?;
        if affected > 0 {
            info!(user_id = %id, "user_soft_deleted");
        }
        Ok(affected > 0)
    }
}

fn duplicate_or(err: ModelError, email: &str, operation: &'static str) -> ServiceError {
    match err {
        ModelError::Conflict { field: "email" } => ServiceError::invalid(
            "email",
            format!("The email id {email} already exists. Please try with another email id."),
            email,
        ),
        ModelError::Validation(msg) => ServiceError::invalid("email", msg, email),
        other => ServiceError::from_model(operation, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::repository::mock::MockUserRepository;

    fn new_user(email: &str) -> NewUser {
        NewUser { email: email.into(), name: "Ravi Kumar".into(), mobile_number: None, password: "Passw0rd!".into() }
    }

    fn svc() -> UserService { UserService::new(Arc::new(MockUserRepository::default())) }

    #[tokio::test]
    async fn register_then_lookup_by_email() {
        let svc = svc();
        let u = svc.register(new_user("ravi@example.com")).await.unwrap();
        assert_eq!(u.status, "active");
        let found = svc.get_user_by_email("ravi@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, u.id);
        assert!(svc.get_user_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let mut input = new_user("ravi@example.com");
        input.password = "short".into();
        let err = svc().register(input).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e[0].param == "password"));
    }

    #[tokio::test]
    async fn duplicate_live_email_is_rejected_but_freed_by_soft_delete() {
        let svc = svc();
        let first = svc.register(new_user("ravi@example.com")).await.unwrap();
        let err = svc.register(new_user("ravi@example.com")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e[0].param == "email"));

        assert!(svc.soft_delete_user(first.id).await.unwrap());
        assert!(svc.get_user_by_id(first.id).await.unwrap().is_none());
        svc.register(new_user("ravi@example.com")).await.unwrap();
    }

    #[tokio::test]
    async fn update_patch_and_filter() {
        let svc = svc();
        let u = svc.register(new_user("ravi@example.com")).await.unwrap();
        svc.register(new_user("meena@example.com")).await.unwrap();

        let updated = svc
            .update_user_by_id(u.id, UserProfile { email: "ravi.k@example.com".into(), name: "Ravi K".into(), mobile_number: None })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.email, "ravi.k@example.com");

        let patched = svc
            .patch_user_by_id(u.id, UserPatch { name: None, mobile_number: Some("9876543210".into()) })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(patched.mobile_number.as_deref(), Some("9876543210"));

        let f = UserFilter { name: Some("Ravi".into()), ..Default::default() };
        assert_eq!(svc.filter_users(f, Pagination::default()).await.unwrap().len(), 2);
        let f = UserFilter { mobile_number: Some("9876543210".into()), ..Default::default() };
        assert_eq!(svc.filter_users(f, Pagination::default()).await.unwrap().len(), 1);
        assert!(svc.patch_user_by_id(Uuid::new_v4(), UserPatch::default()).await.unwrap().is_none());
    }
}
