use async_trait::async_trait;
use models::errors::ModelError;
use uuid::Uuid;

use super::domain::{User, UserFilter, UserPatch, UserProfile};

/// Persistence for users. Reads skip soft-deleted users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert the user and its credentials together; a live duplicate email is a conflict.
    async fn create(&self, profile: &UserProfile, password_hash: String) -> Result<User, ModelError>;
    async fn find_active_by_id(&self, id: Uuid) -> Result<Option<User>, ModelError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ModelError>;
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<User>, ModelError>;
    async fn filter(&self, filter: &UserFilter, offset: u64, limit: u64) -> Result<Vec<User>, ModelError>;
    async fn update(&self, id: Uuid, profile: &UserProfile) -> Result<Option<User>, ModelError>;
    async fn patch(&self, id: Uuid, patch: &UserPatch) -> Result<Option<User>, ModelError>;
    async fn soft_delete(&self, id: Uuid) -> Result<u64, ModelError>;
}

/// Simple in-memory mock repository for tests and doc examples.
///
/// It also serves as the credential store for `AuthService`, so a user
/// registered through it can log in.
pub mod mock {
    use super::*;
    use crate::auth::domain::{AuthUser, Credentials};
    use crate::auth::repository::AuthRepository;
    use models::user::{STATUS_ACTIVE, STATUS_DELETED};
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct State {
        users: Vec<User>,
        creds: HashMap<Uuid, Credentials>,
    }

    #[derive(Default)]
    pub struct MockUserRepository {
        state: Mutex<State>,
    }

    fn live(u: &User) -> bool { u.status == STATUS_ACTIVE }

    fn filter_matches(u: &User, f: &UserFilter) -> bool {
        f.email.as_ref().map_or(true, |v| &u.email == v)
            && f.name.as_ref().map_or(true, |v| u.name.contains(v.as_str()))
            && f.mobile_number.as_ref().map_or(true, |v| u.mobile_number.as_ref() == Some(v))
    }

    impl State {
        fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
            self.users.iter().any(|u| live(u) && u.email == email && Some(u.id) != except)
        }

        fn live_mut(&mut self, id: Uuid) -> Option<&mut User> {
            self.users.iter_mut().find(|u| live(u) && u.id == id)
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn create(&self, profile: &UserProfile, password_hash: String) -> Result<User, ModelError> {
            let mut st = self.state.lock().await;
            if st.email_taken(&profile.email, None) {
                return Err(ModelError::Conflict { field: "email" });
            }
            let user = User {
                id: Uuid::new_v4(),
                email: profile.email.clone(),
                name: profile.name.clone(),
                mobile_number: profile.mobile_number.clone(),
                status: STATUS_ACTIVE.into(),
                created_at: chrono::Utc::now().into(),
            };
            st.creds.insert(
                user.id,
                Credentials { user_id: user.id, password_hash, password_algorithm: "argon2".into() },
            );
            st.users.push(user.clone());
            Ok(user)
        }

        async fn find_active_by_id(&self, id: Uuid) -> Result<Option<User>, ModelError> {
            let st = self.state.lock().await;
            Ok(st.users.iter().find(|u| live(u) && u.id == id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, ModelError> {
            let st = self.state.lock().await;
            Ok(st.users.iter().find(|u| live(u) && u.email == email).cloned())
        }

        async fn list(&self, offset: u64, limit: u64) -> Result<Vec<User>, ModelError> {
            self.filter(&UserFilter::default(), offset, limit).await
        }

        async fn filter(&self, filter: &UserFilter, offset: u64, limit: u64) -> Result<Vec<User>, ModelError> {
            let st = self.state.lock().await;
            Ok(st
                .users
                .iter()
                .filter(|u| live(u) && filter_matches(u, filter))
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn update(&self, id: Uuid, profile: &UserProfile) -> Result<Option<User>, ModelError> {
            let mut st = self.state.lock().await;
            if st.live_mut(id).is_none() {
                return Ok(None);
            }
            if st.email_taken(&profile.email, Some(id)) {
                return Err(ModelError::Conflict { field: "email" });
            }
            let Some(u) = st.live_mut(id) else { return Ok(None) };
            u.email = profile.email.clone();
            u.name = profile.name.clone();
            u.mobile_number = profile.mobile_number.clone();
            Ok(Some(u.clone()))
        }

        async fn patch(&self, id: Uuid, patch: &UserPatch) -> Result<Option<User>, ModelError> {
            let mut st = self.state.lock().await;
            let Some(u) = st.live_mut(id) else { return Ok(None) };
            if let Some(n) = &patch.name {
                u.name = n.clone();
            }
            if let Some(m) = &patch.mobile_number {
                u.mobile_number = Some(m.clone());
            }
            Ok(Some(u.clone()))
        }

        async fn soft_delete(&self, id: Uuid) -> Result<u64, ModelError> {
            let mut st = self.state.lock().await;
            match st.live_mut(id) {
                Some(u) => {
                    u.status = STATUS_DELETED.into();
                    Ok(1)
                }
                None => Ok(0),
            }
        }
    }

    #[async_trait]
    impl AuthRepository for MockUserRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, ModelError> {
            let st = self.state.lock().await;
            Ok(st
                .users
                .iter()
                .find(|u| live(u) && u.email == email)
                .map(|u| AuthUser { id: u.id, email: u.email.clone(), name: u.name.clone() }))
        }

        async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, ModelError> {
            let st = self.state.lock().await;
            Ok(st.creds.get(&user_id).cloned())
        }
    }
}
