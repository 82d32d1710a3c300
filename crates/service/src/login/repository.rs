use async_trait::async_trait;
use models::errors::ModelError;
use uuid::Uuid;

use super::domain::{LoginFilter, LoginRecord};

/// Append-only store of login attempts, newest first on read.
#[async_trait]
pub trait LoginRepository: Send + Sync {
    async fn record(&self, user_id: Option<Uuid>, email: &str, success: bool) -> Result<LoginRecord, ModelError>;
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<LoginRecord>, ModelError>;
    async fn filter(&self, filter: &LoginFilter, offset: u64, limit: u64) -> Result<Vec<LoginRecord>, ModelError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockLoginRepository {
        rows: Mutex<Vec<LoginRecord>>,
    }

    fn filter_matches(r: &LoginRecord, f: &LoginFilter) -> bool {
        f.user_id.map_or(true, |v| r.user_id == Some(v))
            && f.email.as_ref().map_or(true, |v| &r.email == v)
            && f.success.map_or(true, |v| r.success == v)
    }

    #[async_trait]
    impl LoginRepository for MockLoginRepository {
        async fn record(&self, user_id: Option<Uuid>, email: &str, success: bool) -> Result<LoginRecord, ModelError> {
            let rec = LoginRecord {
                login_id: Uuid::new_v4(),
                user_id,
                email: email.to_string(),
                success,
                logged_in_at: chrono::Utc::now().into(),
            };
            self.rows.lock().await.push(rec.clone());
            Ok(rec)
        }

        async fn list(&self, offset: u64, limit: u64) -> Result<Vec<LoginRecord>, ModelError> {
            self.filter(&LoginFilter::default(), offset, limit).await
        }

        async fn filter(&self, filter: &LoginFilter, offset: u64, limit: u64) -> Result<Vec<LoginRecord>, ModelError> {
            let rows = self.rows.lock().await;
            Ok(rows
                .iter()
                .rev()
                .filter(|r| filter_matches(r, filter))
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect())
        }
    }
}
