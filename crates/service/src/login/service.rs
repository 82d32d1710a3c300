use std::sync::Arc;

use common::pagination::Pagination;
use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{LoginFilter, LoginRecord};
use super::repository::LoginRepository;
use crate::errors::{db, ServiceError};

#[derive(Clone)]
pub struct LoginService {
    repo: Arc<dyn LoginRepository>,
}

impl LoginService {
    pub fn new(repo: Arc<dyn LoginRepository>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn record_attempt(&self, user_id: Option<Uuid>, email: &str, success: bool) -> Result<LoginRecord, ServiceError> {
        let rec = self.repo.record(user_id, email, success).await.map_err(db("record login"))?;
        info!(login_id = %rec.login_id, success, "login_recorded");
        Ok(rec)
    }

    #[instrument(skip(self))]
    pub async fn get_all_logins(&self, page: Pagination) -> Result<Vec<LoginRecord>, ServiceError> {
        let page = page.normalized();
        self.repo.list(page.offset(), page.limit).await.map_err(db("list logins"))
    }

    #[instrument(skip(self))]
    pub async fn filter_logins(&self, filter: LoginFilter, page: Pagination) -> Result<Vec<LoginRecord>, ServiceError> {
        let page = page.normalized();
        self.repo.filter(&filter, page.offset(), page.limit).await.map_err(db("filter logins"))
    }
}
