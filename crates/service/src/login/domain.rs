use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRecord {
    pub login_id: Uuid,
    pub user_id: Option<Uuid>,
    pub email: String,
    pub success: bool,
    pub logged_in_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginFilter {
    pub user_id: Option<Uuid>,
    pub email: Option<String>,
    pub success: Option<bool>,
}

impl From<models::login::Model> for LoginRecord {
    fn from(m: models::login::Model) -> Self {
        Self {
            login_id: m.login_id,
            user_id: m.user_id,
            email: m.email,
            success: m.success,
            logged_in_at: m.logged_in_at,
        }
    }
}
