use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration input; the password is hashed before it reaches a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub mobile_number: Option<String>,
    pub password: String,
}

/// Writable profile columns, used for create and full update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub name: String,
    pub mobile_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub mobile_number: Option<String>,
}

/// Email and mobile match exactly, name as substring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserFilter {
    pub email: Option<String>,
    pub name: Option<String>,
    pub mobile_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub mobile_number: Option<String>,
    pub status: String,
    pub created_at: DateTime<FixedOffset>,
}

impl From<&NewUser> for UserProfile {
    fn from(u: &NewUser) -> Self {
        Self { email: u.email.clone(), name: u.name.clone(), mobile_number: u.mobile_number.clone() }
    }
}

impl From<models::user::Model> for User {
    fn from(m: models::user::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            name: m.name,
            mobile_number: m.mobile_number,
            status: m.status,
            created_at: m.created_at,
        }
    }
}
