use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role granted to newly created accounts.
pub const DEFAULT_ROLE: &str = "ROLE_USER";

/// User entity - an account with a home city used for weather lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub login: String,
    pub password_hash: String,
    pub city: String,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Move the user to another home city.
    pub fn relocate(&mut self, city: impl Into<String>) {
        self.city = city.into();
        self.updated_at = Utc::now();
    }
}

/// A user that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: String,
    pub password_hash: String,
    pub city: String,
    pub roles: Vec<String>,
}

impl NewUser {
    /// Create a user with the default role.
    pub fn new(login: String, password_hash: String, city: String) -> Self {
        Self {
            login,
            password_hash,
            city,
            roles: vec![DEFAULT_ROLE.to_string()],
        }
    }
}
