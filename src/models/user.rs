//! User accounts and profile projections

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user row. The password hash never leaves the server.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Public projection of this account
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            bio: self.bio.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// What the API returns for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
}

/// Profile update payload; absent fields keep their stored value
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub bio: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_omits_password_hash() {
        let user = User {
            id: 7,
            username: "asha".to_string(),
            email: "asha@example.com".to_string(),
            password_hash: "$2b$10$secret".to_string(),
            full_name: Some("Asha K".to_string()),
            bio: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let serialized = serde_json::to_string(&user.profile()).unwrap();
        assert!(!serialized.contains("secret"));
        assert!(!serialized.contains("password"));
        assert!(serialized.contains("asha@example.com"));
    }
}
