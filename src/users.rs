//! User registration, authentication and profiles
//!
//! Passwords are bcrypt-hashed. Login failures never say whether the email
//! or the password was wrong.

use sqlx::PgPool;
use tracing::{info, instrument};

use crate::models::{NewUser, ProfileUpdate, User};
use crate::{PlannerError, Result};

/// bcrypt work factor
const BCRYPT_COST: u32 = 10;

const USER_COLUMNS: &str =
    "id, username, email, password_hash, full_name, bio, created_at, updated_at";

/// Account storage and credential checks
#[derive(Clone)]
pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new account. Fails when the email is already registered.
    #[instrument(skip(self, new_user), fields(email = %new_user.email))]
    pub async fn register(&self, new_user: NewUser) -> Result<User> {
        if new_user.email.trim().is_empty() || new_user.password.is_empty() {
            return Err(PlannerError::validation("Email and password are required"));
        }

        let existing = self.by_email(&new_user.email).await?;
        if existing.is_some() {
            return Err(PlannerError::validation("User already exists"));
        }

        let password_hash = bcrypt::hash(&new_user.password, BCRYPT_COST)?;

        let sql = format!(
            "INSERT INTO users (username, email, password_hash, full_name, bio) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {USER_COLUMNS}"
        );
        let user: User = sqlx::query_as(&sql)
            .bind(&new_user.username)
            .bind(&new_user.email)
            .bind(&password_hash)
            .bind(&new_user.full_name)
            .bind(&new_user.bio)
            .fetch_one(&self.pool)
            .await?;

        info!("Registered user {}", user.id);
        Ok(user)
    }

    /// Verify credentials and return the account
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let user = self
            .by_email(email)
            .await?
            .ok_or(PlannerError::InvalidCredentials)?;

        let matches = bcrypt::verify(password, &user.password_hash)?;
        if !matches {
            return Err(PlannerError::InvalidCredentials);
        }

        info!("User {} logged in", user.id);
        Ok(user)
    }

    /// Fetch an account by id
    pub async fn by_id(&self, id: i32) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Update profile fields; absent fields keep their stored value
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, id: i32, update: ProfileUpdate) -> Result<User> {
        let sql = format!(
            "UPDATE users \
             SET username = COALESCE($1, username), \
                 full_name = COALESCE($2, full_name), \
                 bio = COALESCE($3, bio), \
                 updated_at = now() \
             WHERE id = $4 RETURNING {USER_COLUMNS}"
        );
        let user: Option<User> = sqlx::query_as(&sql)
            .bind(&update.username)
            .bind(&update.full_name)
            .bind(&update.bio)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        user.ok_or_else(|| PlannerError::not_found("User Not Found"))
    }

    async fn by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}
