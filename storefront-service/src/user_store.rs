use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use thiserror::Error;

/// Raw signup input. The password only ever lives in memory.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub password: String,
}

/// Persisted user row. `password_digest` is the bcrypt hash of
/// password+pepper, never the plaintext.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub password_digest: String,
}

#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("username '{0}' already exists, pick a different username")]
    DuplicateUsername(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

const UNIQUE_VIOLATION: &str = "23505";

/// Owns hashing, verification, and CRUD for user records.
#[derive(Clone)]
pub struct UserStore {
    pool: PgPool,
    pepper: String,
    hash_cost: u32,
}

impl UserStore {
    pub fn new(pool: PgPool, pepper: impl Into<String>, hash_cost: u32) -> Self {
        Self {
            pool,
            pepper: pepper.into(),
            hash_cost,
        }
    }

    /// All persisted users in insertion order.
    pub async fn list(&self) -> Result<Vec<UserRecord>, UserStoreError> {
        let users = sqlx::query_as::<_, UserRecord>(
            "SELECT id, first_name, last_name, user_name, password_digest
             FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// A single user by username; absence is not an error.
    pub async fn get(&self, user_name: &str) -> Result<Option<UserRecord>, UserStoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, first_name, last_name, user_name, password_digest
             FROM users WHERE user_name = $1",
        )
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn create(&self, new_user: NewUser) -> Result<UserRecord, UserStoreError> {
        // Fast-path check for a friendlier error; the UNIQUE constraint on
        // users.user_name is the authoritative guard under concurrency.
        if self.get(&new_user.user_name).await?.is_some() {
            return Err(UserStoreError::DuplicateUsername(new_user.user_name));
        }

        let digest = hash_password(&new_user.password, &self.pepper, self.hash_cost)?;

        let user = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (first_name, last_name, user_name, password_digest)
             VALUES ($1, $2, $3, $4)
             RETURNING id, first_name, last_name, user_name, password_digest",
        )
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.user_name)
        .bind(&digest)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_unique_violation(err, &new_user.user_name))?;

        Ok(user)
    }

    /// Removes the user matching `user_name`, returning the removed record.
    /// Deleting a username that does not exist returns `None`.
    pub async fn delete(&self, user_name: &str) -> Result<Option<UserRecord>, UserStoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "DELETE FROM users WHERE user_name = $1
             RETURNING id, first_name, last_name, user_name, password_digest",
        )
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Checks a username/password pair against the stored digest. Unknown
    /// username and wrong password fail identically so callers cannot tell
    /// which factor was wrong.
    pub async fn authenticate(
        &self,
        user_name: &str,
        password: &str,
    ) -> Result<UserRecord, UserStoreError> {
        let Some(user) = self.get(user_name).await? else {
            return Err(UserStoreError::InvalidCredentials);
        };

        if verify_password(password, &self.pepper, &user.password_digest)? {
            Ok(user)
        } else {
            Err(UserStoreError::InvalidCredentials)
        }
    }
}

/// bcrypt generates the per-hash salt internally; the pepper is appended to
/// the plaintext before hashing so a leaked table alone is not enough to
/// brute-force offline.
pub fn hash_password(password: &str, pepper: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(format!("{password}{pepper}"), cost)
}

pub fn verify_password(
    password: &str,
    pepper: &str,
    digest: &str,
) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(format!("{password}{pepper}"), digest)
}

fn map_unique_violation(err: sqlx::Error, user_name: &str) -> UserStoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return UserStoreError::DuplicateUsername(user_name.to_string());
        }
    }
    UserStoreError::Database(err)
}
