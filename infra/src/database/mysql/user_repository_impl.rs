//! MySQL implementation of the UserRepository trait.
//!
//! Email uniqueness is enforced by the `uq_users_email` index. A duplicate
//! insert surfaces as [`DomainError::Conflict`] so concurrent sign-ups resolve
//! to exactly one row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ba_core::domain::entities::user::User;
use ba_core::errors::DomainError;
use ba_core::repositories::UserRepository;

const USER_COLUMNS: &str = "id, email, name, password_digest, is_verified, verified_at, created_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| column_error("email", e))?,
            name: row.try_get("name").map_err(|e| column_error("name", e))?,
            password_digest: row
                .try_get("password_digest")
                .map_err(|e| column_error("password_digest", e))?,
            is_verified: row
                .try_get("is_verified")
                .map_err(|e| column_error("is_verified", e))?,
            verified_at: row
                .try_get::<Option<DateTime<Utc>>, _>("verified_at")
                .map_err(|e| column_error("verified_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
        })
    }

    async fn find_one(&self, filter: &str, value: String) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} = ? LIMIT 1", USER_COLUMNS, filter);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}

fn query_error(e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "User store query failed");
    DomainError::unavailable("user store", e.to_string())
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.find_one("id", id.to_string()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email", email.to_string()).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, email, name, password_digest, is_verified, verified_at, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.password_digest)
            .bind(user.is_verified)
            .bind(user.verified_at)
            .bind(user.created_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(DomainError::Conflict {
                message: "email address already registered".to_string(),
            }),
            Err(e) => Err(query_error(e)),
        }
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                email = ?,
                name = ?,
                password_digest = ?,
                is_verified = ?,
                verified_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.password_digest)
            .bind(user.is_verified)
            .bind(user.verified_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        // MySQL reports matched-but-unchanged rows as 0 affected
        if result.rows_affected() == 0 && self.find_by_id(user.id).await?.is_none() {
            return Err(DomainError::not_found(format!("user {}", user.id)));
        }

        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected() > 0)
    }
}
