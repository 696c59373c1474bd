//! User repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{PublicUserEntity, UserEntity};
use crate::metrics::QueryTimer;

/// Unique index guarding user emails.
pub const USERS_EMAIL_INDEX: &str = "idx_users_email";
/// Unique index guarding case-insensitive usernames.
pub const USERS_USERNAME_INDEX: &str = "idx_users_username_lower";

/// Repository for user-related database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Find a user by (already normalized) email address.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_email");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Whether a username is taken, ignoring case.
    pub async fn username_exists(&self, username: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("username_exists");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(username) = LOWER($1))
            "#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Create a new user account.
    ///
    /// A duplicate email or username surfaces as a unique violation on
    /// [`USERS_EMAIL_INDEX`] or [`USERS_USERNAME_INDEX`].
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_user");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (id, username, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;
        timer.finish(result)
    }

    /// List every user's public columns, ordered by username.
    pub async fn list_public(&self) -> Result<Vec<PublicUserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_users");
        let result = sqlx::query_as::<_, PublicUserEntity>(
            r#"
            SELECT id, username, email
            FROM users
            ORDER BY username ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }
}
