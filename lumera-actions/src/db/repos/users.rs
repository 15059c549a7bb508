//! User repository
//!
//! The image actions only ever read users; `create` exists for account
//! provisioning and test seeding.

use sqlx::PgPool;
use uuid::Uuid;

use lumera_core::models::{NewUser, User};

use super::DbError;

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a user by id.
    pub async fn find(&self, id: Uuid) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, external_id, first_name, last_name, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user.map(UserRow::into_user))
    }

    /// Create a user record.
    pub async fn create(&self, draft: &NewUser) -> Result<User, DbError> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (external_id, first_name, last_name)
            VALUES ($1, $2, $3)
            RETURNING id, external_id, first_name, last_name, created_at
            "#,
        )
        .bind(&draft.external_id)
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .fetch_one(self.pool)
        .await?;

        Ok(user.into_user())
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    external_id: String,
    first_name: Option<String>,
    last_name: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: self.id,
            external_id: self.external_id,
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: self.created_at,
        }
    }
}
