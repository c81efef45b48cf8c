//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str =
    "id, username, email, password, image_path, refresh_token, role, created_at";

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(&self, clause: &str, value: &str) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {clause}");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<Option<User>> {
        let sql = format!(
            r#"
            INSERT INTO users (
                id,
                username,
                email,
                password,
                image_path,
                refresh_token,
                role,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.user_id.as_uuid())
            .bind(user.user_name.as_str())
            .bind(user.email.as_str())
            .bind(user.password.as_phc_string())
            .bind(user.image_path.as_deref())
            .bind(user.refresh_token.as_deref())
            .bind(user.user_role.code())
            .bind(user.created_at)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.fetch_one_where("email = $1", email.as_str()).await
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn find_by_refresh_token(&self, token: &str) -> AuthResult<Option<User>> {
        self.fetch_one_where("refresh_token = $1", token).await
    }

    async fn update_refresh_token(
        &self,
        email: &Email,
        token: Option<&str>,
    ) -> AuthResult<Option<User>> {
        let sql = format!(
            "UPDATE users SET refresh_token = $2 WHERE email = $1 RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email.as_str())
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn revoke_refresh_token(&self, token: &str) -> AuthResult<u64> {
        let revoked = sqlx::query("UPDATE users SET refresh_token = NULL WHERE refresh_token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(revoked)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password: String,
    image_path: Option<String>,
    refresh_token: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password = UserPassword::from_phc_string(self.password)
            .map_err(|e| AuthError::Internal(format!("stored password hash unreadable: {e}")))?;

        Ok(User {
            user_id: UserId::from_uuid(self.id),
            user_name: UserName::from_db(self.username),
            email: Email::from_db(self.email),
            password,
            image_path: self.image_path,
            refresh_token: self.refresh_token,
            user_role: UserRole::from_code(&self.role),
            created_at: self.created_at,
        })
    }
}
