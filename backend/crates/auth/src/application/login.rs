//! Login Use Case
//!
//! Verifies email + password and rotates both tokens.

use std::sync::Arc;

use platform::token::TokenIssuer;

use crate::application::SessionOutput;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenIssuer>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenIssuer>) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<SessionOutput> {
        let email = Email::new(input.email.unwrap_or_default())
            .map_err(|_| AuthError::InvalidCredentials)?;
        let password = RawPassword::new(input.password.unwrap_or_default())
            .map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::EmailNotFound)?;

        if !user.password.verify(password).await? {
            return Err(AuthError::WrongPassword);
        }

        let access_token = self.tokens.issue_access(user.email.as_str())?;
        let refresh_token = self.tokens.issue_refresh(user.email.as_str())?;

        // Single slot: this overwrites any session opened elsewhere
        let updated = self
            .repo
            .update_refresh_token(&user.email, Some(&refresh_token))
            .await?
            .ok_or_else(|| AuthError::Internal("refresh token update returned no row".to_string()))?;

        tracing::info!(user_id = %updated.user_id, "User logged in");

        Ok(SessionOutput {
            user: updated.profile(),
            access_token,
            refresh_token: Some(refresh_token),
        })
    }
}
