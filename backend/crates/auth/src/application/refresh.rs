//! Refresh Use Case
//!
//! Exchanges the refresh cookie for a new access token.

use std::sync::Arc;

use platform::token::TokenIssuer;

use crate::application::SessionOutput;
use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Refresh use case
pub struct RefreshUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<R> RefreshUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenIssuer>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            tokens,
            config,
        }
    }

    /// `refresh_token` in the output is set only when the token was rotated
    pub async fn execute(&self, cookie: Option<String>) -> AuthResult<SessionOutput> {
        let token = cookie
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingRefreshToken)?;

        let user = self
            .repo
            .find_by_refresh_token(&token)
            .await?
            .filter(|user| user.holds_refresh_token(&token))
            .ok_or(AuthError::InvalidUser)?;

        let claims = self.tokens.verify_refresh(&token).map_err(|e| {
            tracing::debug!(user_id = %user.user_id, reason = %e, "Refresh token rejected");
            AuthError::Unauthorized
        })?;

        if claims.email != user.email.as_str() {
            tracing::debug!(user_id = %user.user_id, "Refresh token email claim mismatch");
            return Err(AuthError::Unauthorized);
        }

        let access_token = self.tokens.issue_access(user.email.as_str())?;

        if !self.config.rotate_refresh_on_use {
            tracing::debug!(user_id = %user.user_id, "Access token refreshed");
            return Ok(SessionOutput {
                user: user.profile(),
                access_token,
                refresh_token: None,
            });
        }

        let refresh_token = self.tokens.issue_refresh(user.email.as_str())?;
        let updated = self
            .repo
            .update_refresh_token(&user.email, Some(&refresh_token))
            .await?
            .ok_or_else(|| AuthError::Internal("refresh token update returned no row".to_string()))?;

        tracing::info!(user_id = %updated.user_id, "Refresh token rotated");

        Ok(SessionOutput {
            user: updated.profile(),
            access_token,
            refresh_token: Some(refresh_token),
        })
    }
}
