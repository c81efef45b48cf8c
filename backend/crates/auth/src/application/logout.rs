//! Logout Use Case

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

/// What the handler should answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// No cookie was sent; nothing to clear
    NoSession,
    /// The cookie must be cleared
    Cleared,
}

/// Logout use case
pub struct LogoutUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> LogoutUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Without `revoke_on_logout` the stored token stays valid until the
    /// next login overwrites it.
    pub async fn execute(&self, cookie: Option<String>) -> AuthResult<LogoutOutcome> {
        let Some(token) = cookie.filter(|t| !t.is_empty()) else {
            return Ok(LogoutOutcome::NoSession);
        };

        if self.config.revoke_on_logout {
            let revoked = self.repo.revoke_refresh_token(&token).await?;
            tracing::info!(revoked, "Refresh token revoked on logout");
        } else {
            tracing::debug!("Refresh cookie cleared");
        }

        Ok(LogoutOutcome::Cleared)
    }
}
