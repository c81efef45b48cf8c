//! Authenticate Use Case
//!
//! Resolves an `Authorization: Bearer <access token>` header to a user.

use std::sync::Arc;

use kernel::id::UserId;
use platform::token::TokenIssuer;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Authenticated caller, placed in request extensions by the middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub email: String,
    pub user_role: UserRole,
}

/// Authenticate use case
pub struct AuthenticateUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenIssuer>,
}

impl<R> AuthenticateUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenIssuer>) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, authorization: Option<&str>) -> AuthResult<CurrentUser> {
        let token = authorization
            .and_then(bearer_token)
            .ok_or(AuthError::Unauthorized)?;

        let claims = self.tokens.verify_access(token).map_err(|e| {
            tracing::debug!(reason = %e, "Access token rejected");
            AuthError::Unauthorized
        })?;

        let user = self
            .repo
            .find_by_email(&Email::from_db(claims.email))
            .await?
            .ok_or(AuthError::Unauthorized)?;

        Ok(CurrentUser {
            user_id: user.user_id,
            email: user.email.into_db(),
            user_role: user.user_role,
        })
    }
}

/// Token part of a `Bearer <token>` header value
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("bearer   abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("abc"), None);
    }
}
