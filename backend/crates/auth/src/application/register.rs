//! Register Use Case
//!
//! Creates a new account and opens its first session.

use std::sync::Arc;

use platform::token::TokenIssuer;
use platform::upload::{StagedFile, discard_on_error};

use crate::application::SessionOutput;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input, fields as they arrived in the form
pub struct RegisterInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub image: Option<StagedFile>,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenIssuer>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenIssuer>) -> Self {
        Self { repo, tokens }
    }

    /// The staged avatar is discarded if registration fails at any step
    pub async fn execute(&self, input: RegisterInput) -> AuthResult<SessionOutput> {
        let staged = input.image.clone();
        discard_on_error(staged, self.register(input).await).await
    }

    async fn register(&self, input: RegisterInput) -> AuthResult<SessionOutput> {
        let user_name = UserName::new(input.username.unwrap_or_default())
            .map_err(|_| AuthError::InvalidCredentials)?;
        let email = Email::new(input.email.unwrap_or_default())
            .map_err(|_| AuthError::InvalidCredentials)?;
        let raw_password = RawPassword::new(input.password.unwrap_or_default())
            .map_err(|_| AuthError::InvalidCredentials)?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::UserExists);
        }

        let password = UserPassword::hash(raw_password).await?;

        let access_token = self.tokens.issue_access(email.as_str())?;
        let refresh_token = self.tokens.issue_refresh(email.as_str())?;

        let user = User::new(
            user_name,
            email,
            password,
            input.image.as_ref().map(StagedFile::stored_path),
            refresh_token.clone(),
        );

        let created = self
            .repo
            .create(&user)
            .await?
            .ok_or_else(|| AuthError::Internal("user insert returned no row".to_string()))?;

        tracing::info!(
            user_id = %created.user_id,
            has_image = created.image_path.is_some(),
            "User registered"
        );

        Ok(SessionOutput {
            user: created.profile(),
            access_token,
            refresh_token: Some(refresh_token),
        })
    }
}
