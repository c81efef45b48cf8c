//! Get User Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::UserProfile;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct GetUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> GetUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, raw_id: &str) -> AuthResult<UserProfile> {
        let user_id = UserId::parse_v4(raw_id).ok_or(AuthError::InvalidParams)?;

        self.repo
            .find_by_id(&user_id)
            .await?
            .map(|user| user.profile())
            .ok_or(AuthError::UserNotFound)
    }
}
