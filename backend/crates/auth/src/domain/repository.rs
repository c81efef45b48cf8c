//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::User;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User directory
///
/// Mutations return the row as stored, or `None` when nothing was written.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user
    async fn create(&self, user: &User) -> AuthResult<Option<User>>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// User whose stored refresh token equals `token` exactly
    async fn find_by_refresh_token(&self, token: &str) -> AuthResult<Option<User>>;

    /// Overwrite (or clear, with `None`) the refresh token of `email`
    async fn update_refresh_token(
        &self,
        email: &Email,
        token: Option<&str>,
    ) -> AuthResult<Option<User>>;

    /// Clear the refresh token of whichever user holds `token`.
    /// Returns the number of rows changed.
    async fn revoke_refresh_token(&self, token: &str) -> AuthResult<u64>;
}
