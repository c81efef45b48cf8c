//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod get_user;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;

use crate::domain::entity::UserProfile;

// Re-exports
pub use authenticate::{AuthenticateUseCase, CurrentUser};
pub use config::AuthConfig;
pub use get_user::GetUserUseCase;
pub use login::{LoginInput, LoginUseCase};
pub use logout::{LogoutOutcome, LogoutUseCase};
pub use refresh::RefreshUseCase;
pub use register::{RegisterInput, RegisterUseCase};

/// Result of a successful register, login or refresh
#[derive(Debug, Clone)]
pub struct SessionOutput {
    pub user: UserProfile,
    pub access_token: String,
    /// New refresh token to place in the cookie, if one was issued
    pub refresh_token: Option<String>,
}
