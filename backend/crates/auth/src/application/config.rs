//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::path::PathBuf;

use platform::cookie::CookieConfig;
use platform::upload::{DEFAULT_UPLOAD_ROOT, UploadConfig};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Refresh-token cookie (`jwt`)
    pub refresh_cookie: CookieConfig,
    /// Issue a new refresh token on every `/refresh` call
    pub rotate_refresh_on_use: bool,
    /// Clear the stored refresh token on logout
    pub revoke_on_logout: bool,
    /// Where profile pictures are staged
    pub avatar_upload: UploadConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            refresh_cookie: CookieConfig::refresh_token(),
            rotate_refresh_on_use: false,
            revoke_on_logout: false,
            avatar_upload: UploadConfig::avatars(DEFAULT_UPLOAD_ROOT),
        }
    }
}

impl AuthConfig {
    /// Store avatars under `<root>/personal`
    pub fn with_upload_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.avatar_upload = UploadConfig::avatars(root.into());
        self
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            refresh_cookie: CookieConfig::insecure_development(),
            ..Default::default()
        }
    }
}
