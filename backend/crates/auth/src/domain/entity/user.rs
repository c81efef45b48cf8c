//! User Entity
//!
//! A registered account together with its credential and the single
//! refresh-token slot.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::UserPassword, user_role::UserRole,
};

/// User entity
///
/// Holds the password hash and the current refresh token, so it must never
/// be serialized to a client directly. Use [`User::profile`].
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub user_name: UserName,
    /// Unique, lowercased
    pub email: Email,
    pub password: UserPassword,
    /// Stored path of the profile picture
    pub image_path: Option<String>,
    /// Last refresh token issued at login or registration
    pub refresh_token: Option<String>,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh UUID v4
    pub fn new(
        user_name: UserName,
        email: Email,
        password: UserPassword,
        image_path: Option<String>,
        refresh_token: String,
    ) -> Self {
        Self {
            user_id: UserId::new(),
            user_name,
            email,
            password,
            image_path,
            refresh_token: Some(refresh_token),
            user_role: UserRole::default(),
            created_at: Utc::now(),
        }
    }

    /// Exact match against the stored refresh token. An empty slot matches
    /// nothing.
    pub fn holds_refresh_token(&self, token: &str) -> bool {
        matches!(self.refresh_token.as_deref(), Some(stored) if !stored.is_empty() && stored == token)
    }

    /// Client-safe projection
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            user_id: self.user_id,
            user_name: self.user_name.as_str().to_string(),
            email: self.email.as_str().to_string(),
            image_path: self.image_path.clone(),
            user_role: self.user_role,
            created_at: self.created_at,
        }
    }
}

/// The fields of a user that may leave the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub image_path: Option<String>,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
}
