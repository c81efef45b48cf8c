//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::UserProfile;

// ============================================================================
// Login
// ============================================================================

/// Login request. Fields are optional so that a missing field is reported
/// as invalid credentials rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// Client-safe user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub user_image_path: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.user_id.into_uuid(),
            username: profile.user_name,
            email: profile.email,
            user_image_path: profile.image_path,
            role: profile.user_role.code().to_string(),
            created_at: profile.created_at,
        }
    }
}

/// Register, login and refresh response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub success: bool,
    pub user: UserResponse,
    /// Access token
    pub token: String,
}

/// Logout response when a cookie was cleared
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
    pub token: Option<String>,
}

/// `GET /users/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserResponse {
    pub success: bool,
    pub user: UserResponse,
}
