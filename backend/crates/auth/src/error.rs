//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::token::TokenError;
use platform::upload::UploadError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration or login payload failed shape validation
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserExists,

    #[error("Email not found")]
    EmailNotFound,

    #[error("Wrong email/password")]
    WrongPassword,

    /// Refresh attempted without the refresh cookie
    #[error("Prohibited")]
    MissingRefreshToken,

    /// Refresh cookie matches no user
    #[error("Invalid user")]
    InvalidUser,

    /// Token rejected (bad signature, expired, claim mismatch, unknown user)
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid params")]
    InvalidParams,

    #[error("User not found")]
    UserNotFound,

    #[error("{0}")]
    Upload(#[from] UploadError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials | AuthError::WrongPassword | AuthError::InvalidParams => {
                ErrorKind::BadRequest
            }
            AuthError::UserExists => ErrorKind::Conflict,
            AuthError::EmailNotFound | AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::MissingRefreshToken | AuthError::InvalidUser => ErrorKind::Forbidden,
            AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::Upload(UploadError::Io(_)) => ErrorKind::InternalServerError,
            AuthError::Upload(_) => ErrorKind::Unauthorized,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Database(e) => AppError::from(e),
            AuthError::Upload(UploadError::Multipart(_)) => {
                AppError::new(ErrorKind::Unauthorized, "Could not upload the File")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Upload(UploadError::Io(e)) => {
                tracing::error!(error = %e, "Avatar upload failed");
            }
            AuthError::WrongPassword => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidUser => {
                tracing::warn!("Refresh attempted with an unknown token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

/// Only issuance reaches this conversion; verification failures are mapped
/// to [`AuthError::Unauthorized`] where they happen.
impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::UserExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(AuthError::EmailNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::WrongPassword.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::MissingRefreshToken.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::InvalidUser.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upload_errors_are_401() {
        assert_eq!(
            AuthError::Upload(UploadError::InvalidFormat).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Upload(UploadError::TooLarge).status_code(),
            StatusCode::UNAUTHORIZED
        );
        let app = AuthError::Upload(UploadError::Multipart("boundary".into())).into_app_error();
        assert_eq!(app.status_code(), 401);
        assert_eq!(app.message(), "Could not upload the File");
    }

    #[test]
    fn test_messages() {
        assert_eq!(AuthError::MissingRefreshToken.into_app_error().message(), "Prohibited");
        assert_eq!(
            AuthError::WrongPassword.into_app_error().message(),
            "Wrong email/password"
        );
        assert_eq!(
            AuthError::Upload(UploadError::InvalidFormat).into_app_error().message(),
            "Invalid file format"
        );
    }

    #[test]
    fn test_internal_message_hidden() {
        let app = AuthError::Internal("secret detail".into()).into_app_error();
        assert!(app.is_server_error());
        assert!(!app.public_message().contains("secret"));
    }
}
