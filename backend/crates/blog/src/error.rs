//! Blog Error Types
//!
//! Blog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::upload::UploadError;
use thiserror::Error;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

#[derive(Debug, Error)]
pub enum BlogError {
    /// Body or form failed validation
    #[error("Invalid data")]
    InvalidData,

    /// Listing query string failed validation
    #[error("Invalid queries")]
    InvalidQueries,

    #[error("Invalid query")]
    InvalidSearch,

    /// Path id is not a UUID v4
    #[error("Invalid params")]
    InvalidParams,

    #[error("{0}")]
    NotFound(&'static str),

    #[error("could not update the blog")]
    UpdateFailed,

    #[error("{0}")]
    Upload(#[from] UploadError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::InvalidData
            | BlogError::InvalidQueries
            | BlogError::InvalidSearch
            | BlogError::InvalidParams
            | BlogError::UpdateFailed => ErrorKind::BadRequest,
            BlogError::NotFound(_) => ErrorKind::NotFound,
            BlogError::Upload(UploadError::Io(_)) => ErrorKind::InternalServerError,
            BlogError::Upload(_) => ErrorKind::Unauthorized,
            BlogError::Database(_) | BlogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn into_app_error(self) -> AppError {
        match self {
            BlogError::Database(e) => AppError::from(e),
            BlogError::Upload(UploadError::Multipart(_)) => {
                AppError::new(ErrorKind::Unauthorized, "Could not upload the File")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    fn log(&self) {
        match self {
            BlogError::Database(e) => tracing::error!(error = %e, "Blog database error"),
            BlogError::Internal(msg) => tracing::error!(message = %msg, "Blog internal error"),
            BlogError::Upload(UploadError::Io(e)) => {
                tracing::error!(error = %e, "Blog image upload failed")
            }
            other => tracing::debug!(error = %other, "Blog request rejected"),
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(BlogError::InvalidData.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(BlogError::UpdateFailed.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            BlogError::NotFound("no comments found").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            BlogError::Upload(UploadError::TooLarge).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            BlogError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message() {
        let app = BlogError::NotFound("no comments found").into_app_error();
        assert_eq!(app.message(), "no comments found");
    }

    #[test]
    fn test_multipart_message() {
        let app = BlogError::Upload(UploadError::Multipart("stream ended".into())).into_app_error();
        assert_eq!(app.message(), "Could not upload the File");
    }
}
