//! Image Upload Staging
//!
//! Multipart forms are read field by field. The `image` file field is
//! streamed straight to disk under the configured directory; every other
//! field is kept as text. The written file is a [`StagedFile`] until the
//! request that carried it succeeds. If the request fails, the file is
//! discarded so no orphaned images pile up.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use axum::extract::multipart::{Field, MultipartError};
use thiserror::Error;
use tokio::io::AsyncWriteExt;

/// Largest accepted image, in bytes
pub const MAX_IMAGE_BYTES: usize = 1_000_000;

/// Accepted image content types
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/png", "image/jpg", "image/jpeg"];

/// Form field that carries the image
pub const IMAGE_FIELD: &str = "image";

const MAX_NAME_ATTEMPTS: u32 = 100;

/// Upload root when none is configured; also served as static files
pub const DEFAULT_UPLOAD_ROOT: &str = "public/images";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid file format")]
    InvalidFormat,

    #[error("File too large")]
    TooLarge,

    #[error("Could not upload the File: {0}")]
    Multipart(String),

    #[error("Could not store the file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<MultipartError> for UploadError {
    fn from(err: MultipartError) -> Self {
        UploadError::Multipart(err.body_text())
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Where staged images go and what is accepted
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub directory: PathBuf,
    pub max_bytes: usize,
    pub allowed_types: Vec<String>,
}

impl UploadConfig {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            max_bytes: MAX_IMAGE_BYTES,
            allowed_types: ALLOWED_IMAGE_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Profile pictures: `<root>/personal`
    pub fn avatars(root: impl AsRef<Path>) -> Self {
        Self::new(root.as_ref().join("personal"))
    }

    /// Blog images: `<root>/blogs`
    pub fn blog_images(root: impl AsRef<Path>) -> Self {
        Self::new(root.as_ref().join("blogs"))
    }

    fn accepts(&self, content_type: &str) -> bool {
        self.allowed_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(content_type))
    }
}

// ============================================================================
// Staged File
// ============================================================================

/// Image written to disk by a request that has not finished yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub path: PathBuf,
    pub content_type: String,
    pub size: usize,
}

impl StagedFile {
    /// Path as stored in the database
    pub fn stored_path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    /// Delete the file. Never fails; problems are logged.
    pub async fn discard(self) {
        remove_quietly(&self.path).await;
    }
}

/// Delete `path`, tolerating a file that is already gone
pub async fn remove_quietly(path: impl AsRef<Path>) {
    let path = path.as_ref();
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed uploaded file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Uploaded file already gone")
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove uploaded file")
        }
    }
}

/// Discard `staged` when `result` is an error, then hand `result` back
/// unchanged.
pub async fn discard_on_error<T, E>(staged: Option<StagedFile>, result: Result<T, E>) -> Result<T, E> {
    if result.is_err() {
        if let Some(file) = staged {
            file.discard().await;
        }
    }
    result
}

// ============================================================================
// Multipart form
// ============================================================================

/// Text fields plus the optional staged image
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    pub image: Option<StagedFile>,
}

impl UploadForm {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn take_image(&mut self) -> Option<StagedFile> {
        self.image.take()
    }
}

/// Read a whole multipart form, staging the image field to disk.
///
/// On any error the image staged so far is removed before returning.
pub async fn read_form(mut multipart: Multipart, config: &UploadConfig) -> Result<UploadForm, UploadError> {
    let mut form = UploadForm::default();

    match collect_fields(&mut multipart, config, &mut form).await {
        Ok(()) => Ok(form),
        Err(e) => {
            if let Some(staged) = form.image.take() {
                staged.discard().await;
            }
            tracing::debug!(error = %e, "Multipart form rejected");
            Err(e)
        }
    }
}

async fn collect_fields(
    multipart: &mut Multipart,
    config: &UploadConfig,
    form: &mut UploadForm,
) -> Result<(), UploadError> {
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);

        match file_name {
            Some(file_name) if name == IMAGE_FIELD => {
                // An empty file input still sends a part with no filename
                if file_name.is_empty() {
                    field.bytes().await?;
                    continue;
                }
                if form.image.is_some() {
                    return Err(UploadError::Multipart("Unexpected field".to_string()));
                }
                form.image = Some(stage_file(field, config).await?);
            }
            Some(_) => return Err(UploadError::Multipart("Unexpected field".to_string())),
            None => {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }
    }
    Ok(())
}

async fn stage_file(field: Field<'_>, config: &UploadConfig) -> Result<StagedFile, UploadError> {
    let content_type = field.content_type().unwrap_or_default().to_string();
    if !config.accepts(&content_type) {
        return Err(UploadError::InvalidFormat);
    }

    tokio::fs::create_dir_all(&config.directory).await?;

    let name = sanitize_file_name(field.file_name().unwrap_or_default());
    let (path, file) =
        create_unique(&config.directory, chrono::Utc::now().timestamp_millis(), &name).await?;

    match write_limited(field, file, config.max_bytes).await {
        Ok(size) => Ok(StagedFile {
            path,
            content_type,
            size,
        }),
        Err(e) => {
            remove_quietly(&path).await;
            Err(e)
        }
    }
}

/// Create `<stamp>-<name>` in `dir`, or `<stamp>-<n>-<name>` when that is
/// taken. An existing file is never opened, so concurrent uploads of the
/// same name cannot overwrite or later discard each other.
async fn create_unique(
    dir: &Path,
    stamp: i64,
    name: &str,
) -> std::io::Result<(PathBuf, tokio::fs::File)> {
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let file_name = if attempt == 0 {
            format!("{stamp}-{name}")
        } else {
            format!("{stamp}-{attempt}-{name}")
        };
        let path = dir.join(file_name);

        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }

    Err(std::io::Error::new(
        std::io::ErrorKind::AlreadyExists,
        "no free upload file name",
    ))
}

async fn write_limited(
    mut field: Field<'_>,
    mut file: tokio::fs::File,
    max_bytes: usize,
) -> Result<usize, UploadError> {
    let mut size = 0usize;

    while let Some(chunk) = field.chunk().await? {
        size += chunk.len();
        if size > max_bytes {
            return Err(UploadError::TooLarge);
        }
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    Ok(size)
}

/// Keep only the final path component and a conservative character set
fn sanitize_file_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
