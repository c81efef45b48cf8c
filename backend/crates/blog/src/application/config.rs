//! Application Configuration

use std::path::PathBuf;

use platform::upload::{DEFAULT_UPLOAD_ROOT, UploadConfig};

/// Blog application configuration
#[derive(Debug, Clone)]
pub struct BlogConfig {
    /// Where post images are staged
    pub image_upload: UploadConfig,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            image_upload: UploadConfig::blog_images(DEFAULT_UPLOAD_ROOT),
        }
    }
}

impl BlogConfig {
    /// Store post images under `<root>/blogs`
    pub fn with_upload_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.image_upload = UploadConfig::blog_images(root.into());
        self
    }
}
