//! User Name Value Object
//!
//! Display name chosen at registration. Not unique; the email is the
//! identity.

use kernel::validation::{ValidationError, required_text};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum user name length in characters, after trimming
pub const USER_NAME_MIN_LENGTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        required_text("username", Some(raw.as_ref()), USER_NAME_MIN_LENGTH).map(Self)
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
