//! User Password Value Object
//!
//! Domain wrapper around `platform::password`. Hashing and verification are
//! moved to the blocking pool, so both are `async`.
//!
//! ## Usage
//! ```rust,no_run
//! # async fn demo() {
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("MySecurePass123!".to_string()).unwrap();
//! let hashed = UserPassword::hash(raw).await.unwrap();
//!
//! let attempt = RawPassword::new("MySecurePass123!".to_string()).unwrap();
//! assert!(hashed.verify(attempt).await.unwrap());
//! # }
//! ```

use kernel::validation::ValidationError;
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError, hash_blocking,
    verify_blocking,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input, zeroized when dropped
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// New password for an account: trimmed, at least 8 characters
    pub fn new(raw: String) -> Result<Self, ValidationError> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(|e| match e {
                PasswordPolicyError::TooShort { min, .. } => {
                    ValidationError::TooShort { field: "password", min }
                }
                PasswordPolicyError::InvalidCharacter => {
                    ValidationError::Invalid { field: "password" }
                }
            })
    }

    pub fn char_count(&self) -> usize {
        self.0.char_count()
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Argon2id PHC string as stored in the user row
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub async fn hash(raw: RawPassword) -> Result<Self, PasswordHashError> {
        hash_blocking(raw.0).await.map(Self)
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_phc_string(phc_string).map(Self)
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time verification on the blocking pool
    pub async fn verify(&self, raw: RawPassword) -> Result<bool, PasswordHashError> {
        verify_blocking(self.0.clone(), raw.0).await
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HASHED_PASSWORD]")
    }
}
