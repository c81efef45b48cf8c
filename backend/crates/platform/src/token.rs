//! Signed Token Issuer
//!
//! HS256 JWTs in two classes that never share a secret:
//! - access tokens (short-lived, sent as `Authorization: Bearer`)
//! - refresh tokens (long-lived, kept in the `jwt` cookie and the user row)
//!
//! Both carry the user's email as the only identity claim. A random `jti`
//! makes every issued token unique even within the same second.

use std::fmt;
use std::time::Duration;

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

/// Access token lifetime (15 minutes)
pub const ACCESS_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

/// Refresh token lifetime (3 days)
pub const REFRESH_TOKEN_TTL: Duration = Duration::from_secs(3 * 24 * 60 * 60);

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Token configuration error: {0}")]
    Config(&'static str),

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::ExpiredSignature => TokenError::Expired,
            JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
                TokenError::InvalidSignature
            }
            _ => TokenError::Malformed,
        }
    }
}

// ============================================================================
// Claims
// ============================================================================

/// Which secret and lifetime a token uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Access,
    Refresh,
}

impl TokenClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenClass::Access => "access",
            TokenClass::Refresh => "refresh",
        }
    }
}

/// JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub email: String,
    pub iat: u64,
    pub exp: u64,
    pub jti: String,
}

// ============================================================================
// Configuration
// ============================================================================

/// Secrets and lifetimes for both token classes
#[derive(Clone)]
pub struct TokenConfig {
    pub access_secret: Vec<u8>,
    pub refresh_secret: Vec<u8>,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl TokenConfig {
    pub fn new(access_secret: impl Into<Vec<u8>>, refresh_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_ttl: ACCESS_TOKEN_TTL,
            refresh_ttl: REFRESH_TOKEN_TTL,
        }
    }

    /// Two independent 256-bit random secrets.
    ///
    /// Tokens signed with these do not survive a restart.
    pub fn with_random_secrets() -> Self {
        let mut access = vec![0u8; 32];
        let mut refresh = vec![0u8; 32];
        rand::thread_rng().fill_bytes(&mut access);
        rand::thread_rng().fill_bytes(&mut refresh);
        Self::new(access, refresh)
    }
}

impl Drop for TokenConfig {
    fn drop(&mut self) {
        self.access_secret.zeroize();
        self.refresh_secret.zeroize();
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("access_secret", &"[REDACTED]")
            .field("refresh_secret", &"[REDACTED]")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

// ============================================================================
// Issuer
// ============================================================================

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl KeyPair {
    fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }
}

/// Issues and verifies access and refresh tokens
///
/// ## Examples
/// ```rust
/// use platform::token::{TokenConfig, TokenIssuer};
///
/// let issuer = TokenIssuer::new(TokenConfig::with_random_secrets()).unwrap();
/// let token = issuer.issue_access("jane@example.com").unwrap();
/// let claims = issuer.verify_access(&token).unwrap();
/// assert_eq!(claims.email, "jane@example.com");
/// ```
pub struct TokenIssuer {
    access: KeyPair,
    refresh: KeyPair,
    validation: Validation,
}

impl TokenIssuer {
    /// Both secrets must be non-empty and distinct
    pub fn new(config: TokenConfig) -> Result<Self, TokenError> {
        if config.access_secret.is_empty() || config.refresh_secret.is_empty() {
            return Err(TokenError::Config("token secrets must not be empty"));
        }
        if config.access_secret == config.refresh_secret {
            return Err(TokenError::Config(
                "access and refresh secrets must differ",
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            access: KeyPair::new(&config.access_secret, config.access_ttl),
            refresh: KeyPair::new(&config.refresh_secret, config.refresh_ttl),
            validation,
        })
    }

    fn keys(&self, class: TokenClass) -> &KeyPair {
        match class {
            TokenClass::Access => &self.access,
            TokenClass::Refresh => &self.refresh,
        }
    }

    /// Sign a token of the given class for `email`
    pub fn issue(&self, class: TokenClass, email: &str) -> Result<String, TokenError> {
        let keys = self.keys(class);
        let now = jsonwebtoken::get_current_timestamp();
        let claims = TokenClaims {
            email: email.to_string(),
            iat: now,
            exp: now + keys.ttl.as_secs(),
            jti: Uuid::new_v4().to_string(),
        };
        self.sign(class, &claims)
    }

    fn sign(&self, class: TokenClass, claims: &TokenClaims) -> Result<String, TokenError> {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &self.keys(class).encoding,
        )
        .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    pub fn issue_access(&self, email: &str) -> Result<String, TokenError> {
        self.issue(TokenClass::Access, email)
    }

    pub fn issue_refresh(&self, email: &str) -> Result<String, TokenError> {
        self.issue(TokenClass::Refresh, email)
    }

    /// Check signature and expiry for the given class
    pub fn verify(&self, token: &str, class: TokenClass) -> Result<TokenClaims, TokenError> {
        let data = decode::<TokenClaims>(token, &self.keys(class).decoding, &self.validation)?;
        Ok(data.claims)
    }

    pub fn verify_access(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify(token, TokenClass::Access)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify(token, TokenClass::Refresh)
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl", &self.access.ttl)
            .field("refresh_ttl", &self.refresh.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(TokenConfig::new(
            b"access-secret-for-tests".to_vec(),
            b"refresh-secret-for-tests".to_vec(),
        ))
        .unwrap()
    }

    #[test]
    fn test_access_roundtrip() {
        let issuer = issuer();
        let token = issuer.issue_access("jane@example.com").unwrap();
        let claims = issuer.verify_access(&token).unwrap();

        assert_eq!(claims.email, "jane@example.com");
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_TTL.as_secs());
    }

    #[test]
    fn test_refresh_lifetime() {
        let issuer = issuer();
        let token = issuer.issue_refresh("jane@example.com").unwrap();
        let claims = issuer.verify_refresh(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 259_200);
    }

    #[test]
    fn test_classes_do_not_cross_verify() {
        let issuer = issuer();
        let access = issuer.issue_access("jane@example.com").unwrap();
        let refresh = issuer.issue_refresh("jane@example.com").unwrap();

        assert_eq!(
            issuer.verify_refresh(&access).unwrap_err(),
            TokenError::InvalidSignature
        );
        assert_eq!(
            issuer.verify_access(&refresh).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_tokens_are_unique() {
        let issuer = issuer();
        let a = issuer.issue_refresh("jane@example.com").unwrap();
        let b = issuer.issue_refresh("jane@example.com").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = issuer();
        let now = jsonwebtoken::get_current_timestamp();
        let claims = TokenClaims {
            email: "jane@example.com".to_string(),
            iat: now - 120,
            exp: now - 60,
            jti: Uuid::new_v4().to_string(),
        };
        let token = issuer.sign(TokenClass::Access, &claims).unwrap();

        assert_eq!(issuer.verify_access(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let issuer = issuer();
        assert_eq!(
            issuer.verify_access("not.a.jwt").unwrap_err(),
            TokenError::Malformed
        );
        assert_eq!(issuer.verify_access("").unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let other = TokenIssuer::new(TokenConfig::with_random_secrets()).unwrap();
        let token = other.issue_access("jane@example.com").unwrap();
        assert_eq!(
            issuer().verify_access(&token).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_config_validation() {
        assert!(matches!(
            TokenIssuer::new(TokenConfig::new(Vec::new(), b"x".to_vec())),
            Err(TokenError::Config(_))
        ));
        assert!(matches!(
            TokenIssuer::new(TokenConfig::new(b"same".to_vec(), b"same".to_vec())),
            Err(TokenError::Config(_))
        ));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = TokenConfig::new(b"top-secret-a".to_vec(), b"top-secret-b".to_vec());
        assert!(!format!("{:?}", config).contains("top-secret"));
    }
}
