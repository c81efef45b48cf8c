//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations used by the feature crates:
//! - Password hashing (Argon2id)
//! - Signed access/refresh tokens (JWT, HS256)
//! - Cookie building and parsing
//! - Multipart image staging and cleanup

pub mod cookie;
pub mod password;
pub mod token;
pub mod upload;
