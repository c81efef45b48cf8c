//! Server configuration from the environment

use std::path::PathBuf;

use anyhow::{Context, bail};
use auth::AuthConfig;
use blog::BlogConfig;
use platform::cookie::CookieConfig;
use platform::token::TokenConfig;
use platform::upload::DEFAULT_UPLOAD_ROOT;

const DEFAULT_PORT: u16 = 31113;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000";

pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub frontend_origins: Vec<String>,
    /// Uploaded images live under `<upload_root>/personal` and `<upload_root>/blogs`
    pub upload_root: PathBuf,
    access_secret: Option<String>,
    refresh_secret: Option<String>,
    pub cookie_secure: bool,
    pub rotate_refresh_on_use: bool,
    pub revoke_on_logout: bool,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            database_url,
            port,
            frontend_origins,
            upload_root: var("UPLOAD_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_ROOT)),
            access_secret: var("ACCESS_TOKEN_SECRET"),
            refresh_secret: var("REFRESH_TOKEN_SECRET"),
            cookie_secure: flag(var("COOKIE_SECURE"), "COOKIE_SECURE", true)?,
            rotate_refresh_on_use: flag(var("ROTATE_REFRESH_ON_USE"), "ROTATE_REFRESH_ON_USE", false)?,
            revoke_on_logout: flag(var("REVOKE_ON_LOGOUT"), "REVOKE_ON_LOGOUT", false)?,
        })
    }

    /// Both secrets from the environment. Debug builds fall back to random
    /// per-process secrets, so tokens do not survive a restart.
    pub fn token_config(&self) -> anyhow::Result<TokenConfig> {
        match (&self.access_secret, &self.refresh_secret) {
            (Some(access), Some(refresh)) => Ok(TokenConfig::new(access.as_bytes(), refresh.as_bytes())),
            _ if cfg!(debug_assertions) => {
                tracing::warn!("Token secrets not set, using random development secrets");
                Ok(TokenConfig::with_random_secrets())
            }
            _ => bail!("ACCESS_TOKEN_SECRET and REFRESH_TOKEN_SECRET must be set in production"),
        }
    }

    pub fn auth_config(&self) -> AuthConfig {
        let refresh_cookie = if self.cookie_secure {
            CookieConfig::refresh_token()
        } else {
            CookieConfig::insecure_development()
        };

        AuthConfig {
            refresh_cookie,
            rotate_refresh_on_use: self.rotate_refresh_on_use,
            revoke_on_logout: self.revoke_on_logout,
            ..AuthConfig::default()
        }
        .with_upload_root(&self.upload_root)
    }

    pub fn blog_config(&self) -> BlogConfig {
        BlogConfig::default().with_upload_root(&self.upload_root)
    }
}

fn flag(value: Option<String>, key: &str, default: bool) -> anyhow::Result<bool> {
    let Some(raw) = value else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("{key} must be a boolean, got {raw}"),
    }
}
