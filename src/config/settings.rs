use std::env;

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://civicconnect.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Required environment variable not set: {0}")]
    MissingVar(&'static str),
}

/// Application settings loaded from the environment
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
}

impl AppSettings {
    /// Load settings from environment variables
    ///
    /// `JWT_SECRET` is required; `DATABASE_URL` and `BIND_ADDR` fall back to
    /// development defaults.
    pub fn from_env() -> Result<Self, SettingsError> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| SettingsError::MissingVar("JWT_SECRET"))?;

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
        })
    }
}
