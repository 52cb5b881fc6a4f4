//! Application configuration loaded from environment variables.
//!
//! All provider credentials (anon key, JWT secret) are read once at
//! startup and held in memory for the life of the process.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend-as-a-service provider (no trailing slash)
    pub provider_url: String,
    /// Provider anon/public API key, sent with every provider request
    pub provider_anon_key: String,
    /// Secret used to verify provider-issued session JWTs (HS256)
    pub jwt_secret: Vec<u8>,
    /// Object storage bucket for avatar images
    pub avatar_bucket: String,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            provider_url: env::var("PROVIDER_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("PROVIDER_URL"))?,
            provider_anon_key: env::var("PROVIDER_ANON_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("PROVIDER_ANON_KEY"))?,
            jwt_secret: env::var("PROVIDER_JWT_SECRET")
                .map_err(|_| ConfigError::Missing("PROVIDER_JWT_SECRET"))?
                .into_bytes(),
            avatar_bucket: env::var("AVATAR_BUCKET").unwrap_or_else(|_| "avatars".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }

    /// Default config for tests only.
    pub fn test_default() -> Self {
        Self {
            provider_url: "http://localhost:54321".to_string(),
            provider_anon_key: "test_anon_key".to_string(),
            jwt_secret: b"test_jwt_secret_32_bytes_minimum".to_vec(),
            avatar_bucket: "avatars".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("PROVIDER_URL", "http://localhost:54321/");
        env::set_var("PROVIDER_ANON_KEY", "anon_key");
        env::set_var("PROVIDER_JWT_SECRET", "test_jwt_secret_32_bytes_minimum");

        let config = Config::from_env().expect("Config should load");

        // Trailing slash is stripped so URL joins stay predictable
        assert_eq!(config.provider_url, "http://localhost:54321");
        assert_eq!(config.provider_anon_key, "anon_key");
        assert_eq!(config.avatar_bucket, "avatars");
        assert_eq!(config.port, 8080);
    }
}
