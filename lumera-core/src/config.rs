//! Environment-driven configuration
//!
//! Everything the actions crate needs from the outside world: the database
//! connection string and the three media API credentials. Loaders read the
//! process environment (after a best-effort `.env` load); the `from_lookup`
//! variants take an injectable source so tests never touch global state.

use std::env;

use thiserror::Error;

/// Configuration error for missing or empty settings
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("configuration variable {name} is not set")]
    MissingVar { name: &'static str },
}

/// Database connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

impl DatabaseConfig {
    /// Load from the process environment (`DATABASE_URL`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            url: require(&lookup, "DATABASE_URL")?,
        })
    }
}

/// Credentials for the media search API
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl MediaConfig {
    /// Load from the process environment (`MEDIA_CLOUD_NAME`,
    /// `MEDIA_API_KEY`, `MEDIA_API_SECRET`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            cloud_name: require(&lookup, "MEDIA_CLOUD_NAME")?,
            api_key: require(&lookup, "MEDIA_API_KEY")?,
            api_secret: require(&lookup, "MEDIA_API_SECRET")?,
        })
    }
}

/// Fetch a required variable, treating blank values as unset.
fn require<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingVar { name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn database_config_requires_url() {
        let empty = vars(&[]);
        let err = DatabaseConfig::from_lookup(|name| empty.get(name).cloned()).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar { name: "DATABASE_URL" });
    }

    #[test]
    fn database_config_rejects_blank_url() {
        let blank = vars(&[("DATABASE_URL", "   ")]);
        let err = DatabaseConfig::from_lookup(|name| blank.get(name).cloned()).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar { name: "DATABASE_URL" });
    }

    #[test]
    fn database_config_reads_url() {
        let set = vars(&[("DATABASE_URL", "postgres://localhost/lumera")]);
        let config = DatabaseConfig::from_lookup(|name| set.get(name).cloned()).unwrap();
        assert_eq!(config.url, "postgres://localhost/lumera");
    }

    #[test]
    fn media_config_reports_first_missing_credential() {
        let partial = vars(&[("MEDIA_CLOUD_NAME", "lumera"), ("MEDIA_API_KEY", "key")]);
        let err = MediaConfig::from_lookup(|name| partial.get(name).cloned()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingVar {
                name: "MEDIA_API_SECRET"
            }
        );
    }

    #[test]
    fn media_config_reads_all_credentials() {
        let set = vars(&[
            ("MEDIA_CLOUD_NAME", "lumera"),
            ("MEDIA_API_KEY", "key"),
            ("MEDIA_API_SECRET", "secret"),
        ]);
        let config = MediaConfig::from_lookup(|name| set.get(name).cloned()).unwrap();
        assert_eq!(config.cloud_name, "lumera");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.api_secret, "secret");
    }
}
