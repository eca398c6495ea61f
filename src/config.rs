//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! (or the CLI) starts using it.
//!
//! ## Optional Variables
//!
//! - `BACKEND_URL` - Backend origin for relative image paths (e.g. `http://localhost:5000`).
//!   Unset or empty: relative paths are returned unchanged
//! - `UNOPTIMIZED_HOSTS` - Comma-separated host fragments added to the built-in allowlist
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `MAX_BATCH_SIZE` - Max images per resolve request (default: 500, range: 1-10000)

use anyhow::{Context, Result};
use std::env;

use crate::domain::HostAllowlist;
use crate::domain::entities::BackendOrigin;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin prefixed to relative image paths. `None` leaves them untouched.
    pub backend_origin: Option<BackendOrigin>,
    /// Extra allowlist fragments on top of the built-in defaults.
    pub unoptimized_hosts: Vec<String>,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Upper bound on `images` per `POST /api/images/resolve` request.
    pub max_batch_size: usize,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `BACKEND_URL` is set but is not a valid HTTP(S) origin.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_origin(None)
    }

    /// Same as [`Config::from_env`], except that a given `origin` replaces
    /// `BACKEND_URL`, which is then not read at all.
    pub fn from_env_with_origin(origin: Option<BackendOrigin>) -> Result<Self> {
        let backend_origin = match origin {
            Some(origin) => Some(origin),
            None => Self::load_backend_origin()?,
        };

        let unoptimized_hosts = env::var("UNOPTIMIZED_HOSTS")
            .map(|v| HostAllowlist::parse_list(&v))
            .unwrap_or_default();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let max_batch_size = env::var("MAX_BATCH_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(500);

        Ok(Self {
            backend_origin,
            unoptimized_hosts,
            listen_addr,
            log_level,
            log_format,
            max_batch_size,
        })
    }

    /// Loads the backend origin. Unset and blank values both mean "none".
    fn load_backend_origin() -> Result<Option<BackendOrigin>> {
        match env::var("BACKEND_URL") {
            Ok(raw) if !raw.trim().is_empty() => BackendOrigin::parse(&raw)
                .map(Some)
                .with_context(|| format!("BACKEND_URL is not a valid origin: '{raw}'")),
            _ => Ok(None),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `max_batch_size` is outside 1-10000
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.max_batch_size == 0 || self.max_batch_size > 10_000 {
            anyhow::bail!(
                "MAX_BATCH_SIZE must be between 1 and 10000, got {}",
                self.max_batch_size
            );
        }

        Ok(())
    }

    /// Built-in allowlist extended with `UNOPTIMIZED_HOSTS`.
    pub fn allowlist(&self) -> HostAllowlist {
        HostAllowlist::default().with_extra(self.unoptimized_hosts.iter().cloned())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);

        match &self.backend_origin {
            Some(origin) => tracing::info!("  Backend origin: {}", origin),
            None => tracing::info!("  Backend origin: not set (relative paths pass through)"),
        }

        tracing::info!("  Unoptimized hosts: {}", self.allowlist().entries().join(", "));
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Max batch size: {}", self.max_batch_size);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    load_from_env_with_origin(None)
}

/// Loads and validates configuration, with `origin` taking precedence over `BACKEND_URL`.
pub fn load_from_env_with_origin(origin: Option<BackendOrigin>) -> Result<Config> {
    let config = Config::from_env_with_origin(origin)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn test_config() -> Config {
        Config {
            backend_origin: None,
            unoptimized_hosts: Vec::new(),
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            max_batch_size: 500,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = test_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "127.0.0.1:3000".to_string();
        config.max_batch_size = 0;
        assert!(config.validate().is_err());

        config.max_batch_size = 10_001;
        assert!(config.validate().is_err());

        config.max_batch_size = 10_000;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_allowlist_extends_defaults() {
        let mut config = test_config();
        config.unoptimized_hosts = vec!["partner.example.org".to_string()];

        let allowlist = config.allowlist();
        assert!(allowlist.matches(Some("https://partner.example.org/a.png")));
        assert!(allowlist.matches(Some("http://localhost:5000/a.png")));
    }

    #[test]
    #[serial]
    fn test_backend_origin_from_env() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("BACKEND_URL", "http://localhost:5000/");
        }

        let origin = Config::load_backend_origin().unwrap().unwrap();
        assert_eq!(origin.as_str(), "http://localhost:5000");

        unsafe {
            env::remove_var("BACKEND_URL");
        }
    }

    #[test]
    #[serial]
    fn test_backend_origin_blank_means_none() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("BACKEND_URL", "  ");
        }

        assert!(Config::load_backend_origin().unwrap().is_none());

        unsafe {
            env::remove_var("BACKEND_URL");
        }

        assert!(Config::load_backend_origin().unwrap().is_none());
    }

    #[test]
    #[serial]
    fn test_backend_origin_invalid() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("BACKEND_URL", "ftp://files.example.com");
        }

        assert!(Config::load_backend_origin().is_err());

        unsafe {
            env::remove_var("BACKEND_URL");
        }
    }

    #[test]
    #[serial]
    fn test_explicit_origin_overrides_invalid_env() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("BACKEND_URL", "ftp://files.example.com");
        }

        let origin = BackendOrigin::parse("https://api.example.com").unwrap();
        let config = load_from_env_with_origin(Some(origin)).unwrap();
        assert_eq!(
            config.backend_origin.as_ref().map(BackendOrigin::as_str),
            Some("https://api.example.com")
        );

        assert!(load_from_env().is_err());

        unsafe {
            env::remove_var("BACKEND_URL");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults_and_hosts() {
        // SAFETY: Tests are run serially
        unsafe {
            env::remove_var("BACKEND_URL");
            env::remove_var("MAX_BATCH_SIZE");
            env::remove_var("LISTEN");
            env::set_var("UNOPTIMIZED_HOSTS", "cdn.example.com, partner.example.org");
        }

        let config = Config::from_env().unwrap();
        assert!(config.backend_origin.is_none());
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.max_batch_size, 500);
        assert_eq!(
            config.unoptimized_hosts,
            vec!["cdn.example.com", "partner.example.org"]
        );

        unsafe {
            env::remove_var("UNOPTIMIZED_HOSTS");
        }
    }
}
