//! Service configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. Command-line flags of the `goto` binary override the variables
//! below.
//!
//! ## Variables
//!
//! - `GOTO_CONFIG` - Links file path (default: `config.json`)
//! - `LISTEN` - Bind address (default: `[::1]:8080`). Accepts `host:port`,
//!   `unix:/path/to/socket`, or `-` for a listening TCP socket passed on stdin
//! - `BASE_URL` - Public URL of the service, enables `/opensearch.xml`
//! - `CHECK_INTERVAL_SECONDS` - Minimum time between links file checks (default: 5)
//! - `STATIC_DIR` - Directory holding `favicon.ico` (default: `static`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub links_path: PathBuf,
    pub listen_addr: String,
    /// Empty means unset.
    pub base_url: String,
    pub check_interval_seconds: u64,
    pub static_dir: PathBuf,
    pub log_level: String,
    pub log_format: String,
}

/// Where the server accepts connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listen {
    Tcp(SocketAddr),
    Unix(PathBuf),
    /// Already-bound TCP listener inherited as file descriptor 0.
    Stdin,
}

impl Listen {
    /// Parses a `LISTEN` value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither `-`, `unix:<path>`, nor a
    /// socket address.
    pub fn parse(addr: &str) -> Result<Self> {
        if addr == "-" {
            return Ok(Self::Stdin);
        }

        if let Some(path) = addr.strip_prefix("unix:") {
            if path.is_empty() {
                anyhow::bail!("LISTEN unix socket path must not be empty");
            }
            return Ok(Self::Unix(PathBuf::from(path)));
        }

        let addr = addr.parse().with_context(|| {
            format!("LISTEN must be 'host:port', 'unix:<path>' or '-', got '{addr}'")
        })?;
        Ok(Self::Tcp(addr))
    }
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let links_path = env::var("GOTO_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.json"));
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "[::1]:8080".to_string());
        let base_url = env::var("BASE_URL").unwrap_or_default();

        let check_interval_seconds = env::var("CHECK_INTERVAL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Self {
            links_path,
            listen_addr,
            base_url,
            check_interval_seconds,
            static_dir,
            log_level,
            log_format,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` cannot be parsed
    /// - `base_url` is set but is not an absolute HTTP(S) URL
    /// - `check_interval_seconds` is 0
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        self.listen()?;
        self.base_url()?;

        if self.check_interval_seconds == 0 {
            anyhow::bail!("CHECK_INTERVAL_SECONDS must be greater than 0");
        }

        if self.links_path.as_os_str().is_empty() {
            anyhow::bail!("GOTO_CONFIG must not be empty");
        }

        Ok(())
    }

    /// Parsed listen address.
    ///
    /// # Errors
    ///
    /// See [`Listen::parse`].
    pub fn listen(&self) -> Result<Listen> {
        Listen::parse(&self.listen_addr)
    }

    /// Parsed base URL, `None` when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or not HTTP(S).
    pub fn base_url(&self) -> Result<Option<Url>> {
        if self.base_url.is_empty() {
            return Ok(None);
        }

        let url = Url::parse(&self.base_url)
            .with_context(|| format!("BASE_URL is not a valid URL: '{}'", self.base_url))?;

        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        Ok(Some(url))
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_seconds)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Links file: {}", self.links_path.display());
        tracing::info!("  Listen address: {}", self.listen_addr);

        if self.base_url.is_empty() {
            tracing::info!("  Base URL: unset (OpenSearch disabled)");
        } else {
            tracing::info!("  Base URL: {}", self.base_url);
        }

        tracing::info!("  Check interval: {}s", self.check_interval_seconds);
        tracing::info!("  Static dir: {}", self.static_dir.display());
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}
