//! Centralized configuration management for mikokuji

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that redirects the cache directory
pub const CACHE_DIR_ENV: &str = "MIKOKUJI_CACHE_DIR";

const DEFAULT_DOMAIN: &str = "https://www.mlit.go.jp";
const DEFAULT_INDEX_PAGE: &str = "/notice/index.html";
const DEFAULT_CACHE_SUBDIR: &str = ".cache/mikokuji";

/// Application configuration, resolved once per command
#[derive(Debug, Clone)]
pub struct Config {
    /// Where cached index spreadsheets live
    pub cache: CacheConfig,
    /// Site the index is published on
    pub site: SiteConfig,
    /// HTTP client configuration
    pub http: HttpConfig,
    /// Optional log file in addition to stderr
    pub log_file: Option<PathBuf>,
}

/// Cache directory configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Directory from `MIKOKUJI_CACHE_DIR`, if set
    pub user_dir: Option<PathBuf>,
    /// Fixed default directory under the user's home
    pub default_dir: PathBuf,
}

/// Location of the notice index on the MLIT website
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Scheme and host, e.g. `https://www.mlit.go.jp`
    pub domain: String,
    /// Path of the index page that links to the spreadsheet
    pub index_page: String,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            index_page: DEFAULT_INDEX_PAGE.to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: default_user_agent(),
        }
    }
}

impl CacheConfig {
    /// Cache directory used by `get` and `clean`
    pub fn active_dir(&self) -> &Path {
        self.user_dir.as_deref().unwrap_or(&self.default_dir)
    }

    /// Cache directory written by `update`; `force_default` ignores the override
    pub fn update_dir(&self, force_default: bool) -> &Path {
        if force_default {
            &self.default_dir
        } else {
            self.active_dir()
        }
    }
}

impl SiteConfig {
    pub fn index_url(&self) -> String {
        format!("{}{}", self.domain.trim_end_matches('/'), self.index_page)
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value if set
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // empty values count as unset
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let cache = CacheConfig {
            user_dir: var(CACHE_DIR_ENV).map(PathBuf::from),
            default_dir: default_cache_dir(),
        };

        let site = SiteConfig {
            domain: var("MIKOKUJI_SITE_DOMAIN").unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
            index_page: var("MIKOKUJI_INDEX_PAGE")
                .unwrap_or_else(|| DEFAULT_INDEX_PAGE.to_string()),
        };

        let timeout_var = "MIKOKUJI_HTTP_TIMEOUT_SECONDS";
        let http = HttpConfig {
            timeout_seconds: parse_var(timeout_var, var(timeout_var))?.unwrap_or(30),
            user_agent: var("MIKOKUJI_USER_AGENT").unwrap_or_else(default_user_agent),
        };

        Ok(Config {
            cache,
            site,
            http,
            log_file: var("MIKOKUJI_LOG_FILE").map(PathBuf::from),
        })
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }
}

/// `~/.cache/mikokuji`, or `./.cache/mikokuji` when the home directory is unknown
pub fn default_cache_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_CACHE_SUBDIR)
}

fn default_user_agent() -> String {
    format!("mikokuji/{}", env!("CARGO_PKG_VERSION"))
}

/// Helper function to parse an environment variable value as a specific type
fn parse_var<T>(var_name: &str, value: Option<String>) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match value {
        Some(val) => val.trim().parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        None => Ok(None),
    }
}
