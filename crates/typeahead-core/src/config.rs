//! Configuration types for typeahead.
//!
//! [`Config::load`] layers, lowest to highest: the embedded defaults, an
//! optional TOML file, then the environment knobs listed in [`ENV_KNOBS`]
//! (plus `ALLOWED_ORIGINS`, comma-separated). [`Config::defaults`] returns the
//! embedded defaults without touching the filesystem or the environment
//! (useful in tests). Every loaded config is validated before it is returned.

use crate::error::ConfigError;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[server]
bind            = "127.0.0.1:3000"
allowed_origins = ["http://localhost:3000", "http://localhost:8080"]

[rate_limit]
count       = 50
interval_ms = 60000
max_keys    = 500

[search]
max_results        = 8
fuzzy_max_distance = 2
catalog_path       = ""

[cache]
capacity = 256
ttl_ms   = 30000
"#;

/// Environment variable → config key.
pub const ENV_KNOBS: &[(&str, &str)] = &[
    ("BIND_ADDR", "server.bind"),
    ("RATE_LIMIT_COUNT", "rate_limit.count"),
    ("RATE_LIMIT_INTERVAL_MS", "rate_limit.interval_ms"),
    ("RATE_LIMIT_MAX_KEYS", "rate_limit.max_keys"),
    ("MAX_RESULTS", "search.max_results"),
    ("FUZZY_MAX_DISTANCE", "search.fuzzy_max_distance"),
    ("CATALOG_PATH", "search.catalog_path"),
    ("CACHE_CAPACITY", "cache.capacity"),
    ("CACHE_TTL_MS", "cache.ttl_ms"),
];

const ENV_ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level service configuration, assembled once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Origins that receive `Access-Control-Allow-Origin`.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_bind() -> String { "127.0.0.1:3000".to_string() }
fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string(), "http://localhost:8080".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

/// `[rate_limit]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Requests allowed per client per window.
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Client keys tracked before the least recently used is evicted.
    #[serde(default = "default_max_keys")]
    pub max_keys: usize,
}

fn default_count() -> u32 { 50 }
fn default_interval_ms() -> u64 { 60_000 }
fn default_max_keys() -> usize { 500 }

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            interval_ms: default_interval_ms(),
            max_keys: default_max_keys(),
        }
    }
}

impl RateLimitConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// `[search]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_fuzzy_max_distance")]
    pub fuzzy_max_distance: usize,
    /// Catalog file, one label per line. Empty means the built-in catalog.
    #[serde(default)]
    pub catalog_path: String,
}

fn default_max_results() -> usize { 8 }
fn default_fuzzy_max_distance() -> usize { 2 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            fuzzy_max_distance: default_fuzzy_max_distance(),
            catalog_path: String::new(),
        }
    }
}

impl SearchConfig {
    pub fn catalog_path(&self) -> Option<&Path> {
        let trimmed = self.catalog_path.trim();
        (!trimmed.is_empty()).then(|| Path::new(trimmed))
    }
}

/// `[cache]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Cached queries kept; `0` disables the cache.
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
    #[serde(default = "default_cache_ttl_ms")]
    pub ttl_ms: u64,
}

fn default_cache_capacity() -> usize { 256 }
fn default_cache_ttl_ms() -> u64 { 30_000 }

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            ttl_ms: default_cache_ttl_ms(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load defaults, then `path` (if given, it must exist), then the process
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |name| std::env::var(name).ok())
    }

    /// Like [`Config::load`] with an explicit environment lookup.
    pub fn load_with_env<F>(path: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        for &(var, key) in ENV_KNOBS {
            if let Some(value) = env(var) {
                builder = builder.set_override(key, value)?;
            }
        }
        if let Some(origins) = env(ENV_ALLOWED_ORIGINS) {
            let origins: Vec<String> = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
            builder = builder.set_override("server.allowed_origins", origins)?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Reject values the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rate_limit.count == 0 {
            return Err(invalid("rate_limit.count", "must be at least 1"));
        }
        if self.rate_limit.interval_ms == 0 {
            return Err(invalid("rate_limit.interval_ms", "must be at least 1"));
        }
        if self.rate_limit.max_keys == 0 {
            return Err(invalid("rate_limit.max_keys", "must be at least 1"));
        }
        if self.search.max_results == 0 {
            return Err(invalid("search.max_results", "must be at least 1"));
        }
        self.bind_addr()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|err| invalid("server.bind", &format!("{err}")))
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
