//! Configuration management
//!
//! Settings are resolved in this order of precedence:
//! 1. Environment variables
//! 2. `hubspot.toml` configuration file
//! 3. Defaults
//!
//! `${VAR_NAME}` inside the configuration file is expanded from the environment.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Result};

/// Default HubSpot API host
pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";

/// Default path prefix of the contacts API
pub const DEFAULT_API_PREFIX: &str = "/contacts/v1";

/// Credential and endpoint configuration for the HubSpot API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubspotConfig {
    /// API key sent as the `hapikey` query parameter
    pub api_key: String,

    /// API host
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prefix prepended to every resource path
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HubspotConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_prefix() -> String {
    DEFAULT_API_PREFIX.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl HubspotConfig {
    /// Create a config for the given API key with default endpoints
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Point the client at another host (a sandbox or a local fake)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the resource path prefix
    pub fn with_api_prefix(mut self, api_prefix: impl Into<String>) -> Self {
        self.api_prefix = api_prefix.into();
        self
    }

    /// Override the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Expand `${VAR_NAME}` references from the environment.
    ///
    /// Unset variables expand to an empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();

                let mut var_name = String::new();
                while let Some(c) = chars.next() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - path of the TOML file
    ///
    /// Environment variables override values read from the file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let toml_content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let mut cfg = Self::from_toml_str(&toml_content)?;
        cfg.apply_env_overrides();
        cfg.validate()?;

        Ok(cfg)
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let expanded = Self::expand_env_vars(content);

        let toml: TomlConfig = toml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        let hubspot = toml.hubspot.unwrap_or_default();

        Ok(Self {
            api_key: hubspot.api_key.unwrap_or_default(),
            base_url: hubspot.base_url.unwrap_or_else(default_base_url),
            api_prefix: hubspot.api_prefix.unwrap_or_else(default_api_prefix),
            timeout_secs: hubspot.timeout_secs.unwrap_or_else(default_timeout_secs),
        })
    }

    /// Load configuration from the default locations
    ///
    /// Reads `.env` first, then `./hubspot.toml` if it exists, otherwise the
    /// environment alone.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        if Path::new("hubspot.toml").exists() {
            return Self::from_toml_file("hubspot.toml");
        }

        Self::from_env()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("HUBSPOT_API_KEY")
            .map_err(|_| Error::Config("HUBSPOT_API_KEY not set".to_string()))?;

        let mut cfg = Self::new(api_key);
        cfg.apply_env_overrides();
        cfg.validate()?;

        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = std::env::var("HUBSPOT_API_KEY") {
            if !api_key.is_empty() {
                self.api_key = api_key;
            }
        }
        if let Ok(base_url) = std::env::var("HUBSPOT_BASE_URL") {
            if !base_url.is_empty() {
                self.base_url = base_url;
            }
        }
        if let Ok(prefix) = std::env::var("HUBSPOT_API_PREFIX") {
            self.api_prefix = prefix;
        }
        if let Ok(timeout) = std::env::var("HUBSPOT_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.timeout_secs = t;
            }
        }
    }

    /// Reject configurations that cannot produce a working request
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config("api_key must not be empty".to_string()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "base_url must be an http(s) URL: {}",
                self.base_url
            )));
        }
        Ok(())
    }
}

// ============================================================================
// TOML file layout
// ============================================================================

#[derive(Debug, Deserialize)]
struct TomlConfig {
    hubspot: Option<TomlHubspotConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlHubspotConfig {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    api_prefix: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}
