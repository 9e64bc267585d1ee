mod loader;
pub mod typed;
pub mod value;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use typed::ConfigProperties;
pub use value::{ConfigValue, FromConfigValue};

/// Environment variable selecting the active profile.
pub const PROFILE_ENV: &str = "ROSTER_PROFILE";

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// The requested key was not found in the configuration.
    NotFound(String),
    /// The value could not be converted to the requested type.
    TypeMismatch { key: String, expected: &'static str },
    /// An I/O or YAML parsing error occurred while loading config files.
    Load(String),
    /// A value was present but out of the accepted range.
    Invalid { key: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "Config key not found: {key}"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "Config type mismatch for '{key}': expected {expected}")
            }
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
            ConfigError::Invalid { key, message } => {
                write!(f, "Invalid config value for '{key}': {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Application configuration loaded from YAML files, `.env` files, and environment variables.
///
/// Resolution order (lowest to highest priority):
/// 1. `application.yaml` (base)
/// 2. `application-{profile}.yaml` (profile override)
/// 3. `.env` file (loaded into process environment)
/// 4. `.env.{profile}` file (loaded into process environment)
/// 5. Environment variables (e.g., `DATABASE_URL` overrides `database.url`)
///
/// `.env` files never overwrite already-set environment variables.
///
/// Profile is determined by: `ROSTER_PROFILE` env var > argument > default `"dev"`.
#[derive(Debug, Clone)]
pub struct RosterConfig {
    values: HashMap<String, ConfigValue>,
    profile: String,
}

impl RosterConfig {
    /// Load configuration for the given profile from the current working directory.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from_dir(Path::new("."), profile)
    }

    /// Load configuration for the given profile, looking for the YAML and
    /// `.env` files inside `dir`.
    pub fn load_from_dir(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let active_profile = std::env::var(PROFILE_ENV).unwrap_or_else(|_| profile.to_string());

        let mut values = HashMap::new();

        loader::load_yaml_file(&dir.join("application.yaml"), &mut values)?;
        let profile_path: PathBuf = dir.join(format!("application-{active_profile}.yaml"));
        loader::load_yaml_file(&profile_path, &mut values)?;

        let _ = dotenvy::from_path(dir.join(".env"));
        let _ = dotenvy::from_path(dir.join(format!(".env.{active_profile}")));

        // `database.url` <-> `DATABASE_URL`
        for (env_key, env_val) in std::env::vars() {
            let config_key = env_key.to_lowercase().replace('_', ".");
            values.insert(config_key, ConfigValue::String(env_val));
        }

        Ok(RosterConfig {
            values,
            profile: active_profile,
        })
    }

    /// Create a config from a YAML string (useful for testing).
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        loader::load_yaml_str(yaml, &mut values)?;
        Ok(RosterConfig {
            values,
            profile: profile.to_string(),
        })
    }

    /// Create an empty config (useful for testing).
    pub fn empty() -> Self {
        RosterConfig {
            values: HashMap::new(),
            profile: "test".to_string(),
        }
    }

    /// Set a value programmatically.
    pub fn set(&mut self, key: &str, value: ConfigValue) {
        self.values.insert(key.to_string(), value);
    }

    /// Get a typed value for the given dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the key does not exist, or
    /// `ConfigError::TypeMismatch` if the value cannot be converted.
    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        V::from_config_value(value, key)
    }

    /// Get a typed value, returning a default if the key is missing.
    ///
    /// A present value of the wrong type is still an error.
    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> Result<V, ConfigError> {
        match self.values.get(key) {
            Some(value) => V::from_config_value(value, key),
            None => Ok(default),
        }
    }

    /// Check whether a key exists in the config.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The active profile name.
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Build a typed configuration section.
    pub fn section<C: ConfigProperties>(&self) -> Result<C, ConfigError> {
        C::from_config(self)
    }
}
