//! # desk-config
//!
//! Layered configuration loading for desk using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DESK_*` prefix, `__` as separator)
//! 2. An explicit config file (`--config`), or project-level `.desk/config.toml`
//! 3. User-level `~/.config/desk/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DESK_STORE__PATH` -> `store.path`,
//! `DESK_INTEGRITY__SCAN_ON_START` -> `integrity.scan_on_start`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use desk_config::DeskConfig;
//!
//! let config = DeskConfig::load_with_dotenv().expect("config");
//! println!("store: {}", config.store.path);
//! ```

mod error;
mod general;
mod integrity;
mod store;
mod taxonomy;
mod trail;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use integrity::IntegrityConfig;
pub use store::StoreConfig;
pub use taxonomy::TaxonomyConfig;
pub use trail::TrailConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for all desk settings.
pub const ENV_PREFIX: &str = "DESK_";

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = ".desk/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeskConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
    #[serde(default)]
    pub integrity: IntegrityConfig,
    #[serde(default)]
    pub trail: TrailConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl DeskConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`DeskConfig::load_with_dotenv`] if you
    /// need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(None))
    }

    /// Load configuration, reading `path` instead of `.desk/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingFile` if `path` does not exist, or the
    /// errors of [`DeskConfig::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }
        Self::from_figment(Self::figment(Some(path)))
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction or validation fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on
    /// top.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: explicit file, else project-local config
        match explicit {
            Some(path) => figment = figment.merge(Toml::file(path)),
            None => {
                let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
                if local_path.exists() {
                    figment = figment.merge(Toml::file(local_path));
                }
            }
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that extract cleanly but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "store.path".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.general.unknown_category_label.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "general.unknown_category_label".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.trail.enabled && self.trail.dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "trail.dir".into(),
                reason: "must be set when the trail is enabled".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("desk").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DeskConfig::default();
        config.validate().unwrap();
        assert_eq!(config.store.path, ".desk/desk.db");
        assert!(config.taxonomy.reload_on_start);
        assert!(config.integrity.scan_on_start);
        assert!(!config.general.strict_issue_types);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: DeskConfig = DeskConfig::figment(None).extract()?;
            assert_eq!(config.general.unknown_category_label, "Unknown Category");
            assert_eq!(config.store.timeout_ms, 0);
            Ok(())
        });
    }

    #[test]
    fn validate_rejects_empty_store_path() {
        let mut config = DeskConfig::default();
        config.store.path = "  ".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("store.path"));
    }

    #[test]
    fn validate_allows_empty_trail_dir_when_disabled() {
        let mut config = DeskConfig::default();
        config.trail.enabled = false;
        config.trail.dir = String::new();
        config.validate().unwrap();
    }
}
