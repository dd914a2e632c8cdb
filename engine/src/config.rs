//! Configuration persistence - loads and saves the zone board to disk.
//!
//! Saving happens on state-change boundaries only, never inside the
//! conversion path.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::registry::{Zone, ZoneRegistry};

const CONFIG_FILE: &str = "planner.toml";

/// Error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to determine config directory
    NoConfigDir,
    /// IO error while reading/writing config
    Io(io::Error),
    /// Failed to parse config file
    Parse(toml::de::Error),
    /// Failed to serialize config
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "Could not determine config directory"),
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// Persisted application state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub zones: Vec<Zone>,
    pub home_zone_id: Option<String>,
    pub use_24_hour: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut registry = ZoneRegistry::new();
        registry.add_zone("America/Los_Angeles", "San Francisco");
        registry.add_zone("America/New_York", "New York");
        registry.add_zone("Europe/London", "London");
        registry.add_zone("Asia/Tokyo", "Tokyo");
        Self::from_registry(&registry, false)
    }
}

impl AppConfig {
    /// Snapshot the registry and display setting for saving.
    pub fn from_registry(registry: &ZoneRegistry, use_24_hour: bool) -> Self {
        Self {
            zones: registry.zones().to_vec(),
            home_zone_id: registry.home_zone_id().map(str::to_string),
            use_24_hour,
        }
    }

    /// Rebuild the registry; a stale home reference is dropped.
    pub fn into_registry(self) -> ZoneRegistry {
        ZoneRegistry::from_parts(self.zones, self.home_zone_id)
    }
}

/// Get the configuration file path
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "meridian", "planner")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Load the saved configuration.
///
/// Returns `None` if no config file exists yet.
/// Returns an error if the file exists but can't be parsed.
pub fn load_config() -> Result<Option<AppConfig>, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;

    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&path)?;
    let config: AppConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Save the configuration, creating the config directory if needed.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    fs::write(&path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_names_the_file() {
        let path = config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("planner.toml"));
    }

    #[test]
    fn default_config_has_home_and_four_zones() {
        let config = AppConfig::default();
        assert_eq!(config.zones.len(), 4);
        assert_eq!(config.home_zone_id.as_deref(), Some("z1"));
        assert!(!config.use_24_hour);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.zones, config.zones);
        assert_eq!(parsed.home_zone_id, config.home_zone_id);
        assert_eq!(parsed.use_24_hour, config.use_24_hour);
    }

    #[test]
    fn registry_round_trip_preserves_order_and_home() {
        let config = AppConfig::default();
        let registry = config.clone().into_registry();
        assert_eq!(registry.home_zone().unwrap().label, "San Francisco");
        let back = AppConfig::from_registry(&registry, true);
        assert_eq!(back.zones, config.zones);
        assert!(back.use_24_hour);
    }
}
