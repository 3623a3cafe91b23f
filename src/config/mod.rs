use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use anyhow::{Result, Context};
use lazy_static::lazy_static;
use std::sync::RwLock;

/// Store configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreConfig {
    /// Directory holding the JSON state records
    pub path: String,
}

/// Demo account configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DemoConfig {
    /// Fallback login email that always works, even with an empty user directory
    pub fallback_email: String,
    /// Fallback login password
    pub fallback_password: String,
}

/// Global application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Application version
    pub version: String,
    /// Store configuration
    pub store: StoreConfig,
    /// Demo account configuration
    pub demo: DemoConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Simulated Banking Demo".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store: StoreConfig {
                path: "data/store".to_string(),
            },
            demo: DemoConfig {
                fallback_email: "test@user.com".to_string(),
                fallback_password: "password".to_string(),
            },
        }
    }
}

// Global configuration instance
lazy_static! {
    static ref CONFIG: RwLock<Config> = RwLock::new(Config::default());
}

/// Load configuration from file
pub fn load_config(path: &str) -> Result<()> {
    // Check if file exists
    if !Path::new(path).exists() {
        // If not, create default config and save it
        let default_config = Config::default();
        save_config(path, &default_config)?;
        *CONFIG.write().unwrap() = default_config;
        return Ok(());
    }

    // Read the config file
    let mut file = File::open(path).context(format!("Failed to open config file: {}", path))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).context("Failed to read config file")?;

    // Parse the config file
    let config: Config = match path.ends_with(".toml") {
        true => toml::from_str(&contents).context("Failed to parse TOML config")?,
        false => serde_json::from_str(&contents).context("Failed to parse JSON config")?,
    };

    // Update the global config
    *CONFIG.write().unwrap() = config;

    Ok(())
}

/// Save configuration to file
pub fn save_config(path: &str, config: &Config) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
    }

    let contents = match path.ends_with(".toml") {
        true => toml::to_string_pretty(config).context("Failed to serialize TOML config")?,
        false => serde_json::to_string_pretty(config).context("Failed to serialize JSON config")?,
    };

    std::fs::write(path, contents).context(format!("Failed to write config file: {}", path))?;

    Ok(())
}

/// Get a copy of the current configuration
pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.demo.fallback_email, "test@user.com");
        assert_eq!(config.demo.fallback_password, "password");
        assert_eq!(config.store.path, "data/store");
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let path_str = path.to_str().unwrap();

        let mut config = Config::default();
        config.store.path = "elsewhere/store".to_string();
        save_config(path_str, &config).unwrap();

        load_config(path_str).unwrap();
        assert_eq!(get_config().store.path, "elsewhere/store");

        // Restore the defaults for other tests; the config is process-global.
        *CONFIG.write().unwrap() = Config::default();
    }
}
