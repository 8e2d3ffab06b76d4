use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Top-level configuration stored on disk.
///
/// Every field has a working default, so a missing config file means
/// "run against the public endpoints".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the weather API.
    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,

    /// Address the live path monitor probes for connectivity.
    #[serde(default = "default_probe_addr")]
    pub probe_addr: String,

    /// Seconds between connectivity probes.
    #[serde(default = "default_probe_interval_secs")]
    pub probe_interval_secs: u64,

    /// Endpoint the live location client asks for an IP-based fix.
    #[serde(default = "default_geolocation_url")]
    pub geolocation_url: String,
}

fn default_weather_base_url() -> String {
    "https://www.metaweather.com".to_string()
}

fn default_probe_addr() -> String {
    "1.1.1.1:53".to_string()
}

fn default_probe_interval_secs() -> u64 {
    2
}

fn default_geolocation_url() -> String {
    "http://ip-api.com/json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weather_base_url: default_weather_base_url(),
            probe_addr: default_probe_addr(),
            probe_interval_secs: default_probe_interval_secs(),
            geolocation_url: default_geolocation_url(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, run with defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-app", "weather-app")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_endpoints() {
        let cfg = Config::default();

        assert_eq!(cfg.weather_base_url, "https://www.metaweather.com");
        assert_eq!(cfg.probe_addr, "1.1.1.1:53");
        assert_eq!(cfg.probe_interval_secs, 2);
        assert_eq!(cfg.geolocation_url, "http://ip-api.com/json");
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str(r#"weather_base_url = "http://localhost:8080""#)
            .expect("partial config should parse");

        assert_eq!(cfg.weather_base_url, "http://localhost:8080");
        assert_eq!(cfg.probe_addr, "1.1.1.1:53");
        assert_eq!(cfg.probe_interval_secs, 2);
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let cfg = Config {
            weather_base_url: "http://localhost:9000".into(),
            probe_addr: "8.8.8.8:53".into(),
            probe_interval_secs: 5,
            geolocation_url: "http://localhost:9001/json".into(),
        };

        let serialized = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.weather_base_url, cfg.weather_base_url);
        assert_eq!(parsed.probe_addr, cfg.probe_addr);
        assert_eq!(parsed.probe_interval_secs, cfg.probe_interval_secs);
        assert_eq!(parsed.geolocation_url, cfg.geolocation_url);
    }
}
