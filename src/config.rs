use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Optional settings file, looked up in the working directory.
pub const CONFIG_FILE: &str = "survey-dash.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Dashboard settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Survey export to load at startup.
    pub source_path: PathBuf,
    /// How many loaded variants of the source to keep in memory.
    pub cache_capacity: usize,
    pub window_size: [f32; 2],
    pub title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from("joinedservewafordash.csv"),
            cache_capacity: 2,
            window_size: [1280.0, 900.0],
            title: "Serve Washington Diagnostic Dashboard".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn absent_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = DashboardConfig::load_or_default(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.cache_capacity, 2);
    }

    #[test]
    fn partial_file_overrides_given_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "source_path": "exports/survey.parquet" }"#).unwrap();

        let config = DashboardConfig::load_or_default(&path).unwrap();
        assert_eq!(config.source_path, PathBuf::from("exports/survey.parquet"));
        assert_eq!(config.title, DashboardConfig::default().title);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "sorce_path": "typo.csv" }"#).unwrap();

        assert!(matches!(
            DashboardConfig::load_or_default(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
