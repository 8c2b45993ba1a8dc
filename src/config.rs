//! Application configuration.
//!
//! Read from an optional JSON file so the canvas, data path and animation
//! timing can be tuned without rebuilding. Every field has a default.

use crate::chart::{Canvas, ChartStyle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// File looked up in the working directory when `SCATTER_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "scatter.json";
/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SCATTER_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid canvas: content area must be positive (got {width}x{height})")]
    EmptyContent { width: f64, height: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV loaded at startup.
    pub data_path: PathBuf,
    /// Selector of the container the chart is mounted in.
    pub mount_selector: String,
    pub canvas: Canvas,
    pub style: ChartStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("assets/data/data.csv"),
            mount_selector: "#scatter".to_string(),
            canvas: Canvas::default(),
            style: ChartStyle::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Config from `SCATTER_CONFIG`, else `scatter.json` if present, else defaults.
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            let path = PathBuf::from(path);
            info!(path = %path.display(), "loading config from {CONFIG_ENV}");
            return Self::from_file(&path);
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            info!(path = %local.display(), "loading config");
            return Self::from_file(local);
        }

        debug!("no config file, using defaults");
        Ok(Self::default())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.canvas.content_width(), self.canvas.content_height());
        if width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::EmptyContent { width, height });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = AppConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.canvas.width, 1000.0);
        assert_eq!(config.style.transition_ms, 1000);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = AppConfig::from_json_str(
            r#"{ "data_path": "states.csv", "style": { "transition_ms": 250 } }"#,
        )
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("states.csv"));
        assert_eq!(config.style.transition_ms, 250);
        assert_eq!(config.style.point_radius, ChartStyle::default().point_radius);
        assert_eq!(config.mount_selector, "#scatter");
    }

    #[test]
    fn json_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert_eq!(AppConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn rejects_margins_larger_than_canvas() {
        let err = AppConfig::from_json_str(r#"{ "canvas": { "width": 100 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyContent { .. }));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            AppConfig::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
