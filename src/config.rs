//! Application Configuration
//! Optional JSON settings file, every field falls back to a default.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Which columns feed the x/y axes of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChartColumnPolicy {
    /// User picks x and y, pre-filled with the first two columns.
    #[default]
    UserSelected,
    /// Always chart the first two columns of the table.
    FirstTwo,
}

/// Settings read once at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_width: f32,
    pub window_height: f32,
    /// Rows scanned by the CSV reader to infer column types.
    pub infer_schema_length: usize,
    /// Rows shown in the predictions preview.
    pub preview_rows: usize,
    pub dark_mode: bool,
    pub chart_columns: ChartColumnPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: 1400.0,
            window_height: 900.0,
            infer_schema_length: 10000,
            preview_rows: 20,
            dark_mode: false,
            chart_columns: ChartColumnPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
