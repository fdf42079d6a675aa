use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::spatial::ZoomCalibration;

/// Census years compared by the growth-rate indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthWindow {
    pub from: i32,
    pub to: i32,
}

impl Default for GrowthWindow {
    fn default() -> Self {
        Self { from: 2000, to: 2010 }
    }
}

/// Session configuration. Every field has a default, so an empty JSON object
/// is a valid config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the data tree; falls back to the platform data directory
    pub data_dir: Option<PathBuf>,
    pub growth_window: GrowthWindow,
    pub sector_zoom: ZoomCalibration,
    pub arrangement_zoom: ZoomCalibration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            growth_window: GrowthWindow::default(),
            sector_zoom: ZoomCalibration::SECTOR_DENSITY,
            arrangement_zoom: ZoomCalibration::ARRANGEMENT,
        }
    }
}

impl Config {
    /// Read a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config: {:?}", path))?;
        log::debug!("loaded config from {:?}", path);
        Ok(config)
    }

    /// Configured data root, or the platform default
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::default_data_dir(),
        }
    }

    pub fn default_data_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("br", "", "popdata")
            .context("Could not determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }
}
