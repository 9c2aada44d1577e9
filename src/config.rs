// config.rs — favicon.toml: defaults for both generation paths
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IcoError, Result};
use crate::ico::MAX_SIZE;
use crate::output::write_atomic;

pub const DEFAULT_CONFIG_FILE: &str = "favicon.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub pack: PackConfig,
    pub resize: ResizeConfig,
}

/// Assembling an ICO from existing `favicon-<size>.png` files.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PackConfig {
    pub inputs: Vec<PathBuf>,
    /// Used instead of `inputs` when discovery is requested
    pub pattern: String,
    pub output: PathBuf,
    /// Leave the input PNGs in place after a successful write
    pub keep_sources: bool,
}

/// Resizing one source logo into every icon size.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResizeConfig {
    pub source: PathBuf,
    pub output: PathBuf,
    pub sizes: Vec<u32>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            inputs: vec![
                PathBuf::from("favicon-16.png"),
                PathBuf::from("favicon-32.png"),
                PathBuf::from("favicon-48.png"),
            ],
            pattern: "favicon-*.png".to_string(),
            output: PathBuf::from("favicon.ico"),
            keep_sources: false,
        }
    }
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("static/img/logo.png"),
            output: PathBuf::from("static/img/favicon.ico"),
            sizes: vec![16, 32, 48],
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| IcoError::io(path, e))?;
        let config: Config = toml::from_str(&content).map_err(|e| IcoError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Loads `path` when it exists, otherwise falls back to the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| IcoError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        write_atomic(path, content.as_bytes())
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let invalid = |message: String| IcoError::Config {
            path: path.to_path_buf(),
            message,
        };
        if self.resize.sizes.is_empty() {
            return Err(invalid("resize.sizes must not be empty".to_string()));
        }
        if let Some(bad) = self
            .resize
            .sizes
            .iter()
            .find(|&&s| s == 0 || s > MAX_SIZE)
        {
            return Err(invalid(format!(
                "resize.sizes contains {}, sizes must be between 1 and {}",
                bad, MAX_SIZE
            )));
        }
        Ok(())
    }
}
