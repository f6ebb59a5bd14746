//! Image matrix configuration: which images we publish, from which base
//! images, on which channels.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One channel of a tracked image, pinned to a specific base tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSpec {
    pub tag: String,
    pub dockerfile: PathBuf,
}

/// A tracked image and its per-channel pins.
///
/// `base_image` is an untagged repository reference; each channel supplies
/// the tag. `registry` is the prefix the published image lives under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSpec {
    pub name: String,
    pub base_image: String,
    pub registry: String,
    pub channels: BTreeMap<String, ChannelSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub images: Vec<ImageSpec>,
}

/// A missing file and a file that does not parse are both fatal, but they
/// are reported differently, so keep them apart.
#[derive(Debug)]
pub enum ConfigError {
    Missing(PathBuf),
    Invalid(PathBuf, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(p) => {
                write!(f, "configuration file {} not found", p.display())
            }
            ConfigError::Invalid(p, reason) => {
                write!(f, "configuration file {} is invalid: {}", p.display(), reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and parse the image matrix from a JSON file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::Missing(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| ConfigError::Invalid(path.to_path_buf(), e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| ConfigError::Invalid(path.to_path_buf(), e.to_string()))
}
