use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cli::CompressionLevel;
use crate::keying::ColorKey;

/// Newest config file version this build understands
pub const CONFIG_VERSION: u32 = 1;

/// PNG compression level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

impl CompressConfig {
    pub fn level(&self) -> CompressionLevel {
        match self {
            CompressConfig::Level(n) => CompressionLevel::Level((*n).min(6)),
            CompressConfig::Max(_) => CompressionLevel::Max,
        }
    }
}

/// Pack configuration file structure.
///
/// All paths in the config are relative to the config file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Input file paths, directories or glob patterns
    pub input: Vec<String>,
    /// Output directory for atlas files
    pub output_dir: String,
    /// Base name for output files (atlas.png, atlas.json)
    pub name: String,
    /// Transparent margin around every sprite in pixels
    pub padding: u32,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
    /// Colors removed from every sprite before packing, first match wins
    pub color_keys: Vec<ColorKey>,
    /// Authored `[x, y]` offset per sprite name
    pub offsets: BTreeMap<String, [i32; 2]>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            input: Vec::new(),
            output_dir: ".".to_string(),
            name: "atlas".to_string(),
            padding: 1,
            compress: None,
            color_keys: Vec::new(),
            offsets: BTreeMap::new(),
        }
    }
}
