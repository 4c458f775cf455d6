pub mod resolve;
pub mod template;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use imgcompare_engine::{ComparisonMode, HexColor, SliderPosition, Threshold};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use self::resolve::{CliOverrides, EnvOverrides, ResolvedCompareConfig};
pub use self::template::{config_file_exists, write_template};

pub(crate) const CONFIG_DIR: &str = ".imgcompare";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffConfig {
    /// 0-100, scaled to the channel-sum difference internally.
    #[serde(default)]
    pub threshold: Threshold,
    /// Highlight color for changed pixels.
    #[serde(default = "default_highlight")]
    pub color: HexColor,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            threshold: Threshold::default(),
            color: default_highlight(),
        }
    }
}

fn default_highlight() -> HexColor {
    HexColor::RED
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Background behind images smaller than the comparison canvas.
    #[serde(default = "default_fill")]
    pub fill: HexColor,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            fill: default_fill(),
        }
    }
}

fn default_fill() -> HexColor {
    HexColor::BLACK
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub mode: ComparisonMode,
    #[serde(default)]
    pub slider: SliderPosition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory for exports written under the default file name.
    #[serde(default = "default_export_dir")]
    pub dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
        }
    }
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub diff: DiffConfig,
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

pub fn config_path() -> PathBuf {
    Path::new(CONFIG_DIR).join(CONFIG_FILE)
}

pub fn parse(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

/// Load the config file, falling back to defaults when there is none.
pub fn load() -> Result<Config> {
    let path = config_path();
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
