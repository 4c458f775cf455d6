use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use imgcompare_engine::{ComparisonMode, HexColor, Threshold};

use crate::config::CliOverrides;

fn parse_threshold(s: &str) -> Result<Threshold, String> {
    let v: i64 = s.parse().map_err(|e| format!("{e}"))?;
    Threshold::new(v).map_err(|e| e.to_string())
}

fn parse_color(s: &str) -> Result<HexColor, String> {
    s.parse().map_err(|e: imgcompare_engine::CompareError| e.to_string())
}

fn parse_mode(s: &str) -> Result<ComparisonMode, String> {
    s.parse()
}

#[derive(Parser)]
#[command(
    name = "imgcompare",
    about = "Compare two images side by side, with a reveal slider, or as a pixel diff"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// View settings shared by commands that render a comparison.
#[derive(Args, Debug, Default)]
pub struct ViewArgs {
    /// Comparison mode: side-by-side, slider or diff (overrides config)
    #[arg(long, short = 'm', value_parser = parse_mode)]
    pub mode: Option<ComparisonMode>,
    /// Diff threshold 0-100. Higher values ignore smaller changes.
    #[arg(long, short = 't', value_parser = parse_threshold)]
    pub threshold: Option<Threshold>,
    /// Highlight color for changed pixels (#rrggbb)
    #[arg(long, short = 'c', value_parser = parse_color)]
    pub color: Option<HexColor>,
    /// Slider reveal position 0-100
    #[arg(long)]
    pub slider: Option<f64>,
}

impl From<ViewArgs> for CliOverrides {
    fn from(v: ViewArgs) -> Self {
        Self {
            mode: v.mode,
            threshold: v.threshold,
            color: v.color,
            slider: v.slider,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Create .imgcompare/config.toml with default settings
    Init {
        /// Overwrite an existing config
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Render a comparison of two images and export it as PNG
    Compare {
        /// First image
        first: PathBuf,
        /// Second image
        second: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
        /// Exchange the two images before comparing
        #[arg(long)]
        swap: bool,
        /// Export path (default: <export.dir>/image-compare-<mode>-<millis>.png)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Also write a static HTML report next to the export
        #[arg(long)]
        report: bool,
        /// Print a JSON summary instead of text
        #[arg(long)]
        json: bool,
    },

    /// Structural similarity (SSIM), histogram, edge and pixel-difference scores
    Analyze {
        /// First image
        first: PathBuf,
        /// Second image
        second: PathBuf,
        /// Write similarity.png, edges.png and heatmap.png into this directory
        #[arg(long, short = 'o')]
        output_dir: Option<PathBuf>,
        /// Print a JSON summary instead of text
        #[arg(long)]
        json: bool,
    },

    /// Find where the template image occurs inside the source image
    Locate {
        /// Image to search in
        source: PathBuf,
        /// Image to search for
        template: PathBuf,
        /// Write the source with the match outlined to this path
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Print a JSON summary instead of text
        #[arg(long)]
        json: bool,
    },
}
