use std::path::PathBuf;

use anyhow::{Context, Result};
use imgcompare_engine::{ComparisonMode, DiffOptions, HexColor, SliderPosition, Threshold};

use super::{Config, load};

/// Values extracted from the CLI that participate in the merge.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub mode: Option<ComparisonMode>,
    pub threshold: Option<Threshold>,
    pub color: Option<HexColor>,
    pub slider: Option<f64>,
}

/// Raw values of `IMGCOMPARE_*` environment variables.
#[derive(Debug, Default)]
pub struct EnvOverrides {
    pub threshold: Option<String>,
    pub color: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            threshold: std::env::var("IMGCOMPARE_DIFF_THRESHOLD").ok(),
            color: std::env::var("IMGCOMPARE_DIFF_COLOR").ok(),
        }
    }
}

/// Fully resolved config after CLI > env > file > defaults merge.
#[derive(Debug)]
pub struct ResolvedCompareConfig {
    pub mode: ComparisonMode,
    pub slider: SliderPosition,
    pub diff: DiffOptions,
    pub fill: HexColor,
    pub export_dir: PathBuf,
}

impl ResolvedCompareConfig {
    pub fn new(cli: CliOverrides) -> Result<Self> {
        let file_config = load()?;
        Self::merge(cli, EnvOverrides::from_env(), file_config)
    }

    pub fn merge(cli: CliOverrides, env: EnvOverrides, file: Config) -> Result<Self> {
        let env_threshold = env
            .threshold
            .map(|v| {
                let n: i64 = v
                    .trim()
                    .parse()
                    .context("IMGCOMPARE_DIFF_THRESHOLD must be an integer")?;
                Threshold::new(n).context("IMGCOMPARE_DIFF_THRESHOLD is out of range")
            })
            .transpose()?;
        let env_color = env
            .color
            .map(|v| v.trim().parse::<HexColor>())
            .transpose()
            .context("IMGCOMPARE_DIFF_COLOR must be a #rrggbb color")?;

        let threshold = cli
            .threshold
            .or(env_threshold)
            .unwrap_or(file.diff.threshold);
        let highlight = cli.color.or(env_color).unwrap_or(file.diff.color);
        let slider = cli
            .slider
            .map(SliderPosition::new)
            .unwrap_or(file.view.slider);

        Ok(Self {
            mode: cli.mode.unwrap_or(file.view.mode),
            slider,
            diff: DiffOptions {
                threshold,
                highlight,
            },
            fill: file.canvas.fill,
            export_dir: file.export.dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse;

    fn file() -> Config {
        parse("[diff]\nthreshold = 5\ncolor = \"#0000ff\"\n[view]\nmode = \"slider\"\n").unwrap()
    }

    #[test]
    fn file_values_apply_without_overrides() {
        let r =
            ResolvedCompareConfig::merge(CliOverrides::default(), EnvOverrides::default(), file())
                .unwrap();
        assert_eq!(r.diff.threshold.get(), 5);
        assert_eq!(r.diff.highlight, HexColor::new(0, 0, 255));
        assert_eq!(r.mode, ComparisonMode::Slider);
    }

    #[test]
    fn env_beats_file() {
        let env = EnvOverrides {
            threshold: Some(" 40 ".into()),
            color: Some("#00ff00".into()),
        };
        let r = ResolvedCompareConfig::merge(CliOverrides::default(), env, file()).unwrap();
        assert_eq!(r.diff.threshold.get(), 40);
        assert_eq!(r.diff.highlight, HexColor::new(0, 255, 0));
    }

    #[test]
    fn cli_beats_env() {
        let cli = CliOverrides {
            mode: Some(ComparisonMode::Diff),
            threshold: Some(Threshold::new(0).unwrap()),
            color: Some(HexColor::new(1, 2, 3)),
            slider: Some(120.0),
        };
        let env = EnvOverrides {
            threshold: Some("40".into()),
            color: Some("#00ff00".into()),
        };
        let r = ResolvedCompareConfig::merge(cli, env, file()).unwrap();
        assert_eq!(r.mode, ComparisonMode::Diff);
        assert_eq!(r.diff.threshold.get(), 0);
        assert_eq!(r.diff.highlight, HexColor::new(1, 2, 3));
        assert_eq!(r.slider.percent(), 100.0);
    }

    #[test]
    fn invalid_env_values_are_errors() {
        let env = EnvOverrides {
            threshold: Some("lots".into()),
            color: None,
        };
        assert!(ResolvedCompareConfig::merge(CliOverrides::default(), env, file()).is_err());

        let env = EnvOverrides {
            threshold: Some("250".into()),
            color: None,
        };
        assert!(ResolvedCompareConfig::merge(CliOverrides::default(), env, file()).is_err());

        let env = EnvOverrides {
            threshold: None,
            color: Some("blue".into()),
        };
        assert!(ResolvedCompareConfig::merge(CliOverrides::default(), env, file()).is_err());
    }
}
