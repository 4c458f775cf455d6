use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use imgcompare_engine::export::{encode_png, export_file_name};
use imgcompare_engine::{
    Action, ComparisonMode, ComparisonState, HexColor, LoadedImage, Slot, Threshold, View,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ResolvedCompareConfig;
use crate::ingest;
use crate::report::html::{self, ReportImage, ReportPage};
use crate::report::terminal;
use crate::store;

/// Where and how `compare` reports its result.
#[derive(Debug, Default)]
pub struct CompareOutput {
    pub swap: bool,
    pub output: Option<PathBuf>,
    pub report: bool,
    pub json: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    mode: ComparisonMode,
    first: &'a Path,
    second: &'a Path,
    first_size: (u32, u32),
    second_size: (u32, u32),
    output_size: (u32, u32),
    threshold: Threshold,
    color: HexColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    changed_pixels: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_pixels: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    changed_percentage: Option<f64>,
    export: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a Path>,
}

fn initial_state(
    config: &ResolvedCompareConfig,
    first: LoadedImage,
    second: LoadedImage,
    swap: bool,
) -> ComparisonState {
    let state = ComparisonState {
        fill: config.fill,
        ..ComparisonState::default()
    }
    .apply(Action::Load {
        slot: Slot::First,
        image: Arc::new(first),
    })
    .apply(Action::Load {
        slot: Slot::Second,
        image: Arc::new(second),
    })
    .apply(Action::SetMode(config.mode))
    .apply(Action::SetThreshold(config.diff.threshold))
    .apply(Action::SetColor(config.diff.highlight))
    .apply(Action::SetSlider(config.slider));
    if swap { state.apply(Action::Swap) } else { state }
}

fn default_export_path(config: &ResolvedCompareConfig) -> PathBuf {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    config.export_dir.join(export_file_name(config.mode, millis))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// `imgcompare compare`: load both images, render the active mode, export.
pub async fn compare(
    config: ResolvedCompareConfig,
    first: &Path,
    second: &Path,
    out: CompareOutput,
) -> Result<()> {
    let (a, b) = ingest::load_pair(first, second).await?;
    let (first, second) = if out.swap {
        (second, first)
    } else {
        (first, second)
    };

    let state = initial_state(&config, a, b, out.swap);
    let (Some(image_a), Some(image_b)) = (state.first.clone(), state.second.clone()) else {
        anyhow::bail!("Both images are required");
    };
    debug!(
        mode = %state.mode,
        threshold = state.diff.threshold.get(),
        color = %state.diff.highlight,
        "rendering"
    );

    let started = Instant::now();
    let view = tokio::task::spawn_blocking(move || state.render())
        .await
        .context("Render task panicked")?
        .context("Failed to render comparison")?;
    let elapsed = started.elapsed();

    let canvas = view.canvas().context("Both images are required")?;
    let png = encode_png(canvas).context("Failed to encode export")?;
    let export_path = out.output.unwrap_or_else(|| default_export_path(&config));
    store::write_file(&export_path, &png)?;
    info!(path = %export_path.display(), "export written");

    let stats = match &view {
        View::Diff(result) => Some((
            result.changed_pixels,
            result.total_pixels,
            result.changed_percentage(),
        )),
        _ => None,
    };

    let report_path = if out.report {
        let path = export_path.with_extension("html");
        let first_png = encode_png(image_a.pixels()).context("Failed to encode first image")?;
        let second_png = encode_png(image_b.pixels()).context("Failed to encode second image")?;
        let page = ReportPage {
            mode: config.mode,
            first: ReportImage {
                label: "First",
                name: file_label(first),
                png: &first_png,
                dimensions: image_a.dimensions(),
            },
            second: ReportImage {
                label: "Second",
                name: file_label(second),
                png: &second_png,
                dimensions: image_b.dimensions(),
            },
            result: ReportImage {
                label: "Result",
                name: file_label(&export_path),
                png: &png,
                dimensions: canvas.dimensions(),
            },
            stats,
        };
        html::write(&path, &page)?;
        Some(path)
    } else {
        None
    };

    if out.json {
        let summary = Summary {
            mode: config.mode,
            first,
            second,
            first_size: image_a.dimensions(),
            second_size: image_b.dimensions(),
            output_size: canvas.dimensions(),
            threshold: config.diff.threshold,
            color: config.diff.highlight,
            changed_pixels: stats.map(|s| s.0),
            total_pixels: stats.map(|s| s.1),
            changed_percentage: stats.map(|s| s.2),
            export: &export_path,
            report: report_path.as_deref(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    terminal::print_image_line("First", first, image_a.dimensions());
    terminal::print_image_line("Second", second, image_b.dimensions());
    if let View::Diff(result) = &view {
        terminal::print_diff_stats(result, elapsed);
    }
    terminal::print_saved_line(config.mode.as_str(), &export_path);
    if let Some(path) = &report_path {
        terminal::print_saved_line("report", path);
    }
    Ok(())
}
