use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use imgcompare_engine::analysis::{self, AnalysisReport};
use imgcompare_engine::export::encode_png;
use tracing::debug;

use crate::ingest;
use crate::report::terminal;
use crate::store;

/// Write each visualization as `<dir>/<name>.png`.
fn write_maps(report: &AnalysisReport, dir: &Path) -> Result<Vec<(&'static str, PathBuf)>> {
    [
        ("similarity", &report.similarity_map),
        ("edges", &report.edge_map),
        ("heatmap", &report.heatmap),
    ]
    .into_iter()
    .map(|(name, image)| {
        let png = encode_png(image).with_context(|| format!("Failed to encode {name} map"))?;
        let path = dir.join(format!("{name}.png"));
        store::write_file(&path, &png)?;
        Ok((name, path))
    })
    .collect()
}

/// `imgcompare analyze`: SSIM, histogram, edge and pixel-difference scores.
pub async fn analyze(
    first: &Path,
    second: &Path,
    output_dir: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let (a, b) = ingest::load_pair(first, second).await?;

    let started = Instant::now();
    let report = tokio::task::spawn_blocking(move || analysis::analyze(&a, &b))
        .await
        .context("Analysis task panicked")?
        .context("Failed to analyze images")?;
    debug!(elapsed_ms = started.elapsed().as_millis() as u64, "analysis finished");

    let saved = match &output_dir {
        Some(dir) => write_maps(&report, dir)?,
        None => Vec::new(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        terminal::print_analysis(&report);
        for (name, path) in &saved {
            terminal::print_saved_line(name, path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[tokio::test]
    async fn output_dir_receives_every_map() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 255]))
            .save(&a)
            .unwrap();
        RgbaImage::from_pixel(16, 16, Rgba([255, 255, 255, 255]))
            .save(&b)
            .unwrap();

        let out = dir.path().join("maps");
        analyze(&a, &b, Some(out.clone()), true).await.unwrap();

        for name in ["similarity", "edges", "heatmap"] {
            assert!(out.join(format!("{name}.png")).is_file(), "{name}");
        }
        let heatmap = image::open(out.join("heatmap.png")).unwrap().to_rgba8();
        assert_eq!(heatmap.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    }
}
