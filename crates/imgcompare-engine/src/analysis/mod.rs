//! Structural, histogram, edge and absolute-difference scores.
//!
//! Unlike the pixel diff, both images are stretched to the larger extent of
//! the pair (bilinear) before any measurement.

pub mod edges;
pub mod heatmap;

use image::imageops::{self, FilterType};
use image::{GrayImage, RgbaImage};
use image_compare::{Algorithm, Metric};
use serde::Serialize;

use crate::CompareError;
use crate::canvas::ComparisonCanvas;
use crate::ingest::LoadedImage;

pub use self::edges::EdgeScores;
pub use self::heatmap::PixelDifference;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpretation {
    Identical,
    Similar,
    Different,
}

impl Interpretation {
    pub fn from_ssim(score: f64) -> Self {
        if score > 0.95 {
            Self::Identical
        } else if score > 0.8 {
            Self::Similar
        } else {
            Self::Different
        }
    }
}

/// Luma histogram comparisons.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HistogramScores {
    /// 1.0 = identical distributions, -1.0 = opposite.
    pub correlation: f64,
    /// 0.0 = identical distributions.
    pub chi_square: f64,
    pub intersection: f64,
    /// Hellinger (Bhattacharyya) distance, 0.0 = identical distributions.
    pub hellinger: f64,
}

#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub width: u32,
    pub height: u32,
    pub ssim: f64,
    pub interpretation: Interpretation,
    pub histogram: HistogramScores,
    pub edges: EdgeScores,
    pub pixel_diff: PixelDifference,
    /// Color-mapped per-pixel similarity.
    #[serde(skip)]
    pub similarity_map: RgbaImage,
    /// Edges of the first image only (green), second only (red), both (white).
    #[serde(skip)]
    pub edge_map: RgbaImage,
    /// Absolute difference through a black-red-yellow-white ramp.
    #[serde(skip)]
    pub heatmap: RgbaImage,
}

fn stretched(img: &LoadedImage, canvas: ComparisonCanvas) -> RgbaImage {
    let (w, h) = (canvas.width, canvas.height);
    if img.dimensions() == (w, h) {
        img.pixels().clone()
    } else {
        imageops::resize(img.pixels(), w, h, FilterType::Triangle)
    }
}

fn engine_error(e: image_compare::CompareError) -> CompareError {
    CompareError::Analysis(e.to_string())
}

fn histogram_scores(a: &GrayImage, b: &GrayImage) -> Result<HistogramScores, CompareError> {
    let score = |metric: Metric| {
        image_compare::gray_similarity_histogram(metric, a, b).map_err(engine_error)
    };
    Ok(HistogramScores {
        correlation: score(Metric::Correlation)?,
        chi_square: score(Metric::ChiSquare)?,
        intersection: score(Metric::Intersection)?,
        hellinger: score(Metric::Hellinger)?,
    })
}

pub fn analyze(a: &LoadedImage, b: &LoadedImage) -> Result<AnalysisReport, CompareError> {
    let canvas = ComparisonCanvas::for_pair(a, b);
    let rgba_a = stretched(a, canvas);
    let rgba_b = stretched(b, canvas);
    let gray_a = imageops::grayscale(&rgba_a);
    let gray_b = imageops::grayscale(&rgba_b);

    let structure =
        image_compare::gray_similarity_structure(&Algorithm::MSSIMSimple, &gray_a, &gray_b)
            .map_err(engine_error)?;
    let histogram = histogram_scores(&gray_a, &gray_b)?;
    let (edges, edge_map) = edges::compare(&gray_a, &gray_b);
    let luma = heatmap::difference_luma(&rgba_a, &rgba_b);

    Ok(AnalysisReport {
        width: canvas.width,
        height: canvas.height,
        ssim: structure.score,
        interpretation: Interpretation::from_ssim(structure.score),
        histogram,
        edges,
        pixel_diff: heatmap::measure(&luma),
        similarity_map: structure.image.to_color_map().to_rgba8(),
        edge_map,
        heatmap: heatmap::heatmap(&luma),
    })
}
