use std::fmt;
use std::str::FromStr;

use image::{RgbaImage, imageops};
use serde::{Deserialize, Serialize};

use crate::canvas::AlignedPair;
use crate::color::HexColor;
use crate::ingest::LoadedImage;

/// Gap between the two images in the side-by-side export.
pub const SIDE_BY_SIDE_GAP: u32 = 20;

/// Background of the side-by-side export.
pub const SIDE_BY_SIDE_BACKGROUND: HexColor = HexColor::new(0x0a, 0x0a, 0x0f);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonMode {
    #[default]
    SideBySide,
    Slider,
    Diff,
}

impl ComparisonMode {
    pub const ALL: [ComparisonMode; 3] = [Self::SideBySide, Self::Slider, Self::Diff];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SideBySide => "side-by-side",
            Self::Slider => "slider",
            Self::Diff => "diff",
        }
    }
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown mode `{s}` (expected side-by-side, slider or diff)"))
    }
}

/// Reveal boundary for slider mode, as a percentage of the canvas width.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct SliderPosition(f64);

impl SliderPosition {
    /// Clamp into 0–100. NaN falls back to the midpoint.
    pub fn new(percent: f64) -> Self {
        if percent.is_nan() {
            return Self::default();
        }
        Self(percent.clamp(0.0, 100.0))
    }

    pub fn percent(self) -> f64 {
        self.0
    }

    /// Column where the reveal boundary falls on a canvas `width` pixels wide.
    pub fn boundary(self, width: u32) -> u32 {
        ((width as f64 * self.0 / 100.0).round() as u32).min(width)
    }
}

impl Default for SliderPosition {
    fn default() -> Self {
        Self(50.0)
    }
}

impl From<f64> for SliderPosition {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

impl From<SliderPosition> for f64 {
    fn from(p: SliderPosition) -> Self {
        p.0
    }
}

/// Both images next to each other with a gap, each vertically centered.
pub fn render_side_by_side(a: &LoadedImage, b: &LoadedImage) -> RgbaImage {
    let width = a.width() + SIDE_BY_SIDE_GAP + b.width();
    let height = a.height().max(b.height());
    let mut out = RgbaImage::from_pixel(width, height, SIDE_BY_SIDE_BACKGROUND.to_rgba());
    imageops::overlay(&mut out, a.pixels(), 0, ((height - a.height()) / 2) as i64);
    imageops::overlay(
        &mut out,
        b.pixels(),
        (a.width() + SIDE_BY_SIDE_GAP) as i64,
        ((height - b.height()) / 2) as i64,
    );
    out
}

/// Second image revealed over the first: columns left of the boundary come
/// from `b`, the rest from `a`.
pub fn render_slider(pair: &AlignedPair, position: SliderPosition) -> RgbaImage {
    let split = position.boundary(pair.canvas.width);
    RgbaImage::from_fn(pair.canvas.width, pair.canvas.height, |x, y| {
        if x < split {
            *pair.b.get_pixel(x, y)
        } else {
            *pair.a.get_pixel(x, y)
        }
    })
}
