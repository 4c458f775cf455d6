use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::CompareError;
use crate::color::HexColor;

/// User-facing diff threshold on a 0–100 scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Threshold(u8);

impl Threshold {
    pub const MAX: u8 = 100;

    pub fn new(value: i64) -> Result<Self, CompareError> {
        if !(0..=Self::MAX as i64).contains(&value) {
            return Err(CompareError::InvalidThreshold(value));
        }
        Ok(Self(value as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Threshold on the 0–255 scale the channel-sum difference is compared
    /// against. Computed in `f64` as `value * 2.55`, so e.g. 10 -> 25.5.
    pub fn scaled(self) -> f64 {
        self.0 as f64 * 2.55
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(30)
    }
}

impl TryFrom<i64> for Threshold {
    type Error = CompareError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Threshold> for i64 {
    fn from(t: Threshold) -> Self {
        t.0 as i64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiffOptions {
    pub threshold: Threshold,
    pub highlight: HexColor,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            threshold: Threshold::default(),
            highlight: HexColor::RED,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DiffResult {
    /// Highlight color where pixels differ, grayscale of the first image elsewhere.
    pub buffer: RgbaImage,
    /// Number of pixels whose channel-sum difference exceeds the threshold.
    pub changed_pixels: u64,
    pub total_pixels: u64,
}

impl DiffResult {
    /// Percentage of changed pixels rounded to two decimals.
    pub fn changed_percentage(&self) -> f64 {
        if self.total_pixels == 0 {
            return 0.0;
        }
        let pct = self.changed_pixels as f64 / self.total_pixels as f64 * 100.0;
        (pct * 100.0).round() / 100.0
    }
}

/// Sum of absolute R, G and B differences (0–765). Alpha is ignored.
pub fn channel_distance(a: &Rgba<u8>, b: &Rgba<u8>) -> u32 {
    (0..3).map(|i| a[i].abs_diff(b[i]) as u32).sum()
}

/// Average of R, G and B rounded to the nearest integer.
fn grayscale(p: &Rgba<u8>) -> u8 {
    let sum = p[0] as u32 + p[1] as u32 + p[2] as u32;
    ((sum + 1) / 3) as u8
}

/// Compare two equally-sized buffers pixel by pixel in raster order.
///
/// Pure: neither input is touched and a fresh `DiffResult` is returned.
/// Unchanged pixels are rendered from `left`, so only the statistics are
/// symmetric in the two operands.
pub fn pixel_diff(
    left: &RgbaImage,
    right: &RgbaImage,
    options: &DiffOptions,
) -> Result<DiffResult, CompareError> {
    if left.dimensions() != right.dimensions() {
        return Err(CompareError::DimensionMismatch {
            left_w: left.width(),
            left_h: left.height(),
            right_w: right.width(),
            right_h: right.height(),
        });
    }

    let (w, h) = left.dimensions();
    let threshold = options.threshold.scaled();
    let highlight = options.highlight.to_rgba();
    let mut changed_pixels: u64 = 0;
    let mut buffer = RgbaImage::new(w, h);

    for ((lp, rp), out) in left.pixels().zip(right.pixels()).zip(buffer.pixels_mut()) {
        if channel_distance(lp, rp) as f64 > threshold {
            changed_pixels += 1;
            *out = highlight;
        } else {
            let gray = grayscale(lp);
            *out = Rgba([gray, gray, gray, 255]);
        }
    }

    Ok(DiffResult {
        buffer,
        changed_pixels,
        total_pixels: w as u64 * h as u64,
    })
}
