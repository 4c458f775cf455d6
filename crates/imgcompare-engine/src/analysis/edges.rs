use image::{GrayImage, Rgba, RgbaImage};
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use serde::Serialize;

pub const LOW_THRESHOLD: f32 = 50.0;
pub const HIGH_THRESHOLD: f32 = 150.0;

/// Smoothing before edge detection, the sigma of a 5x5 Gaussian kernel.
const BLUR_SIGMA: f32 = 1.1;

const FIRST_ONLY: Rgba<u8> = Rgba([0, 255, 0, 255]);
const SECOND_ONLY: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BOTH: Rgba<u8> = Rgba([255, 255, 255, 255]);
const NEITHER: Rgba<u8> = Rgba([0, 0, 0, 255]);

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EdgeScores {
    /// Shared edge pixels over all edge pixels (intersection over union).
    /// 0.0 when neither image has edges.
    pub similarity: f64,
    pub first_edges: u64,
    pub second_edges: u64,
}

/// Canny edges of a blurred copy; edge pixels are 255.
pub fn detect(gray: &GrayImage) -> GrayImage {
    canny(&gaussian_blur_f32(gray, BLUR_SIGMA), LOW_THRESHOLD, HIGH_THRESHOLD)
}

/// Compare the edges of two equally-sized grayscale images.
pub fn compare(a: &GrayImage, b: &GrayImage) -> (EdgeScores, RgbaImage) {
    let edges_a = detect(a);
    let edges_b = detect(b);
    let mut map = RgbaImage::from_pixel(a.width(), a.height(), NEITHER);
    let (mut first, mut second, mut both) = (0u64, 0u64, 0u64);

    for ((pa, pb), out) in edges_a.pixels().zip(edges_b.pixels()).zip(map.pixels_mut()) {
        let (in_a, in_b) = (pa[0] > 0, pb[0] > 0);
        first += in_a as u64;
        second += in_b as u64;
        *out = match (in_a, in_b) {
            (true, true) => {
                both += 1;
                BOTH
            }
            (true, false) => FIRST_ONLY,
            (false, true) => SECOND_ONLY,
            (false, false) => NEITHER,
        };
    }

    let union = first + second - both;
    let similarity = if union == 0 {
        0.0
    } else {
        both as f64 / union as f64
    };
    let scores = EdgeScores {
        similarity,
        first_edges: first,
        second_edges: second,
    };
    (scores, map)
}
