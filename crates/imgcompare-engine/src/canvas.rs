use image::{Rgba, RgbaImage, imageops};

use crate::color::HexColor;
use crate::ingest::LoadedImage;

/// Shared coordinate space sized to the larger extent of the two images.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComparisonCanvas {
    pub width: u32,
    pub height: u32,
}

impl ComparisonCanvas {
    pub fn for_pair(a: &LoadedImage, b: &LoadedImage) -> Self {
        Self {
            width: a.width().max(b.width()),
            height: a.height().max(b.height()),
        }
    }

    /// Top-left position that centers a `w x h` image on this canvas.
    /// Odd remainders round toward the top-left.
    pub fn centering_offset(&self, w: u32, h: u32) -> (u32, u32) {
        (
            self.width.saturating_sub(w) / 2,
            self.height.saturating_sub(h) / 2,
        )
    }

    /// Draw `src` centered over a canvas-sized buffer filled with `fill`.
    /// Translucent source pixels blend with the fill.
    pub fn compose(&self, src: &RgbaImage, fill: Rgba<u8>) -> RgbaImage {
        let mut out = RgbaImage::from_pixel(self.width, self.height, fill);
        let (x, y) = self.centering_offset(src.width(), src.height());
        imageops::overlay(&mut out, src, x as i64, y as i64);
        out
    }
}

/// Both images composed onto equally-sized buffers.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignedPair {
    pub canvas: ComparisonCanvas,
    pub a: RgbaImage,
    pub b: RgbaImage,
}

/// Compose both images onto a shared canvas filled with `fill`.
///
/// Deterministic: the same inputs always yield byte-identical buffers.
pub fn align(a: &LoadedImage, b: &LoadedImage, fill: HexColor) -> AlignedPair {
    let canvas = ComparisonCanvas::for_pair(a, b);
    let fill = fill.to_rgba();
    AlignedPair {
        canvas,
        a: canvas.compose(a.pixels(), fill),
        b: canvas.compose(b.pixels(), fill),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, c: [u8; 4]) -> LoadedImage {
        LoadedImage::from_rgba(RgbaImage::from_pixel(w, h, Rgba(c))).unwrap()
    }

    #[test]
    fn canvas_takes_max_of_each_axis() {
        let a = solid(100, 20, [1, 1, 1, 255]);
        let b = solid(30, 80, [1, 1, 1, 255]);
        let canvas = ComparisonCanvas::for_pair(&a, &b);
        assert_eq!(canvas, ComparisonCanvas { width: 100, height: 80 });
    }

    #[test]
    fn narrower_image_is_centered_with_fill_margins() {
        let white = [255, 255, 255, 255];
        let a = solid(100, 50, white);
        let b = solid(200, 50, [9, 9, 9, 255]);
        let pair = align(&a, &b, HexColor::BLACK);

        assert_eq!(pair.canvas, ComparisonCanvas { width: 200, height: 50 });
        assert_eq!(pair.a.dimensions(), (200, 50));
        assert_eq!(pair.b.dimensions(), (200, 50));

        for y in [0, 25, 49] {
            assert_eq!(pair.a.get_pixel(0, y), &Rgba([0, 0, 0, 255]));
            assert_eq!(pair.a.get_pixel(49, y), &Rgba([0, 0, 0, 255]));
            assert_eq!(pair.a.get_pixel(50, y), &Rgba(white));
            assert_eq!(pair.a.get_pixel(149, y), &Rgba(white));
            assert_eq!(pair.a.get_pixel(150, y), &Rgba([0, 0, 0, 255]));
            assert_eq!(pair.a.get_pixel(199, y), &Rgba([0, 0, 0, 255]));
        }
        // The larger image fills its canvas entirely.
        assert!(pair.b.pixels().all(|p| *p == Rgba([9, 9, 9, 255])));
    }

    #[test]
    fn odd_remainder_rounds_toward_top_left() {
        let canvas = ComparisonCanvas { width: 5, height: 4 };
        assert_eq!(canvas.centering_offset(2, 1), (1, 1));
        assert_eq!(canvas.centering_offset(5, 4), (0, 0));
    }

    #[test]
    fn fill_color_is_configurable() {
        let a = solid(1, 1, [200, 0, 0, 255]);
        let b = solid(3, 1, [200, 0, 0, 255]);
        let pair = align(&a, &b, HexColor::new(0, 0, 255));
        assert_eq!(pair.a.get_pixel(0, 0), &Rgba([0, 0, 255, 255]));
        assert_eq!(pair.a.get_pixel(1, 0), &Rgba([200, 0, 0, 255]));
    }

    #[test]
    fn transparent_source_pixels_show_the_fill() {
        let a = solid(1, 1, [10, 20, 30, 0]);
        let b = solid(1, 1, [0, 0, 0, 255]);
        let pair = align(&a, &b, HexColor::BLACK);
        assert_eq!(pair.a.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn alignment_is_idempotent() {
        let a = solid(13, 7, [1, 2, 3, 255]);
        let b = solid(4, 19, [4, 5, 6, 255]);
        assert_eq!(align(&a, &b, HexColor::BLACK), align(&a, &b, HexColor::BLACK));
    }
}
