use image::{GrayImage, Rgb, RgbImage, Rgba, RgbaImage, imageops};
use serde::Serialize;

/// Difference luma above which a pixel counts as changed.
pub const CHANGE_LEVEL: u8 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PixelDifference {
    pub difference_percentage: f64,
    pub changed_pixels: u64,
    pub total_pixels: u64,
    pub mean_difference: f64,
    pub max_difference: u8,
}

/// Per-channel absolute difference of two equally-sized images, as luma.
/// Alpha is ignored.
pub fn difference_luma(a: &RgbaImage, b: &RgbaImage) -> GrayImage {
    let diff = RgbImage::from_fn(a.width(), a.height(), |x, y| {
        let (p, q) = (a.get_pixel(x, y), b.get_pixel(x, y));
        Rgb([p[0].abs_diff(q[0]), p[1].abs_diff(q[1]), p[2].abs_diff(q[2])])
    });
    imageops::grayscale(&diff)
}

pub fn measure(luma: &GrayImage) -> PixelDifference {
    let total_pixels = luma.width() as u64 * luma.height() as u64;
    let mut changed_pixels = 0u64;
    let mut sum = 0u64;
    let mut max_difference = 0u8;
    for p in luma.pixels() {
        let v = p[0];
        if v > CHANGE_LEVEL {
            changed_pixels += 1;
        }
        sum += v as u64;
        max_difference = max_difference.max(v);
    }

    let (difference_percentage, mean_difference) = if total_pixels == 0 {
        (0.0, 0.0)
    } else {
        (
            changed_pixels as f64 / total_pixels as f64 * 100.0,
            sum as f64 / total_pixels as f64,
        )
    };
    PixelDifference {
        difference_percentage,
        changed_pixels,
        total_pixels,
        mean_difference,
        max_difference,
    }
}

/// Black through red and yellow to white.
fn hot(v: u8) -> Rgba<u8> {
    let ramp = |offset: u16| (v as u16 * 3).saturating_sub(offset).min(255) as u8;
    Rgba([ramp(0), ramp(255), ramp(510), 255])
}

pub fn heatmap(luma: &GrayImage) -> RgbaImage {
    RgbaImage::from_fn(luma.width(), luma.height(), |x, y| hot(luma.get_pixel(x, y)[0]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    #[test]
    fn single_changed_pixel_on_4x4() {
        let a = RgbaImage::from_pixel(4, 4, BLACK);
        let mut b = a.clone();
        b.put_pixel(1, 2, Rgba([255, 255, 255, 255]));

        let stats = measure(&difference_luma(&a, &b));
        assert_eq!(stats.changed_pixels, 1);
        assert_eq!(stats.total_pixels, 16);
        assert_eq!(stats.difference_percentage, 6.25);
        assert_eq!(stats.max_difference, 255);
        assert_eq!(stats.mean_difference, 255.0 / 16.0);
    }

    #[test]
    fn change_level_is_strict() {
        let a = RgbaImage::from_pixel(2, 1, BLACK);
        let mut b = a.clone();
        b.put_pixel(0, 0, Rgba([30, 30, 30, 255]));
        b.put_pixel(1, 0, Rgba([31, 31, 31, 255]));

        let luma = difference_luma(&a, &b);
        assert_eq!(luma.get_pixel(0, 0), &Luma([30]));
        assert_eq!(measure(&luma).changed_pixels, 1);
    }

    #[test]
    fn alpha_does_not_contribute() {
        let a = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 0]));
        let b = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        let stats = measure(&difference_luma(&a, &b));
        assert_eq!(stats.max_difference, 0);
    }

    #[test]
    fn hot_ramp_endpoints() {
        assert_eq!(hot(0), BLACK);
        assert_eq!(hot(85), Rgba([255, 0, 0, 255]));
        assert_eq!(hot(170), Rgba([255, 255, 0, 255]));
        assert_eq!(hot(255), Rgba([255, 255, 255, 255]));
    }
}
