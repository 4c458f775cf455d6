use image::{ImageFormat, RgbaImage};

use crate::CompareError;
use crate::layout::ComparisonMode;

/// Encode a rendered canvas as PNG.
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, CompareError> {
    let mut png = Vec::new();
    canvas
        .write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)
        .map_err(CompareError::Encode)?;
    Ok(png)
}

/// Download name for an export, e.g. `image-compare-diff-1700000000000.png`.
pub fn export_file_name(mode: ComparisonMode, unix_millis: u128) -> String {
    format!("image-compare-{mode}-{unix_millis}.png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn png_round_trip_keeps_dimensions_and_pixels() {
        let canvas = RgbaImage::from_fn(5, 3, |x, y| Rgba([x as u8 * 40, y as u8 * 80, 7, 255]));
        let png = encode_png(&canvas).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded, canvas);
    }

    #[test]
    fn file_name_contains_mode_and_timestamp() {
        assert_eq!(
            export_file_name(ComparisonMode::SideBySide, 42),
            "image-compare-side-by-side-42.png"
        );
    }
}
