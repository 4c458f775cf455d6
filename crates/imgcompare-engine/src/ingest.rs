use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::CompareError;

/// MIME type declared for files whose extension names no image format.
pub const UNKNOWN_MIME: &str = "application/octet-stream";

/// Which of the two comparison inputs an image belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    First,
    Second,
}

/// A fully decoded RGBA image. There is no partially-loaded state.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedImage {
    pixels: RgbaImage,
}

impl LoadedImage {
    /// Wrap an already-decoded buffer. Zero-area buffers are rejected.
    pub fn from_rgba(pixels: RgbaImage) -> Result<Self, CompareError> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(CompareError::ZeroArea { width, height });
        }
        Ok(Self { pixels })
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

/// Validate the declared MIME type and decode `bytes` to RGBA.
///
/// The declared type must start with `image/`; anything else is rejected
/// before any decoding is attempted. Empty or corrupted data fails decode
/// instead of producing an empty image.
pub fn decode(bytes: &[u8], declared_mime: &str) -> Result<LoadedImage, CompareError> {
    if !declared_mime.starts_with("image/") {
        return Err(CompareError::NotAnImage(declared_mime.to_string()));
    }
    if bytes.is_empty() {
        return Err(CompareError::Empty);
    }
    let pixels = image::load_from_memory(bytes)
        .map_err(CompareError::Decode)?
        .to_rgba8();
    LoadedImage::from_rgba(pixels)
}

/// MIME type a file declares by its extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|f| f.to_mime_type())
        .unwrap_or(UNKNOWN_MIME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut buf = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn decodes_png_and_records_dimensions() {
        let src = RgbaImage::from_pixel(7, 3, Rgba([10, 20, 30, 255]));
        let loaded = decode(&png_bytes(&src), "image/png").unwrap();
        assert_eq!(loaded.dimensions(), (7, 3));
        assert_eq!(loaded.pixels(), &src);
    }

    #[test]
    fn rejects_non_image_mime_before_decoding() {
        let src = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        let err = decode(&png_bytes(&src), "text/plain").unwrap_err();
        assert!(matches!(err, CompareError::NotAnImage(m) if m == "text/plain"));
    }

    #[test]
    fn zero_byte_file_fails() {
        assert!(matches!(decode(&[], "image/png"), Err(CompareError::Empty)));
    }

    #[test]
    fn corrupted_data_fails_decode() {
        let err = decode(b"\x89PNG\r\n\x1a\nnot really a png", "image/png").unwrap_err();
        assert!(matches!(err, CompareError::Decode(_)));
    }

    #[test]
    fn zero_area_buffer_rejected() {
        let err = LoadedImage::from_rgba(RgbaImage::new(0, 5)).unwrap_err();
        assert!(matches!(
            err,
            CompareError::ZeroArea {
                width: 0,
                height: 5
            }
        ));
    }

    #[test]
    fn mime_follows_extension() {
        assert_eq!(mime_for_path(Path::new("a/b.png")), "image/png");
        assert_eq!(mime_for_path(Path::new("photo.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("notes.txt")), UNKNOWN_MIME);
        assert_eq!(mime_for_path(Path::new("no_extension")), UNKNOWN_MIME);
    }
}
