use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("unsupported file type `{0}`: expected an image/* MIME type")]
    NotAnImage(String),

    #[error("image data is empty")]
    Empty,

    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("decoded image has zero area ({width}x{height})")]
    ZeroArea { width: u32, height: u32 },

    #[error("dimension mismatch: {left_w}x{left_h} vs {right_w}x{right_h}")]
    DimensionMismatch {
        left_w: u32,
        left_h: u32,
        right_w: u32,
        right_h: u32,
    },

    #[error("invalid hex color `{0}` (expected #rrggbb)")]
    InvalidColor(String),

    #[error("threshold must be between 0 and 100, got {0}")]
    InvalidThreshold(i64),

    #[error("both image slots must be loaded")]
    MissingInput,

    #[error("failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("analysis failed: {0}")]
    Analysis(String),

    #[error("template {template_w}x{template_h} is larger than source {source_w}x{source_h}")]
    TemplateTooLarge {
        template_w: u32,
        template_h: u32,
        source_w: u32,
        source_h: u32,
    },
}

pub mod analysis;
pub mod canvas;
pub mod color;
pub mod diff;
pub mod export;
pub mod ingest;
pub mod layout;
pub mod locate;
pub mod state;

pub use self::canvas::{AlignedPair, ComparisonCanvas, align};
pub use self::color::HexColor;
pub use self::diff::{DiffOptions, DiffResult, Threshold, pixel_diff};
pub use self::ingest::{LoadedImage, Slot};
pub use self::layout::{ComparisonMode, SliderPosition};
pub use self::state::{Action, ComparisonState, View};
