use std::sync::Arc;

use image::RgbaImage;

use crate::CompareError;
use crate::canvas::align;
use crate::color::HexColor;
use crate::diff::{DiffOptions, DiffResult, Threshold, pixel_diff};
use crate::ingest::{LoadedImage, Slot};
use crate::layout::{ComparisonMode, SliderPosition, render_side_by_side, render_slider};

/// A user action. Each one produces a new `ComparisonState`.
#[derive(Clone, Debug)]
pub enum Action {
    Load { slot: Slot, image: Arc<LoadedImage> },
    Clear(Slot),
    Swap,
    SetMode(ComparisonMode),
    SetThreshold(Threshold),
    SetColor(HexColor),
    SetSlider(SliderPosition),
}

/// Everything the comparison view depends on. Images are shared read-only.
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonState {
    pub first: Option<Arc<LoadedImage>>,
    pub second: Option<Arc<LoadedImage>>,
    pub mode: ComparisonMode,
    pub slider: SliderPosition,
    pub diff: DiffOptions,
    /// Background of the alignment canvas.
    pub fill: HexColor,
}

impl Default for ComparisonState {
    fn default() -> Self {
        Self {
            first: None,
            second: None,
            mode: ComparisonMode::default(),
            slider: SliderPosition::default(),
            diff: DiffOptions::default(),
            fill: HexColor::BLACK,
        }
    }
}

/// What the active mode renders.
#[derive(Clone, Debug, PartialEq)]
pub enum View {
    /// One or both slots are empty; nothing is computed.
    Placeholder,
    SideBySide(RgbaImage),
    Slider(RgbaImage),
    Diff(DiffResult),
}

impl View {
    /// The rendered canvas, if any.
    pub fn canvas(&self) -> Option<&RgbaImage> {
        match self {
            Self::Placeholder => None,
            Self::SideBySide(img) | Self::Slider(img) => Some(img),
            Self::Diff(result) => Some(&result.buffer),
        }
    }
}

impl ComparisonState {
    pub fn apply(&self, action: Action) -> Self {
        let mut next = self.clone();
        match action {
            Action::Load { slot, image } => *next.slot_mut(slot) = Some(image),
            Action::Clear(slot) => *next.slot_mut(slot) = None,
            Action::Swap => std::mem::swap(&mut next.first, &mut next.second),
            Action::SetMode(mode) => next.mode = mode,
            Action::SetThreshold(t) => next.diff.threshold = t,
            Action::SetColor(c) => next.diff.highlight = c,
            Action::SetSlider(p) => next.slider = p,
        }
        next
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<Arc<LoadedImage>> {
        match slot {
            Slot::First => &mut self.first,
            Slot::Second => &mut self.second,
        }
    }

    pub fn slot(&self, slot: Slot) -> Option<&LoadedImage> {
        match slot {
            Slot::First => self.first.as_deref(),
            Slot::Second => self.second.as_deref(),
        }
    }

    /// Render the active mode from scratch.
    pub fn render(&self) -> Result<View, CompareError> {
        let (Some(a), Some(b)) = (self.first.as_deref(), self.second.as_deref()) else {
            return Ok(View::Placeholder);
        };
        let view = match self.mode {
            ComparisonMode::SideBySide => View::SideBySide(render_side_by_side(a, b)),
            ComparisonMode::Slider => {
                View::Slider(render_slider(&align(a, b, self.fill), self.slider))
            }
            ComparisonMode::Diff => {
                let pair = align(a, b, self.fill);
                View::Diff(pixel_diff(&pair.a, &pair.b, &self.diff)?)
            }
        };
        Ok(view)
    }

    /// Render the active mode and encode it as PNG.
    pub fn export_png(&self) -> Result<Vec<u8>, CompareError> {
        let view = self.render()?;
        let canvas = view.canvas().ok_or(CompareError::MissingInput)?;
        crate::export::encode_png(canvas)
    }
}
