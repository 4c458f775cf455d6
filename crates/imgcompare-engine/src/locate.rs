//! Find where one image occurs inside another.

use image::{Rgba, RgbaImage, imageops};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use imageproc::template_matching::{MatchTemplateMethod, find_extremes, match_template};
use serde::Serialize;

use crate::CompareError;
use crate::ingest::LoadedImage;

/// Outline thickness of the match rectangle.
const OUTLINE: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Serialize)]
pub struct TemplateMatch {
    /// Normalized cross-correlation at the best position, 1.0 = exact.
    pub confidence: f64,
    pub location: Placement,
    /// The inputs were exchanged because the template was the larger one.
    pub swapped: bool,
    /// Source image with the match outlined.
    #[serde(skip)]
    pub annotated: RgbaImage,
}

/// Green from 0.8, yellow from 0.5, red below.
pub fn confidence_color(confidence: f64) -> Rgba<u8> {
    if confidence >= 0.8 {
        Rgba([0, 255, 0, 255])
    } else if confidence >= 0.5 {
        Rgba([255, 255, 0, 255])
    } else {
        Rgba([255, 0, 0, 255])
    }
}

fn fits_inside(inner: &LoadedImage, outer: &LoadedImage) -> bool {
    inner.width() <= outer.width() && inner.height() <= outer.height()
}

/// Locate `template` in `source`. When only the reverse fits, the two are
/// exchanged.
pub fn locate(source: &LoadedImage, template: &LoadedImage) -> Result<TemplateMatch, CompareError> {
    let (source, template, swapped) = if fits_inside(template, source) {
        (source, template, false)
    } else if fits_inside(source, template) {
        (template, source, true)
    } else {
        return Err(CompareError::TemplateTooLarge {
            template_w: template.width(),
            template_h: template.height(),
            source_w: source.width(),
            source_h: source.height(),
        });
    };

    let scores = match_template(
        &imageops::grayscale(source.pixels()),
        &imageops::grayscale(template.pixels()),
        MatchTemplateMethod::CrossCorrelationNormalized,
    );
    let best = find_extremes(&scores);
    let (x, y) = best.max_value_location;
    let confidence = best.max_value as f64;
    let (width, height) = template.dimensions();

    let mut annotated = source.pixels().clone();
    let color = confidence_color(confidence);
    for grow in 0..OUTLINE {
        let rect = Rect::at(x as i32 - grow as i32, y as i32 - grow as i32)
            .of_size(width + 2 * grow, height + 2 * grow);
        draw_hollow_rect_mut(&mut annotated, rect, color);
    }

    Ok(TemplateMatch {
        confidence,
        location: Placement {
            x,
            y,
            width,
            height,
        },
        swapped,
        annotated,
    })
}
