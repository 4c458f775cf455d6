use std::path::Path;
use std::time::Duration;

use imgcompare_engine::DiffResult;
use imgcompare_engine::analysis::{AnalysisReport, Interpretation};
use imgcompare_engine::locate::{TemplateMatch, confidence_color};

pub fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}

/// `1234567` -> `1,234,567`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn print_image_line(label: &str, path: &Path, (w, h): (u32, u32)) {
    println!("  {label:<6}  {}  \x1b[2m{w}x{h}\x1b[0m", path.display());
}

/// Changed-pixel statistics of a diff, red when anything changed.
pub fn print_diff_stats(result: &DiffResult, elapsed: Duration) {
    let color = if result.changed_pixels == 0 { "32" } else { "31" };
    println!(
        "  \x1b[{color}m{:.2}%\x1b[0m changed  ({} of {} pixels)  \x1b[2m{}\x1b[0m",
        result.changed_percentage(),
        group_thousands(result.changed_pixels),
        group_thousands(result.total_pixels),
        format_duration(elapsed),
    );
}

pub fn print_saved_line(kind: &str, path: &Path) {
    println!("  Saved  {kind:<7} {}", path.display());
}

pub fn print_analysis(report: &AnalysisReport) {
    let label = match report.interpretation {
        Interpretation::Identical => "\x1b[32midentical\x1b[0m",
        Interpretation::Similar => "\x1b[33msimilar\x1b[0m",
        Interpretation::Different => "\x1b[31mdifferent\x1b[0m",
    };
    println!("  Compared at {}x{}", report.width, report.height);
    println!("  SSIM                    {:.4}  {label}", report.ssim);
    println!("  Histogram correlation   {:.4}", report.histogram.correlation);
    println!("  Histogram chi-square    {:.4}", report.histogram.chi_square);
    println!("  Histogram intersection  {:.4}", report.histogram.intersection);
    println!("  Histogram Hellinger     {:.4}", report.histogram.hellinger);
    println!("  Edge similarity         {:.4}", report.edges.similarity);
    let diff = &report.pixel_diff;
    println!(
        "  Pixel difference        {:.2}%  ({} of {} pixels, mean {:.2}, max {})",
        diff.difference_percentage,
        group_thousands(diff.changed_pixels),
        group_thousands(diff.total_pixels),
        diff.mean_difference,
        diff.max_difference,
    );
}

/// ANSI color code for a template match confidence.
fn match_ansi(confidence: f64) -> &'static str {
    match confidence_color(confidence).0 {
        [0, 255, 0, _] => "32",
        [255, 255, 0, _] => "33",
        _ => "31",
    }
}

pub fn print_match(found: &TemplateMatch) {
    let loc = found.location;
    println!(
        "  Match  \x1b[{}m{:.1}%\x1b[0m at ({}, {})  {}x{}{}",
        match_ansi(found.confidence),
        found.confidence * 100.0,
        loc.x,
        loc.y,
        loc.width,
        loc.height,
        if found.swapped { "  \x1b[2m(swapped)\x1b[0m" } else { "" },
    );
}
