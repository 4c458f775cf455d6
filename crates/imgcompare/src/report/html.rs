use std::path::Path;

use anyhow::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use imgcompare_engine::ComparisonMode;

use crate::store;

/// One image shown in the report, already PNG-encoded.
pub struct ReportImage<'a> {
    pub label: &'a str,
    pub name: String,
    pub png: &'a [u8],
    pub dimensions: (u32, u32),
}

pub struct ReportPage<'a> {
    pub mode: ComparisonMode,
    pub first: ReportImage<'a>,
    pub second: ReportImage<'a>,
    pub result: ReportImage<'a>,
    /// `(changed_pixels, total_pixels, percentage)` for diff mode.
    pub stats: Option<(u64, u64, f64)>,
}

fn image_cell(image: &ReportImage<'_>) -> String {
    let (w, h) = image.dimensions;
    format!(
        r#"<figure>
      <img src="data:image/png;base64,{data}" alt="{label} {name}" />
      <figcaption><strong>{label}</strong> {name} <span class="dim">{w}x{h}</span></figcaption>
    </figure>"#,
        data = STANDARD.encode(image.png),
        label = html_escape(image.label),
        name = html_escape(&image.name),
    )
}

fn build_html(page: &ReportPage<'_>, created_at: &str) -> String {
    let summary = match page.stats {
        Some((changed, total, pct)) => format!(
            "{mode} &middot; {pct:.2}% changed ({changed} of {total} pixels)",
            mode = page.mode,
        ),
        None => page.mode.to_string(),
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>imgcompare report</title>
  <style>
    :root {{ color-scheme: dark; }}
    body {{
      font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif;
      margin: 0; padding: 24px;
      background: #0a0a0f; color: #e4e7eb;
    }}
    h1 {{ margin: 0 0 8px; font-size: 22px; }}
    .meta {{ margin-bottom: 16px; color: #9aa5b1; font-size: 14px; }}
    .inputs {{ display: grid; grid-template-columns: 1fr 1fr; gap: 16px; margin-bottom: 16px; }}
    figure {{ margin: 0; padding: 8px; background: #14141c; border: 1px solid #262633; }}
    figure img {{ max-width: 100%; height: auto; display: block; }}
    figcaption {{ margin-top: 6px; font-size: 13px; word-break: break-word; }}
    .dim {{ color: #9aa5b1; }}
  </style>
</head>
<body>
  <h1>imgcompare report</h1>
  <div class="meta">Generated at {created_at} &middot; {summary}</div>
  <div class="inputs">
    {first}
    {second}
  </div>
  {result}
</body>
</html>"##,
        first = image_cell(&page.first),
        second = image_cell(&page.second),
        result = image_cell(&page.result),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn utc_timestamp() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let (s, m, h) = (secs % 60, (secs / 60) % 60, (secs / 3600) % 24);
    let (y, mo, d) = epoch_days_to_ymd(secs / 86400);
    format!("{y:04}-{mo:02}-{d:02}T{h:02}:{m:02}:{s:02}Z")
}

/// Convert days since Unix epoch to (year, month, day).
fn epoch_days_to_ymd(mut days: u64) -> (u64, u64, u64) {
    // Civil calendar algorithm (Howard Hinnant)
    days += 719468;
    let era = days / 146097;
    let doe = days - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

/// Write a self-contained report (images inlined) to `path`.
pub fn write(path: &Path, page: &ReportPage<'_>) -> Result<()> {
    let html = build_html(page, &utc_timestamp());
    store::write_file(path, html.as_bytes())
}
