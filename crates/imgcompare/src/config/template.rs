use anyhow::{Context, Result};

use super::{CONFIG_DIR, config_path};

/// Hand-crafted config template with every key commented out, so the
/// defaults stay visible without taking effect.
const CONFIG_TEMPLATE: &str = r##"# ─────────────────────────────────────────────────────────
# Pixel difference
# ─────────────────────────────────────────────────────────
[diff]
# threshold = 30                    # 0-100, higher ignores smaller changes
# color = "#ff0000"                 # highlight for changed pixels

# ─────────────────────────────────────────────────────────
# Alignment canvas
# ─────────────────────────────────────────────────────────
[canvas]
# fill = "#000000"                  # padding behind the smaller image

# ─────────────────────────────────────────────────────────
# Default view
# ─────────────────────────────────────────────────────────
[view]
# mode = "side-by-side"             # "side-by-side" | "slider" | "diff"
# slider = 50                       # reveal position, 0-100

[export]
# dir = "."                         # where exports land by default
"##;

pub fn config_file_exists() -> bool {
    config_path().exists()
}

/// Write the commented template to `.imgcompare/config.toml`.
pub fn write_template() -> Result<()> {
    std::fs::create_dir_all(CONFIG_DIR)
        .with_context(|| format!("Failed to create {CONFIG_DIR} directory"))?;
    let path = config_path();
    std::fs::write(&path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
