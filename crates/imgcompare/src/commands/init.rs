use anyhow::{Result, bail};

use crate::config;

/// `imgcompare init`: create .imgcompare/config.toml.
pub fn init(force: bool) -> Result<()> {
    if !force && config::config_file_exists() {
        bail!(".imgcompare/config.toml already exists (use --force to overwrite)");
    }

    config::write_template()?;

    let verb = if force { "Regenerated" } else { "Created" };
    println!("{verb} {}", config::config_path().display());
    Ok(())
}
