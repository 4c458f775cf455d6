use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use imgcompare_engine::export::encode_png;
use imgcompare_engine::locate;
use tracing::info;

use crate::ingest;
use crate::report::terminal;
use crate::store;

/// `imgcompare locate`: find the template image inside the source image.
pub async fn locate(
    source: &Path,
    template: &Path,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let (scene, needle) = ingest::load_pair(source, template).await?;

    let found = tokio::task::spawn_blocking(move || locate::locate(&scene, &needle))
        .await
        .context("Template match task panicked")?
        .context("Failed to locate template")?;
    if found.swapped {
        info!("template is larger than source, searching the other way round");
    }

    if let Some(path) = &output {
        let png = encode_png(&found.annotated).context("Failed to encode annotated image")?;
        store::write_file(path, &png)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
    } else {
        terminal::print_match(&found);
        if let Some(path) = &output {
            terminal::print_saved_line("match", path);
        }
    }
    Ok(())
}
