use std::path::Path;

use anyhow::{Context, Result};
use imgcompare_engine::LoadedImage;
use imgcompare_engine::ingest::{decode, mime_for_path};
use tracing::debug;

/// Read and decode one image. Decoding runs on the blocking pool.
pub async fn load_image(path: &Path) -> Result<LoadedImage> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mime = mime_for_path(path);
    debug!(path = %path.display(), mime, bytes = bytes.len(), "decoding image");

    let image = tokio::task::spawn_blocking(move || decode(&bytes, mime))
        .await
        .context("Decode task panicked")?
        .with_context(|| format!("Failed to load {}", path.display()))?;
    debug!(path = %path.display(), width = image.width(), height = image.height(), "decoded");
    Ok(image)
}

/// Load both slots concurrently. Returns only once both decodes succeeded.
pub async fn load_pair(first: &Path, second: &Path) -> Result<(LoadedImage, LoadedImage)> {
    tokio::try_join!(load_image(first), load_image(second))
}
