//! Snapshot serialization and replacement on disk.

use std::path::Path;

use anyhow::Context;
use eatlist_core::Snapshot;

/// Pretty JSON with a trailing newline.
pub(crate) fn render(snapshot: &Snapshot) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(snapshot).context("serializing snapshot")?;
    json.push('\n');
    Ok(json)
}

/// Replaces the file at `path` with `snapshot`.
///
/// The JSON is written to a temp file beside the destination and renamed over
/// it, so readers see either the old snapshot or the new one, never a
/// partial write. Parent directories are created as needed.
pub(crate) async fn write_snapshot(path: &Path, snapshot: &Snapshot) -> anyhow::Result<()> {
    let json = render(snapshot)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }

    let tmp_path = path.with_extension(format!("tmp-{}", uuid::Uuid::new_v4()));
    if let Err(e) = tokio::fs::write(&tmp_path, json.as_bytes()).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(e).with_context(|| format!("writing temp file {}", tmp_path.display()));
    }

    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(e).with_context(|| {
            format!(
                "renaming {} to {}",
                tmp_path.display(),
                path.display()
            )
        });
    }

    tracing::debug!(path = %path.display(), bytes = json.len(), "snapshot written");
    Ok(())
}
