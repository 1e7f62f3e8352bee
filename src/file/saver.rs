//! Saving ordered lines back to disk.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;

/// Saves lines to a file, joined with `\n` and ending in a trailing newline.
///
/// Paths ending in `.gz` are written gzip-compressed. When `create_backup`
/// is set and the target already exists, it is first copied to `<path>.bak`.
///
/// # Errors
///
/// Returns an error if the backup copy or the write fails.
pub fn save_lines<P: AsRef<Path>>(path: P, lines: &[String], create_backup: bool) -> Result<()> {
    let path = path.as_ref();

    if create_backup && path.exists() {
        let mut backup = path.as_os_str().to_owned();
        backup.push(".bak");
        fs::copy(path, &backup)
            .with_context(|| format!("Failed to create backup for {}", path.display()))?;
    }

    let mut content = lines.join("\n");
    content.push('\n');

    let is_gzipped = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "gz");

    if is_gzipped {
        let file = fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(content.as_bytes())
            .and_then(|_| encoder.finish().map(|_| ()))
            .with_context(|| format!("Failed to write {}", path.display()))?;
    } else {
        fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}
