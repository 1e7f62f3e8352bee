//! Loading text files into ordered lines.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;

/// Loads a file as a vector of lines.
///
/// Content must be valid UTF-8; anything else is an error, not a lossy
/// conversion. Files whose name ends in `.gz` (and files starting with the
/// gzip magic bytes) are transparently decompressed.
///
/// Line splitting drops a single trailing newline, so `"a\nb\n"` loads as
/// `["a", "b"]` and an empty file loads as one empty line.
///
/// # Errors
///
/// Returns an error if the file cannot be read, decompression fails, or the
/// content is not valid UTF-8.
pub fn load_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let is_gzipped = bytes.starts_with(&[0x1f, 0x8b])
        || path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "gz");

    let content = if is_gzipped {
        decompress_gzip(&bytes)
            .with_context(|| format!("Failed to decompress {}", path.display()))?
    } else {
        String::from_utf8(bytes)
            .with_context(|| format!("{} is not valid UTF-8", path.display()))?
    };

    Ok(split_lines(&content))
}

/// Splits text into lines, dropping a single trailing newline.
pub fn split_lines(content: &str) -> Vec<String> {
    let trimmed = content.strip_suffix('\n').unwrap_or(content);
    if trimmed.is_empty() && content.len() <= 1 {
        return vec![String::new()];
    }
    trimmed.split('\n').map(|l| l.trim_end_matches('\r').to_string()).collect()
}

fn decompress_gzip(bytes: &[u8]) -> Result<String> {
    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Invalid gzip data or non-UTF-8 content")?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_drops_single_trailing_newline() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_split_empty_content_is_one_empty_line() {
        assert_eq!(split_lines(""), vec![""]);
        assert_eq!(split_lines("\n"), vec![""]);
    }

    #[test]
    fn test_split_preserves_interior_blank_lines() {
        assert_eq!(split_lines("a\n\nb\n"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_split_strips_carriage_returns() {
        assert_eq!(split_lines("a\r\nb\r\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(load_lines("/no/such/file/anywhere.txt").is_err());
    }
}
