//! File I/O for plain-text documents.
//!
//! The editor core talks to files through the narrow [`FileStore`] trait:
//! load a path into ordered lines, save ordered lines to a path. The
//! filesystem implementation lives in `loader`/`saver` behind [`FsStore`]
//! and handles strict UTF-8 decoding, transparent gzip for `.gz` paths,
//! trailing-newline policy, and optional `.bak` backups. Tests substitute
//! their own stores.

pub mod browser;
pub mod loader;
pub mod saver;

use std::path::Path;

use anyhow::Result;

pub use browser::DirectoryBrowser;

/// Ordered-lines file access used by the editor engine.
pub trait FileStore {
    /// Loads a file as ordered lines. Fails on missing files or content that
    /// is not valid UTF-8.
    fn load(&self, path: &Path) -> Result<Vec<String>>;

    /// Saves ordered lines to a file.
    fn save(&self, path: &Path, lines: &[String]) -> Result<()>;
}

/// Filesystem-backed [`FileStore`].
#[derive(Debug, Clone, Default)]
pub struct FsStore {
    /// Create a `.bak` copy of an existing file before overwriting it.
    pub create_backup: bool,
}

impl FileStore for FsStore {
    fn load(&self, path: &Path) -> Result<Vec<String>> {
        loader::load_lines(path)
    }

    fn save(&self, path: &Path, lines: &[String]) -> Result<()> {
        saver::save_lines(path, lines, self.create_backup)
    }
}
