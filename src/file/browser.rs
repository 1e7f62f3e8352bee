//! Directory listing model for the file browser mode.
//!
//! Holds the current directory, its entries (directories first, then files,
//! both name-sorted case-insensitively), a selection index, a hidden-file
//! toggle, and a case-insensitive substring filter with its own input mode.
//! Rendering lives elsewhere; this is purely the navigable model.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// One entry in the current directory listing.
#[derive(Debug, Clone)]
pub struct BrowserEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Navigable model of one directory.
#[derive(Debug)]
pub struct DirectoryBrowser {
    current_dir: PathBuf,
    all_entries: Vec<BrowserEntry>,
    visible: Vec<usize>,
    selected: usize,
    show_hidden: bool,
    filter: String,
    filter_mode: bool,
}

impl DirectoryBrowser {
    /// Creates a browser rooted at `dir` and reads its entries.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let mut browser = Self {
            current_dir: dir.as_ref().to_path_buf(),
            all_entries: Vec::new(),
            visible: Vec::new(),
            selected: 0,
            show_hidden: false,
            filter: String::new(),
            filter_mode: false,
        };
        browser.refresh()?;
        Ok(browser)
    }

    /// Returns the directory being listed.
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Re-reads the directory from disk, keeping filter and hidden settings.
    pub fn refresh(&mut self) -> Result<()> {
        let read = fs::read_dir(&self.current_dir)
            .with_context(|| format!("Cannot read directory {}", self.current_dir.display()))?;

        let mut entries = Vec::new();
        for entry in read.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();
            let is_dir = path.is_dir();
            entries.push(BrowserEntry { name, path, is_dir });
        }
        entries.sort_by(|a, b| {
            b.is_dir
                .cmp(&a.is_dir)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });

        self.all_entries = entries;
        self.apply_filter();
        Ok(())
    }

    fn apply_filter(&mut self) {
        let needle = self.filter.to_lowercase();
        self.visible = self
            .all_entries
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                (self.show_hidden || !e.name.starts_with('.'))
                    && (needle.is_empty() || e.name.to_lowercase().contains(&needle))
            })
            .map(|(i, _)| i)
            .collect();
        self.selected = self.selected.min(self.visible.len().saturating_sub(1));
    }

    /// Returns the entries that pass the hidden and filter settings.
    pub fn entries(&self) -> Vec<&BrowserEntry> {
        self.visible.iter().map(|&i| &self.all_entries[i]).collect()
    }

    /// Returns the index of the selected entry within the visible listing.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Returns the selected entry, if the listing is non-empty.
    pub fn selected_entry(&self) -> Option<&BrowserEntry> {
        self.visible
            .get(self.selected)
            .map(|&i| &self.all_entries[i])
    }

    /// Moves the selection by a delta, clamping to the listing bounds.
    pub fn move_selection(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let max = self.visible.len() as i64 - 1;
        self.selected = (self.selected as i64 + delta as i64).clamp(0, max) as usize;
    }

    /// Ascends to the parent directory, resetting selection and filter.
    /// A no-op at the filesystem root.
    pub fn ascend(&mut self) -> Result<()> {
        let Some(parent) = self.current_dir.parent().map(Path::to_path_buf) else {
            return Ok(());
        };
        self.change_dir(parent)
    }

    /// Descends into the selected directory. Returns true if the selection
    /// was a directory and was entered.
    pub fn descend(&mut self) -> Result<bool> {
        let Some(entry) = self.selected_entry() else {
            return Ok(false);
        };
        if !entry.is_dir {
            return Ok(false);
        }
        let target = entry.path.clone();
        self.change_dir(target)?;
        Ok(true)
    }

    fn change_dir(&mut self, dir: PathBuf) -> Result<()> {
        let previous = std::mem::replace(&mut self.current_dir, dir);
        self.selected = 0;
        self.filter.clear();
        self.filter_mode = false;
        if let Err(err) = self.refresh() {
            // Unreadable target: stay where we were.
            self.current_dir = previous;
            self.refresh()?;
            return Err(err);
        }
        Ok(())
    }

    /// Returns true while filter keys are being captured.
    pub fn filter_mode(&self) -> bool {
        self.filter_mode
    }

    /// Returns the current filter text.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Toggles filter input mode.
    pub fn toggle_filter_mode(&mut self) {
        self.filter_mode = !self.filter_mode;
    }

    /// Appends a character to the filter and narrows the listing.
    pub fn push_filter_char(&mut self, ch: char) {
        self.filter.push(ch);
        self.apply_filter();
    }

    /// Removes the last filter character and widens the listing.
    pub fn pop_filter_char(&mut self) {
        self.filter.pop();
        self.apply_filter();
    }

    /// Clears the filter text and leaves filter input mode.
    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.filter_mode = false;
        self.apply_filter();
    }

    /// Toggles listing of dotfiles.
    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        self.apply_filter();
    }

    /// Returns true if dotfiles are listed.
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, DirectoryBrowser) {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("alpha.txt")).unwrap();
        File::create(dir.path().join("beta.txt")).unwrap();
        File::create(dir.path().join(".hidden")).unwrap();
        let browser = DirectoryBrowser::new(dir.path()).unwrap();
        (dir, browser)
    }

    #[test]
    fn test_dirs_sort_first_hidden_excluded() {
        let (_dir, browser) = fixture();
        let names: Vec<_> = browser.entries().iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["sub", "alpha.txt", "beta.txt"]);
    }

    #[test]
    fn test_toggle_hidden_reveals_dotfiles() {
        let (_dir, mut browser) = fixture();
        browser.toggle_hidden();
        let names: Vec<_> = browser.entries().iter().map(|e| e.name.clone()).collect();
        assert!(names.contains(&".hidden".to_string()));
    }

    #[test]
    fn test_filter_narrows_case_insensitively() {
        let (_dir, mut browser) = fixture();
        browser.push_filter_char('A');
        browser.push_filter_char('L');
        let names: Vec<_> = browser.entries().iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["alpha.txt"]);
        browser.pop_filter_char();
        browser.pop_filter_char();
        assert_eq!(browser.entries().len(), 3);
    }

    #[test]
    fn test_selection_clamps() {
        let (_dir, mut browser) = fixture();
        browser.move_selection(100);
        assert_eq!(browser.selected_index(), 2);
        browser.move_selection(-100);
        assert_eq!(browser.selected_index(), 0);
    }

    #[test]
    fn test_descend_and_ascend() {
        let (dir, mut browser) = fixture();
        // "sub" sorts first
        assert!(browser.descend().unwrap());
        assert_eq!(browser.current_dir(), dir.path().join("sub"));
        assert_eq!(browser.entries().len(), 0);
        browser.ascend().unwrap();
        assert_eq!(browser.current_dir(), dir.path());
        assert_eq!(browser.selected_index(), 0);
    }

    #[test]
    fn test_descend_on_file_returns_false() {
        let (_dir, mut browser) = fixture();
        browser.move_selection(1); // alpha.txt
        assert!(!browser.descend().unwrap());
    }

    #[test]
    fn test_missing_directory_fails() {
        assert!(DirectoryBrowser::new("/no/such/dir/at/all").is_err());
    }
}
