//! Editor mode management for modal editing.
//!
//! This module provides the `EditorMode` enum that represents the current
//! editing mode. Following vim-style modal editing, the editor is always in
//! exactly one mode, and each mode has its own keymap table, action-handler
//! table, and default fallback behavior.
//!
//! # Modes
//!
//! - **Normal**: The default mode for navigation and commands
//! - **Insert**: Mode for inserting text
//! - **Command**: Mode for editing a colon-command line
//! - **FileBrowser**: Mode for navigating directories and opening files
//!
//! Mode transitions are explicit only: they happen through dispatched actions
//! (`enter_insert_mode`, `enter_normal_mode`, ...), never implicitly from
//! buffer or cursor changes.
//!
//! # Example
//!
//! ```
//! use sumi::editor::mode::EditorMode;
//!
//! // The editor starts in Normal mode
//! let mode = EditorMode::default();
//! assert_eq!(mode, EditorMode::Normal);
//! assert_eq!(format!("{}", mode), "NORMAL");
//! ```

use std::fmt;

/// The current editing mode.
///
/// The `Display` implementation produces the uppercase label shown in the
/// status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorMode {
    /// Normal mode for navigation and structural operations.
    Normal,
    /// Insert mode for typing text into the buffer.
    Insert,
    /// Command mode for editing a colon-command line.
    Command,
    /// File browser mode for navigating directories.
    FileBrowser,
}

impl EditorMode {
    /// All modes, in a stable order. Useful for building per-mode tables.
    pub const ALL: [EditorMode; 4] = [
        EditorMode::Normal,
        EditorMode::Insert,
        EditorMode::Command,
        EditorMode::FileBrowser,
    ];

    /// Returns the lowercase name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            EditorMode::Normal => "normal",
            EditorMode::Insert => "insert",
            EditorMode::Command => "command",
            EditorMode::FileBrowser => "file_browser",
        }
    }

    /// Parses a configuration mode name. Accepts "browser" as an alias for
    /// "file_browser".
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "normal" => Some(EditorMode::Normal),
            "insert" => Some(EditorMode::Insert),
            "command" => Some(EditorMode::Command),
            "file_browser" | "browser" => Some(EditorMode::FileBrowser),
            _ => None,
        }
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorMode::Normal => write!(f, "NORMAL"),
            EditorMode::Insert => write!(f, "INSERT"),
            EditorMode::Command => write!(f, "COMMAND"),
            EditorMode::FileBrowser => write!(f, "BROWSER"),
        }
    }
}

impl Default for EditorMode {
    /// Returns `EditorMode::Normal`, the mode the editor starts in.
    fn default() -> Self {
        EditorMode::Normal
    }
}
