//! sumi is a modal, keyboard-driven text editor for the terminal.
//!
//! The crate is organized around a single-threaded [`editor::engine::EditorEngine`]
//! that owns all editor state and dispatches classified keystrokes through a
//! multi-key sequence resolver and per-mode keymap tables. Terminal rendering
//! (`ui`), filesystem access (`file`), and TOML configuration (`config`) are
//! collaborators around that core.

pub mod config;
pub mod editor;
pub mod file;
pub mod input;
pub mod keymap;
pub mod notify;
pub mod ui;
