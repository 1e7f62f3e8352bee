//! Symbolic action identifiers and the per-mode handler tables.
//!
//! Key bindings name actions symbolically; the [`ActionId`] enum is the
//! closed set of those names. Each mode owns a table mapping action ids to
//! handler functions, and a symbolic binding is resolved against the table of
//! whatever mode is active at dispatch time, not at bind time. Handler tables
//! can therefore be swapped at runtime without touching the keymap, and the
//! same action id can do different things in different modes ("move_up"
//! moves the cursor in Normal mode but the selection in the file browser).

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::engine::{EditorEngine, Flow};
use super::mode::EditorMode;
use anyhow::Result;

/// A handler function for one action in one mode.
pub type Handler = fn(&mut EditorEngine) -> Result<Flow>;

/// A mode's action-id to handler mapping.
pub type HandlerTable = HashMap<ActionId, Handler>;

/// The closed set of symbolic action names bindable from keymaps and
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    // Navigation
    MoveLeft,
    MoveDown,
    MoveUp,
    MoveRight,
    MoveBeginningOfLine,
    MoveEndOfLine,
    MoveFirstNonBlank,
    MoveBeginningOfFile,
    MoveEndOfFile,
    // Mode transitions
    EnterInsertMode,
    AppendAfterCursor,
    AppendEndOfLine,
    NewLineBelow,
    NewLineAbove,
    EnterNormalMode,
    EnterCommandMode,
    OpenFileBrowser,
    ExitBrowser,
    // Editing
    DeleteChar,
    DeleteLine,
    YankLine,
    PasteAfter,
    PasteBefore,
    NewLine,
    DeleteBackward,
    Indent,
    Undo,
    Redo,
    // Command line
    ExecuteCommand,
    // File browser
    OpenSelected,
    ToggleFilter,
    ClearFilter,
    ToggleHidden,
    // Files and lifecycle
    SaveFile,
    Quit,
}

impl ActionId {
    /// Returns the stable snake_case name used in keymaps and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionId::MoveLeft => "move_left",
            ActionId::MoveDown => "move_down",
            ActionId::MoveUp => "move_up",
            ActionId::MoveRight => "move_right",
            ActionId::MoveBeginningOfLine => "move_beginning_of_line",
            ActionId::MoveEndOfLine => "move_end_of_line",
            ActionId::MoveFirstNonBlank => "move_first_non_blank",
            ActionId::MoveBeginningOfFile => "move_beginning_of_file",
            ActionId::MoveEndOfFile => "move_end_of_file",
            ActionId::EnterInsertMode => "enter_insert_mode",
            ActionId::AppendAfterCursor => "append_after_cursor",
            ActionId::AppendEndOfLine => "append_end_of_line",
            ActionId::NewLineBelow => "new_line_below",
            ActionId::NewLineAbove => "new_line_above",
            ActionId::EnterNormalMode => "enter_normal_mode",
            ActionId::EnterCommandMode => "enter_command_mode",
            ActionId::OpenFileBrowser => "open_file_browser",
            ActionId::ExitBrowser => "exit_browser",
            ActionId::DeleteChar => "delete_char",
            ActionId::DeleteLine => "delete_line",
            ActionId::YankLine => "yank_line",
            ActionId::PasteAfter => "paste_after",
            ActionId::PasteBefore => "paste_before",
            ActionId::NewLine => "new_line",
            ActionId::DeleteBackward => "delete_backward",
            ActionId::Indent => "indent",
            ActionId::Undo => "undo",
            ActionId::Redo => "redo",
            ActionId::ExecuteCommand => "execute_command",
            ActionId::OpenSelected => "open_selected",
            ActionId::ToggleFilter => "toggle_filter",
            ActionId::ClearFilter => "clear_filter",
            ActionId::ToggleHidden => "toggle_hidden",
            ActionId::SaveFile => "save_file",
            ActionId::Quit => "quit",
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionId {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let action = match s {
            "move_left" => ActionId::MoveLeft,
            "move_down" => ActionId::MoveDown,
            "move_up" => ActionId::MoveUp,
            "move_right" => ActionId::MoveRight,
            "move_beginning_of_line" => ActionId::MoveBeginningOfLine,
            "move_end_of_line" => ActionId::MoveEndOfLine,
            "move_first_non_blank" => ActionId::MoveFirstNonBlank,
            "move_beginning_of_file" => ActionId::MoveBeginningOfFile,
            "move_end_of_file" => ActionId::MoveEndOfFile,
            "enter_insert_mode" => ActionId::EnterInsertMode,
            "append_after_cursor" => ActionId::AppendAfterCursor,
            "append_end_of_line" => ActionId::AppendEndOfLine,
            "new_line_below" => ActionId::NewLineBelow,
            "new_line_above" => ActionId::NewLineAbove,
            "enter_normal_mode" => ActionId::EnterNormalMode,
            "enter_command_mode" => ActionId::EnterCommandMode,
            "open_file_browser" => ActionId::OpenFileBrowser,
            "exit_browser" => ActionId::ExitBrowser,
            "delete_char" => ActionId::DeleteChar,
            "delete_line" => ActionId::DeleteLine,
            "yank_line" => ActionId::YankLine,
            "paste_after" => ActionId::PasteAfter,
            "paste_before" => ActionId::PasteBefore,
            "new_line" => ActionId::NewLine,
            "delete_backward" => ActionId::DeleteBackward,
            "indent" => ActionId::Indent,
            "undo" => ActionId::Undo,
            "redo" => ActionId::Redo,
            "execute_command" => ActionId::ExecuteCommand,
            "open_selected" => ActionId::OpenSelected,
            "toggle_filter" => ActionId::ToggleFilter,
            "clear_filter" => ActionId::ClearFilter,
            "toggle_hidden" => ActionId::ToggleHidden,
            "save_file" => ActionId::SaveFile,
            "quit" => ActionId::Quit,
            _ => return Err(UnknownAction(s.to_string())),
        };
        Ok(action)
    }
}

/// Error returned when parsing an action name that is not in the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action '{}'", self.0)
    }
}

impl std::error::Error for UnknownAction {}

/// Builds the default handler table for a mode.
pub fn default_handlers(mode: EditorMode) -> HandlerTable {
    match mode {
        EditorMode::Normal => normal_handlers(),
        EditorMode::Insert => insert_handlers(),
        EditorMode::Command => command_handlers(),
        EditorMode::FileBrowser => browser_handlers(),
    }
}

/// Builds the global handler table, consulted when the active mode's table
/// has no handler for a resolved action.
pub fn global_handlers() -> HandlerTable {
    table(&[
        (ActionId::Quit, |e| e.action_quit()),
        (ActionId::SaveFile, |e| e.action_save_file()),
        (ActionId::OpenFileBrowser, |e| e.action_open_file_browser()),
    ])
}

fn normal_handlers() -> HandlerTable {
    table(&[
        (ActionId::MoveLeft, |e| e.action_move(0, -1)),
        (ActionId::MoveDown, |e| e.action_move(1, 0)),
        (ActionId::MoveUp, |e| e.action_move(-1, 0)),
        (ActionId::MoveRight, |e| e.action_move(0, 1)),
        (ActionId::MoveBeginningOfLine, |e| {
            e.action_move_beginning_of_line()
        }),
        (ActionId::MoveEndOfLine, |e| e.action_move_end_of_line()),
        (ActionId::MoveFirstNonBlank, |e| e.action_move_first_non_blank()),
        (ActionId::MoveBeginningOfFile, |e| {
            e.action_move_beginning_of_file()
        }),
        (ActionId::MoveEndOfFile, |e| e.action_move_end_of_file()),
        (ActionId::EnterInsertMode, |e| e.action_enter_insert_mode()),
        (ActionId::AppendAfterCursor, |e| e.action_append_after_cursor()),
        (ActionId::AppendEndOfLine, |e| e.action_append_end_of_line()),
        (ActionId::NewLineBelow, |e| e.action_new_line_below()),
        (ActionId::NewLineAbove, |e| e.action_new_line_above()),
        (ActionId::EnterCommandMode, |e| e.action_enter_command_mode()),
        (ActionId::OpenFileBrowser, |e| e.action_open_file_browser()),
        (ActionId::DeleteChar, |e| e.action_delete_char()),
        (ActionId::DeleteLine, |e| e.action_delete_line()),
        (ActionId::YankLine, |e| e.action_yank_line()),
        (ActionId::PasteAfter, |e| e.action_paste(false)),
        (ActionId::PasteBefore, |e| e.action_paste(true)),
        (ActionId::Undo, |e| e.action_undo()),
        (ActionId::Redo, |e| e.action_redo()),
        (ActionId::SaveFile, |e| e.action_save_file()),
        (ActionId::Quit, |e| e.action_quit()),
    ])
}

fn insert_handlers() -> HandlerTable {
    table(&[
        (ActionId::EnterNormalMode, |e| e.action_enter_normal_mode()),
        (ActionId::NewLine, |e| e.action_new_line()),
        (ActionId::DeleteBackward, |e| e.action_delete_backward()),
        (ActionId::Indent, |e| e.action_indent()),
        (ActionId::MoveLeft, |e| e.action_move(0, -1)),
        (ActionId::MoveDown, |e| e.action_move(1, 0)),
        (ActionId::MoveUp, |e| e.action_move(-1, 0)),
        (ActionId::MoveRight, |e| e.action_move(0, 1)),
    ])
}

fn command_handlers() -> HandlerTable {
    table(&[
        (ActionId::EnterNormalMode, |e| e.action_cancel_command()),
        (ActionId::ExecuteCommand, |e| e.action_execute_command()),
        (ActionId::DeleteBackward, |e| e.action_command_backspace()),
    ])
}

fn browser_handlers() -> HandlerTable {
    table(&[
        (ActionId::MoveUp, |e| e.action_browser_move(-1)),
        (ActionId::MoveDown, |e| e.action_browser_move(1)),
        (ActionId::MoveLeft, |e| e.action_browser_parent()),
        (ActionId::MoveRight, |e| e.action_browser_descend()),
        (ActionId::OpenSelected, |e| e.action_browser_open()),
        (ActionId::ExitBrowser, |e| e.action_exit_browser()),
        (ActionId::ToggleFilter, |e| e.action_browser_toggle_filter()),
        (ActionId::ClearFilter, |e| e.action_browser_clear_filter()),
        (ActionId::ToggleHidden, |e| e.action_browser_toggle_hidden()),
    ])
}

fn table(entries: &[(ActionId, Handler)]) -> HandlerTable {
    entries.iter().copied().collect()
}
