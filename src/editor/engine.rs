//! The editor engine: orchestration and key dispatch.
//!
//! `EditorEngine` owns every piece of mutable editor state (buffer, cursor,
//! viewport, keymap, pending sequence, command line, notifications, history,
//! register, browser model) and is the single path that touches it. Raw
//! events flow classifier -> sequence buffer -> keymap -> mode dispatch; the
//! resolved action mutates state through the engine's methods, which keep the
//! viewport synchronized with the cursor and the dirty bookkeeping honest.
//!
//! # Dispatch
//!
//! Per keystroke, [`EditorEngine::handle_key`]:
//!
//! 1. pushes the key name onto the pending sequence (stale sequences expire
//!    lazily, see [`crate::input::sequence`]),
//! 2. waits without acting while the pending sequence is a strict prefix of
//!    some binding for the active mode or the global table,
//! 3. otherwise resolves the longest suffix-matching binding (mode table
//!    first, then global) and executes it through the dispatch boundary,
//! 4. otherwise routes a single unmatched key through the active mode's
//!    default handler and clears the pending sequence.
//!
//! The dispatch boundary turns handler errors into error notifications and
//! never lets them corrupt mode or sequence state; the quit outcome is not an
//! error and passes straight through, stopping the host loop.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use termion::event::Event;

use super::actions::{self, ActionId, Handler, HandlerTable};
use super::buffer::TextBuffer;
use super::commands;
use super::cursor::Cursor;
use super::history::{History, Snapshot};
use super::mode::EditorMode;
use super::registers::LineRegister;
use super::viewport::Viewport;
use crate::config::Config;
use crate::file::{DirectoryBrowser, FileStore, FsStore};
use crate::input::keys::{classify, KeyInput};
use crate::input::sequence::SequenceBuffer;
use crate::keymap::{Binding, KeymapTable};
use crate::notify::Notifications;

/// Outcome of a dispatched action.
///
/// `Quit` is a distinguished control-flow result rather than an error, so it
/// is not swallowed by the dispatch boundary's catch-and-notify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep processing input.
    Continue,
    /// Stop the host loop.
    Quit,
}

/// The single-threaded editor core.
pub struct EditorEngine {
    buffer: TextBuffer,
    cursor: Cursor,
    viewport: Viewport,
    keymap: KeymapTable,
    sequence: SequenceBuffer,
    mode: EditorMode,
    handlers: HashMap<EditorMode, HandlerTable>,
    global_handlers: HandlerTable,
    command_line: String,
    notifications: Notifications,
    history: History,
    register: LineRegister,
    browser: Option<DirectoryBrowser>,
    browser_return: Option<EditorMode>,
    file_store: Box<dyn FileStore>,
    filename: Option<PathBuf>,
    saved_revision: u64,
    tab_size: usize,
    running: bool,
    needs_redraw: bool,
}

impl EditorEngine {
    /// Creates an engine backed by the real filesystem.
    pub fn new() -> Self {
        Self::with_store(Box::new(FsStore::default()))
    }

    /// Creates an engine with a custom file store. Tests use this to observe
    /// saves without touching the filesystem.
    pub fn with_store(file_store: Box<dyn FileStore>) -> Self {
        let mut handlers = HashMap::new();
        for mode in EditorMode::ALL {
            handlers.insert(mode, actions::default_handlers(mode));
        }
        Self {
            buffer: TextBuffer::new(),
            cursor: Cursor::new(),
            viewport: Viewport::new(0, 0),
            keymap: KeymapTable::with_defaults(),
            sequence: SequenceBuffer::default(),
            mode: EditorMode::Normal,
            handlers,
            global_handlers: actions::global_handlers(),
            command_line: String::new(),
            notifications: Notifications::new(),
            history: History::new(),
            register: LineRegister::new(),
            browser: None,
            browser_return: None,
            file_store,
            filename: None,
            saved_revision: 0,
            tab_size: 4,
            running: true,
            needs_redraw: true,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the text buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Returns the cursor.
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Returns the viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Returns the active mode.
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Returns the command line being edited in Command mode.
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    /// Returns the pending key sequence as a display string.
    pub fn pending_keys(&self) -> String {
        self.sequence.display()
    }

    /// Returns the keymap for dynamic (re)binding at runtime.
    pub fn keymap(&self) -> &KeymapTable {
        &self.keymap
    }

    /// Returns the keymap mutably for dynamic (re)binding at runtime.
    pub fn keymap_mut(&mut self) -> &mut KeymapTable {
        &mut self.keymap
    }

    /// Returns the notification store.
    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Returns the file being edited, if any.
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Returns true if the buffer changed since the last load or save.
    pub fn is_modified(&self) -> bool {
        self.buffer.revision() != self.saved_revision
    }

    /// Returns false once a quit outcome has fired.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns and clears the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Returns the browser model while it exists.
    pub fn browser(&self) -> Option<&DirectoryBrowser> {
        self.browser.as_ref()
    }

    /// Replaces one action handler in one mode's table. Takes effect on the
    /// next dispatch; key bindings are untouched.
    pub fn set_handler(&mut self, mode: EditorMode, id: ActionId, handler: Handler) {
        if let Some(table) = self.handlers.get_mut(&mode) {
            table.insert(id, handler);
        }
    }

    /// Replaces a mode's whole handler table.
    pub fn reload_handlers(&mut self, mode: EditorMode, table: HandlerTable) {
        self.handlers.insert(mode, table);
    }

    /// Changes the multi-key sequence timeout.
    pub fn set_sequence_timeout(&mut self, timeout: Duration) {
        self.sequence.set_timeout(timeout);
    }

    /// Updates the viewport window size and keeps the cursor visible.
    pub fn resize_viewport(&mut self, height: usize, width: usize) {
        self.viewport.set_size(height, width);
        self.sync_viewport();
    }

    /// Applies configuration: sequence timeout, scroll margin, tab size, and
    /// declarative keymap overrides. Unusable keymap entries become warning
    /// notifications.
    pub fn apply_config(&mut self, config: &Config) {
        self.sequence
            .set_timeout(Duration::from_millis(config.sequence_timeout_ms));
        self.viewport.set_margin(config.scroll_margin);
        self.tab_size = config.tab_size.max(1);
        let problems = self.keymap.load_from_config(&config.keymap);
        for problem in problems {
            self.notifications.warning(format!("Config: {problem}"));
        }
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Classifies a terminal event and dispatches it. Non-key events are
    /// ignored.
    pub fn handle_event(&mut self, event: &Event) {
        if let Some(key) = classify(event) {
            self.handle_key(key);
        }
    }

    /// Dispatches one classified keystroke.
    pub fn handle_key(&mut self, key: KeyInput) {
        self.sequence.push(&key.name, Instant::now());

        if self.keymap.has_potential(self.mode, self.sequence.keys()) {
            // Potential mapping: wait for the next key.
            self.needs_redraw = true;
            return;
        }

        if let Some(binding) = self.keymap.resolve(self.mode, self.sequence.keys()) {
            self.sequence.clear();
            self.needs_redraw = true;
            self.run_binding(binding);
            return;
        }

        if self.sequence.len() == 1 {
            self.handle_default(&key);
            self.needs_redraw = true;
        }
        self.sequence.clear();
    }

    /// The dispatch boundary: executes a binding, catching handler errors.
    fn run_binding(&mut self, binding: Binding) {
        let result = match binding {
            Binding::Action(id) => match self.lookup_handler(id) {
                Some(handler) => handler(self),
                None => {
                    self.notifications.warning(format!(
                        "Action '{id}' is not handled in {} mode",
                        self.mode
                    ));
                    Ok(Flow::Continue)
                }
            },
            Binding::Callback(callback) => callback(self),
        };

        match result {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => self.running = false,
            Err(err) => {
                self.command_line.clear();
                self.notifications.error(format!("{err:#}"));
            }
        }
    }

    /// Resolves a symbolic action against the current mode's handler table,
    /// falling back to the global handler table.
    fn lookup_handler(&self, id: ActionId) -> Option<Handler> {
        self.handlers
            .get(&self.mode)
            .and_then(|table| table.get(&id))
            .copied()
            .or_else(|| self.global_handlers.get(&id).copied())
    }

    /// Fallback for single keys no binding claimed.
    fn handle_default(&mut self, key: &KeyInput) {
        match self.mode {
            EditorMode::Normal => {}
            EditorMode::Insert => {
                if key.printable {
                    if let Some(ch) = key.ch {
                        self.insert_char_at_cursor(ch);
                    }
                }
            }
            EditorMode::Command => {
                if key.printable {
                    if let Some(ch) = key.ch {
                        self.command_line.push(ch);
                    }
                }
            }
            EditorMode::FileBrowser => {
                let Some(browser) = self.browser.as_mut() else {
                    return;
                };
                if !browser.filter_mode() {
                    return;
                }
                if key.printable {
                    if let Some(ch) = key.ch {
                        browser.push_filter_char(ch);
                    }
                } else if key.name == "backspace" {
                    browser.pop_filter_char();
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Mode transitions
    // ------------------------------------------------------------------

    /// Switches the active mode. Clears the pending sequence; entering
    /// Command mode starts with an empty command line.
    pub fn set_mode(&mut self, mode: EditorMode) {
        if mode == EditorMode::Command {
            self.command_line.clear();
        }
        self.mode = mode;
        self.sequence.clear();
        self.needs_redraw = true;
    }

    // ------------------------------------------------------------------
    // Cursor and viewport plumbing
    // ------------------------------------------------------------------

    fn move_cursor(&mut self, d_row: isize, d_col: isize) -> bool {
        let moved = self.cursor.move_by(d_row, d_col, &self.buffer);
        if moved {
            self.sync_viewport();
        }
        moved
    }

    fn move_cursor_to(&mut self, row: usize, col: usize) -> bool {
        let moved = self.cursor.move_to(row, col, &self.buffer);
        if moved {
            self.sync_viewport();
        }
        moved
    }

    fn sync_viewport(&mut self) {
        let rows = self.buffer.line_count();
        let cols = self.buffer.line_len(self.cursor.row()) + 1;
        self.viewport.set_content_size(rows, cols);
        self.viewport
            .scroll_to_cursor(self.cursor.row(), self.cursor.col());
    }

    /// Re-clamps the cursor after a structural buffer change and
    /// resynchronizes the viewport.
    fn clamp_cursor(&mut self) {
        self.cursor.clamp_to(&self.buffer);
        self.sync_viewport();
    }

    fn insert_char_at_cursor(&mut self, ch: char) {
        let (row, col) = (self.cursor.row(), self.cursor.col());
        self.buffer.insert(row, col, ch);
        self.move_cursor(0, 1);
    }

    fn record_history(&mut self) {
        self.history
            .record(Snapshot::capture(&self.buffer, &self.cursor));
    }

    fn restore_snapshot(&mut self, snapshot: Snapshot) {
        let (row, col) = snapshot.cursor;
        self.buffer.set_lines(snapshot.lines);
        self.cursor.move_to(row, col, &self.buffer);
        self.sync_viewport();
    }

    // ------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------

    /// Loads a file into the buffer, resetting cursor, history, and the
    /// modified flag.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let lines = self.file_store.load(path)?;
        self.buffer.set_lines(lines);
        self.cursor.move_to(0, 0, &self.buffer);
        self.sync_viewport();
        self.history.clear();
        self.filename = Some(path.to_path_buf());
        self.saved_revision = self.buffer.revision();
        self.needs_redraw = true;
        self.notifications
            .success(format!("Loaded: {}", path.display()));
        Ok(())
    }

    /// Saves the buffer to `path`, or to the current filename when `path` is
    /// `None`. With neither, warns and does nothing.
    pub fn save_file(&mut self, path: Option<&Path>) -> Result<()> {
        let target = match path.or(self.filename.as_deref()) {
            Some(p) => p.to_path_buf(),
            None => {
                self.notifications.warning("No file name (use :w <path>)");
                return Ok(());
            }
        };
        self.file_store.save(&target, self.buffer.lines())?;
        self.filename = Some(target.clone());
        self.saved_revision = self.buffer.revision();
        self.notifications
            .success(format!("Saved: {}", target.display()));
        Ok(())
    }

    /// Resolves a startup path: existing files load, directories open the
    /// browser, anything else becomes a new file name.
    pub fn open_initial(&mut self, path: &Path) {
        if path.is_dir() {
            match DirectoryBrowser::new(path) {
                Ok(browser) => {
                    self.browser = Some(browser);
                    self.browser_return = Some(EditorMode::Normal);
                    self.set_mode(EditorMode::FileBrowser);
                }
                Err(err) => self.notifications.error(format!("{err:#}")),
            }
        } else if path.is_file() {
            if let Err(err) = self.load_file(path) {
                self.notifications.error(format!("{err:#}"));
            }
        } else {
            self.filename = Some(path.to_path_buf());
            self.notifications
                .info(format!("New file: {}", path.display()));
        }
    }

    // ------------------------------------------------------------------
    // Action handlers: navigation
    // ------------------------------------------------------------------

    pub(crate) fn action_move(&mut self, d_row: isize, d_col: isize) -> Result<Flow> {
        self.move_cursor(d_row, d_col);
        Ok(Flow::Continue)
    }

    pub(crate) fn action_move_beginning_of_line(&mut self) -> Result<Flow> {
        self.move_cursor_to(self.cursor.row(), 0);
        Ok(Flow::Continue)
    }

    pub(crate) fn action_move_end_of_line(&mut self) -> Result<Flow> {
        let row = self.cursor.row();
        let len = self.buffer.line_len(row);
        self.move_cursor_to(row, len);
        Ok(Flow::Continue)
    }

    pub(crate) fn action_move_first_non_blank(&mut self) -> Result<Flow> {
        let row = self.cursor.row();
        let col = self
            .buffer
            .line(row)
            .and_then(|line| line.chars().position(|c| c != ' ' && c != '\t'))
            .unwrap_or(0);
        self.move_cursor_to(row, col);
        Ok(Flow::Continue)
    }

    pub(crate) fn action_move_beginning_of_file(&mut self) -> Result<Flow> {
        self.move_cursor_to(0, self.cursor.col());
        Ok(Flow::Continue)
    }

    pub(crate) fn action_move_end_of_file(&mut self) -> Result<Flow> {
        let last = self.buffer.line_count() - 1;
        self.move_cursor_to(last, self.cursor.col());
        Ok(Flow::Continue)
    }

    // ------------------------------------------------------------------
    // Action handlers: mode transitions
    // ------------------------------------------------------------------

    pub(crate) fn action_enter_insert_mode(&mut self) -> Result<Flow> {
        self.record_history();
        self.set_mode(EditorMode::Insert);
        Ok(Flow::Continue)
    }

    pub(crate) fn action_append_after_cursor(&mut self) -> Result<Flow> {
        self.record_history();
        self.move_cursor(0, 1);
        self.set_mode(EditorMode::Insert);
        Ok(Flow::Continue)
    }

    pub(crate) fn action_append_end_of_line(&mut self) -> Result<Flow> {
        self.record_history();
        let row = self.cursor.row();
        let len = self.buffer.line_len(row);
        self.move_cursor_to(row, len);
        self.set_mode(EditorMode::Insert);
        Ok(Flow::Continue)
    }

    pub(crate) fn action_new_line_below(&mut self) -> Result<Flow> {
        self.record_history();
        let row = self.cursor.row();
        let len = self.buffer.line_len(row);
        self.buffer.split_line(row, len);
        self.move_cursor_to(row + 1, 0);
        self.set_mode(EditorMode::Insert);
        Ok(Flow::Continue)
    }

    pub(crate) fn action_new_line_above(&mut self) -> Result<Flow> {
        self.record_history();
        let row = self.cursor.row();
        self.buffer.split_line(row, 0);
        self.clamp_cursor();
        self.set_mode(EditorMode::Insert);
        Ok(Flow::Continue)
    }

    pub(crate) fn action_enter_normal_mode(&mut self) -> Result<Flow> {
        self.set_mode(EditorMode::Normal);
        Ok(Flow::Continue)
    }

    pub(crate) fn action_enter_command_mode(&mut self) -> Result<Flow> {
        self.set_mode(EditorMode::Command);
        Ok(Flow::Continue)
    }

    // ------------------------------------------------------------------
    // Action handlers: editing
    // ------------------------------------------------------------------

    pub(crate) fn action_delete_char(&mut self) -> Result<Flow> {
        let (row, col) = (self.cursor.row(), self.cursor.col());
        if col < self.buffer.line_len(row) {
            self.record_history();
            self.buffer.delete(row, col);
        }
        Ok(Flow::Continue)
    }

    pub(crate) fn action_delete_line(&mut self) -> Result<Flow> {
        self.record_history();
        let row = self.cursor.row();
        if let Some(line) = self.buffer.line(row) {
            self.register.yank(line);
        }
        self.buffer.remove_line(row);
        self.clamp_cursor();
        Ok(Flow::Continue)
    }

    pub(crate) fn action_yank_line(&mut self) -> Result<Flow> {
        if let Some(line) = self.buffer.line(self.cursor.row()) {
            self.register.yank(line);
        }
        Ok(Flow::Continue)
    }

    pub(crate) fn action_paste(&mut self, before: bool) -> Result<Flow> {
        let Some(text) = self.register.get().map(str::to_string) else {
            self.notifications.info("Register is empty");
            return Ok(Flow::Continue);
        };
        self.record_history();
        let row = self.cursor.row();
        let target = if before { row } else { row + 1 };
        self.buffer.insert_line(target, text);
        self.cursor.move_to(target, 0, &self.buffer);
        self.sync_viewport();
        Ok(Flow::Continue)
    }

    pub(crate) fn action_new_line(&mut self) -> Result<Flow> {
        let (row, col) = (self.cursor.row(), self.cursor.col());
        self.buffer.split_line(row, col);
        self.move_cursor_to(row + 1, 0);
        Ok(Flow::Continue)
    }

    pub(crate) fn action_delete_backward(&mut self) -> Result<Flow> {
        let (row, col) = (self.cursor.row(), self.cursor.col());
        if col > 0 {
            self.buffer.delete(row, col - 1);
            self.move_cursor(0, -1);
        } else if row > 0 {
            let prev_len = self.buffer.line_len(row - 1);
            self.buffer.join_line(row - 1);
            self.move_cursor_to(row - 1, prev_len);
        }
        Ok(Flow::Continue)
    }

    pub(crate) fn action_indent(&mut self) -> Result<Flow> {
        let row = self.cursor.row();
        for _ in 0..self.tab_size {
            self.buffer.insert(row, 0, ' ');
        }
        self.move_cursor(0, self.tab_size as isize);
        Ok(Flow::Continue)
    }

    pub(crate) fn action_undo(&mut self) -> Result<Flow> {
        let current = Snapshot::capture(&self.buffer, &self.cursor);
        match self.history.undo(current) {
            Some(snapshot) => self.restore_snapshot(snapshot),
            None => self.notifications.info("Already at oldest change"),
        }
        Ok(Flow::Continue)
    }

    pub(crate) fn action_redo(&mut self) -> Result<Flow> {
        let current = Snapshot::capture(&self.buffer, &self.cursor);
        match self.history.redo(current) {
            Some(snapshot) => self.restore_snapshot(snapshot),
            None => self.notifications.info("Already at newest change"),
        }
        Ok(Flow::Continue)
    }

    // ------------------------------------------------------------------
    // Action handlers: command line
    // ------------------------------------------------------------------

    pub(crate) fn action_execute_command(&mut self) -> Result<Flow> {
        let input = std::mem::take(&mut self.command_line);
        self.set_mode(EditorMode::Normal);
        commands::execute(self, &input)
    }

    pub(crate) fn action_cancel_command(&mut self) -> Result<Flow> {
        self.command_line.clear();
        self.set_mode(EditorMode::Normal);
        Ok(Flow::Continue)
    }

    pub(crate) fn action_command_backspace(&mut self) -> Result<Flow> {
        self.command_line.pop();
        Ok(Flow::Continue)
    }

    // ------------------------------------------------------------------
    // Action handlers: file browser
    // ------------------------------------------------------------------

    pub(crate) fn action_open_file_browser(&mut self) -> Result<Flow> {
        let dir = self
            .filename
            .as_ref()
            .and_then(|p| p.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        match self.browser.as_mut() {
            Some(browser) => browser.refresh()?,
            None => self.browser = Some(DirectoryBrowser::new(&dir)?),
        }
        self.browser_return = Some(self.mode);
        self.set_mode(EditorMode::FileBrowser);
        Ok(Flow::Continue)
    }

    pub(crate) fn action_exit_browser(&mut self) -> Result<Flow> {
        let target = self.browser_return.take().unwrap_or(EditorMode::Normal);
        self.set_mode(target);
        Ok(Flow::Continue)
    }

    pub(crate) fn action_browser_move(&mut self, delta: isize) -> Result<Flow> {
        if let Some(browser) = self.browser.as_mut() {
            browser.move_selection(delta);
        }
        Ok(Flow::Continue)
    }

    pub(crate) fn action_browser_parent(&mut self) -> Result<Flow> {
        if let Some(browser) = self.browser.as_mut() {
            browser.ascend()?;
        }
        Ok(Flow::Continue)
    }

    pub(crate) fn action_browser_descend(&mut self) -> Result<Flow> {
        if let Some(browser) = self.browser.as_mut() {
            browser.descend()?;
        }
        Ok(Flow::Continue)
    }

    pub(crate) fn action_browser_open(&mut self) -> Result<Flow> {
        let Some(browser) = self.browser.as_mut() else {
            return Ok(Flow::Continue);
        };
        let Some(entry) = browser.selected_entry() else {
            self.notifications.warning("Nothing selected");
            return Ok(Flow::Continue);
        };
        let (is_dir, path) = (entry.is_dir, entry.path.clone());
        if is_dir {
            browser.descend()?;
            return Ok(Flow::Continue);
        }
        self.load_file(&path)?;
        self.action_exit_browser()
    }

    pub(crate) fn action_browser_toggle_filter(&mut self) -> Result<Flow> {
        if let Some(browser) = self.browser.as_mut() {
            browser.toggle_filter_mode();
        }
        Ok(Flow::Continue)
    }

    pub(crate) fn action_browser_clear_filter(&mut self) -> Result<Flow> {
        if let Some(browser) = self.browser.as_mut() {
            browser.clear_filter();
        }
        Ok(Flow::Continue)
    }

    pub(crate) fn action_browser_toggle_hidden(&mut self) -> Result<Flow> {
        if let Some(browser) = self.browser.as_mut() {
            browser.toggle_hidden();
        }
        Ok(Flow::Continue)
    }

    // ------------------------------------------------------------------
    // Action handlers: lifecycle
    // ------------------------------------------------------------------

    pub(crate) fn action_save_file(&mut self) -> Result<Flow> {
        self.save_file(None)?;
        Ok(Flow::Continue)
    }

    pub(crate) fn action_quit(&mut self) -> Result<Flow> {
        Ok(Flow::Quit)
    }
}

impl Default for EditorEngine {
    fn default() -> Self {
        Self::new()
    }
}
