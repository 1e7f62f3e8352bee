//! Undo/redo snapshot stacks.
//!
//! History is recorded once per dispatched mutating action: single-shot edits
//! like `x`, `dd` or `p` record a snapshot right before mutating, and entering
//! Insert mode records one snapshot so the whole insert session undoes as a
//! unit.

use super::buffer::TextBuffer;
use super::cursor::Cursor;

/// Buffer contents and cursor position at a point in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub lines: Vec<String>,
    pub cursor: (usize, usize),
}

impl Snapshot {
    /// Captures the current buffer and cursor.
    pub fn capture(buffer: &TextBuffer, cursor: &Cursor) -> Self {
        Self {
            lines: buffer.lines().to_vec(),
            cursor: (cursor.row(), cursor.col()),
        }
    }
}

/// Bounded undo/redo stacks of [`Snapshot`]s.
///
/// Recording a new snapshot clears the redo stack, so history is linear:
/// undoing and then editing discards the undone future.
#[derive(Debug)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    limit: usize,
}

/// Default maximum number of undo steps kept.
pub const DEFAULT_UNDO_LIMIT: usize = 100;

impl History {
    /// Creates an empty history with the default limit.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_UNDO_LIMIT)
    }

    /// Creates an empty history keeping at most `limit` undo steps.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Records a snapshot taken before a mutation. Clears the redo stack.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
        if self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
        }
    }

    /// Pops the most recent snapshot, pushing `current` onto the redo stack.
    /// Returns `None` when there is nothing to undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(snapshot)
    }

    /// Pops the most recent redo snapshot, pushing `current` back onto the
    /// undo stack. Returns `None` when there is nothing to redo.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(snapshot)
    }

    /// Discards all history, e.g. after loading a new file.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Returns the number of undo steps available.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
