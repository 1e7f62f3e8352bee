//! Cursor position tracking within a text buffer.
//!
//! This module provides the `Cursor` struct that represents the current
//! (row, col) position in a [`TextBuffer`]. The cursor always satisfies
//! `0 <= row < line_count` and `0 <= col <= line_len(row)`; the column may
//! equal the line length ("after the last character"), which is what makes
//! append-at-end-of-line possible.
//!
//! Vertical moves onto shorter lines truncate the column. There is no
//! remembered "desired column"; callers that want sticky-column behavior
//! must layer it on top.
//!
//! # Example
//!
//! ```
//! use sumi::editor::buffer::TextBuffer;
//! use sumi::editor::cursor::Cursor;
//!
//! let buffer = TextBuffer::from_lines(vec!["hello".into(), "hi".into()]);
//! let mut cursor = Cursor::new();
//!
//! cursor.move_by(0, 4, &buffer);
//! assert_eq!((cursor.row(), cursor.col()), (0, 4));
//!
//! // Moving down onto a shorter line truncates the column
//! cursor.move_by(1, 0, &buffer);
//! assert_eq!((cursor.row(), cursor.col()), (1, 2));
//! ```

use super::buffer::TextBuffer;

/// A (row, col) position clamped to buffer bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    row: usize,
    col: usize,
}

impl Cursor {
    /// Creates a cursor at (0, 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current row.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Returns the current column.
    pub fn col(&self) -> usize {
        self.col
    }

    /// Moves the cursor by a delta, clamping to buffer bounds. Deltas may be
    /// wildly out of range; the result is always a valid position.
    ///
    /// Returns true only if the position actually changed, so callers can
    /// resynchronize dependent state (such as the viewport) exactly when a
    /// move happened.
    ///
    /// # Example
    ///
    /// ```
    /// use sumi::editor::buffer::TextBuffer;
    /// use sumi::editor::cursor::Cursor;
    ///
    /// let buffer = TextBuffer::from_lines(vec!["ab".into()]);
    /// let mut cursor = Cursor::new();
    ///
    /// assert!(!cursor.move_by(-1000, 0, &buffer)); // already at the top
    /// assert!(cursor.move_by(0, 1000, &buffer));
    /// assert_eq!(cursor.col(), 2); // after the last character
    /// ```
    pub fn move_by(&mut self, d_row: isize, d_col: isize, buffer: &TextBuffer) -> bool {
        let max_row = buffer.line_count() as i64 - 1;
        let new_row = (self.row as i64 + d_row as i64).clamp(0, max_row) as usize;
        let max_col = buffer.line_len(new_row) as i64;
        let new_col = (self.col as i64 + d_col as i64).clamp(0, max_col) as usize;
        let moved = new_row != self.row || new_col != self.col;
        self.row = new_row;
        self.col = new_col;
        moved
    }

    /// Moves the cursor to an absolute position, clamping to buffer bounds.
    /// Returns true only if the position actually changed.
    pub fn move_to(&mut self, row: usize, col: usize, buffer: &TextBuffer) -> bool {
        let new_row = row.min(buffer.line_count() - 1);
        let new_col = col.min(buffer.line_len(new_row));
        let moved = new_row != self.row || new_col != self.col;
        self.row = new_row;
        self.col = new_col;
        moved
    }

    /// Re-clamps the current position after the buffer shrank. Returns true
    /// if the position changed.
    pub fn clamp_to(&mut self, buffer: &TextBuffer) -> bool {
        let (row, col) = (self.row, self.col);
        self.move_to(row, col, buffer)
    }
}
