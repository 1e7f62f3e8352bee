//! Line-based text storage.
//!
//! This module provides the `TextBuffer` struct that stores document content
//! as an ordered list of lines. All edits go through a small set of mutating
//! primitives (`insert`, `delete`, `split_line`, `join_line`, `insert_line`,
//! `remove_line`, `set_lines`) so that change tracking stays consistent: each
//! successful primitive advances the buffer's revision counter by exactly one.
//!
//! # Invariants
//!
//! - The buffer is never empty; removing the last line leaves one empty line.
//! - Positions are char-indexed, so multi-byte UTF-8 content is safe.
//! - Out-of-range operations are no-ops and do not advance the revision.
//!
//! # Example
//!
//! ```
//! use sumi::editor::buffer::TextBuffer;
//!
//! let mut buffer = TextBuffer::new();
//! assert_eq!(buffer.lines(), &["".to_string()]);
//!
//! buffer.insert(0, 0, 'h');
//! buffer.insert(0, 1, 'i');
//! assert_eq!(buffer.line(0), Some("hi"));
//! assert_eq!(buffer.revision(), 2);
//! ```

/// Ordered sequence of line strings with revision-counted mutation primitives.
///
/// The revision counter is the buffer's change notification mechanism: callers
/// that need to react to edits compare revisions before and after an operation
/// instead of registering callbacks. Composite edits advance the revision once
/// per primitive, not once per logical action.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: Vec<String>,
    revision: u64,
}

impl TextBuffer {
    /// Creates a buffer containing a single empty line.
    ///
    /// # Example
    ///
    /// ```
    /// use sumi::editor::buffer::TextBuffer;
    ///
    /// let buffer = TextBuffer::new();
    /// assert_eq!(buffer.line_count(), 1);
    /// assert_eq!(buffer.line(0), Some(""));
    /// ```
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            revision: 0,
        }
    }

    /// Creates a buffer from existing lines.
    ///
    /// An empty vector yields a buffer with one empty line, preserving the
    /// never-empty invariant.
    pub fn from_lines(lines: Vec<String>) -> Self {
        let lines = if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        };
        Self { lines, revision: 0 }
    }

    /// Returns all lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the line at `row`, or `None` if out of range.
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    /// Returns the number of lines. Always at least 1.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the length of the line at `row` in chars, or 0 if out of range.
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |l| l.chars().count())
    }

    /// Returns the revision counter. Advances by exactly one per successful
    /// mutating primitive.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Inserts one character at (row, col). The column is clamped to the line
    /// length; an out-of-range row is a no-op. Never grows the line count.
    ///
    /// # Example
    ///
    /// ```
    /// use sumi::editor::buffer::TextBuffer;
    ///
    /// let mut buffer = TextBuffer::from_lines(vec!["ab".into()]);
    /// buffer.insert(0, 1, 'x');
    /// assert_eq!(buffer.line(0), Some("axb"));
    /// ```
    pub fn insert(&mut self, row: usize, col: usize, ch: char) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let idx = byte_index(line, col);
        line.insert(idx, ch);
        self.revision += 1;
    }

    /// Removes the character at (row, col) if `col` is within the line.
    /// Deleting at or past the end of a line is a no-op; lines are never
    /// merged implicitly (see [`TextBuffer::join_line`]).
    ///
    /// # Example
    ///
    /// ```
    /// use sumi::editor::buffer::TextBuffer;
    ///
    /// let mut buffer = TextBuffer::from_lines(vec!["abc".into()]);
    /// buffer.delete(0, 1);
    /// assert_eq!(buffer.line(0), Some("ac"));
    ///
    /// // Past the end: nothing happens
    /// buffer.delete(0, 99);
    /// assert_eq!(buffer.line(0), Some("ac"));
    /// ```
    pub fn delete(&mut self, row: usize, col: usize) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        if col >= line.chars().count() {
            return;
        }
        let idx = byte_index(line, col);
        line.remove(idx);
        self.revision += 1;
    }

    /// Splits the line at (row, col): `line[row]` keeps the text before the
    /// column and a new line holding the rest is inserted at `row + 1`.
    ///
    /// # Example
    ///
    /// ```
    /// use sumi::editor::buffer::TextBuffer;
    ///
    /// let mut buffer = TextBuffer::from_lines(vec!["hello".into()]);
    /// buffer.split_line(0, 2);
    /// assert_eq!(buffer.lines(), &["he".to_string(), "llo".to_string()]);
    /// ```
    pub fn split_line(&mut self, row: usize, col: usize) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let idx = byte_index(line, col);
        let rest = line.split_off(idx);
        self.lines.insert(row + 1, rest);
        self.revision += 1;
    }

    /// Joins `line[row + 1]` onto the end of `line[row]`, removing the second
    /// line. The exact inverse of [`TextBuffer::split_line`]. A no-op when
    /// `row + 1` is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use sumi::editor::buffer::TextBuffer;
    ///
    /// let mut buffer = TextBuffer::from_lines(vec!["he".into(), "llo".into()]);
    /// buffer.join_line(0);
    /// assert_eq!(buffer.lines(), &["hello".to_string()]);
    /// ```
    pub fn join_line(&mut self, row: usize) {
        if row + 1 >= self.lines.len() {
            return;
        }
        let next = self.lines.remove(row + 1);
        self.lines[row].push_str(&next);
        self.revision += 1;
    }

    /// Inserts a whole line at `row`, shifting later lines down. The row is
    /// clamped to the line count, so `insert_line(line_count(), ..)` appends.
    pub fn insert_line(&mut self, row: usize, line: String) {
        let row = row.min(self.lines.len());
        self.lines.insert(row, line);
        self.revision += 1;
    }

    /// Removes the whole line at `row`. Removing the last remaining line
    /// leaves one empty line. An out-of-range row is a no-op.
    pub fn remove_line(&mut self, row: usize) {
        if row >= self.lines.len() {
            return;
        }
        self.lines.remove(row);
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.revision += 1;
    }

    /// Replaces the entire contents. An empty vector yields one empty line.
    /// Counts as a single primitive.
    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        };
        self.revision += 1;
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a char column into a byte index, clamping past-the-end columns to
/// the end of the line.
fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map_or(line.len(), |(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_has_one_empty_line() {
        let buffer = TextBuffer::new();
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.line(0), Some(""));
        assert_eq!(buffer.revision(), 0);
    }

    #[test]
    fn test_insert_advances_revision_once() {
        let mut buffer = TextBuffer::new();
        buffer.insert(0, 0, 'a');
        assert_eq!(buffer.revision(), 1);
        buffer.insert(0, 1, 'b');
        assert_eq!(buffer.revision(), 2);
        assert_eq!(buffer.line(0), Some("ab"));
    }

    #[test]
    fn test_insert_out_of_range_row_is_noop() {
        let mut buffer = TextBuffer::new();
        buffer.insert(5, 0, 'a');
        assert_eq!(buffer.line(0), Some(""));
        assert_eq!(buffer.revision(), 0);
    }

    #[test]
    fn test_delete_at_end_of_line_is_noop() {
        let mut buffer = TextBuffer::from_lines(vec!["ab".into(), "cd".into()]);
        buffer.delete(0, 2);
        assert_eq!(buffer.lines(), &["ab".to_string(), "cd".to_string()]);
        assert_eq!(buffer.revision(), 0);
    }

    #[test]
    fn test_split_then_join_round_trips() {
        let original = "the quick brown fox";
        for col in 0..=original.chars().count() {
            let mut buffer = TextBuffer::from_lines(vec![original.to_string()]);
            buffer.split_line(0, col);
            assert_eq!(buffer.line_count(), 2);
            buffer.join_line(0);
            assert_eq!(buffer.line(0), Some(original));
        }
    }

    #[test]
    fn test_join_last_line_is_noop() {
        let mut buffer = TextBuffer::from_lines(vec!["ab".into()]);
        buffer.join_line(0);
        assert_eq!(buffer.lines(), &["ab".to_string()]);
        assert_eq!(buffer.revision(), 0);
    }

    #[test]
    fn test_remove_last_line_leaves_empty_line() {
        let mut buffer = TextBuffer::new();
        buffer.remove_line(0);
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.line(0), Some(""));
        assert_eq!(buffer.revision(), 1);
    }

    #[test]
    fn test_multibyte_chars_use_char_columns() {
        let mut buffer = TextBuffer::from_lines(vec!["héllo".into()]);
        buffer.delete(0, 1);
        assert_eq!(buffer.line(0), Some("hllo"));
        buffer.insert(0, 1, 'é');
        assert_eq!(buffer.line(0), Some("héllo"));
        assert_eq!(buffer.line_len(0), 5);
    }

    #[test]
    fn test_set_lines_empty_restores_invariant() {
        let mut buffer = TextBuffer::from_lines(vec!["x".into()]);
        buffer.set_lines(vec![]);
        assert_eq!(buffer.lines(), &["".to_string()]);
    }

    #[test]
    fn test_insert_line_clamps_row() {
        let mut buffer = TextBuffer::from_lines(vec!["a".into()]);
        buffer.insert_line(99, "b".into());
        assert_eq!(buffer.lines(), &["a".to_string(), "b".to_string()]);
    }
}
