//! Line register for yank and paste.
//!
//! Whole-line yanks (`yy`) and deletions (`dd`) land here and are pasted back
//! with `p`/`P`. Yanked text is also mirrored to the system clipboard when one
//! is available; clipboard failures are silently ignored so the editor works
//! the same over SSH or in headless environments.

use arboard::Clipboard;

/// Holds the most recently yanked or deleted line.
pub struct LineRegister {
    text: Option<String>,
    clipboard: Option<Clipboard>,
}

impl LineRegister {
    /// Creates an empty register, grabbing the system clipboard if possible.
    pub fn new() -> Self {
        Self {
            text: None,
            clipboard: Clipboard::new().ok(),
        }
    }

    /// Creates an empty register that never touches the system clipboard.
    pub fn detached() -> Self {
        Self {
            text: None,
            clipboard: None,
        }
    }

    /// Stores a line, mirroring it to the system clipboard on a best-effort
    /// basis.
    pub fn yank(&mut self, line: &str) {
        self.text = Some(line.to_string());
        if let Some(clipboard) = self.clipboard.as_mut() {
            let _ = clipboard.set_text(line.to_string());
        }
    }

    /// Returns the stored line, if any.
    pub fn get(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns true if nothing has been yanked yet.
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
    }
}

impl Default for LineRegister {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yank_then_get() {
        let mut register = LineRegister::detached();
        assert!(register.is_empty());
        register.yank("hello");
        assert_eq!(register.get(), Some("hello"));
    }

    #[test]
    fn test_yank_replaces_previous() {
        let mut register = LineRegister::detached();
        register.yank("one");
        register.yank("two");
        assert_eq!(register.get(), Some("two"));
    }
}
