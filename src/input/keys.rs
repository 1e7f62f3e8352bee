//! Key classification and key-name parsing.
//!
//! Raw termion events are normalized into [`KeyInput`] values carrying a
//! canonical key name, the character (for printable keys), and a printable
//! flag. Key names are what the keymap and the pending sequence operate on:
//! printable keys are named by their character ("d", ":", "$"), special keys
//! get lowercase word names ("escape", "enter", "backspace"), and modified
//! keys use a prefix ("ctrl-s", "alt-x").
//!
//! Unrecognized events degrade to a non-printable no-op classification; input
//! is never fatal.

use termion::event::{Event, Key};

/// A normalized keystroke.
///
/// # Example
///
/// ```
/// use termion::event::{Event, Key};
/// use sumi::input::keys::classify;
///
/// let key = classify(&Event::Key(Key::Char('d'))).unwrap();
/// assert_eq!(key.name, "d");
/// assert_eq!(key.ch, Some('d'));
/// assert!(key.printable);
///
/// let esc = classify(&Event::Key(Key::Esc)).unwrap();
/// assert_eq!(esc.name, "escape");
/// assert!(!esc.printable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    /// Canonical key name used for keymap lookup.
    pub name: String,
    /// The character, for keys that carry one.
    pub ch: Option<char>,
    /// True if the key produces text when typed in Insert mode.
    pub printable: bool,
}

impl KeyInput {
    /// Builds a printable character key.
    pub fn char(ch: char) -> Self {
        Self {
            name: ch.to_string(),
            ch: Some(ch),
            printable: !ch.is_control(),
        }
    }

    /// Builds a named special key.
    pub fn special(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ch: None,
            printable: false,
        }
    }
}

/// Classifies a termion event into a [`KeyInput`].
///
/// Returns `None` for non-key events (mouse, unsupported escape sequences),
/// which the engine ignores entirely.
pub fn classify(event: &Event) -> Option<KeyInput> {
    let key = match event {
        Event::Key(key) => key,
        _ => return None,
    };

    let input = match key {
        Key::Char('\n') => KeyInput::special("enter"),
        Key::Char('\t') => KeyInput::special("tab"),
        Key::Char(' ') => KeyInput {
            name: "space".to_string(),
            ch: Some(' '),
            printable: true,
        },
        Key::Char(c) => KeyInput::char(*c),
        Key::Ctrl(c) => KeyInput::special(&format!("ctrl-{c}")),
        Key::Alt(c) => KeyInput::special(&format!("alt-{c}")),
        Key::Esc => KeyInput::special("escape"),
        Key::Backspace => KeyInput::special("backspace"),
        Key::Delete => KeyInput::special("delete"),
        Key::Insert => KeyInput::special("insert"),
        Key::Left => KeyInput::special("left"),
        Key::Right => KeyInput::special("right"),
        Key::Up => KeyInput::special("up"),
        Key::Down => KeyInput::special("down"),
        Key::Home => KeyInput::special("home"),
        Key::End => KeyInput::special("end"),
        Key::PageUp => KeyInput::special("pageup"),
        Key::PageDown => KeyInput::special("pagedown"),
        Key::F(n) => KeyInput::special(&format!("f{n}")),
        _ => KeyInput::special("unknown"),
    };
    Some(input)
}

/// Returns true if `token` is a complete key name on its own, as opposed to a
/// run of printable characters.
fn is_key_name(token: &str) -> bool {
    matches!(
        token,
        "escape"
            | "enter"
            | "backspace"
            | "tab"
            | "space"
            | "delete"
            | "insert"
            | "left"
            | "right"
            | "up"
            | "down"
            | "home"
            | "end"
            | "pageup"
            | "pagedown"
            | "unknown"
    ) || token.starts_with("ctrl-")
        || token.starts_with("alt-")
        || (token.len() >= 2
            && token.starts_with('f')
            && token[1..].chars().all(|c| c.is_ascii_digit()))
}

/// Parses a binding string into a sequence of key names.
///
/// Whitespace-separated tokens parse one key per token. A single token that
/// is a known key name ("escape", "ctrl-s", "f1") is one key; any other
/// token is split into one key per character, so "dd" means the 'd' key
/// twice. Matching always happens on key-name boundaries, never on raw
/// concatenated text.
///
/// # Example
///
/// ```
/// use sumi::input::keys::parse_binding;
///
/// assert_eq!(parse_binding("dd"), vec!["d".to_string(), "d".to_string()]);
/// assert_eq!(parse_binding("escape"), vec!["escape".to_string()]);
/// assert_eq!(parse_binding("ctrl-s"), vec!["ctrl-s".to_string()]);
/// assert_eq!(
///     parse_binding("g escape"),
///     vec!["g".to_string(), "escape".to_string()]
/// );
/// ```
pub fn parse_binding(binding: &str) -> Vec<String> {
    if binding.split_whitespace().count() > 1 {
        return binding
            .split_whitespace()
            .flat_map(|token| {
                if is_key_name(token) {
                    vec![token.to_string()]
                } else {
                    token.chars().map(|c| c.to_string()).collect()
                }
            })
            .collect();
    }
    let token = binding.trim();
    if is_key_name(token) {
        vec![token.to_string()]
    } else {
        token.chars().map(|c| c.to_string()).collect()
    }
}
