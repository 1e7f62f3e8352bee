//! Key binding tables and sequence resolution.
//!
//! A binding maps a (mode, key sequence) pair to an action: either a symbolic
//! [`ActionId`] resolved against the active mode's handler table at dispatch
//! time, or a direct callback that bypasses the handler tables entirely.
//!
//! Lookup is a flat scan over small tables, rescanned every keystroke; there
//! is no binding grammar. Two questions are answered per keystroke:
//!
//! - Is the pending sequence a strict prefix of some registered binding in
//!   the active mode's table or the global table ("potential mapping")? If
//!   so, dispatch waits for more keys.
//! - Otherwise, among registered bindings whose key sequence matches a suffix
//!   of the pending sequence, which has the longest key? The mode-specific
//!   table is consulted first; the global table only when the mode table has
//!   no candidate at all. The suffix rule is what lets a trailing key fire
//!   its single-key binding after a failed multi-key attempt ("g" then "d"
//!   still deletes when "gg" is bound but "gd" is not).
//!
//! Re-binding the same (mode, keys) pair replaces the old entry; unbinding
//! mid-sequence does not retroactively invalidate an in-flight pending
//! sequence.

pub mod defaults;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use indexmap::IndexMap;

use crate::editor::actions::ActionId;
use crate::editor::engine::{EditorEngine, Flow};
use crate::editor::mode::EditorMode;
use crate::input::keys::parse_binding;

/// A parsed key sequence: one canonical key name per element.
pub type KeySeq = Vec<String>;

/// Callback form of a binding.
pub type BindingFn = Arc<dyn Fn(&mut EditorEngine) -> Result<Flow>>;

/// What a key sequence is bound to.
#[derive(Clone)]
pub enum Binding {
    /// A symbolic action, resolved against the current mode's handler table
    /// when dispatched.
    Action(ActionId),
    /// A direct callback, bypassing the handler tables.
    Callback(BindingFn),
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Action(id) => write!(f, "Action({id})"),
            Binding::Callback(_) => write!(f, "Callback"),
        }
    }
}

/// Per-mode binding tables plus one global table.
///
/// # Example
///
/// ```
/// use sumi::editor::actions::ActionId;
/// use sumi::editor::mode::EditorMode;
/// use sumi::keymap::{Binding, KeymapTable};
///
/// let mut keymap = KeymapTable::new();
/// keymap.bind(EditorMode::Normal, "dd", ActionId::DeleteLine);
/// keymap.bind(EditorMode::Normal, "x", ActionId::DeleteChar);
///
/// let pending = vec!["d".to_string()];
/// assert!(keymap.has_potential(EditorMode::Normal, &pending));
///
/// let pending = vec!["d".to_string(), "d".to_string()];
/// let binding = keymap.resolve(EditorMode::Normal, &pending).unwrap();
/// assert!(matches!(binding, Binding::Action(ActionId::DeleteLine)));
/// ```
pub struct KeymapTable {
    modes: HashMap<EditorMode, IndexMap<KeySeq, Binding>>,
    global: IndexMap<KeySeq, Binding>,
}

impl KeymapTable {
    /// Creates an empty keymap with a table for every mode.
    pub fn new() -> Self {
        let mut modes = HashMap::new();
        for mode in EditorMode::ALL {
            modes.insert(mode, IndexMap::new());
        }
        Self {
            modes,
            global: IndexMap::new(),
        }
    }

    /// Creates a keymap pre-populated with the built-in default bindings.
    pub fn with_defaults() -> Self {
        let mut keymap = Self::new();
        defaults::install(&mut keymap);
        keymap
    }

    /// Binds a key sequence to a symbolic action in one mode. Re-binding the
    /// same (mode, key) replaces the previous entry.
    pub fn bind(&mut self, mode: EditorMode, key: &str, action: ActionId) {
        self.bind_entry(mode, key, Binding::Action(action));
    }

    /// Binds a key sequence to a direct callback in one mode.
    pub fn bind_callback(&mut self, mode: EditorMode, key: &str, callback: BindingFn) {
        self.bind_entry(mode, key, Binding::Callback(callback));
    }

    /// Binds a key sequence in several modes at once.
    pub fn bind_many(&mut self, modes: &[EditorMode], key: &str, action: ActionId) {
        for &mode in modes {
            self.bind(mode, key, action);
        }
    }

    /// Binds a key sequence in the global table, consulted only after the
    /// active mode's table has no candidate.
    pub fn bind_global(&mut self, key: &str, action: ActionId) {
        self.global.insert(parse_binding(key), Binding::Action(action));
    }

    /// Removes a mode binding. Unknown keys are ignored.
    pub fn unbind(&mut self, mode: EditorMode, key: &str) {
        if let Some(table) = self.modes.get_mut(&mode) {
            table.shift_remove(&parse_binding(key));
        }
    }

    /// Removes a global binding. Unknown keys are ignored.
    pub fn unbind_global(&mut self, key: &str) {
        self.global.shift_remove(&parse_binding(key));
    }

    fn bind_entry(&mut self, mode: EditorMode, key: &str, binding: Binding) {
        if let Some(table) = self.modes.get_mut(&mode) {
            table.insert(parse_binding(key), binding);
        }
    }

    /// Returns true if the pending sequence is a strict prefix of some
    /// binding in the active mode's table or the global table, meaning
    /// dispatch should wait for more keys.
    pub fn has_potential(&self, mode: EditorMode, pending: &[String]) -> bool {
        let strict_prefix = |keys: &KeySeq| {
            keys.len() > pending.len() && keys[..pending.len()] == pending[..]
        };
        self.modes
            .get(&mode)
            .is_some_and(|table| table.keys().any(|k| strict_prefix(k)))
            || self.global.keys().any(|k| strict_prefix(k))
    }

    /// Resolves the pending sequence to a binding, if any.
    ///
    /// Candidates are bindings whose key sequence is a suffix of the pending
    /// sequence; the longest candidate wins. The mode table is checked first
    /// and the global table only when the mode table has no candidate.
    pub fn resolve(&self, mode: EditorMode, pending: &[String]) -> Option<Binding> {
        self.modes
            .get(&mode)
            .and_then(|table| longest_suffix(table, pending))
            .or_else(|| longest_suffix(&self.global, pending))
    }

    /// Clears everything, reinstalls the built-in defaults, then applies a
    /// declarative mapping of mode name to {key: action name}. The mode name
    /// "global" targets the global table.
    ///
    /// Returns human-readable descriptions of the entries that could not be
    /// applied; the mapping itself never fails as a whole.
    pub fn load_from_config(
        &mut self,
        mapping: &HashMap<String, HashMap<String, String>>,
    ) -> Vec<String> {
        for table in self.modes.values_mut() {
            table.clear();
        }
        self.global.clear();
        defaults::install(self);

        let mut problems = Vec::new();
        let mut sections: Vec<_> = mapping.iter().collect();
        sections.sort_by(|a, b| a.0.cmp(b.0));
        for (mode_name, bindings) in sections {
            let mut entries: Vec<_> = bindings.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            if mode_name == "global" {
                for (key, action_name) in entries {
                    match action_name.parse::<ActionId>() {
                        Ok(action) => self.bind_global(key, action),
                        Err(err) => problems.push(format!("global key '{key}': {err}")),
                    }
                }
                continue;
            }

            let Some(mode) = EditorMode::from_name(mode_name) else {
                problems.push(format!("unknown keymap section '{mode_name}'"));
                continue;
            };
            for (key, action_name) in entries {
                match action_name.parse::<ActionId>() {
                    Ok(action) => self.bind(mode, key, action),
                    Err(err) => problems.push(format!("{mode_name} key '{key}': {err}")),
                }
            }
        }
        problems
    }

    /// Returns the number of bindings in one mode's table.
    pub fn mode_binding_count(&self, mode: EditorMode) -> usize {
        self.modes.get(&mode).map_or(0, IndexMap::len)
    }

    /// Returns the number of global bindings.
    pub fn global_binding_count(&self) -> usize {
        self.global.len()
    }
}

impl Default for KeymapTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn longest_suffix(table: &IndexMap<KeySeq, Binding>, pending: &[String]) -> Option<Binding> {
    table
        .iter()
        .filter(|(keys, _)| {
            keys.len() <= pending.len() && pending[pending.len() - keys.len()..] == keys[..]
        })
        .max_by_key(|(keys, _)| keys.len())
        .map(|(_, binding)| binding.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_longest_suffix_wins() {
        let mut keymap = KeymapTable::new();
        keymap.bind(EditorMode::Normal, "d", ActionId::DeleteChar);
        keymap.bind(EditorMode::Normal, "dd", ActionId::DeleteLine);

        let binding = keymap.resolve(EditorMode::Normal, &pending(&["d", "d"]));
        assert!(matches!(binding, Some(Binding::Action(ActionId::DeleteLine))));
    }

    #[test]
    fn test_suffix_match_recovers_trailing_key() {
        let mut keymap = KeymapTable::new();
        keymap.bind(EditorMode::Normal, "gg", ActionId::MoveBeginningOfFile);
        keymap.bind(EditorMode::Normal, "x", ActionId::DeleteChar);

        // "g" then "x": no "gx" binding, but the trailing "x" still matches.
        let binding = keymap.resolve(EditorMode::Normal, &pending(&["g", "x"]));
        assert!(matches!(binding, Some(Binding::Action(ActionId::DeleteChar))));
    }

    #[test]
    fn test_strict_prefix_is_potential() {
        let mut keymap = KeymapTable::new();
        keymap.bind(EditorMode::Normal, "dd", ActionId::DeleteLine);

        assert!(keymap.has_potential(EditorMode::Normal, &pending(&["d"])));
        assert!(!keymap.has_potential(EditorMode::Normal, &pending(&["d", "d"])));
        assert!(!keymap.has_potential(EditorMode::Normal, &pending(&["x"])));
    }

    #[test]
    fn test_mode_tables_are_independent() {
        let mut keymap = KeymapTable::new();
        keymap.bind(EditorMode::Insert, "x", ActionId::DeleteBackward);

        assert!(keymap.resolve(EditorMode::Normal, &pending(&["x"])).is_none());
        assert!(keymap.resolve(EditorMode::Insert, &pending(&["x"])).is_some());
    }

    #[test]
    fn test_global_consulted_after_mode_table() {
        let mut keymap = KeymapTable::new();
        keymap.bind_global("q", ActionId::Quit);
        keymap.bind(EditorMode::Normal, "q", ActionId::DeleteChar);

        // Normal mode has its own candidate, so the global entry is shadowed.
        let binding = keymap.resolve(EditorMode::Normal, &pending(&["q"]));
        assert!(matches!(binding, Some(Binding::Action(ActionId::DeleteChar))));

        // Insert mode has none, so the global entry applies.
        let binding = keymap.resolve(EditorMode::Insert, &pending(&["q"]));
        assert!(matches!(binding, Some(Binding::Action(ActionId::Quit))));
    }

    #[test]
    fn test_rebinding_replaces() {
        let mut keymap = KeymapTable::new();
        keymap.bind(EditorMode::Normal, "x", ActionId::DeleteChar);
        keymap.bind(EditorMode::Normal, "x", ActionId::DeleteLine);
        assert_eq!(keymap.mode_binding_count(EditorMode::Normal), 1);

        let binding = keymap.resolve(EditorMode::Normal, &pending(&["x"]));
        assert!(matches!(binding, Some(Binding::Action(ActionId::DeleteLine))));
    }

    #[test]
    fn test_unbind() {
        let mut keymap = KeymapTable::new();
        keymap.bind(EditorMode::Normal, "x", ActionId::DeleteChar);
        keymap.unbind(EditorMode::Normal, "x");
        assert!(keymap.resolve(EditorMode::Normal, &pending(&["x"])).is_none());
    }

    #[test]
    fn test_bind_many() {
        let mut keymap = KeymapTable::new();
        keymap.bind_many(
            &[EditorMode::Insert, EditorMode::Command],
            "escape",
            ActionId::EnterNormalMode,
        );
        assert!(keymap
            .resolve(EditorMode::Insert, &pending(&["escape"]))
            .is_some());
        assert!(keymap
            .resolve(EditorMode::Command, &pending(&["escape"]))
            .is_some());
        assert!(keymap
            .resolve(EditorMode::Normal, &pending(&["escape"]))
            .is_none());
    }

    #[test]
    fn test_callback_binding_resolves() {
        let mut keymap = KeymapTable::new();
        keymap.bind_callback(
            EditorMode::Normal,
            "Q",
            Arc::new(|_engine| Ok(Flow::Quit)),
        );
        let binding = keymap.resolve(EditorMode::Normal, &pending(&["Q"]));
        assert!(matches!(binding, Some(Binding::Callback(_))));
    }

    #[test]
    fn test_load_from_config_reports_problems() {
        let mut keymap = KeymapTable::new();
        let mut normal = HashMap::new();
        normal.insert("J".to_string(), "move_down".to_string());
        normal.insert("Z".to_string(), "not_an_action".to_string());
        let mut mapping = HashMap::new();
        mapping.insert("normal".to_string(), normal);
        mapping.insert("bogus_mode".to_string(), HashMap::new());

        let problems = keymap.load_from_config(&mapping);
        assert_eq!(problems.len(), 2);
        let binding = keymap.resolve(EditorMode::Normal, &pending(&["J"]));
        assert!(matches!(binding, Some(Binding::Action(ActionId::MoveDown))));
    }

    #[test]
    fn test_load_from_config_restores_defaults_first() {
        let mut keymap = KeymapTable::with_defaults();
        keymap.bind(EditorMode::Normal, "z", ActionId::Quit);

        let problems = keymap.load_from_config(&HashMap::new());
        assert!(problems.is_empty());
        // The dynamic "z" binding is gone, the default "dd" is back.
        assert!(keymap.resolve(EditorMode::Normal, &pending(&["z"])).is_none());
        assert!(keymap
            .resolve(EditorMode::Normal, &pending(&["d", "d"]))
            .is_some());
    }
}
