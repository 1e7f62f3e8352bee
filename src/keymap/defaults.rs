//! Built-in default key bindings.

use super::KeymapTable;
use crate::editor::actions::ActionId;
use crate::editor::mode::EditorMode;

/// Installs the default bindings into `keymap`. Called on construction and
/// again by `load_from_config` before user overrides are applied.
pub fn install(keymap: &mut KeymapTable) {
    use ActionId::*;
    use EditorMode::*;

    // Global bindings, live in every mode unless shadowed
    keymap.bind_global("ctrl-c", Quit);
    keymap.bind_global("ctrl-q", Quit);
    keymap.bind_global("ctrl-s", SaveFile);
    keymap.bind_global("ctrl-e", OpenFileBrowser);

    // Normal mode: navigation
    keymap.bind(Normal, "h", MoveLeft);
    keymap.bind(Normal, "j", MoveDown);
    keymap.bind(Normal, "k", MoveUp);
    keymap.bind(Normal, "l", MoveRight);
    keymap.bind(Normal, "left", MoveLeft);
    keymap.bind(Normal, "down", MoveDown);
    keymap.bind(Normal, "up", MoveUp);
    keymap.bind(Normal, "right", MoveRight);
    keymap.bind(Normal, "0", MoveBeginningOfLine);
    keymap.bind(Normal, "$", MoveEndOfLine);
    keymap.bind(Normal, "^", MoveFirstNonBlank);
    keymap.bind(Normal, "gg", MoveBeginningOfFile);
    keymap.bind(Normal, "G", MoveEndOfFile);

    // Normal mode: mode transitions
    keymap.bind(Normal, "i", EnterInsertMode);
    keymap.bind(Normal, "a", AppendAfterCursor);
    keymap.bind(Normal, "A", AppendEndOfLine);
    keymap.bind(Normal, "o", NewLineBelow);
    keymap.bind(Normal, "O", NewLineAbove);
    keymap.bind(Normal, ":", EnterCommandMode);

    // Normal mode: editing
    keymap.bind(Normal, "x", DeleteChar);
    keymap.bind(Normal, "dd", DeleteLine);
    keymap.bind(Normal, "yy", YankLine);
    keymap.bind(Normal, "p", PasteAfter);
    keymap.bind(Normal, "P", PasteBefore);
    keymap.bind(Normal, "u", Undo);
    keymap.bind(Normal, "ctrl-r", Redo);

    // Insert mode
    keymap.bind(Insert, "escape", EnterNormalMode);
    keymap.bind(Insert, "enter", NewLine);
    keymap.bind(Insert, "backspace", DeleteBackward);
    keymap.bind(Insert, "tab", Indent);
    keymap.bind(Insert, "left", MoveLeft);
    keymap.bind(Insert, "down", MoveDown);
    keymap.bind(Insert, "up", MoveUp);
    keymap.bind(Insert, "right", MoveRight);

    // Command mode
    keymap.bind(Command, "escape", EnterNormalMode);
    keymap.bind(Command, "enter", ExecuteCommand);
    keymap.bind(Command, "backspace", DeleteBackward);

    // File browser
    keymap.bind(FileBrowser, "j", MoveDown);
    keymap.bind(FileBrowser, "k", MoveUp);
    keymap.bind(FileBrowser, "down", MoveDown);
    keymap.bind(FileBrowser, "up", MoveUp);
    keymap.bind(FileBrowser, "h", MoveLeft);
    keymap.bind(FileBrowser, "l", MoveRight);
    keymap.bind(FileBrowser, "left", MoveLeft);
    keymap.bind(FileBrowser, "right", MoveRight);
    keymap.bind(FileBrowser, "enter", OpenSelected);
    keymap.bind(FileBrowser, "escape", ExitBrowser);
    keymap.bind(FileBrowser, "f", ToggleFilter);
    keymap.bind(FileBrowser, "F", ClearFilter);
    keymap.bind(FileBrowser, ".", ToggleHidden);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::Binding;

    fn pending(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_defaults_cover_all_modes() {
        let keymap = KeymapTable::with_defaults();
        for mode in EditorMode::ALL {
            assert!(keymap.mode_binding_count(mode) > 0, "{mode} has no defaults");
        }
        assert_eq!(keymap.global_binding_count(), 4);
    }

    #[test]
    fn test_insert_mode_does_not_bind_normal_navigation() {
        let keymap = KeymapTable::with_defaults();
        assert!(keymap
            .resolve(EditorMode::Insert, &pending(&["j"]))
            .is_none());
    }

    #[test]
    fn test_double_d_is_delete_line() {
        let keymap = KeymapTable::with_defaults();
        let binding = keymap.resolve(EditorMode::Normal, &pending(&["d", "d"]));
        assert!(matches!(binding, Some(Binding::Action(ActionId::DeleteLine))));
    }

    #[test]
    fn test_global_save_reachable_from_insert() {
        let keymap = KeymapTable::with_defaults();
        let binding = keymap.resolve(EditorMode::Insert, &pending(&["ctrl-s"]));
        assert!(matches!(binding, Some(Binding::Action(ActionId::SaveFile))));
    }
}
