//! Configuration parsing and its application to the engine.

use std::thread::sleep;
use std::time::Duration;

use sumi::config::Config;
use sumi::editor::engine::EditorEngine;
use sumi::editor::mode::EditorMode;
use sumi::input::keys::KeyInput;

#[test]
fn test_full_config_parses() {
    let config: Config = toml::from_str(
        r#"
        show_line_numbers = false
        sequence_timeout_ms = 250
        scroll_margin = 2
        tab_size = 8
        create_backup = true

        [keymap.normal]
        "J" = "move_down"
        "K" = "move_up"

        [keymap.insert]
        "ctrl-n" = "new_line"

        [keymap.global]
        "ctrl-x" = "quit"
        "#,
    )
    .unwrap();

    assert!(!config.show_line_numbers);
    assert_eq!(config.sequence_timeout_ms, 250);
    assert_eq!(config.scroll_margin, 2);
    assert_eq!(config.tab_size, 8);
    assert!(config.create_backup);
    assert_eq!(config.keymap.len(), 3);
}

#[test]
fn test_apply_config_rebinds_keys() {
    let config: Config = toml::from_str(
        r#"
        [keymap.global]
        "ctrl-x" = "quit"
        "#,
    )
    .unwrap();

    let mut engine = EditorEngine::new();
    engine.apply_config(&config);

    engine.handle_key(KeyInput::special("ctrl-x"));
    assert!(!engine.is_running());
}

#[test]
fn test_apply_config_sets_sequence_timeout() {
    let config: Config = toml::from_str("sequence_timeout_ms = 30").unwrap();
    let mut engine = EditorEngine::new();
    engine.apply_config(&config);

    // With a 30ms timeout, a slow "dd" no longer resolves
    engine.handle_key(KeyInput::char('i'));
    engine.handle_key(KeyInput::char('z'));
    engine.handle_key(KeyInput::special("escape"));
    engine.handle_key(KeyInput::char('d'));
    sleep(Duration::from_millis(120));
    engine.handle_key(KeyInput::char('d'));
    assert_eq!(engine.buffer().lines(), &["z".to_string()]);
}

#[test]
fn test_apply_config_sets_tab_size() {
    let config: Config = toml::from_str("tab_size = 2").unwrap();
    let mut engine = EditorEngine::new();
    engine.apply_config(&config);

    engine.handle_key(KeyInput::char('i'));
    engine.handle_key(KeyInput::special("tab"));
    assert_eq!(engine.buffer().line(0), Some("  "));
}

#[test]
fn test_bad_keymap_entries_become_warnings() {
    let config: Config = toml::from_str(
        r#"
        [keymap.normal]
        "J" = "not_a_real_action"
        "#,
    )
    .unwrap();

    let mut engine = EditorEngine::new();
    engine.apply_config(&config);

    assert_eq!(engine.mode(), EditorMode::Normal);
    let message = engine.notifications_mut().latest().unwrap();
    assert!(message.message.contains("not_a_real_action"));

    // Defaults survive a partially bad config
    engine.handle_key(KeyInput::char('i'));
    assert_eq!(engine.mode(), EditorMode::Insert);
}
