//! Dispatch behavior: multi-key resolution, ambiguity, and timeout expiry.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use sumi::editor::engine::{EditorEngine, Flow};
use sumi::editor::mode::EditorMode;
use sumi::input::keys::KeyInput;

/// Binds `key` in Normal mode to a callback that counts its dispatches.
fn bind_counter(engine: &mut EditorEngine, key: &str) -> Rc<Cell<u32>> {
    let count = Rc::new(Cell::new(0));
    let counter = Rc::clone(&count);
    engine.keymap_mut().bind_callback(
        EditorMode::Normal,
        key,
        Arc::new(move |_engine| {
            counter.set(counter.get() + 1);
            Ok(Flow::Continue)
        }),
    );
    count
}

#[test]
fn test_double_key_dispatches_longest_binding_exactly_once() {
    let mut engine = EditorEngine::new();
    let single = bind_counter(&mut engine, "d");
    let double = bind_counter(&mut engine, "dd");

    engine.handle_key(KeyInput::char('d'));
    engine.handle_key(KeyInput::char('d'));

    assert_eq!(double.get(), 1, "the two-key binding fires once");
    assert_eq!(single.get(), 0, "the one-key binding never fires");
    assert_eq!(engine.pending_keys(), "");
}

#[test]
fn test_first_key_of_ambiguous_pair_waits() {
    let mut engine = EditorEngine::new();
    let single = bind_counter(&mut engine, "d");
    let double = bind_counter(&mut engine, "dd");

    engine.handle_key(KeyInput::char('d'));
    assert_eq!(single.get(), 0);
    assert_eq!(double.get(), 0);
    assert_eq!(engine.pending_keys(), "d");
}

#[test]
fn test_stale_sequence_expires_without_dispatch() {
    let mut engine = EditorEngine::new();
    engine.set_sequence_timeout(Duration::from_millis(30));
    let single = bind_counter(&mut engine, "d");
    let double = bind_counter(&mut engine, "dd");

    engine.handle_key(KeyInput::char('d'));
    // Generous sleep vs the 30ms timeout to avoid CI flakiness
    sleep(Duration::from_millis(120));
    engine.handle_key(KeyInput::char('!')); // unbound

    assert_eq!(single.get(), 0);
    assert_eq!(double.get(), 0);
    // The stale 'd' was dropped, not concatenated into "d!"
    assert_eq!(engine.pending_keys(), "");
}

#[test]
fn test_stale_prefix_restarts_sequence() {
    let mut engine = EditorEngine::new();
    engine.set_sequence_timeout(Duration::from_millis(30));
    let double = bind_counter(&mut engine, "dd");

    engine.handle_key(KeyInput::char('d'));
    sleep(Duration::from_millis(120));
    engine.handle_key(KeyInput::char('d'));
    // The second 'd' starts a fresh pending sequence instead of completing
    // the expired one.
    assert_eq!(double.get(), 0);
    assert_eq!(engine.pending_keys(), "d");

    engine.handle_key(KeyInput::char('d'));
    assert_eq!(double.get(), 1);
}

#[test]
fn test_longest_match_wins_for_gg() {
    let mut engine = EditorEngine::new();
    let single = bind_counter(&mut engine, "g");
    let double = bind_counter(&mut engine, "gg");

    engine.handle_key(KeyInput::char('g'));
    engine.handle_key(KeyInput::char('g'));

    assert_eq!(double.get(), 1);
    assert_eq!(single.get(), 0);
}

#[test]
fn test_failed_sequence_recovers_trailing_single_key() {
    let mut engine = EditorEngine::new();
    let trailing = bind_counter(&mut engine, "x");
    // "gg" is bound by default; "gx" is not
    engine.handle_key(KeyInput::char('g'));
    engine.handle_key(KeyInput::char('x'));

    assert_eq!(trailing.get(), 1);
    assert_eq!(engine.pending_keys(), "");
}

#[test]
fn test_unbound_single_key_reaches_default_handler() {
    let mut engine = EditorEngine::new();
    engine.handle_key(KeyInput::char('i'));
    assert_eq!(engine.mode(), EditorMode::Insert);
    // '!' is unbound in Insert mode, so the default handler inserts it
    engine.handle_key(KeyInput::char('!'));
    assert_eq!(engine.buffer().line(0), Some("!"));
}

#[test]
fn test_unbound_multi_key_sequence_skips_default_handler() {
    let mut engine = EditorEngine::new();
    engine.handle_key(KeyInput::char('i'));
    // 'g' alone has no Insert binding and inserts text. But a pending
    // sequence longer than one key never reaches the default handler.
    engine.keymap_mut().bind(
        EditorMode::Insert,
        "zz",
        sumi::editor::actions::ActionId::EnterNormalMode,
    );
    engine.handle_key(KeyInput::char('z'));
    assert_eq!(engine.buffer().line(0), Some(""));
    engine.handle_key(KeyInput::char('q'));
    // "zq" resolved nothing and was two keys long: dropped entirely
    assert_eq!(engine.buffer().line(0), Some(""));
    assert_eq!(engine.pending_keys(), "");
}

#[test]
fn test_mode_switch_clears_pending_sequence() {
    let mut engine = EditorEngine::new();
    engine.handle_key(KeyInput::char('d')); // pending "d" (dd is bound)
    assert_eq!(engine.pending_keys(), "d");
    engine.set_mode(EditorMode::Insert);
    assert_eq!(engine.pending_keys(), "");
}

#[test]
fn test_callback_error_becomes_notification_not_crash() {
    let mut engine = EditorEngine::new();
    engine.keymap_mut().bind_callback(
        EditorMode::Normal,
        "E",
        Arc::new(|_engine| anyhow::bail!("handler exploded")),
    );
    engine.handle_key(KeyInput::char('E'));

    assert!(engine.is_running());
    assert_eq!(engine.mode(), EditorMode::Normal);
    assert_eq!(engine.pending_keys(), "");
    let message = engine.notifications_mut().latest().unwrap();
    assert!(message.message.contains("handler exploded"));
}

#[test]
fn test_quit_outcome_passes_error_boundary() {
    let mut engine = EditorEngine::new();
    engine.keymap_mut().bind_callback(
        EditorMode::Normal,
        "Q",
        Arc::new(|_engine| Ok(Flow::Quit)),
    );
    engine.handle_key(KeyInput::char('Q'));
    assert!(!engine.is_running());
}

#[test]
fn test_unbinding_midway_does_not_invalidate_pending_sequence() {
    let mut engine = EditorEngine::new();
    let double = bind_counter(&mut engine, "dd");

    engine.handle_key(KeyInput::char('d'));
    assert_eq!(engine.pending_keys(), "d");
    // Editing the keymap while a sequence is pending leaves it in flight
    engine.keymap_mut().unbind(EditorMode::Normal, "x");
    engine.handle_key(KeyInput::char('d'));
    assert_eq!(double.get(), 1);
}
