use anyhow::{Context, Result};
use clap::Parser;
use ratatui::{backend::TermionBackend, Terminal};
use std::io::{self, Write};
use std::path::PathBuf;
use termion::input::TermRead;
use termion::raw::IntoRawMode;
use termion::screen::IntoAlternateScreen;

use sumi::config::Config;
use sumi::editor::engine::EditorEngine;
use sumi::file::FsStore;
use sumi::ui::UI;

/// sumi - a modal, keyboard-driven terminal text editor
#[derive(Parser)]
#[command(name = "sumi")]
#[command(version)]
#[command(about = "A modal, keyboard-driven terminal text editor", long_about = None)]
struct Cli {
    /// File to edit, or a directory to browse
    file: Option<PathBuf>,
}

/// Set up a panic hook that restores the terminal before displaying panic
/// information.
///
/// Without this, panic messages would be hidden or garbled by raw mode and
/// the alternate screen, making debugging very difficult.
fn setup_panic_hook() {
    use std::panic;

    let default_panic = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal to normal state; use stderr to avoid interfering
        // with stdout pipes
        let _ = write!(io::stderr(), "{}", termion::screen::ToMainScreen);
        let _ = write!(io::stderr(), "{}", termion::cursor::Show);
        let _ = io::stderr().flush();

        default_panic(panic_info);
    }));
}

fn main() -> Result<()> {
    setup_panic_hook();

    let cli = Cli::parse();
    let config = Config::load();

    let mut engine = EditorEngine::with_store(Box::new(FsStore {
        create_backup: config.create_backup,
    }));
    engine.apply_config(&config);
    if let Some(path) = cli.file.as_deref() {
        engine.open_initial(path);
    }

    // Terminal setup
    let stdout = io::stdout()
        .into_raw_mode()
        .context("Failed to enable raw mode")?;
    let stdout = stdout
        .into_alternate_screen()
        .context("Failed to enter alternate screen")?;
    let backend = TermionBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let ui = UI::new(config.show_line_numbers);
    let result = run_event_loop(&mut terminal, &ui, &mut engine);

    // Termion restores the terminal through its Drop guards; just make sure
    // the cursor is visible again.
    write!(terminal.backend_mut(), "{}", termion::cursor::Show)?;
    terminal.backend_mut().flush()?;

    result
}

/// One blocking terminal read between redraws; no timers, no threads.
fn run_event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    ui: &UI,
    engine: &mut EditorEngine,
) -> Result<()> {
    let mut events = io::stdin().events();
    loop {
        ui.render(terminal, engine)?;

        let Some(event) = events.next() else {
            break;
        };
        engine.handle_event(&event?);

        if !engine.is_running() {
            break;
        }
    }
    Ok(())
}
