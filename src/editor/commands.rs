//! Colon-command execution.
//!
//! Commands are entered on the command line (Command mode) and executed on
//! Enter. The registry is intentionally tiny: write, quit, and their
//! combinations. Unknown commands become a notification, never an error.

use std::path::PathBuf;

use anyhow::Result;

use super::engine::{EditorEngine, Flow};

/// Executes one command line, e.g. `"w"`, `"w notes.txt"`, `"wq"`, `"q!"`.
///
/// The quit outcome is returned as `Flow::Quit` so it can pass the dispatch
/// boundary untouched; recoverable problems either notify and return
/// `Flow::Continue` or propagate as errors for the boundary to surface.
pub fn execute(engine: &mut EditorEngine, input: &str) -> Result<Flow> {
    let mut parts = input.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(Flow::Continue);
    };
    let arg = parts.next().map(PathBuf::from);

    match command {
        "q" => {
            if engine.is_modified() {
                engine
                    .notifications_mut()
                    .warning("Unsaved changes (use :q! to discard or :wq to save)");
                Ok(Flow::Continue)
            } else {
                Ok(Flow::Quit)
            }
        }
        "q!" => Ok(Flow::Quit),
        "w" => {
            engine.save_file(arg.as_deref())?;
            Ok(Flow::Continue)
        }
        "wq" => {
            engine.save_file(arg.as_deref())?;
            Ok(Flow::Quit)
        }
        other => {
            engine
                .notifications_mut()
                .warning(format!("Unknown command: {other}"));
            Ok(Flow::Continue)
        }
    }
}
