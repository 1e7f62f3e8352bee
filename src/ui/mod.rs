//! Terminal interface rendering.
//!
//! The screen is three stacked areas: the main view (text or file browser),
//! a one-line status bar, and a one-line message area for notifications and
//! the command line. Rendering reads engine state; the only state it writes
//! back is the viewport window size, which must track the text area so the
//! engine can keep the cursor visible.

pub mod browser_view;
pub mod editor_view;
pub mod message_area;
pub mod status_line;

use anyhow::Result;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Terminal;

use crate::editor::engine::EditorEngine;
use crate::editor::mode::EditorMode;

/// Renders engine state into a ratatui terminal.
pub struct UI {
    show_line_numbers: bool,
}

impl UI {
    /// Creates a UI.
    pub fn new(show_line_numbers: bool) -> Self {
        Self { show_line_numbers }
    }

    /// Draws one frame: main view, status line, message area, and the
    /// hardware cursor for the active mode.
    pub fn render<B: Backend>(
        &self,
        terminal: &mut Terminal<B>,
        engine: &mut EditorEngine,
    ) -> Result<()> {
        // Size the viewport to the text area before drawing so the engine's
        // cursor-visibility invariant holds for this frame.
        let size = terminal.size()?;
        let area = ratatui::layout::Rect::new(0, 0, size.width, size.height);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);
        let main = chunks[0];
        let gutter = if self.show_line_numbers {
            editor_view::gutter_width(engine.buffer().line_count())
        } else {
            0
        };
        engine.resize_viewport(
            main.height as usize,
            (main.width as usize).saturating_sub(gutter),
        );

        terminal.draw(|f| {
            match engine.mode() {
                EditorMode::FileBrowser => browser_view::render(f, main, engine),
                _ => editor_view::render(f, main, engine, self.show_line_numbers),
            }
            status_line::render(f, chunks[1], engine);
            message_area::render(f, chunks[2], engine);

            match engine.mode() {
                EditorMode::Normal | EditorMode::Insert => {
                    let row = engine.cursor().row();
                    let col = engine.cursor().col();
                    let vp = engine.viewport();
                    if vp.contains(row, col) {
                        let y = main.y + (row - vp.v_offset()) as u16;
                        let x = main.x + gutter as u16 + (col - vp.h_offset()) as u16;
                        f.set_cursor_position((x, y));
                    }
                }
                EditorMode::Command => {
                    let x = chunks[2].x + 1 + engine.command_line().chars().count() as u16;
                    f.set_cursor_position((x.min(chunks[2].right().saturating_sub(1)), chunks[2].y));
                }
                EditorMode::FileBrowser => {}
            }
        })?;
        Ok(())
    }
}
