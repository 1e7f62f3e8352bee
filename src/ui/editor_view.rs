//! Text buffer rendering with viewport clipping and line numbers.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::editor::engine::EditorEngine;

/// Width of the line-number gutter for a given line count, including the
/// separating space.
pub fn gutter_width(line_count: usize) -> usize {
    line_count.max(1).to_string().len() + 1
}

/// Renders the visible slice of the buffer.
pub fn render(f: &mut Frame, area: Rect, engine: &EditorEngine, show_line_numbers: bool) {
    let buffer = engine.buffer();
    let vp = engine.viewport();
    let gutter = if show_line_numbers {
        gutter_width(buffer.line_count())
    } else {
        0
    };
    let text_width = (area.width as usize).saturating_sub(gutter);

    let mut lines = Vec::with_capacity(area.height as usize);
    let first = vp.v_offset();
    for row in first..first + area.height as usize {
        let mut spans = Vec::new();
        if show_line_numbers {
            let label = if row < buffer.line_count() {
                format!("{:>width$} ", row + 1, width = gutter - 1)
            } else {
                " ".repeat(gutter)
            };
            spans.push(Span::styled(label, Style::default().fg(Color::DarkGray)));
        }
        if let Some(line) = buffer.line(row) {
            let visible: String = line
                .chars()
                .skip(vp.h_offset())
                .take(text_width)
                .collect();
            spans.push(Span::raw(visible));
        } else if !show_line_numbers {
            spans.push(Span::styled("~", Style::default().fg(Color::DarkGray)));
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), area);
}
