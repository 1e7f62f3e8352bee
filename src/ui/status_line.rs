//! Status line: mode, file, pending keys, cursor position.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::editor::engine::EditorEngine;

/// Renders the one-line status bar.
pub fn render(f: &mut Frame, area: Rect, engine: &EditorEngine) {
    let mode_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let filename = engine
        .filename()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "[No Name]".to_string());
    let modified = if engine.is_modified() { " [+]" } else { "" };

    let mut spans = vec![
        Span::styled(format!(" {} ", engine.mode()), mode_style),
        Span::raw(format!(" {filename}{modified}")),
    ];

    let pending = engine.pending_keys();
    if !pending.is_empty() {
        spans.push(Span::styled(
            format!("  {pending}"),
            Style::default().fg(Color::Yellow),
        ));
    }

    spans.push(Span::raw(format!(
        "  {}:{}  L{}",
        engine.cursor().row() + 1,
        engine.cursor().col() + 1,
        engine.buffer().line_count(),
    )));

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(paragraph, area);
}
