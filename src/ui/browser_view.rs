//! File browser rendering: directory header, entry list, filter line.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::editor::engine::EditorEngine;

/// Renders the directory listing with the selected entry highlighted.
pub fn render(f: &mut Frame, area: Rect, engine: &EditorEngine) {
    let Some(browser) = engine.browser() else {
        f.render_widget(Paragraph::new(""), area);
        return;
    };

    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        format!(" {}", browser.current_dir().display()),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    if browser.filter_mode() || !browser.filter().is_empty() {
        lines.push(Line::from(Span::styled(
            format!(" filter: {}", browser.filter()),
            Style::default().fg(Color::Yellow),
        )));
    }

    let header_rows = lines.len();
    let list_height = (area.height as usize).saturating_sub(header_rows);
    let entries = browser.entries();
    let selected = browser.selected_index();

    // Keep the selection on screen for long listings.
    let first = selected.saturating_sub(list_height.saturating_sub(1));
    for (i, entry) in entries.iter().enumerate().skip(first).take(list_height) {
        let marker = if entry.is_dir { "/" } else { "" };
        let style = if i == selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else if entry.is_dir {
            Style::default().fg(Color::Blue)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!(" {}{marker}", entry.name),
            style,
        )));
    }
    if entries.is_empty() {
        lines.push(Line::from(Span::styled(
            " (empty)",
            Style::default().fg(Color::DarkGray),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}
