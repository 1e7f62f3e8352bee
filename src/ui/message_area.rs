//! Message area rendering: command line input and notifications.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::editor::engine::EditorEngine;
use crate::editor::mode::EditorMode;
use crate::notify::Severity;

/// Renders the bottom line: the `:` prompt while a command is being edited,
/// otherwise the most recent active notification.
pub fn render(f: &mut Frame, area: Rect, engine: &mut EditorEngine) {
    let content = if engine.mode() == EditorMode::Command {
        Line::from(Span::raw(format!(":{}", engine.command_line())))
    } else if let Some(notification) = engine.notifications_mut().latest() {
        let color = match notification.severity {
            Severity::Info => Color::Cyan,
            Severity::Success => Color::Green,
            Severity::Warning => Color::Yellow,
            Severity::Error => Color::Red,
        };
        Line::from(Span::styled(
            notification.message.clone(),
            Style::default().fg(color),
        ))
    } else {
        Line::from("")
    };

    f.render_widget(Paragraph::new(content), area);
}
