use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, StatusKind};

/// Bottom row: status or confirm text on the left, key hints on the right.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();

    // Left side: confirm prompt, else transient status message
    if app.mode == Mode::Confirm {
        if let Some(confirm) = &app.confirm {
            spans.push(Span::styled(
                format!(" {}", confirm.message),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ));
        }
    } else if let Some(msg) = &app.status_message {
        let fg = match msg.kind {
            StatusKind::Info => app.theme.accent,
            StatusKind::Error => app.theme.error,
        };
        spans.push(Span::styled(
            format!(" {}", msg.text),
            Style::default().fg(fg).bg(bg),
        ));
    }

    // Right side: key hints for the current mode
    let hint = match app.mode {
        Mode::Navigate => "a add  e edit  d delete  space done  f finished  q quit",
        Mode::Add => "Enter add  Tab next field  Esc cancel",
        Mode::Edit => "Enter save  Esc cancel",
        Mode::Confirm => "y delete  other cancel",
    };
    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            hint,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
