use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{AddField, App};
use crate::tui::input::line::LineEdit;

/// Render the add form: one row per field, focused row marked
pub fn render_add_form(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.add_form else {
        return;
    };
    let bg = app.theme.background;

    let mut lines = vec![
        field_line(app, "Todo", &form.text, form.focus == AddField::Text, ""),
        field_line(
            app,
            "Due date",
            &form.due_date,
            form.focus == AddField::DueDate,
            "(YYYY-MM-DD, optional)",
        ),
    ];

    // Priority row: value cycles in place, no text cursor
    let focused = form.focus == AddField::Priority;
    let mut spans = vec![marker_span(app, focused), label_span(app, "Priority", focused)];
    spans.push(Span::styled(
        form.priority.label(),
        Style::default()
            .fg(app.theme.priority_color(form.priority))
            .bg(bg),
    ));
    if focused {
        spans.push(Span::styled(
            "  (Space cycles)",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }
    lines.push(Line::from(spans));

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn field_line<'a>(
    app: &App,
    label: &'a str,
    input: &'a LineEdit,
    focused: bool,
    hint: &'a str,
) -> Line<'a> {
    let bg = app.theme.background;
    let mut spans = vec![marker_span(app, focused), label_span(app, label, focused)];

    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    if focused {
        // ▌ cursor between the split halves
        let (before, after) = input.split_at_cursor();
        spans.push(Span::styled(before, text_style));
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.accent).bg(bg),
        ));
        spans.push(Span::styled(after, text_style));
        if !hint.is_empty() && input.is_empty() {
            spans.push(Span::styled(
                format!("  {}", hint),
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
    } else {
        spans.push(Span::styled(input.text(), text_style));
    }
    Line::from(spans)
}

fn marker_span(app: &App, focused: bool) -> Span<'static> {
    let bg = app.theme.background;
    if focused {
        Span::styled(" \u{25B8} ", Style::default().fg(app.theme.accent).bg(bg))
    } else {
        Span::styled("   ", Style::default().bg(bg))
    }
}

fn label_span<'a>(app: &App, label: &'a str, focused: bool) -> Span<'a> {
    let bg = app.theme.background;
    let style = if focused {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(bg)
    };
    Span::styled(format!("{:<10}", label), style)
}
