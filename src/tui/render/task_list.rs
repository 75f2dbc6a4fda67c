use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Task;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Render the task list with cursor highlight and scrolling
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let visible_height = area.height as usize;
    if visible_height == 0 {
        return;
    }

    // Keep the cursor on screen
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + visible_height {
        app.scroll_offset = app.cursor + 1 - visible_height;
    }

    let app = &*app;
    let tasks: Vec<&Task> = app.store.visible().collect();

    if tasks.is_empty() {
        let empty = Paragraph::new(" Your todo list is empty. Add a task to get started!")
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(empty, area);
        return;
    }

    let width = area.width as usize;
    let lines: Vec<Line> = tasks
        .into_iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible_height)
        .map(|(i, task)| task_line(app, task, i == app.cursor, width))
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

fn task_line<'a>(app: &'a App, task: &'a Task, is_cursor: bool, width: usize) -> Line<'a> {
    let bg = if is_cursor {
        app.theme.highlight
    } else {
        app.theme.background
    };

    let mut spans: Vec<Span> = Vec::new();
    spans.push(Span::styled(" ", Style::default().bg(bg)));

    // Checkbox
    let (check, check_style) = if task.is_completed {
        ("[x] ", Style::default().fg(app.theme.done).bg(bg))
    } else {
        ("[ ] ", Style::default().fg(app.theme.dim).bg(bg))
    };
    spans.push(Span::styled(check, check_style));

    // Right side: priority label, due date
    let mut right_spans: Vec<Span> = vec![Span::styled(
        task.priority.label(),
        Style::default()
            .fg(app.theme.priority_color(task.priority))
            .bg(bg),
    )];
    if let Some(due) = task.due_date {
        right_spans.push(Span::styled(
            format!("  {}", due.format("%-d %b %Y")),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }
    right_spans.push(Span::styled(" ", Style::default().bg(bg)));

    let left_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let right_width: usize = right_spans.iter().map(|s| s.content.chars().count()).sum();
    let text_avail = width.saturating_sub(left_width + right_width + 1);

    // Task text, or the inline edit draft for the task being edited
    let editing = app.mode == Mode::Edit && app.edit.as_ref().is_some_and(|e| e.id == task.id);
    if editing {
        if let Some(edit) = &app.edit {
            let (before, after) = edit.input.split_at_cursor();
            let style = Style::default().fg(app.theme.text_bright).bg(bg);
            spans.push(Span::styled(before, style));
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.accent).bg(bg),
            ));
            spans.push(Span::styled(after, style));
        }
    } else {
        let mut text_style = if is_cursor {
            Style::default().fg(app.theme.text_bright).bg(bg)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        if task.is_completed {
            text_style = Style::default()
                .fg(app.theme.done)
                .bg(bg)
                .add_modifier(Modifier::CROSSED_OUT);
        }
        spans.push(Span::styled(
            unicode::truncate_to_width(&task.text, text_avail),
            text_style,
        ));
    }

    // Pad so the right side lands on the right edge
    let content_width: usize = spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum();
    if content_width + right_width < width {
        spans.push(Span::styled(
            " ".repeat(width - content_width - right_width),
            Style::default().bg(bg),
        ));
    }
    spans.extend(right_spans);

    Line::from(spans)
}
