pub mod form;
pub mod header;
pub mod status_row;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode};

/// Height of the add form area, including its bottom margin.
const FORM_HEIGHT: u16 = 4;

/// Draw one frame.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Whole-screen fill behind every pane
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | add form (Add mode only) | list | status row
    let form_height = if app.mode == Mode::Add { FORM_HEIGHT } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),           // title + separator
            Constraint::Length(form_height), // add form
            Constraint::Min(1),              // task list
            Constraint::Length(1),           // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    if app.mode == Mode::Add {
        form::render_add_form(frame, app, chunks[1]);
    }
    task_list::render_task_list(frame, app, chunks[2]);
    status_row::render_status_row(frame, app, chunks[3]);
}
