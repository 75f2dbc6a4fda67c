use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::persist::Persistence;
use crate::model::Priority;
use crate::store::TaskStore;
use crate::tui::app::App;
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return its text, styles dropped.
///
/// Rows are right-trimmed and trailing blank rows removed, so assertions
/// do not depend on the terminal size.
pub fn render_to_string<F>(width: u16, height: u16, draw: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            draw(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer();
    let mut rows: Vec<String> = (0..buf.area.height)
        .map(|y| {
            let row: String = (0..buf.area.width)
                .filter_map(|x| buf.cell((x, y)))
                .map(|cell| cell.symbol())
                .collect();
            row.trim_end().to_string()
        })
        .collect();
    while rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }
    rows.join("\n")
}

/// An app over in-memory storage with no tasks.
pub fn empty_app() -> App {
    App::new(TaskStore::load(Persistence::in_memory()), Theme::default())
}

/// An app whose visible list reads top-to-bottom as `texts`.
pub fn app_with_tasks(texts: &[&str]) -> App {
    let mut store = TaskStore::load(Persistence::in_memory());
    for text in texts.iter().rev() {
        store.add(text, Priority::Medium, None).unwrap();
    }
    App::new(store, Theme::default())
}
