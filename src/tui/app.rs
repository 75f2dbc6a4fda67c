use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use uuid::Uuid;

use crate::io::config_io;
use crate::io::persist::Persistence;
use crate::io::storage::default_data_dir;
use crate::model::Priority;
use crate::store::TaskStore;

use super::input;
use super::input::line::LineEdit;
use super::render;
use super::theme::Theme;

/// How long a status message stays up before the tick loop drops it.
pub const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Input mode the next keypress is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Add,
    Edit,
    Confirm,
}

/// Which field of the add form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddField {
    #[default]
    Text,
    DueDate,
    Priority,
}

impl AddField {
    pub fn next(self) -> AddField {
        match self {
            AddField::Text => AddField::DueDate,
            AddField::DueDate => AddField::Priority,
            AddField::Priority => AddField::Text,
        }
    }

    pub fn prev(self) -> AddField {
        match self {
            AddField::Text => AddField::Priority,
            AddField::DueDate => AddField::Text,
            AddField::Priority => AddField::DueDate,
        }
    }
}

/// Staged draft for the add form. Discarded on cancel, cleared on success.
#[derive(Debug, Default)]
pub struct AddForm {
    pub text: LineEdit,
    pub due_date: LineEdit,
    pub priority: Priority,
    pub focus: AddField,
}

/// Inline edit of one task's text. Only one task is editable at a time.
#[derive(Debug)]
pub struct EditState {
    pub id: Uuid,
    pub input: LineEdit,
}

/// Action awaiting a y/n answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteTask { id: Uuid },
}

#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub action: ConfirmAction,
    pub message: String,
}

/// How a status message is styled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// A transient status-row message
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub since: Instant,
}

/// Top-level TUI state.
pub struct App {
    pub store: TaskStore,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Cursor index into the visible task list
    pub cursor: usize,
    /// First visible row of the task list
    pub scroll_offset: usize,
    /// Present in Add mode
    pub add_form: Option<AddForm>,
    /// Present in Edit mode
    pub edit: Option<EditState>,
    /// Present in Confirm mode
    pub confirm: Option<ConfirmState>,
    pub status_message: Option<StatusMessage>,
}

impl App {
    pub fn new(store: TaskStore, theme: Theme) -> Self {
        App {
            store,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            cursor: 0,
            scroll_offset: 0,
            add_form: None,
            edit: None,
            confirm: None,
            status_message: None,
        }
    }

    pub fn visible_len(&self) -> usize {
        self.store.visible().count()
    }

    /// The id of the task under the cursor, if any.
    pub fn cursor_task_id(&self) -> Option<Uuid> {
        self.store.visible().nth(self.cursor).map(|t| t.id)
    }

    /// Keep the cursor inside the visible list after it shrinks.
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            kind: StatusKind::Info,
            since: Instant::now(),
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            kind: StatusKind::Error,
            since: Instant::now(),
        });
    }

    /// Per-frame upkeep: expire the status message and adopt changes other
    /// instances wrote to the storage area.
    pub fn tick(&mut self) {
        if let Some(msg) = &self.status_message
            && msg.since.elapsed() >= STATUS_MESSAGE_TTL
        {
            self.status_message = None;
        }
        if self.store.sync() {
            self.clamp_cursor();
        }
    }
}

/// Start the TUI and block until the user quits.
pub fn run(data_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let dir = match data_dir {
        Some(d) => PathBuf::from(d),
        None => default_data_dir(),
    };

    let persist = Persistence::open_dir(&dir)?;
    let mut store = TaskStore::load(persist);
    if let Err(e) = store.watch() {
        // The app still works without sync; changes land on next start
        eprintln!("warning: cross-instance sync unavailable: {}", e);
    }

    let config = config_io::read_config(&dir).unwrap_or_default();
    let theme = Theme::from_config(&config.ui);
    let mut app = App::new(store, theme);

    // Raw mode + alternate screen
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal before any panic output prints
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    app.store.unwatch();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.tick();

        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
