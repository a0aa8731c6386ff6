use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::{config_dir, read_config};
use crate::io::token::obtain_token;
use crate::model::{Config, Filter, Mutation, Task, TodoList};
use crate::remote::{IssueClient, SyncCommand, SyncEvent, SyncWorker};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Creating a task in the entry form
    New,
    /// Editing the selected task in the entry form
    Edit,
    /// Confirming clear-completed
    ConfirmClear,
}

/// Which entry form field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Title,
    Body,
}

/// The two-field form used by New and Edit modes
#[derive(Debug, Clone)]
pub struct EntryForm {
    pub title: String,
    pub body: String,
    pub field: EntryField,
    /// Task number being edited (None while creating)
    pub editing: Option<u64>,
}

impl Default for EntryForm {
    fn default() -> Self {
        EntryForm {
            title: String::new(),
            body: String::new(),
            field: EntryField::Title,
            editing: None,
        }
    }
}

/// What an in-flight command will need when its event comes back.
#[derive(Debug)]
enum PendingOp {
    /// Create has no optimistic change to undo
    Create,
    /// Optimistic toggle/edit, rolled back on failure
    Mutate(Mutation),
    /// A task removed by clear-completed, reinserted on failure
    Clear { index: usize, task: Task },
}

/// Main application state
pub struct App {
    pub config: Config,
    pub list: TodoList,
    pub filter: Filter,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Cursor index into the filtered view
    pub cursor: usize,
    /// First visible row of the list view
    pub scroll_offset: usize,
    pub entry: EntryForm,
    /// True between a Load dispatch and its Loaded/LoadFailed event
    pub loading: bool,
    pub last_error: Option<String>,
    pub show_help: bool,
    worker: SyncWorker,
    pending: HashMap<u64, PendingOp>,
    next_seq: u64,
}

impl App {
    pub fn new(config: Config, worker: SyncWorker) -> Self {
        let theme = Theme::from_config(&config.ui);
        App {
            config,
            list: TodoList::new(),
            filter: Filter::All,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            cursor: 0,
            scroll_offset: 0,
            entry: EntryForm::default(),
            loading: false,
            last_error: None,
            show_help: false,
            worker,
            pending: HashMap::new(),
            next_seq: 0,
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Tasks visible under the current filter
    pub fn visible(&self) -> Vec<&Task> {
        self.list.filtered(self.filter)
    }

    pub fn selected_number(&self) -> Option<u64> {
        self.visible().get(self.cursor).map(|t| t.number)
    }

    /// Count of commands still waiting for their event
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    // --- intents ---------------------------------------------------------

    /// Ask the worker for a fresh snapshot.
    pub fn reload(&mut self) {
        self.loading = true;
        self.worker.send(SyncCommand::Load);
    }

    /// Create a task. A blank title is a no-op: nothing is inserted and no
    /// command is dispatched.
    pub fn create_task(&mut self, title: &str, body: &str) {
        let title = title.trim().to_string();
        if title.is_empty() {
            return;
        }
        let body = body.trim().to_string();
        let seq = self.next_seq();
        self.pending.insert(seq, PendingOp::Create);
        self.worker.send(SyncCommand::Create { seq, title, body });
    }

    /// Flip the selected task, optimistically, and sync the issue state.
    pub fn toggle_selected(&mut self) {
        let Some(number) = self.selected_number() else {
            return;
        };
        self.toggle_task(number);
    }

    pub fn toggle_task(&mut self, number: u64) {
        let Some(mutation) = self.list.toggle(number) else {
            return;
        };
        let completed = self
            .list
            .get(number)
            .map(|t| t.completed)
            .unwrap_or_default();
        let seq = self.next_seq();
        self.pending.insert(seq, PendingOp::Mutate(mutation));
        self.worker.send(SyncCommand::SetState {
            seq,
            number,
            completed,
        });
        self.clamp_cursor();
    }

    /// Mark everything completed, or everything active when the whole
    /// list is already completed. One state command per changed task.
    pub fn toggle_all(&mut self) {
        let target = !self.list.iter().all(|t| t.completed);
        for mutation in self.list.set_all(target) {
            let number = mutation.number();
            let seq = self.next_seq();
            self.pending.insert(seq, PendingOp::Mutate(mutation));
            self.worker.send(SyncCommand::SetState {
                seq,
                number,
                completed: target,
            });
        }
        self.clamp_cursor();
    }

    /// Apply the entry form to the task being edited. A form with both
    /// fields blank (or no effective change) dispatches nothing.
    pub fn submit_edit(&mut self, number: u64, title: &str, body: &str) {
        let Some(mutation) = self.list.edit(number, title, body) else {
            return;
        };
        let (new_title, new_body) = match self.list.get(number) {
            Some(t) => (t.title.clone(), t.body.clone()),
            None => return,
        };
        let seq = self.next_seq();
        self.pending.insert(seq, PendingOp::Mutate(mutation));
        self.worker.send(SyncCommand::Edit {
            seq,
            number,
            title: new_title,
            body: new_body,
        });
    }

    /// Remove the completed subset and close each removed issue.
    pub fn clear_completed(&mut self) {
        let batch = self.list.clear_completed();
        for (index, task) in batch.removed {
            let number = task.number;
            let seq = self.next_seq();
            self.pending.insert(seq, PendingOp::Clear { index, task });
            self.worker.send(SyncCommand::SetState {
                seq,
                number,
                completed: true,
            });
        }
        self.clamp_cursor();
    }

    // --- effects ---------------------------------------------------------

    /// Drain the worker channel and merge each event.
    pub fn apply_pending_events(&mut self) {
        for event in self.worker.poll() {
            self.apply_sync_event(event);
        }
    }

    pub fn apply_sync_event(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::Loaded { tasks } => {
                self.list.replace_all(tasks);
                self.loading = false;
                self.last_error = None;
            }
            SyncEvent::LoadFailed { error } => {
                self.loading = false;
                self.last_error = Some(format!("load failed: {}", error));
            }
            SyncEvent::Created { seq, task } => {
                self.pending.remove(&seq);
                self.list.insert_created(task);
            }
            SyncEvent::CreateFailed { seq, error } => {
                self.pending.remove(&seq);
                self.last_error = Some(format!("create failed: {}", error));
            }
            SyncEvent::Updated { seq, task } => {
                match self.pending.remove(&seq) {
                    // A cleared task stays gone; the close is confirmed
                    Some(PendingOp::Clear { .. }) => {}
                    _ => self.list.merge_remote(task),
                }
            }
            SyncEvent::UpdateFailed { seq, error } => {
                match self.pending.remove(&seq) {
                    Some(PendingOp::Mutate(mutation)) => self.list.rollback(mutation),
                    Some(PendingOp::Clear { index, task }) => {
                        self.list.restore_cleared(index, task)
                    }
                    _ => {}
                }
                self.last_error = Some(format!("sync failed: {}", error));
            }
        }
        self.clamp_cursor();
    }
}

/// Run the TUI application
pub fn run(config_dir_override: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let dir = config_dir(config_dir_override)?;
    let config = read_config(&dir)?;
    crate::logging::init(&dir);

    // Prompt (if needed) before the terminal goes raw
    let token = obtain_token(&dir)?;
    let client = IssueClient::new(&config, token)?;
    let worker = SyncWorker::start(client);

    let mut app = App::new(config, worker);
    app.reload();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
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
        app.apply_pending_events();

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
