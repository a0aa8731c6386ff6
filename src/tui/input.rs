use crossterm::event::{KeyCode, KeyEvent};

use crate::model::Filter;

use super::app::{App, EntryField, EntryForm, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Help overlay intercepts all input
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::New | Mode::Edit => handle_entry(app, key),
        Mode::ConfirmClear => handle_confirm(app, key),
    }
}

fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        // Movement
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.visible().len().saturating_sub(1);
        }

        // Filters
        KeyCode::Char('1') => app.set_filter(Filter::All),
        KeyCode::Char('2') => app.set_filter(Filter::Active),
        KeyCode::Char('3') => app.set_filter(Filter::Completed),
        KeyCode::Tab => cycle_filter(app),

        // Mutations
        KeyCode::Char(' ') | KeyCode::Char('x') => app.toggle_selected(),
        KeyCode::Char('a') => app.toggle_all(),
        KeyCode::Char('n') => {
            app.entry = EntryForm::default();
            app.mode = Mode::New;
        }
        KeyCode::Char('e') | KeyCode::Enter => start_edit(app),
        KeyCode::Char('c') => {
            if app.list.counts().completed > 0 {
                app.mode = Mode::ConfirmClear;
            }
        }
        KeyCode::Char('r') => app.reload(),

        KeyCode::Esc => app.last_error = None,
        _ => {}
    }
}

fn handle_entry(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.entry = EntryForm::default();
            app.mode = Mode::Navigate;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.entry.field = match app.entry.field {
                EntryField::Title => EntryField::Body,
                EntryField::Body => EntryField::Title,
            };
        }
        KeyCode::Enter => submit_entry(app),
        KeyCode::Backspace => {
            let field = focused_field(app);
            field.pop();
        }
        KeyCode::Char(c) => {
            focused_field(app).push(c);
        }
        _ => {}
    }
}

fn handle_confirm(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.clear_completed();
            app.mode = Mode::Navigate;
        }
        _ => app.mode = Mode::Navigate,
    }
}

fn focused_field(app: &mut App) -> &mut String {
    match app.entry.field {
        EntryField::Title => &mut app.entry.title,
        EntryField::Body => &mut app.entry.body,
    }
}

fn submit_entry(app: &mut App) {
    let form = app.entry.clone();
    match app.mode {
        Mode::New => {
            // Blank title: stay in the form, nothing is created
            if form.title.trim().is_empty() {
                return;
            }
            app.create_task(&form.title, &form.body);
        }
        Mode::Edit => {
            if let Some(number) = form.editing {
                app.submit_edit(number, &form.title, &form.body);
            }
        }
        _ => {}
    }
    app.entry = EntryForm::default();
    app.mode = Mode::Navigate;
}

fn start_edit(app: &mut App) {
    let Some(number) = app.selected_number() else {
        return;
    };
    let Some(task) = app.list.get(number) else {
        return;
    };
    app.entry = EntryForm {
        title: task.title.clone(),
        body: task.body.clone(),
        field: EntryField::Title,
        editing: Some(number),
    };
    app.mode = Mode::Edit;
}

fn move_cursor(app: &mut App, delta: isize) {
    let len = app.visible().len();
    if len == 0 {
        return;
    }
    let max = len - 1;
    let next = app.cursor as isize + delta;
    app.cursor = next.clamp(0, max as isize) as usize;
}

fn cycle_filter(app: &mut App) {
    let next = match app.filter {
        Filter::All => Filter::Active,
        Filter::Active => Filter::Completed,
        Filter::Completed => Filter::All,
    };
    app.set_filter(next);
}
