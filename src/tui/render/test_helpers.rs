use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{Config, Task};
use crate::remote::SyncWorker;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

pub fn sample_task(number: u64, title: &str, completed: bool) -> Task {
    let mut t = Task::new(number, title, "");
    t.completed = completed;
    t
}

/// Build an App over a detached worker (commands go nowhere).
pub fn app_with_tasks(tasks: Vec<Task>) -> App {
    let (worker, _cmd_rx, _evt_tx) = SyncWorker::loopback();
    let mut app = App::new(Config::new("wildcatz", "TodoMVC"), worker);
    app.list.replace_all(tasks);
    app
}
