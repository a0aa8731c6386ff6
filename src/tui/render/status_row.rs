use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;

/// Render the status row (bottom of screen): sync state or last error on
/// the left, key hints on the right.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    if let Some(ref error) = app.last_error {
        spans.push(Span::styled(
            format!(" {}", error),
            Style::default().fg(app.theme.red).bg(bg),
        ));
    } else if app.pending_count() > 0 {
        spans.push(Span::styled(
            format!(" syncing {}\u{2026}", app.pending_count()),
            Style::default().fg(app.theme.yellow).bg(bg),
        ));
    }

    let hint = if app.config.ui.show_key_hints {
        match app.mode {
            Mode::Navigate => "n new  space toggle  e edit  c clear  r reload  ? help  q quit ",
            Mode::New | Mode::Edit => "Enter save  Tab field  Esc cancel ",
            Mode::ConfirmClear => "close all completed issues? y confirm  Esc cancel ",
        }
    } else {
        ""
    };

    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
    }
    spans.push(Span::styled(
        hint,
        Style::default().fg(app.theme.dim).bg(bg),
    ));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn test_error_is_shown() {
        let mut app = app_with_tasks(vec![]);
        app.last_error = Some("sync failed: 401 Unauthorized".into());
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.contains("sync failed: 401 Unauthorized"));
    }

    #[test]
    fn test_navigate_hints() {
        let app = app_with_tasks(vec![]);
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.contains("n new"));
        assert!(output.contains("q quit"));
    }

    #[test]
    fn test_confirm_prompt() {
        let mut app = app_with_tasks(vec![]);
        app.mode = Mode::ConfirmClear;
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.contains("close all completed issues?"));
    }

    #[test]
    fn test_hints_can_be_disabled() {
        let mut app = app_with_tasks(vec![]);
        app.config.ui.show_key_hints = false;
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(!output.contains("q quit"));
    }
}
