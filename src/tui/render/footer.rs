use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{FILTERS, pluralize};
use crate::tui::app::App;

/// Render the footer: items-left count, filter tabs, clear hint. Blank
/// while the list is empty.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let counts = app.list.counts();

    if counts.total == 0 {
        frame.render_widget(
            Paragraph::new(Line::default()).style(Style::default().bg(bg)),
            area,
        );
        return;
    }

    let mut spans = vec![Span::styled(
        format!(
            " {} {} left",
            counts.active,
            pluralize(counts.active, "item")
        ),
        Style::default().fg(app.theme.text).bg(bg),
    )];

    spans.push(Span::styled(
        "   ",
        Style::default().bg(bg),
    ));
    for (i, filter) in FILTERS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(
                " \u{00B7} ",
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
        let style = if *filter == app.filter {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        spans.push(Span::styled(format!(" {} ", filter.label()), style));
    }

    if counts.completed > 0 {
        spans.push(Span::styled(
            format!("   {} done \u{00B7} c to clear", counts.completed),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Filter;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn test_footer_counts_and_tabs() {
        let app = app_with_tasks(vec![
            sample_task(3, "a", false),
            sample_task(2, "b", false),
            sample_task(1, "c", true),
        ]);
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_footer(frame, &app, area);
        });
        assert!(output.contains("2 items left"));
        assert!(output.contains("All"));
        assert!(output.contains("Active"));
        assert!(output.contains("Completed"));
        assert!(output.contains("1 done \u{00B7} c to clear"));
    }

    #[test]
    fn test_footer_singular_item() {
        let app = app_with_tasks(vec![sample_task(1, "only", false)]);
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_footer(frame, &app, area);
        });
        assert!(output.contains("1 item left"));
        assert!(!output.contains("1 items left"));
    }

    #[test]
    fn test_footer_blank_when_empty() {
        let app = app_with_tasks(vec![]);
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_footer(frame, &app, area);
        });
        assert_eq!(output, "");
    }

    #[test]
    fn test_no_clear_hint_without_completed() {
        let mut app = app_with_tasks(vec![sample_task(1, "only", false)]);
        app.set_filter(Filter::Active);
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_footer(frame, &app, area);
        });
        assert!(!output.contains("to clear"));
    }
}
