use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Filter;
use crate::tui::app::App;
use crate::util::unicode::{display_width, snippet, truncate_to_width};

/// Render the task list with cursor and scrolling.
pub fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = area.height as usize;
    if rows == 0 {
        return;
    }

    // Keep the cursor on screen
    let len = app.visible().len();
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + rows {
        app.scroll_offset = app.cursor + 1 - rows;
    }
    if app.scroll_offset > len.saturating_sub(1) {
        app.scroll_offset = len.saturating_sub(1);
    }

    let bg = app.theme.background;
    let visible = app.visible();

    if visible.is_empty() {
        let message = if app.loading && app.list.is_empty() {
            "Loading issues\u{2026}".to_string()
        } else if app.list.is_empty() {
            "No tasks yet \u{2014} press n to add one".to_string()
        } else {
            match app.filter {
                Filter::Active => "Nothing active".to_string(),
                Filter::Completed => "Nothing completed".to_string(),
                Filter::All => String::new(),
            }
        };
        let lines = vec![
            Line::default(),
            Line::from(Span::styled(
                format!("   {}", message),
                Style::default().fg(app.theme.dim).bg(bg),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
        return;
    }

    let width = area.width as usize;
    let mut lines: Vec<Line> = Vec::new();
    for (row, task) in visible
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(rows)
    {
        let selected = row == app.cursor;
        let row_bg = if selected { app.theme.selection_bg } else { bg };

        let marker = if selected { "\u{258C}" } else { " " };
        let checkbox = if task.completed { "[x]" } else { "[ ]" };
        let checkbox_style = if task.completed {
            Style::default().fg(app.theme.green).bg(row_bg)
        } else {
            Style::default().fg(app.theme.dim).bg(row_bg)
        };
        let mut title_style = Style::default().fg(app.theme.text).bg(row_bg);
        if task.completed {
            title_style = Style::default()
                .fg(app.theme.dim)
                .bg(row_bg)
                .add_modifier(Modifier::CROSSED_OUT);
        } else if selected {
            title_style = Style::default().fg(app.theme.text_bright).bg(row_bg);
        }

        let number = format!("#{:<4}", task.number);
        let date = task.created_at.format("%b %d").to_string();

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(app.theme.highlight).bg(row_bg)),
            Span::styled(format!("{} ", checkbox), checkbox_style),
            Span::styled(
                format!("{} ", number),
                Style::default().fg(app.theme.dim).bg(row_bg),
            ),
        ];
        let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        // Leave room for the date column plus two cells of gap
        let text_budget = width.saturating_sub(used + date.len() + 2);
        let title = truncate_to_width(&task.title, text_budget);
        let title_w = display_width(&title);
        spans.push(Span::styled(title, title_style));

        // Body snippet in the leftover space
        let mut filled = used + title_w;
        let snippet_budget = width.saturating_sub(filled + date.len() + 4);
        if !task.body.is_empty() && snippet_budget > 3 {
            let text = snippet(&task.body, snippet_budget);
            if !text.is_empty() {
                let shown = format!("  {}", text);
                filled += display_width(&shown);
                spans.push(Span::styled(
                    shown,
                    Style::default().fg(app.theme.dim).bg(row_bg),
                ));
            }
        }

        // Right-aligned opened date
        if width > filled + date.len() {
            let padding = width - filled - date.len();
            spans.push(Span::styled(
                " ".repeat(padding),
                Style::default().bg(row_bg),
            ));
            spans.push(Span::styled(
                date,
                Style::default().fg(app.theme.dim).bg(row_bg),
            ));
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
