use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, EntryField, Mode};

/// Render the header region: the repo line in Navigate mode, or the
/// two-field entry form while creating/editing. The last row is always a
/// separator line.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let mut lines: Vec<Line> = Vec::new();

    match app.mode {
        Mode::New | Mode::Edit => {
            let caption = match (app.mode, app.entry.editing) {
                (Mode::Edit, Some(number)) => format!(" Edit #{}", number),
                _ => " New task".to_string(),
            };
            lines.push(Line::from(Span::styled(
                caption,
                Style::default()
                    .fg(app.theme.highlight)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(field_line(app, EntryField::Title, "Title", &app.entry.title));
            lines.push(field_line(app, EntryField::Body, "Body ", &app.entry.body));
        }
        _ => {
            let mut spans = vec![
                Span::styled(" \u{25B8} ", Style::default().fg(app.theme.highlight).bg(bg)),
                Span::styled(
                    "punchlist",
                    Style::default()
                        .fg(app.theme.text_bright)
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", app.config.repo.slug()),
                    Style::default().fg(app.theme.dim).bg(bg),
                ),
            ];
            if app.loading {
                spans.push(Span::styled(
                    "  loading\u{2026}",
                    Style::default().fg(app.theme.yellow).bg(bg),
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    lines.push(Line::from(Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}

fn field_line<'a>(app: &App, field: EntryField, label: &'a str, value: &'a str) -> Line<'a> {
    let bg = app.theme.background;
    let focused = app.entry.field == field;
    let label_style = if focused {
        Style::default().fg(app.theme.text_bright).bg(bg)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };
    let mut spans = vec![
        Span::styled(format!("   {}: ", label), label_style),
        Span::styled(
            value.to_string(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ),
    ];
    if focused {
        // ▌ cursor at end of the focused field
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }
    Line::from(spans)
}
