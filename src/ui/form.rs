//! Project description form panel

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{FieldKind, FormField};
use crate::theme::{
    ACCENT_PRIMARY, ACCENT_SECONDARY, BG_CARD, BG_FOCUS, BORDER_SUBTLE, TEXT_MUTED, TEXT_PRIMARY,
    TEXT_SECONDARY,
};
use crate::timeline;

const CURSOR: &str = "▏";

/// Rows a field box takes, borders included
fn field_height(field: FormField) -> u16 {
    match field.kind() {
        FieldKind::TextArea => 4,
        _ => 3,
    }
}

/// Rows of a text value cut at `width` chars.
///
/// A focused field keeps its last `rows` rows with the cursor at the end, so
/// typing never runs out of view; an unfocused one shows its first rows.
fn value_lines(value: &str, width: usize, rows: usize, focused: bool) -> Vec<Line<'static>> {
    let width = width.max(1);
    let chars: Vec<char> = value.chars().collect();
    let mut text_rows: Vec<String> = chars.chunks(width).map(|c| c.iter().collect()).collect();
    // The cursor needs a free cell on the last row
    if focused && text_rows.last().is_none_or(|r| r.chars().count() == width) {
        text_rows.push(String::new());
    }

    let rows = rows.max(1);
    let skip = if focused {
        text_rows.len().saturating_sub(rows)
    } else {
        0
    };
    let last = text_rows.len().saturating_sub(1);

    text_rows
        .into_iter()
        .enumerate()
        .skip(skip)
        .take(rows)
        .map(|(i, row)| {
            let mut spans = vec![Span::styled(row, Style::default().fg(TEXT_PRIMARY))];
            if focused && i == last {
                spans.push(Span::styled(CURSOR, Style::default().fg(ACCENT_PRIMARY)));
            }
            Line::from(spans)
        })
        .collect()
}

/// Content lines for one field inside a box `width` cells wide and `rows` tall
fn field_content(app: &App, field: FormField, width: usize, rows: usize) -> Vec<Line<'static>> {
    let value = app.form.get(field).to_string();
    let focused = app.focus == field;

    match field.kind() {
        FieldKind::Choice => {
            let arrow = if focused { ACCENT_PRIMARY } else { TEXT_MUTED };
            vec![Line::from(vec![
                Span::styled("◀ ", Style::default().fg(arrow)),
                Span::styled(value, Style::default().fg(TEXT_PRIMARY)),
                Span::styled(" ▶", Style::default().fg(arrow)),
            ])]
        }
        FieldKind::Text | FieldKind::TextArea if !value.is_empty() => {
            value_lines(&value, width, rows, focused)
        }
        _ => {
            let mut spans = if value.is_empty() {
                vec![Span::styled(
                    field.placeholder().to_string(),
                    Style::default().fg(TEXT_MUTED),
                )]
            } else {
                vec![Span::styled(value.clone(), Style::default().fg(TEXT_PRIMARY))]
            };
            if focused {
                // Cursor goes before the placeholder so the hint stays readable
                let at = if value.is_empty() { 0 } else { spans.len() };
                spans.insert(at, Span::styled(CURSOR, Style::default().fg(ACCENT_PRIMARY)));
            }

            if field.kind() == FieldKind::Number {
                let hint = timeline::summarize(&timeline::derive_from_text(&value));
                spans.push(Span::styled(
                    format!("  → {}", hint),
                    Style::default().fg(TEXT_MUTED),
                ));
            }
            vec![Line::from(spans)]
        }
    }
}

/// Render the form fields and the tip below them
pub fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(Span::styled(
            " Project Details ",
            Style::default()
                .fg(ACCENT_SECONDARY)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_SUBTLE))
        .style(Style::default().bg(BG_CARD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = FormField::ALL
        .iter()
        .map(|f| Constraint::Length(field_height(*f)))
        .collect();
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (field, row) in FormField::ALL.iter().zip(rows.iter()) {
        let focused = app.focus == *field;
        let (border, bg) = if focused {
            (ACCENT_PRIMARY, BG_FOCUS)
        } else {
            (BORDER_SUBTLE, BG_CARD)
        };
        let field_block = Block::default()
            .title(Span::styled(
                format!(" {} ", field.label()),
                Style::default().fg(if focused { TEXT_PRIMARY } else { TEXT_SECONDARY }),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(bg));

        let inner = field_block.inner(*row);
        let content = field_content(app, *field, inner.width as usize, inner.height as usize);
        let paragraph = Paragraph::new(content).block(field_block);
        frame.render_widget(paragraph, *row);
    }

    if let Some(tip_area) = rows.last() {
        let tip = Paragraph::new(vec![
            Line::default(),
            Line::from(Span::styled(
                " Tip: F2 loads an example project, F5 builds the plan.",
                Style::default().fg(TEXT_MUTED),
            )),
        ])
        .wrap(Wrap { trim: true });
        frame.render_widget(tip, *tip_area);
    }
}
