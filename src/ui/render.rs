//! Top-level frame layout: header, form and plan panels, footer bar

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::form::render_form;
use super::helpers::truncate;
use super::surface;
use crate::app::{App, StatusLevel};
use crate::models::ExportState;
use crate::theme::{
    ACCENT_PRIMARY, ACCENT_SECONDARY, AMBER_WARNING, BG_CARD, BG_PRIMARY, BORDER_SUBTLE,
    GREEN_SUCCESS, RED_ERROR, TEXT_MUTED, TEXT_PRIMARY, TEXT_SECONDARY,
};

const BADGES: [&str; 3] = ["Structured", "Gantt", "PDF"];

/// Draw the whole UI and mount the plan surface on `app`
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(BG_PRIMARY)), area);

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(3),    // Panels
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_header(frame, main_layout[0]);

    // 40% form, 60% plan
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_layout[1]);

    render_form(frame, panels[0], app);
    render_plan(frame, panels[1], app);
    render_footer(frame, main_layout[2], app);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let mut title = vec![
        Span::styled(
            " PM ",
            Style::default()
                .fg(BG_PRIMARY)
                .bg(ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " AI Project Management Assistant ",
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    for badge in BADGES {
        title.push(Span::raw(" "));
        title.push(Span::styled(
            format!("[{}]", badge),
            Style::default().fg(ACCENT_SECONDARY),
        ));
    }

    let header = Paragraph::new(vec![
        Line::from(title),
        Line::from(Span::styled(
            " Describe your project, generate a structured plan, export it as a PDF.",
            Style::default().fg(TEXT_MUTED),
        )),
    ]);
    frame.render_widget(header, area);
}

fn render_plan(frame: &mut Frame, area: Rect, app: &mut App) {
    let title = if app.has_plan() {
        " Generated Plan "
    } else {
        " Plan Preview "
    };
    let block = Block::default()
        .title(Span::styled(
            title,
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

    // The surface is rebuilt at the panel width every frame and mounted for
    // export and copy
    let surface = surface::build(app.plan.as_ref(), inner.width);
    let paragraph = Paragraph::new(surface.lines.clone())
        .style(Style::default().fg(TEXT_PRIMARY).bg(BG_CARD))
        .scroll((app.plan_scroll, 0));
    frame.render_widget(paragraph, inner);
    app.mount_surface(surface);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let export_label = app.export_state.label();
    let export_style = match app.export_state {
        ExportState::Idle => Style::default().fg(BG_PRIMARY).bg(ACCENT_SECONDARY),
        ExportState::InFlight => Style::default().fg(BG_PRIMARY).bg(AMBER_WARNING),
    };

    let keys = format!(
        " Tab: Next | F2: Example | F5: Generate | F6: Copy | F9: {} | Esc: Quit ",
        export_label
    );
    let mut spans = vec![Span::styled(keys.clone(), export_style)];

    if let Some(status) = &app.status {
        let color = match status.level {
            StatusLevel::Info => TEXT_SECONDARY,
            StatusLevel::Success => GREEN_SUCCESS,
            StatusLevel::Warning => AMBER_WARNING,
            StatusLevel::Error => RED_ERROR,
        };
        let room = (area.width as usize).saturating_sub(keys.chars().count() + 1);
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            truncate(&status.text, room),
            Style::default().fg(color),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
