//! Gantt-style timeline rendering
//!
//! Each sprint is one row: an invisible spacer span as wide as the sprint's
//! start, then a visible bar span as wide as its duration. Both are scaled by
//! the same factor so bars abut exactly where one sprint ends and the next
//! begins.

use ratatui::prelude::*;

use crate::models::SprintInterval;
use crate::theme::{BORDER_SUBTLE, GANTT_BAR, GANTT_LABEL, TEXT_MUTED, TEXT_SECONDARY};

/// Width of the sprint-name column, including its trailing gap
const LABEL_WIDTH: usize = 10;

/// Minimum gap between axis tick labels
const TICK_SPACING: usize = 6;

/// Column where week `week` lands on a chart `chart_width` cells wide
fn column(week: u32, total: u32, chart_width: usize) -> usize {
    if total == 0 {
        return 0;
    }
    ((week as f64 * chart_width as f64) / total as f64).round() as usize
}

/// Span bounds `(offset, length)` for one sprint, in cells
pub fn bar_bounds(sprint: &SprintInterval, total: u32, chart_width: usize) -> (usize, usize) {
    let x0 = column(sprint.start, total, chart_width).min(chart_width.saturating_sub(1));
    let x1 = column(sprint.end, total, chart_width).min(chart_width);
    (x0, x1.saturating_sub(x0).max(1))
}

/// Bar text with the duration right-aligned inside it, when it fits
fn bar_text(duration: u32, length: usize) -> (String, String) {
    let label = duration.to_string();
    let label_len = label.chars().count();
    if label_len < length {
        ("█".repeat(length - label_len), label)
    } else {
        ("█".repeat(length), String::new())
    }
}

/// Render the chart rows for `sprints` in input order, followed by an axis
pub fn gantt_lines(sprints: &[SprintInterval], width: usize) -> Vec<Line<'static>> {
    let total = sprints.iter().map(|s| s.end).max().unwrap_or(0);
    // label column + axis glyph + one cell of right padding
    let chart_width = width.saturating_sub(LABEL_WIDTH + 2).max(1);
    let mut lines = Vec::with_capacity(sprints.len() + 2);

    for sprint in sprints {
        let (offset, length) = bar_bounds(sprint, total, chart_width);
        let (bar, label) = bar_text(sprint.duration, length);
        let name: String = sprint.name.chars().take(LABEL_WIDTH - 1).collect();

        let mut spans = vec![
            Span::styled(
                format!("{:<w$}", name, w = LABEL_WIDTH),
                Style::default().fg(TEXT_SECONDARY),
            ),
            Span::styled("│", Style::default().fg(BORDER_SUBTLE)),
            // Spacer: occupies the offset, draws nothing
            Span::raw(" ".repeat(offset)),
            Span::styled(bar, Style::default().fg(GANTT_BAR)),
        ];
        if !label.is_empty() {
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(GANTT_LABEL)
                    .bg(GANTT_BAR)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(vec![
        Span::raw(" ".repeat(LABEL_WIDTH)),
        Span::styled(
            format!("└{}", "─".repeat(chart_width)),
            Style::default().fg(BORDER_SUBTLE),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::raw(" ".repeat(LABEL_WIDTH)),
        Span::styled(axis_ticks(total, chart_width), Style::default().fg(TEXT_MUTED)),
    ]));

    lines
}

/// Week numbers under the axis, skipping any that would collide
fn axis_ticks(total: u32, chart_width: usize) -> String {
    let mut row = vec![' '; chart_width + 1];
    if total == 0 {
        return String::new();
    }

    let max_ticks = (chart_width / TICK_SPACING).max(1) as u32;
    let step = total.div_ceil(max_ticks).max(1);
    let mut next_free = 0usize;

    let mut weeks: Vec<u32> = (0..=total).step_by(step as usize).collect();
    if weeks.last() != Some(&total) {
        weeks.push(total);
    }

    for week in weeks {
        let label: Vec<char> = week.to_string().chars().collect();
        let pos = column(week, total, chart_width);
        // Keep the label inside the row; the last one right-aligns at the end
        let start = pos.min(row.len().saturating_sub(label.len()));
        if start < next_free {
            continue;
        }
        for (i, c) in label.iter().enumerate() {
            row[start + i] = *c;
        }
        next_free = start + label.len() + 1;
    }

    row.into_iter().collect::<String>().trim_end().to_string()
}
