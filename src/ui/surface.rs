//! Render surface: the plan panel content as pre-wrapped styled lines.
//!
//! The same `RenderSurface` value is drawn on screen, copied as text and
//! rasterized for PDF export, so all three always agree.

use ratatui::buffer::Buffer;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget};

use super::gantt::gantt_lines;
use super::helpers::wrap_text;
use crate::models::PlanDocument;
use crate::theme::{
    ACCENT_PRIMARY, ACCENT_SECONDARY, BG_CARD, TEXT_MUTED, TEXT_PRIMARY, TEXT_SECONDARY,
};

/// Left margin in cells
const MARGIN: usize = 1;

/// Intro bullets shown before any plan exists: (bold lead, rest)
const OUTCOME: [(&str, &str); 4] = [
    ("Bold, clearly separated", "headings & subheadings for each PM phase."),
    ("Actionable bullets", "to aid decision-making."),
    ("Gantt-style visualization", "of the sprint timeline."),
    ("One-click PDF export", "including the chart."),
];

/// Snapshot of the plan panel at a fixed width
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSurface {
    pub lines: Vec<Line<'static>>,
    pub width: u16,
}

impl RenderSurface {
    pub fn height(&self) -> u16 {
        self.lines.len().min(u16::MAX as usize) as u16
    }

    /// Draw the surface into an off-screen buffer sized to its full content
    pub fn to_buffer(&self) -> Buffer {
        let area = Rect::new(0, 0, self.width, self.height());
        let mut buffer = Buffer::empty(area);
        Paragraph::new(self.lines.clone())
            .style(Style::default().fg(TEXT_PRIMARY).bg(BG_CARD))
            .render(area, &mut buffer);
        buffer
    }

    /// Visible text, one line per row, trailing blanks removed
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn heading(text: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw(" ".repeat(MARGIN)),
        Span::styled(
            text.to_string(),
            Style::default()
                .fg(ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

fn subheading(text: &str, indent: usize) -> Line<'static> {
    Line::from(vec![
        Span::raw(" ".repeat(MARGIN + indent)),
        Span::styled(
            text.to_string(),
            Style::default()
                .fg(ACCENT_SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

/// A bullet with an optional bold lead-in, wrapped with a hanging indent
fn bullet(lead: &str, text: &str, indent: usize, width: usize) -> Vec<Line<'static>> {
    let prefix = " ".repeat(MARGIN + indent);
    let available = width.saturating_sub(MARGIN + indent + 2).max(1);
    let full = if lead.is_empty() {
        text.to_string()
    } else {
        format!("{} {}", lead, text)
    };
    let lead_len = lead.chars().count();

    wrap_text(&full, available)
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let marker = if i == 0 { "• " } else { "  " };
            let mut spans = vec![
                Span::raw(prefix.clone()),
                Span::styled(marker, Style::default().fg(ACCENT_SECONDARY)),
            ];
            // A lead split across rows on very narrow panels is drawn plain
            if i == 0 && lead_len > 0 && row.starts_with(lead) {
                let rest: String = row.chars().skip(lead_len).collect();
                spans.push(Span::styled(
                    lead.to_string(),
                    Style::default()
                        .fg(TEXT_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled(rest, Style::default().fg(TEXT_SECONDARY)));
            } else {
                spans.push(Span::styled(row, Style::default().fg(TEXT_SECONDARY)));
            }
            Line::from(spans)
        })
        .collect()
}

/// "Label: value" rows with continuation lines aligned under the value
fn labeled(label: &str, value: &str, width: usize) -> Vec<Line<'static>> {
    let head = format!("{}: ", label);
    let head_len = head.chars().count();
    let available = width.saturating_sub(MARGIN + head_len).max(1);

    wrap_text(value, available)
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let lead = if i == 0 {
                Span::styled(
                    head.clone(),
                    Style::default()
                        .fg(TEXT_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(" ".repeat(head_len))
            };
            Line::from(vec![
                Span::raw(" ".repeat(MARGIN)),
                lead,
                Span::styled(row, Style::default().fg(TEXT_SECONDARY)),
            ])
        })
        .collect()
}

/// Build the surface for the current plan (or the intro view when `None`)
pub fn build(plan: Option<&PlanDocument>, width: u16) -> RenderSurface {
    let w = width as usize;
    let mut lines: Vec<Line<'static>> = Vec::new();

    lines.push(heading("Outcome"));
    for (lead, text) in OUTCOME {
        lines.extend(bullet(lead, text, 0, w));
    }

    if let Some(plan) = plan {
        lines.push(Line::default());
        lines.push(heading("Project Overview"));
        for (label, value) in plan.overview_rows() {
            lines.extend(labeled(label, &value, w));
        }

        for section in &plan.sections {
            lines.push(Line::default());
            lines.push(heading(&section.title));
            lines.push(subheading("Key Actions", 1));
            for text in &section.bullets {
                lines.extend(bullet("", text, 2, w));
            }
        }

        lines.push(Line::default());
        lines.push(heading("Gantt Timeline — Visual"));
        lines.push(Line::default());
        for row in gantt_lines(&plan.timeline, w.saturating_sub(MARGIN)) {
            let mut spans = vec![Span::raw(" ".repeat(MARGIN))];
            spans.extend(row.spans);
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(vec![
            Span::raw(" ".repeat(MARGIN)),
            Span::styled(
                "Units are in weeks (customizable).",
                Style::default().fg(TEXT_MUTED),
            ),
        ]));
    }

    lines.push(Line::default());

    RenderSurface { lines, width }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FormField, FormState};
    use crate::plan::assemble;

    #[test]
    fn test_intro_surface_without_plan() {
        let surface = build(None, 80);
        let text = surface.plain_text();
        assert!(text.contains("Outcome"));
        assert!(text.contains("One-click PDF export including the chart."));
        assert!(!text.contains("Project Overview"));
        assert!(!text.contains("Gantt Timeline"));
    }

    #[test]
    fn test_plan_surface_contains_every_section() {
        let plan = assemble(&FormState::example());
        let text = build(Some(&plan), 80).plain_text();
        assert!(text.contains("Project Name: Healthcare App Development"));
        assert!(text.contains("Timeline: 12 weeks"));
        for section in &plan.sections {
            assert!(text.contains(&section.title));
        }
        assert_eq!(text.matches("Key Actions").count(), 5);
        assert!(text.contains("Sprint 4"));
        assert!(text.contains("Units are in weeks"));
    }

    #[test]
    fn test_empty_fields_show_placeholder() {
        let plan = assemble(&FormState::default());
        let text = build(Some(&plan), 80).plain_text();
        assert!(text.contains("Project Name: —"));
        assert!(text.contains("Objectives: —"));
    }

    #[test]
    fn test_lines_fit_surface_width() {
        let plan = assemble(&FormState::example());
        let surface = build(Some(&plan), 40);
        for line in &surface.lines {
            let len: usize = line.spans.iter().map(|s| s.content.chars().count()).sum();
            assert!(len <= 40, "line too wide: {}", len);
        }
    }

    #[test]
    fn test_long_token_survives_capture_buffer() {
        let url = "https://intranet.example.com/projects/healthcare/onboarding-spec-v3";
        let form = FormState::example().with_field(FormField::Objectives, url);
        let plan = assemble(&form);
        let surface = build(Some(&plan), 46);

        for line in &surface.lines {
            let len: usize = line.spans.iter().map(|s| s.content.chars().count()).sum();
            assert!(len <= 46, "line too wide: {}", len);
        }

        let buffer = surface.to_buffer();
        let captured: String = buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
            .split_whitespace()
            .collect();
        assert!(captured.contains(url));
    }

    #[test]
    fn test_narrow_surface_still_wraps_values() {
        let plan = assemble(&FormState::example());
        let surface = build(Some(&plan), 8);
        let text = surface.plain_text();
        assert!(text.lines().count() > 40);
        assert!(surface.to_buffer().area.height == surface.height());
    }

    #[test]
    fn test_buffer_matches_surface_size() {
        let plan = assemble(&FormState::default());
        let surface = build(Some(&plan), 60);
        let buffer = surface.to_buffer();
        assert_eq!(buffer.area.width, 60);
        assert_eq!(buffer.area.height, surface.height());
        assert_eq!(buffer[(1, 0)].symbol(), "O");
    }
}
