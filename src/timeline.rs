//! Sprint timeline derivation.
//!
//! Splits a total number of weeks into roughly four sprints. Rounding is
//! half away from zero (`f64::round`): 10 weeks gives a sprint length of 3.
//!
//! Sprint length and count are rounded independently, so the raw partition
//! can stop short of the total (10 weeks → 3 + 3 + 3). The last interval is
//! always stretched or clamped to end exactly at the total.

use crate::models::SprintInterval;

/// Weeks used when the input is empty, non-numeric or below one
pub const DEFAULT_WEEKS: u32 = 8;

/// Number of sprints the partition aims for
const TARGET_SPRINTS: f64 = 4.0;

/// Coerce typed timeline text to a positive number of weeks
pub fn coerce_weeks(text: &str) -> u32 {
    let Ok(value) = text.trim().parse::<f64>() else {
        return DEFAULT_WEEKS;
    };
    if !value.is_finite() {
        return DEFAULT_WEEKS;
    }
    let rounded = value.round();
    if rounded < 1.0 {
        return DEFAULT_WEEKS;
    }
    if rounded > u32::MAX as f64 {
        return u32::MAX;
    }
    rounded as u32
}

/// Partition `weeks` into contiguous sprint intervals covering `[0, weeks]`
pub fn derive_sprints(weeks: u32) -> Vec<SprintInterval> {
    let weeks = if weeks == 0 { DEFAULT_WEEKS } else { weeks };
    let sprint_len = ((weeks as f64 / TARGET_SPRINTS).round() as u32).max(1);
    // round(w / len) <= w / len + 0.5, so the last start is always below `weeks`
    let count = ((weeks as f64 / sprint_len as f64).round() as u32).max(1);

    let mut sprints: Vec<SprintInterval> = (0..count)
        .map(|i| {
            let start = i * sprint_len;
            let end = weeks.min(start.saturating_add(sprint_len));
            SprintInterval::new(i as usize, start, end)
        })
        .collect();

    if let Some(last) = sprints.last_mut() {
        if last.end != weeks {
            *last = SprintInterval::new(count as usize - 1, last.start, weeks);
        }
    }

    sprints
}

/// Derive directly from typed text
pub fn derive_from_text(text: &str) -> Vec<SprintInterval> {
    derive_sprints(coerce_weeks(text))
}

/// Short live hint such as "4 sprints × 3 weeks"
pub fn summarize(sprints: &[SprintInterval]) -> String {
    let Some(first) = sprints.first() else {
        return String::new();
    };
    let total = sprints.last().map(|s| s.end).unwrap_or(0);
    let noun = if sprints.len() == 1 { "sprint" } else { "sprints" };
    let uneven = sprints.iter().any(|s| s.duration != first.duration);
    if uneven {
        format!(
            "{} {} × ~{} ({} total)",
            sprints.len(),
            noun,
            weeks_label(first.duration),
            total
        )
    } else {
        format!("{} {} × {}", sprints.len(), noun, weeks_label(first.duration))
    }
}

fn weeks_label(n: u32) -> String {
    if n == 1 {
        "1 week".to_string()
    } else {
        format!("{} weeks", n)
    }
}
