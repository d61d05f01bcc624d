//! Plan document data structures

use super::form::{FormField, FormState};
use super::sprint::SprintInterval;

/// Shown in place of any empty overview value
pub const PLACEHOLDER: &str = "—";

/// One phase section of the plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSection {
    pub title: String,
    pub bullets: Vec<String>,
}

/// The generated plan: a form snapshot, the fixed phase sections and the
/// timeline derived from the snapshot at generation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDocument {
    pub overview: FormState,
    pub sections: Vec<PlanSection>,
    pub timeline: Vec<SprintInterval>,
}

impl PlanDocument {
    /// Overview rows as (label, display value)
    pub fn overview_rows(&self) -> Vec<(&'static str, String)> {
        FormField::ALL
            .iter()
            .map(|field| {
                let raw = self.overview.get(*field).trim();
                let value = match (raw.is_empty(), field) {
                    (true, FormField::TimelineWeeks) => format!("{} weeks", PLACEHOLDER),
                    (true, _) => PLACEHOLDER.to_string(),
                    (false, FormField::TimelineWeeks) => format!("{} weeks", raw),
                    (false, _) => raw.to_string(),
                };
                let label = match field {
                    FormField::TimelineWeeks => "Timeline",
                    other => other.label(),
                };
                (label, value)
            })
            .collect()
    }

    /// Total bullet count across all sections
    pub fn bullet_count(&self) -> usize {
        self.sections.iter().map(|s| s.bullets.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_for(form: FormState) -> PlanDocument {
        PlanDocument {
            overview: form,
            sections: Vec::new(),
            timeline: Vec::new(),
        }
    }

    #[test]
    fn test_overview_rows_placeholder() {
        let plan = plan_for(FormState::default());
        let rows = plan.overview_rows();
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0], ("Project Name", PLACEHOLDER.to_string()));
        assert_eq!(rows[1], ("Domain", "Software".to_string()));
        assert_eq!(rows[3], ("Timeline", "8 weeks".to_string()));
    }

    #[test]
    fn test_overview_rows_empty_weeks() {
        let plan = plan_for(FormState::default().with_field(FormField::TimelineWeeks, ""));
        let rows = plan.overview_rows();
        assert_eq!(rows[3].1, "— weeks");
    }

    #[test]
    fn test_overview_rows_whitespace_is_empty() {
        let plan = plan_for(FormState::default().with_field(FormField::Risks, "   "));
        assert_eq!(plan.overview_rows()[6], ("Risks", PLACEHOLDER.to_string()));
    }
}
