//! Project-description form state
//!
//! `FormState` is the only input to plan generation. It is replaced as a whole
//! on every edit so readers never observe a half-applied change.

use serde::Deserialize;
use std::io;
use std::path::Path;

use super::enums::FieldKind;

/// Methodology options offered by the methodology selector
pub const METHODOLOGIES: [&str; 4] = ["Agile (Scrum)", "Kanban", "Waterfall", "Hybrid"];

/// Snapshot of every form input.
///
/// `timeline_weeks` keeps the raw typed text; it is coerced to a number only
/// where a number is needed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    pub project_name: String,
    pub domain: String,
    pub methodology: String,
    #[serde(deserialize_with = "weeks_from_number_or_string")]
    pub timeline_weeks: String,
    pub objectives: String,
    pub stakeholders: String,
    pub risks: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            domain: "Software".to_string(),
            methodology: METHODOLOGIES[0].to_string(),
            timeline_weeks: "8".to_string(),
            objectives: String::new(),
            stakeholders: String::new(),
            risks: String::new(),
        }
    }
}

impl FormState {
    /// The "Load Example" preset
    pub fn example() -> Self {
        Self {
            project_name: "Healthcare App Development".to_string(),
            domain: "Healthcare".to_string(),
            methodology: "Agile (Scrum)".to_string(),
            timeline_weeks: "12".to_string(),
            objectives:
                "Secure patient onboarding, appointment booking, e-prescriptions, HIPAA compliance."
                    .to_string(),
            stakeholders:
                "Product Owner, CTO, Lead Engineer, QA Lead, Compliance Officer, Pilot Clinic"
                    .to_string(),
            risks:
                "Regulatory delays, data privacy breaches, third-party API downtime, scope creep."
                    .to_string(),
        }
    }

    /// Load a form preset from a JSON file
    pub fn load(path: &Path) -> io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Current value of a field
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::ProjectName => &self.project_name,
            FormField::Domain => &self.domain,
            FormField::Methodology => &self.methodology,
            FormField::TimelineWeeks => &self.timeline_weeks,
            FormField::Objectives => &self.objectives,
            FormField::Stakeholders => &self.stakeholders,
            FormField::Risks => &self.risks,
        }
    }

    /// Return a new state with one field replaced
    pub fn with_field(&self, field: FormField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            FormField::ProjectName => next.project_name = value,
            FormField::Domain => next.domain = value,
            FormField::Methodology => next.methodology = value,
            FormField::TimelineWeeks => next.timeline_weeks = value,
            FormField::Objectives => next.objectives = value,
            FormField::Stakeholders => next.stakeholders = value,
            FormField::Risks => next.risks = value,
        }
        next
    }
}

/// Form fields in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    ProjectName,
    Domain,
    Methodology,
    TimelineWeeks,
    Objectives,
    Stakeholders,
    Risks,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::ProjectName,
        FormField::Domain,
        FormField::Methodology,
        FormField::TimelineWeeks,
        FormField::Objectives,
        FormField::Stakeholders,
        FormField::Risks,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::ProjectName => "Project Name",
            FormField::Domain => "Domain",
            FormField::Methodology => "Methodology",
            FormField::TimelineWeeks => "Timeline (weeks)",
            FormField::Objectives => "Objectives",
            FormField::Stakeholders => "Stakeholders",
            FormField::Risks => "Risks",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::ProjectName => "e.g., AI-Powered Support Bot",
            FormField::Domain => "e.g., FinTech, Healthcare",
            FormField::Methodology => "",
            FormField::TimelineWeeks => "8",
            FormField::Objectives => "What outcomes do you want?",
            FormField::Stakeholders => "Who is involved/impacted?",
            FormField::Risks => "Top risks & assumptions",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FormField::ProjectName | FormField::Domain => FieldKind::Text,
            FormField::Methodology => FieldKind::Choice,
            FormField::TimelineWeeks => FieldKind::Number,
            FormField::Objectives | FormField::Stakeholders | FormField::Risks => {
                FieldKind::TextArea
            }
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    /// Next field in focus order (wraps)
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous field in focus order (wraps)
    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Next methodology after `current`; unknown values restart at the first option
pub fn next_methodology(current: &str) -> &'static str {
    match METHODOLOGIES.iter().position(|m| *m == current) {
        Some(i) => METHODOLOGIES[(i + 1) % METHODOLOGIES.len()],
        None => METHODOLOGIES[0],
    }
}

// Presets written by hand use either `"timelineWeeks": 12` or `"timelineWeeks": "12"`
fn weeks_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct WeeksVisitor;

    impl<'de> Visitor<'de> for WeeksVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a number of weeks or a string")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(WeeksVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_form() {
        let form = FormState::default();
        assert_eq!(form.project_name, "");
        assert_eq!(form.domain, "Software");
        assert_eq!(form.methodology, "Agile (Scrum)");
        assert_eq!(form.timeline_weeks, "8");
    }

    #[test]
    fn test_example_preset() {
        let form = FormState::example();
        assert_eq!(form.project_name, "Healthcare App Development");
        assert_eq!(form.timeline_weeks, "12");
        assert!(form.risks.contains("scope creep"));
    }

    #[test]
    fn test_with_field_leaves_original_untouched() {
        let form = FormState::default();
        let next = form.with_field(FormField::ProjectName, "Billing");
        assert_eq!(form.project_name, "");
        assert_eq!(next.project_name, "Billing");
        assert_eq!(next.get(FormField::Domain), "Software");
    }

    #[test]
    fn test_focus_order_wraps() {
        assert_eq!(FormField::Risks.next(), FormField::ProjectName);
        assert_eq!(FormField::ProjectName.prev(), FormField::Risks);
        assert_eq!(FormField::Domain.next(), FormField::Methodology);
    }

    #[test]
    fn test_next_methodology_cycles() {
        assert_eq!(next_methodology("Agile (Scrum)"), "Kanban");
        assert_eq!(next_methodology("Hybrid"), "Agile (Scrum)");
        assert_eq!(next_methodology("Lean"), "Agile (Scrum)");
    }

    fn create_temp_preset(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_numeric_weeks() {
        let file = create_temp_preset(
            r#"{"projectName": "Bot", "timelineWeeks": 10, "risks": "none"}"#,
        );
        let form = FormState::load(file.path()).unwrap();
        assert_eq!(form.project_name, "Bot");
        assert_eq!(form.timeline_weeks, "10");
        // Missing keys fall back to defaults
        assert_eq!(form.domain, "Software");
    }

    #[test]
    fn test_load_string_weeks() {
        let file = create_temp_preset(r#"{"timelineWeeks": "six"}"#);
        let form = FormState::load(file.path()).unwrap();
        assert_eq!(form.timeline_weeks, "six");
    }

    #[test]
    fn test_load_invalid_json() {
        let file = create_temp_preset("{ not json }");
        let result = FormState::load(file.path());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_load_missing_file() {
        let result = FormState::load(Path::new("/nonexistent/form.json"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }
}
