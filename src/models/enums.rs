//! Enums used throughout the PM assistant
//!
//! This module contains the small enum types used for state management
//! and UI rendering.

/// How a form field is edited and drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line input
    Text,
    /// Wrapped multi-line input
    TextArea,
    /// Cycles through a fixed option list
    Choice,
    /// Digits only, coerced on use
    Number,
}

impl FieldKind {
    /// Whether typed characters are accepted for this kind
    pub fn accepts(&self, c: char) -> bool {
        match self {
            FieldKind::Text | FieldKind::TextArea => !c.is_control(),
            FieldKind::Choice => false,
            FieldKind::Number => c.is_ascii_digit() || c == '.',
        }
    }
}

/// Export trigger state shown in the footer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportState {
    #[default]
    Idle,
    InFlight, // Trigger disabled until the running export settles
}

impl ExportState {
    pub fn label(&self) -> &'static str {
        match self {
            ExportState::Idle => "Download PDF",
            ExportState::InFlight => "Exporting...",
        }
    }
}
