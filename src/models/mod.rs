//! Data models for the PM assistant
//!
//! This module contains the core data structures:
//! - Form state and field metadata for the project-description form
//! - Sprint intervals produced by the timeline deriver
//! - The assembled plan document
//! - Enums for focus and export state

pub mod enums;
pub mod form;
pub mod plan;
pub mod sprint;

// Re-exports for convenient access
pub use enums::{ExportState, FieldKind};
pub use form::{FormField, FormState, METHODOLOGIES};
pub use plan::{PlanDocument, PlanSection, PLACEHOLDER};
pub use sprint::SprintInterval;
