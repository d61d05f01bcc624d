//! Application state and core logic for the PM assistant.
//!
//! `App` owns the form, the generated plan and the mounted render surface.
//! Every user intent arrives as an `Action` and goes through `App::update`,
//! the single reducer. Work that leaves the process (export, clipboard) is
//! returned as an `Effect` for the runner to execute; its completion comes
//! back as another `Action`.

use tracing::{debug, info, warn};

use crate::export::ExportOutcome;
use crate::models::{
    form::next_methodology, ExportState, FieldKind, FormField, FormState, PlanDocument,
};
use crate::plan;
use crate::ui::RenderSurface;

/// User intents and completions fed to the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    FieldChanged { field: FormField, value: String },
    FocusNext,
    FocusPrev,
    InsertChar(char),
    DeleteChar,
    ClearField,
    CycleChoice,
    LoadExample,
    Generate,
    Export,
    ExportFinished(Result<ExportOutcome, String>),
    CopyText,
    CopyFinished(Result<usize, String>),
    ScrollPlan(i32),
    Quit,
}

/// Side effects requested by the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Export {
        surface: Option<RenderSurface>,
        filename: String,
    },
    CopyText(String),
}

/// Severity of the footer status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

impl StatusMessage {
    fn new(level: StatusLevel, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }
}

/// Application state
pub struct App {
    pub form: FormState,
    // None until the first Generate
    pub plan: Option<PlanDocument>,
    pub focus: FormField,
    // Last surface drawn in the plan panel; None until the first frame
    pub surface: Option<RenderSurface>,
    pub plan_scroll: u16,
    pub export_state: ExportState,
    pub status: Option<StatusMessage>,
    pub filename: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(form: FormState, filename: impl Into<String>) -> Self {
        Self {
            form,
            plan: None,
            focus: FormField::ProjectName,
            surface: None,
            plan_scroll: 0,
            export_state: ExportState::Idle,
            status: None,
            filename: filename.into(),
            should_quit: false,
        }
    }

    /// Record the surface the plan panel just drew
    pub fn mount_surface(&mut self, surface: RenderSurface) {
        let max_scroll = surface.height().saturating_sub(1);
        self.plan_scroll = self.plan_scroll.min(max_scroll);
        self.surface = Some(surface);
    }

    pub fn has_plan(&self) -> bool {
        self.plan.is_some()
    }

    /// The reducer
    pub fn update(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::FieldChanged { field, value } => {
                self.form = self.form.with_field(field, value);
                None
            }
            Action::FocusNext => {
                self.focus = self.focus.next();
                None
            }
            Action::FocusPrev => {
                self.focus = self.focus.prev();
                None
            }
            Action::InsertChar(c) => {
                if !self.focus.kind().accepts(c) {
                    return None;
                }
                let mut value = self.form.get(self.focus).to_string();
                value.push(c);
                self.update(Action::FieldChanged {
                    field: self.focus,
                    value,
                })
            }
            Action::DeleteChar => {
                if self.focus.kind() == FieldKind::Choice {
                    return None;
                }
                let mut value = self.form.get(self.focus).to_string();
                value.pop();
                self.update(Action::FieldChanged {
                    field: self.focus,
                    value,
                })
            }
            Action::ClearField => {
                if self.focus.kind() == FieldKind::Choice {
                    return None;
                }
                self.update(Action::FieldChanged {
                    field: self.focus,
                    value: String::new(),
                })
            }
            Action::CycleChoice => {
                if self.focus.kind() != FieldKind::Choice {
                    return None;
                }
                let value = next_methodology(self.form.get(self.focus)).to_string();
                self.update(Action::FieldChanged {
                    field: self.focus,
                    value,
                })
            }
            Action::LoadExample => {
                self.form = FormState::example();
                self.status = Some(StatusMessage::new(StatusLevel::Info, "Example loaded"));
                debug!("example preset loaded");
                None
            }
            Action::Generate => {
                let plan = plan::assemble(&self.form);
                info!(
                    sections = plan.sections.len(),
                    bullets = plan.bullet_count(),
                    sprints = plan.timeline.len(),
                    "plan generated"
                );
                self.status = Some(StatusMessage::new(
                    StatusLevel::Success,
                    format!(
                        "Plan generated: {} sections, {} actions, {} sprints",
                        plan.sections.len(),
                        plan.bullet_count(),
                        plan.timeline.len()
                    ),
                ));
                self.plan = Some(plan);
                self.plan_scroll = 0;
                None
            }
            Action::Export => {
                if self.export_state == ExportState::InFlight {
                    debug!("export trigger ignored while in flight");
                    return None;
                }
                self.export_state = ExportState::InFlight;
                self.status = Some(StatusMessage::new(StatusLevel::Info, "Exporting..."));
                Some(Effect::Export {
                    surface: self.surface.clone(),
                    filename: self.filename.clone(),
                })
            }
            Action::ExportFinished(result) => {
                self.export_state = ExportState::Idle;
                self.status = match result {
                    Ok(ExportOutcome::Saved { path, pages }) => Some(StatusMessage::new(
                        StatusLevel::Success,
                        format!(
                            "Saved {} ({} {})",
                            path.display(),
                            pages,
                            if pages == 1 { "page" } else { "pages" }
                        ),
                    )),
                    // A missing surface or a concurrent run is not an error
                    Ok(ExportOutcome::Skipped) | Ok(ExportOutcome::Busy) => None,
                    Err(message) => {
                        warn!(error = %message, "export failed");
                        Some(StatusMessage::new(
                            StatusLevel::Error,
                            format!("Export failed: {}", message),
                        ))
                    }
                };
                None
            }
            Action::CopyText => self
                .surface
                .as_ref()
                .map(|surface| Effect::CopyText(surface.plain_text())),
            Action::CopyFinished(result) => {
                self.status = Some(match result {
                    Ok(lines) => {
                        StatusMessage::new(StatusLevel::Success, format!("Copied {} lines", lines))
                    }
                    Err(_) => StatusMessage::new(StatusLevel::Warning, "Clipboard unavailable"),
                });
                None
            }
            Action::ScrollPlan(delta) => {
                let max_scroll = self
                    .surface
                    .as_ref()
                    .map(|s| s.height().saturating_sub(1))
                    .unwrap_or(0);
                let next = (self.plan_scroll as i32 + delta).clamp(0, max_scroll as i32);
                self.plan_scroll = next as u16;
                None
            }
            Action::Quit => {
                self.should_quit = true;
                None
            }
        }
    }
}
