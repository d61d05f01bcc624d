//! UI module for pm-assistant
//!
//! This module contains the rendering functions for the TUI: the form panel,
//! the plan render surface with its Gantt chart, and the top-level layout.

mod form;
mod gantt;
mod helpers;
mod render;
pub mod surface;

pub use gantt::{bar_bounds, gantt_lines};
pub use helpers::{truncate, wrap_text};
pub use render::draw;
pub use surface::{build, RenderSurface};
