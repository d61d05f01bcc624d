//! pm-assistant: turn a short project description into a structured project
//! plan with a sprint timeline, preview it in the terminal, copy it as text or
//! export it as a paginated PDF.

pub mod app;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod events;
pub mod export;
pub mod keymap;
pub mod models;
pub mod plan;
pub mod theme;
pub mod timeline;
pub mod ui;
