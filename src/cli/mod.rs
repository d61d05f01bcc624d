//! CLI argument parsing for pm-assistant.

mod args;

pub use args::{Cli, VERSION};
