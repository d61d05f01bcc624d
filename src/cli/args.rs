//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// AI Project Management Assistant - turn a project description into a plan
#[derive(Debug, Parser)]
#[command(
    name = "pm-assistant",
    version = VERSION,
    about = "Turn a short project description into a structured plan with a Gantt timeline",
    after_help = "Logs are written to: ~/.local/share/pm-assistant/logs/pm-assistant.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Start with the example project loaded
    #[arg(short, long, conflicts_with = "preset")]
    pub example: bool,

    /// Start from a form saved as JSON
    #[arg(short, long, value_name = "FORM.json")]
    pub preset: Option<PathBuf>,

    /// Directory the PDF is written to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// PDF file name
    #[arg(short, long)]
    pub filename: Option<String>,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(name) = &self.filename {
            config.filename = name.clone();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "pm-assistant",
            "--example",
            "-o",
            "/tmp/out",
            "--filename",
            "plan.pdf",
            "-v",
        ]);
        assert!(cli.example);
        assert!(cli.verbose);
        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(cli.filename.as_deref(), Some("plan.pdf"));
    }

    #[test]
    fn test_example_conflicts_with_preset() {
        let result = Cli::try_parse_from(["pm-assistant", "--example", "--preset", "form.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_win_over_config() {
        let cli = Cli::parse_from(["pm-assistant", "--filename", "mine.pdf"]);
        let config = cli.apply(Config::default());
        assert_eq!(config.filename, "mine.pdf");
        assert_eq!(config.capture_scale, 2);
    }
}
