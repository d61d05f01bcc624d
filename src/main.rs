use std::fs;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use eyre::{Context, Result};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::{info, warn};

use pm_assistant::app::{Action, App, Effect};
use pm_assistant::cli::Cli;
use pm_assistant::clipboard::{copy_lines, SystemClipboard};
use pm_assistant::config::Config;
use pm_assistant::events::{Event, EventHandler};
use pm_assistant::export::ExportPipeline;
use pm_assistant::keymap::action_for_key;
use pm_assistant::models::FormState;
use pm_assistant::ui;

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pm-assistant")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Write to a log file; the terminal belongs to the UI
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file =
        fs::File::create(log_dir.join("pm-assistant.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

/// Form the session starts from
fn initial_form(cli: &Cli) -> Result<FormState> {
    if cli.example {
        return Ok(FormState::example());
    }
    match &cli.preset {
        Some(path) => FormState::load(path)
            .context(format!("Failed to load preset from {}", path.display())),
        None => Ok(FormState::default()),
    }
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config =
        Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let config = cli.apply(config);
    info!(
        "pm-assistant starting: output_dir={}, filename={}",
        config.output_dir.display(),
        config.filename
    );

    let form = initial_form(&cli)?;
    let mut app = App::new(form, config.filename.clone());
    let pipeline = ExportPipeline::pdf(config.capture_options(), config.output_dir.clone());

    let mut terminal = init_terminal()?;
    let result = run(
        &mut terminal,
        &mut app,
        pipeline,
        Duration::from_millis(config.tick_rate_ms),
    )
    .await;
    restore_terminal()?;

    info!("pm-assistant exiting");
    result
}

async fn run(
    terminal: &mut Tui,
    app: &mut App,
    pipeline: ExportPipeline,
    tick_rate: Duration,
) -> Result<()> {
    let mut events = EventHandler::new(tick_rate);
    // Completions of background work come back as actions
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Action>();
    let mut clipboard = SystemClipboard::new();

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        let action = tokio::select! {
            event = events.next() => match event? {
                Event::Key(key) => action_for_key(key, app.focus),
                Event::Resize(..) | Event::Tick => None,
            },
            Some(action) = done_rx.recv() => Some(action),
        };

        if let Some(effect) = action.and_then(|action| app.update(action)) {
            match effect {
                Effect::Export { surface, filename } => {
                    let pipeline = pipeline.clone();
                    let tx = done_tx.clone();
                    tokio::spawn(async move {
                        let result = pipeline
                            .export(surface, &filename)
                            .await
                            .map_err(|e| e.to_string());
                        let _ = tx.send(Action::ExportFinished(result));
                    });
                }
                Effect::CopyText(text) => {
                    let result = copy_lines(&mut clipboard, &text).map_err(|e| {
                        warn!(error = %e, "copy failed");
                        e.to_string()
                    });
                    app.update(Action::CopyFinished(result));
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
