//! Terminal lifecycle, event loop, and cleanup for the chat TUI.

mod actions;
mod app;
mod completion;
mod config;
mod events;
mod session;
mod state;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, EnvFilter};

use app::App;
use completion::OpenAiClient;
use config::Config;
use events::{key_to_action, TICK_RATE};

fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config)?;

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let client = OpenAiClient::new(&config).context("failed to build HTTP client")?;
    info!(endpoint = %config.endpoint, model = client.model(), "starting");
    let mut app = App::new(Arc::new(client), runtime.handle().clone(), config.model.clone());

    // Set up the terminal in raw / alternate-screen mode.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, DisableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.show_cursor()?;

    let result = run_loop(&mut terminal, &mut app);

    // Always restore the terminal, even on error.
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    if app.state.session.is_awaiting() {
        warn!(pending = app.state.session.pending(), "exiting with requests still in flight");
    }
    info!(exchanges = app.state.session.history().len(), "exiting");
    result
}

/// Logs go to `GPT_TUI_LOG_FILE` when set; the terminal itself belongs to the UI.
fn init_tracing(config: &Config) -> Result<()> {
    let writer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::sink),
    };

    // RUST_LOG controls the filter.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("gpt_tui=info".parse()?))
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(())
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.tick = app.tick.wrapping_add(1);
        app.poll_results();

        if app.should_quit {
            return Ok(());
        }

        let tick = app.tick;
        terminal.draw(|frame| {
            ui::fit_scroll(frame.area(), app);
            ui::render(frame, app, tick);
        })?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = key_to_action(&key) {
                    app.dispatch(action);
                    if app.should_quit {
                        return Ok(());
                    }
                }
            }
        }
    }
}
