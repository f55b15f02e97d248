//! flixtui - Netflix-style terminal browser
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! flixtui
//!
//! # Light theme, faster search
//! flixtui --theme light --debounce-ms 250
//! ```

use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use flixtui::api::{ImageUrls, TmdbClient};
use flixtui::app::{App, AppEvent, AppSettings};
use flixtui::cli::Cli;
use flixtui::config::Config;
use flixtui::loader::Loader;
use flixtui::logging;
use flixtui::models::Catalog;
use flixtui::ui::{self, theme::detect_terminal_scheme, Theme};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Redraw interval when nothing else is due
const TICK_RATE: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_path = logging::init(cli.log_file.clone(), cli.verbose)?;

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    cli.apply_to(&mut config);
    tracing::info!(log = %log_path.display(), theme = %config.theme, "Starting flixtui");

    if !config.tmdb.has_credentials() {
        tracing::warn!("No TMDB credentials configured; remote rows will stay empty");
    }

    let theme = Theme::from_mode(config.theme, detect_terminal_scheme());
    let client = Arc::new(TmdbClient::from_settings(&config.tmdb));
    let app = App::new(
        AppSettings::from_config(&config),
        theme,
        Arc::new(Catalog::builtin()),
    )
    .with_images(ImageUrls::from_settings(&config.tmdb));

    run_tui(app, client).await
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(mut app: App, client: Arc<TmdbClient>) -> Result<()> {
    let mut terminal = init_terminal()?;

    let (tx, rx) = mpsc::unbounded_channel();
    let loader = Loader::new(client, tx);

    let result = run_event_loop(&mut terminal, &mut app, &loader, rx).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Event loop failed");
    }
    result
}

/// Main event loop - handles input, async results and debounce timers
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    loader: &Loader,
    mut events: mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    // Anything queued before the first frame
    for request in app.take_requests() {
        loader.dispatch(request);
    }

    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Completed loads
        while let Ok(event) = events.try_recv() {
            app.apply(event);
        }

        // Wake up no later than the next debounce deadline
        let timeout = app
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .map_or(TICK_RATE, |until| until.min(TICK_RATE));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        app.on_tick(Instant::now());

        for request in app.take_requests() {
            tracing::debug!(?request, "Dispatching");
            loader.dispatch(request);
        }
    }

    tracing::info!("Exiting");
    Ok(())
}
