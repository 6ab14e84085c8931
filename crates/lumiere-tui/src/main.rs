//! Lumiere admin TUI
//!
//! Terminal user interface for managing the Lumiere skincare catalogue

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use lumiere_client::{HttpClient, Session};
use lumiere_core::{Config, CookieStore, Notifier};

mod action;
mod app;
mod columns;
mod event;
mod theme;
mod ui;
mod view;

use app::App;
use event::EventHandler;

/// Lumiere admin terminal UI
#[derive(Parser, Debug)]
#[command(name = "lumiere-tui", version, about)]
struct Args {
    /// Backend base URL (overrides the config file)
    #[arg(short, long)]
    server: Option<String>,

    /// Path to lumiere.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tick rate in milliseconds
    #[arg(long)]
    tick_rate: Option<u64>,

    /// Enable debug logging to file
    #[arg(long)]
    debug: bool,
}

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    // The terminal owns stdout, so logs only go to a file
    if args.debug {
        let file = std::fs::File::create("lumiere-tui.log")?;
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.ui.log_level));
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(file).with_ansi(false))
            .init();
    }

    let base_url = args.server.unwrap_or(config.api.base_url);
    let mut cookies = CookieStore::load(config.session.cookie_path())?;
    let session = cookies.token().map_or_else(Session::new, Session::with_token);
    let signed_in = session.is_authenticated();
    let client = HttpClient::new(&base_url, session)?;
    tracing::info!(%base_url, signed_in, "starting");

    let (notifier, notifications) = Notifier::channel();
    let mut app = App::new(Arc::new(client), &notifier, notifications, &base_url, signed_in);

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(args.tick_rate.unwrap_or(config.ui.tick_rate_ms));
    let result = run_app(&mut terminal, &mut app, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Run the application main loop
async fn run_app(terminal: &mut Tui, app: &mut App, tick_rate: Duration) -> Result<()> {
    let mut events = EventHandler::new(tick_rate);
    events.start();

    terminal.draw(|frame| ui::render(frame, app))?;
    app.start().await;

    loop {
        app.drain_notifications();
        terminal.draw(|frame| ui::render(frame, app))?;

        let Some(event) = events.next().await else {
            break;
        };
        let action = match event {
            event::Event::Key(key) => event::key_to_action(key, app.input_mode()),
            event::Event::Resize(_, _) => action::Action::Render,
            event::Event::Tick => action::Action::Tick,
        };
        app.handle_action(action).await?;

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
