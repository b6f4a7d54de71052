//! livescroll-news: browse NewsAPI headlines in the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//!                FeedEvent               watch<FeedState>
//! ┌──────────┐  (channel)  ┌──────────┐   (snapshot)   ┌──────────┐  draw()  ┌──────────┐
//! │ input.rs │ ──────────► │  feed/   │ ─────────────► │  app.rs  │ ───────► │  ui.rs   │
//! └──────────┘             │ (task)   │                └──────────┘          └──────────┘
//!                          └──────────┘
//!                               │ fetch_by_category / search_by_keyword
//!                          ┌──────────┐
//!                          │ source/  │ ── HTTPS ──► newsapi.org
//!                          └──────────┘
//! ```
//!
//! * **`source/`**: the `NewsSource` trait, `Article`, the `Resource`
//!   outcome type, and the NewsAPI client.
//! * **`feed/`**: the controller task: owns `FeedState`, debounces search,
//!   cancels superseded fetches.
//! * **`category`**: the fixed list of headline categories.
//! * **`config`**: flags, environment, `.env`.
//! * **`app`**: presentation state (snapshot, highlight, search buffer).
//! * **`ui`**: pure rendering: reads `App` state and draws widgets.
//! * **`input`**: maps key events to `App` changes and `FeedEvent`s.
//! * **`main`**: wires everything together: config, logging, runtime,
//!   terminal, and the event loop.

mod app;
mod category;
mod config;
mod feed;
mod input;
mod source;
mod ui;

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use app::App;
use config::Config;
use feed::FeedEvent;
use source::NewsApiClient;

// ---------------------------------------------------------------------------
// RAII terminal guard
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  Dropping
/// it (normally or during unwinding) restores the terminal.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Restore the terminal before printing a panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

/// Send `tracing` output to `path`, filtered by `RUST_LOG` (default
/// `info`).  Stdout belongs to the UI, so without a path nothing is logged.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // -- configuration and logging ------------------------------------------
    let config = Config::load();
    init_logging(config.log_file.as_deref())?;
    install_panic_hook();

    tracing::info!(
        base_url = %config.base_url,
        country = %config.country,
        debounce_ms = config.debounce_ms,
        "starting"
    );

    // -- feed controller on a background runtime ----------------------------
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    let source = NewsApiClient::new(
        config.base_url.clone(),
        config.api_key.as_str(),
        config.country.as_str(),
        config.timeout(),
    )?;
    let feed = {
        let _enter = runtime.enter();
        feed::spawn(Arc::new(source), config.quiet_period())
    };
    let mut updates = feed.subscribe();

    // First tab load, as if the user had selected it.
    let mut app = App::new();
    feed.send(FeedEvent::CategoryChanged(app.switch_category(config.category)));
    app.apply_snapshot(feed.snapshot());

    // -- terminal setup (RAII, Drop restores on exit or panic) ---------------
    let mut guard = TerminalGuard::new()?;

    // -- main event loop -----------------------------------------------------
    // ~10 fps.  Each iteration:
    //   1. Take the newest feed snapshot, if any.
    //   2. Render.
    //   3. Wait up to one tick for a key and forward the resulting event.
    let tick_rate = Duration::from_millis(100);

    loop {
        if updates.has_changed().unwrap_or(false) {
            app.apply_snapshot(updates.borrow_and_update().clone());
        }

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = input::handle_key_event(&mut app, key) {
                    feed.send(event);
                }
            }
        }

        if app.quit {
            break;
        }
    }

    drop(guard);
    drop(feed);
    runtime.shutdown_timeout(Duration::from_millis(500));
    tracing::info!("exiting");
    Ok(())
}
