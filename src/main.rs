use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;

use mcu_dash::app::{App, LoadState};
use mcu_dash::config::Config;
use mcu_dash::error::AppResult;
use mcu_dash::models::{Production, SortBy};
use mcu_dash::source::{self, DemoSource, FileSource, HttpSource, ProductionSource};
use mcu_dash::store::{FileBackend, WatchedStore};
use mcu_dash::ui;

#[derive(Parser, Debug)]
#[command(name = "mcu-dash")]
#[command(about = "Terminal dashboard for MCU productions and watch progress")]
#[command(version)]
struct Args {
    /// URL serving the production dataset (overrides MCU_DATA_URL)
    #[arg(long)]
    data_url: Option<String>,

    /// Local JSON dataset file (overrides MCU_DATA_PATH)
    #[arg(long)]
    data_path: Option<String>,

    /// Directory for the watched-state file (overrides MCU_STORE_DIR)
    #[arg(long)]
    store_dir: Option<String>,

    /// Use the built-in sample dataset (no network or files required)
    #[arg(long, short)]
    demo: bool,

    /// Start sorted by release order instead of chronological order
    #[arg(long)]
    release_order: bool,
}

/// How a session ended: for good, or to be rebuilt from scratch
enum Outcome {
    Quit,
    Restart,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(url) = args.data_url.clone() {
        config.data_url = url;
    }
    if let Some(path) = args.data_path.clone() {
        config.data_path = Some(path);
    }
    if let Some(dir) = args.store_dir.clone() {
        config.store_dir = dir;
    }

    init_tracing(&config)?;

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, &config, &args).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

/// Logs go to a file: the TUI owns the terminal
fn init_tracing(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn make_source(config: &Config, args: &Args) -> Box<dyn ProductionSource> {
    if args.demo {
        Box::new(DemoSource)
    } else if let Some(path) = &config.data_path {
        Box::new(FileSource::new(path))
    } else {
        Box::new(HttpSource::new(config.data_url.clone()))
    }
}

/// Runs sessions until the user quits
///
/// A retry from the failed screen tears the session down and rebuilds it,
/// store hydration and fetch included, mirroring a full page reload.
async fn run<B: Backend>(terminal: &mut Terminal<B>, config: &Config, args: &Args) -> Result<()> {
    loop {
        match run_session(terminal, config, args).await? {
            Outcome::Quit => return Ok(()),
            Outcome::Restart => continue,
        }
    }
}

async fn run_session<B: Backend>(
    terminal: &mut Terminal<B>,
    config: &Config,
    args: &Args,
) -> Result<Outcome> {
    let store = WatchedStore::open(Box::new(FileBackend::new(&config.store_dir)));
    let sort_by = if args.release_order {
        SortBy::Release
    } else {
        SortBy::Chronology
    };
    let mut app = App::new(store, sort_by);

    // The single suspension point: one fetch, result delivered over a
    // oneshot channel polled by the event loop. Quitting mid-fetch drops
    // the receiver and the task's send becomes a no-op.
    let source = make_source(config, args);
    let (tx, mut rx) = oneshot::channel::<AppResult<Vec<Production>>>();
    tokio::spawn(async move {
        let result = source::load_catalog(source.as_ref()).await;
        let _ = tx.send(result);
    });

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(Outcome::Quit),
                        KeyCode::Char('r') if matches!(app.load, LoadState::Failed(_)) => {
                            return Ok(Outcome::Restart);
                        }
                        KeyCode::Char('c') => app.set_sort(SortBy::Chronology),
                        KeyCode::Char('r') => app.set_sort(SortBy::Release),
                        KeyCode::Char(' ') => app.toggle_selected(),
                        KeyCode::Enter => app.toggle_expanded(),
                        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
                        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                        _ => {}
                    }
                }
            }
        }

        if app.load == LoadState::Loading {
            match rx.try_recv() {
                Ok(Ok(productions)) => app.on_loaded(productions),
                Ok(Err(e)) => {
                    tracing::error!(error = %e, "catalog fetch failed");
                    app.on_failed(e.to_string());
                }
                Err(oneshot::error::TryRecvError::Empty) => {}
                Err(oneshot::error::TryRecvError::Closed) => {
                    app.on_failed("dataset fetch task stopped unexpectedly".to_string());
                }
            }
        }
    }
}
