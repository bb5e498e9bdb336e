use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, MouseEventKind};
use crossterm::execute;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use limitview::action::Action;
use limitview::app::App;
use limitview::config::{self, load_config, load_config_from_path};
use limitview::event::{Event, EventHandler};
use limitview::system::collector::Collector;
use limitview::ui;

#[derive(Parser)]
#[command(
    name = "limitview",
    about = "TUI viewer for OS and process resource limits"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Theme: dark, light
    #[arg(long)]
    theme: Option<String>,

    /// Color support: auto, 256, truecolor, mono
    #[arg(long)]
    color: Option<String>,

    /// Write tracing output to this file (stderr belongs to the TUI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }
    let config = load_config_for_cli(&cli);

    let mut terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(std::io::stdout(), DisableMouseCapture);
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config).await;

    execute!(stdout(), DisableMouseCapture)?;
    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: config::Config) -> Result<()> {
    let mut app = App::new(config);
    let mut events = EventHandler::new();

    terminal.draw(|frame| ui::draw(frame, &mut app))?;

    while app.running {
        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if key.kind == crossterm::event::KeyEventKind::Press {
                        let action = app.map_key(key);
                        app.dispatch(action);
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => app.dispatch(Action::ScrollUp),
                    MouseEventKind::ScrollDown => app.dispatch(Action::ScrollDown),
                    _ => {}
                },
                Event::Resize => {}
                Event::SnapshotReady(snapshot) => app.apply_snapshot(*snapshot),
                Event::SnapshotFailed(message) => app.apply_failure(message),
            }

            if app.take_collect_request() {
                spawn_collect(events.sender());
            }

            terminal.draw(|frame| ui::draw(frame, &mut app))?;
        }
    }

    Ok(())
}

/// Runs one collection pass off the event loop and reports the result
/// back on the event channel. The app's refresh gate guarantees at most
/// one of these is in flight.
fn spawn_collect(tx: mpsc::UnboundedSender<Event>) {
    tokio::task::spawn_blocking(move || {
        let event = match Collector::new().collect() {
            Ok(snapshot) => Event::SnapshotReady(Box::new(snapshot)),
            Err(err) => Event::SnapshotFailed(format!("refresh failed: {err}")),
        };
        let _ = tx.send(event);
    });
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(ref theme) = cli.theme {
        config.general.theme = theme.clone();
    }
    if let Some(ref support) = cli.color {
        config.general.color_support = support.clone();
    }

    config
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
