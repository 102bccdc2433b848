use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime;
use tracing::info;

use pulseping_dash::logging::{self, LogTarget};
use pulseping_dash::ui::{self, Theme};
use pulseping_dash::{
    events, export_filename, write_csv, App, ExportError, FileFetcher, HttpFetcher, Resolution,
    Settings, SnapshotClient, SnapshotFetcher, WindowHours,
};

#[derive(Parser, Debug)]
#[command(name = "pulseping-dash")]
#[command(about = "Terminal dashboard for PulsePing uptime checks")]
struct Args {
    /// Base url of the Snapshot API (overrides config)
    #[arg(long, conflicts_with = "file")]
    api: Option<String>,

    /// Read the snapshot from a saved JSON file instead of the API
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Window to load on startup, in hours (1-48)
    #[arg(long)]
    hours: Option<u32>,

    /// Path to a TOML config file (default: ./pulseping.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Auto-refresh interval in seconds (0 = manual refresh only)
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Directory for CSV exports made from the TUI
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Fetch once, write the CSV export and exit. Defaults to
    /// pulseping-{hours}h-export.csv in the export directory.
    #[arg(short, long, num_args = 0..=1, value_name = "PATH")]
    export: Option<Option<PathBuf>>,

    /// Write logs to this file (the TUI does not log otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    /// Apply command-line overrides on top of file/env settings.
    fn apply_to(&self, settings: &mut Settings) {
        if let Some(ref api) = self.api {
            settings.api_base_url = api.clone();
        }
        if let Some(hours) = self.hours {
            settings.default_hours = hours;
        }
        if let Some(refresh) = self.refresh {
            settings.refresh_secs = refresh;
        }
        if let Some(timeout) = self.timeout {
            settings.request_timeout_secs = timeout;
        }
        if let Some(ref dir) = self.export_dir {
            settings.export_dir = dir.clone();
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply_to(&mut settings);

    let log_target = match (&args.log_file, args.export.is_some()) {
        (Some(path), _) => LogTarget::File(path),
        (None, true) => LogTarget::Stderr,
        (None, false) => LogTarget::Off,
    };
    logging::init(log_target)?;

    let fetcher: Arc<dyn SnapshotFetcher> = match args.file {
        Some(ref path) => Arc::new(FileFetcher::new(path)),
        None => Arc::new(HttpFetcher::new(
            &settings.api_base_url,
            settings.request_timeout(),
        )?),
    };

    // Requests run on this runtime while the TUI loop stays on the main thread
    let runtime = Runtime::new()?;
    let client = SnapshotClient::new(fetcher, runtime.handle().clone());
    info!(source = client.description(), window = %settings.window(), "starting");

    // Handle export mode (non-interactive)
    if let Some(ref target) = args.export {
        return export_once(&runtime, client, settings.window(), target.as_deref(), &settings);
    }

    run_tui(client, &settings)
}

/// Fetch one snapshot and write it as CSV.
fn export_once(
    runtime: &Runtime,
    mut client: SnapshotClient,
    window: WindowHours,
    target: Option<&Path>,
    settings: &Settings,
) -> Result<()> {
    client.fetch_snapshot(window);
    if let Some(Resolution::Failed(err)) = runtime.block_on(client.settle()) {
        anyhow::bail!("{}: {}", err.user_message(), err);
    }

    let loaded = client.current().context("no snapshot received")?;
    let path = match target {
        Some(path) => path.to_path_buf(),
        None => settings.export_dir.join(export_filename(loaded.window)),
    };

    match write_csv(&loaded.snapshot, &path) {
        Ok(()) => {
            println!(
                "Exported {} checks to {}",
                loaded.snapshot.checks.len(),
                path.display()
            );
            Ok(())
        }
        Err(ExportError::Empty) => {
            println!("{}", ExportError::Empty);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Run the TUI with the given client
fn run_tui(client: SnapshotClient, settings: &Settings) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    // Create app and request initial data
    let mut app = App::new(client, settings.window(), settings.export_dir.clone())
        .with_theme(Theme::auto_detect());
    app.refresh();

    let result = run_app(&mut terminal, &mut app, settings.refresh_interval());

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Option<Duration>,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    while app.running {
        app.poll_updates();

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                _ => {}
            }
        }

        // Auto-refresh periodically, skipping while a request is in flight
        if let Some(interval) = refresh_interval {
            if last_refresh.elapsed() >= interval {
                if !app.is_loading() {
                    app.refresh();
                }
                last_refresh = Instant::now();
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_override_settings() {
        let args = Args::parse_from([
            "pulseping-dash",
            "--api",
            "https://status.example.com",
            "--hours",
            "6",
            "--refresh",
            "15",
        ]);
        let mut settings = Settings::default();
        args.apply_to(&mut settings);
        assert_eq!(settings.api_base_url, "https://status.example.com");
        assert_eq!(settings.window().get(), 6);
        assert_eq!(settings.refresh_interval(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_export_flag_with_and_without_path() {
        let bare = Args::parse_from(["pulseping-dash", "--export"]);
        assert_eq!(bare.export, Some(None));

        let with_path = Args::parse_from(["pulseping-dash", "--export", "out.csv"]);
        assert_eq!(with_path.export, Some(Some(PathBuf::from("out.csv"))));

        let none = Args::parse_from(["pulseping-dash"]);
        assert!(none.export.is_none());
    }

    #[test]
    fn test_api_conflicts_with_file() {
        let result =
            Args::try_parse_from(["pulseping-dash", "--api", "http://x", "--file", "s.json"]);
        assert!(result.is_err());
    }
}
