// hexwatch - Fleet health honeycomb for the terminal
// One hexagon per host, colored by load, with alert blinking and click-to-filter

mod app;
mod hexbin;
mod telemetry;
mod theme;
mod ui;

use anyhow::{bail, Context, Result};
use app::config::{
    DEFAULT_ALERT_CPU, DEFAULT_ALERT_MEMORY, DEFAULT_HEX_PADDING, DEFAULT_HEX_RADIUS,
    DEFAULT_REFRESH_MS,
};
use app::{
    event::{handle_key_event, handle_mouse_event},
    AlertConfig, AppState, HexbinSettings, RefreshConfig, Settings, SourceKind,
};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// Command line options
#[derive(Parser, Debug)]
#[command(name = "hexwatch", version, about = "Fleet health honeycomb for the terminal")]
struct Cli {
    /// JSON fleet file to watch (re-read on every poll)
    #[arg(long, value_name = "PATH", conflicts_with = "simulate")]
    fleet: Option<PathBuf>,

    /// Show a synthetic fleet of N hosts
    #[arg(long, value_name = "N")]
    simulate: Option<usize>,

    /// UI refresh interval in milliseconds (records poll at 4x this)
    #[arg(long, default_value_t = DEFAULT_REFRESH_MS)]
    refresh_ms: u64,

    /// CPU usage (percent) at which a host alerts
    #[arg(long, default_value_t = DEFAULT_ALERT_CPU)]
    alert_cpu: f64,

    /// Memory usage (percent) at which a host alerts
    #[arg(long, default_value_t = DEFAULT_ALERT_MEMORY)]
    alert_memory: f64,

    /// Hexagon radius in braille dots
    #[arg(long, default_value_t = DEFAULT_HEX_RADIUS)]
    radius: f64,

    /// Padding around each hexagon in braille dots
    #[arg(long, default_value_t = DEFAULT_HEX_PADDING)]
    padding: f64,

    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Turn command line options into application settings
    fn settings(&self) -> Result<Settings> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            bail!("--radius must be a positive number, got {}", self.radius);
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            bail!("--padding must be zero or more, got {}", self.padding);
        }
        if self.simulate == Some(0) {
            bail!("--simulate needs at least one host");
        }

        let source = match (&self.fleet, self.simulate) {
            (Some(path), _) => SourceKind::FleetFile(path.clone()),
            (None, Some(count)) => SourceKind::Simulated(count),
            (None, None) => SourceKind::Local,
        };

        Ok(Settings {
            source,
            refresh: RefreshConfig::with_interval(self.refresh_ms),
            alerts: AlertConfig {
                cpu_threshold: self.alert_cpu,
                memory_threshold: self.alert_memory,
            },
            hexbin: HexbinSettings {
                radius: self.radius,
                padding: self.padding,
                ..Default::default()
            },
        })
    }
}

fn log_level(name: &str) -> tracing::Level {
    match name {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}

/// Send tracing output to the log file, if one was given
///
/// Without a log file no subscriber is installed and events are dropped.
fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(log_level(&cli.log_level))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings()?;
    init_logging(&cli)?;

    if settings.hexbin.padding < settings.hexbin.radius / 4.0 {
        tracing::warn!(
            radius = settings.hexbin.radius,
            padding = settings.hexbin.padding,
            "Padding below a quarter of the radius; staggered rows will overlap"
        );
    }
    tracing::info!(source = ?settings.source, refresh_ms = settings.refresh.refresh_ms, "Starting hexwatch");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "hexwatch exited with an error");
        println!("Error: {:?}", err);
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    settings: Settings,
) -> Result<()> {
    let mut app = AppState::new(settings);
    loop {
        app.on_tick();
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if !app.running {
            return Ok(());
        }

        if event::poll(app.refresh_config.ui_interval())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key_event(&mut app, key.code);
                }
                Event::Mouse(mouse) => {
                    handle_mouse_event(&mut app, mouse);
                }
                Event::Resize(_, _) => app.on_resize(),
                _ => {}
            }
        }
    }
}
