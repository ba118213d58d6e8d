use anyhow::{Context, Result};
use clap::Parser;
use gauges::config::{ActiveTheme, AppConfig};
use gauges::core::Application;
use gauges::displayers::build_displays;
use gauges_core::{SharedClock, SystemClock};
use gauges_render::CairoBackend;
use log::{error, info, warn};
use std::path::PathBuf;
use std::time::Duration;

/// gauges - A real-time dashboard of clocks, horizons and line charts
#[derive(Parser, Debug, Clone)]
#[command(name = "gauges")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file to load instead of the per-user config
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Frame rate override
    #[arg(long = "fps", value_name = "FPS")]
    fps: Option<u32>,

    /// Stop after this many seconds (runs until interrupted otherwise)
    #[arg(long = "duration", value_name = "SECS")]
    duration: Option<f64>,

    /// Write PNG snapshots of the dashboard into this directory
    #[arg(long = "snapshot-dir", value_name = "DIR")]
    snapshot_dir: Option<PathBuf>,

    /// Write a snapshot every N frames
    #[arg(long = "snapshot-every", value_name = "N", default_value = "50")]
    snapshot_every: u64,

    /// Built-in theme to activate (solarized-dark, solarized-light)
    #[arg(short = 't', long = "theme", value_name = "NAME")]
    theme: Option<String>,

    /// Show the frame-rate badge
    #[arg(long = "show-fps")]
    show_fps: bool,

    /// Write the default config to the config path and exit
    #[arg(long = "write-default-config")]
    write_default_config: bool,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Level 0 (default): warn only, 1: info, 2: debug, 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting gauges v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.write_default_config {
        let path = match &cli.config {
            Some(path) => path.clone(),
            None => AppConfig::config_path()?,
        };
        AppConfig::default().save_to_path(&path)?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let mut config = load_config(cli.config.as_ref());
    if let Some(fps) = cli.fps {
        config.frame_rate = fps;
    }
    if let Some(theme) = &cli.theme {
        config.theme.active = Some(ActiveTheme::Builtin(theme.clone()));
    }
    config.show_fps |= cli.show_fps;

    let theme = config.theme.resolver().context("Invalid theme configuration")?;
    let clock: SharedClock = SystemClock::shared();
    let displays = build_displays(&config.displays, &clock)?;

    let mut backend = CairoBackend::new();
    if let Some(dir) = &cli.snapshot_dir {
        backend = backend.with_snapshots(dir.clone(), cli.snapshot_every);
    }

    let mut app = Application::with_theme(config.app_options(), backend, theme).with_clock(clock);
    for display in displays {
        app.add_display(display);
    }

    match cli.duration.map(run_duration).transpose()? {
        Some(duration) => app.run_for(duration)?,
        None => app.run()?,
    }

    let stats = app.frame_stats();
    info!("Rendered {} frames ({:.1} fps)", stats.frames, stats.fps);
    Ok(())
}

/// `--duration` in seconds as a `Duration`; negative, NaN and out of range
/// values are rejected
fn run_duration(secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs).with_context(|| format!("Invalid duration {}", secs))
}

/// Config from `path`, or from the per-user config directory.
///
/// A file that fails to load falls back to the default dashboard.
fn load_config(path: Option<&PathBuf>) -> AppConfig {
    let loaded = match path {
        Some(path) => AppConfig::load_from_path(path),
        None => AppConfig::load(),
    };
    loaded.unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {:#}", e);
        AppConfig::default()
    })
}
