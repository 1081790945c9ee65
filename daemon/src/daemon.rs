//! `wallpimpd` entry
//!
//! Reads the configuration, finds the wallpapers and runs the slideshow until SIGINT or SIGTERM
//! arrives.

use clap::Parser;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::backends::{Backend, Feh, Gnome, Kde, Xfce};
use crate::collector::{self, DEFAULT_MAX_FILES};
use crate::config::{CONFIG_FILE, Config};
use crate::desktop::{self, Desktop};
use crate::shutdown::{self, Shutdown, SignalError};
use crate::slideshow::{Slideshow, SlideshowError};

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("failed to set up logging: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error(transparent)]
    Signal(#[from] SignalError),
    #[error("no wallpapers found in `{0}`")]
    NoWallpapers(PathBuf),
    #[error(transparent)]
    Slideshow(#[from] SlideshowError),
}

#[derive(Parser)]
#[command(
    version,
    about = "A daemon that cycles desktop wallpapers from a directory"
)]
struct Cli {
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to the config file. Defaults to ~/.config/wallpimp/config.json."
    )]
    config: Option<PathBuf>,

    #[arg(
        short = 'd',
        long = "dir",
        value_name = "PATH",
        help = "Directory to take wallpapers from, overrides the config file."
    )]
    wallpaper_dir: Option<PathBuf>,

    #[arg(
        short = 'i',
        long = "interval",
        value_name = "DURATION",
        value_parser = parse_interval,
        help = "Time between two wallpapers, e.g. `300`, `5m` or `1h`. Overrides the config file."
    )]
    interval: Option<Duration>,

    #[arg(
        long = "desktop",
        value_enum,
        value_name = "DESKTOP",
        help = "Skip detection and use the given desktop environment."
    )]
    desktop: Option<Desktop>,

    #[arg(
        long = "max-files",
        value_name = "COUNT",
        default_value_t = DEFAULT_MAX_FILES,
        help = "Stop looking for wallpapers after this many."
    )]
    max_files: usize,

    #[arg(
        long = "dry-run",
        help = "Prints what would be done, but not really doing so."
    )]
    dry_run: bool,

    #[arg(short = 'v', long = "verbose", help = "Also print debug messages.")]
    verbose: bool,
}

fn parse_interval(value: &str) -> Result<Duration, String> {
    let duration = duration_str::parse(value).map_err(|err| err.to_string())?;
    if duration.as_secs() == 0 {
        return Err("interval must be at least one second".to_string());
    }
    Ok(duration)
}

fn home_dir() -> PathBuf {
    env::var("HOME").map(PathBuf::from).unwrap_or_else(|_| {
        log::warn!("$HOME is not set, resolving paths relative to the working directory");
        PathBuf::new()
    })
}

fn config_path(home: &Path) -> PathBuf {
    home.join(CONFIG_FILE)
}

/// Builds the effective configuration: defaults, then the config file, then the command line.
fn resolve(cli: &Cli, home: &Path) -> Config {
    let path = cli.config.clone().unwrap_or_else(|| config_path(home));
    let mut config = Config::load(&path, home).unwrap_or_else(|err| {
        log::warn!("{err}, using defaults");
        Config::defaults(home)
    });

    if let Some(dir) = &cli.wallpaper_dir {
        config.wallpaper_dir.clone_from(dir);
    }
    if let Some(interval) = cli.interval {
        config.interval = interval;
    }
    config.desktop = cli.desktop.unwrap_or_else(desktop::detect_from_env);
    config.max_files = cli.max_files;
    config
}

fn setup_logger(verbose: bool) -> Result<(), log::SetLoggerError> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                message
            ));
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()
}

async fn run_with<T: Backend>(
    backend: T,
    wallpapers: Vec<PathBuf>,
    config: &Config,
    dry_run: bool,
    shutdown: &Shutdown,
) -> Result<(), DaemonError> {
    log::debug!("Using the {} backend", backend.name());
    let mut slideshow = Slideshow::new(wallpapers, config.interval, backend).dry_run(dry_run);
    slideshow.run(shutdown).await?;
    slideshow.stop();
    Ok(())
}

/// The real start.
///
/// # Errors
/// Fatal errors that will cause the program to exit will be returned here.
pub fn start() -> Result<(), DaemonError> {
    let cli = Cli::parse();
    setup_logger(cli.verbose)?;

    let home = home_dir();
    let config = resolve(&cli, &home);

    log::info!("WallPimp Slideshow Daemon");
    log::info!("Directory: {}", config.wallpaper_dir.display());
    log::info!("Interval: {} seconds", config.interval.as_secs());
    log::info!("Desktop: {}", config.desktop);

    // Must happen before anything spawns a thread
    let (trigger, token) = shutdown::channel();
    shutdown::listen(trigger)?;

    let wallpapers = collector::collect(&config.wallpaper_dir, config.max_files);
    if wallpapers.is_empty() {
        return Err(DaemonError::NoWallpapers(config.wallpaper_dir));
    }
    log::info!("Found {} wallpapers", wallpapers.len());

    smol::block_on(async {
        match config.desktop {
            Desktop::Xfce => run_with(Xfce, wallpapers, &config, cli.dry_run, &token).await,
            Desktop::Gnome => run_with(Gnome, wallpapers, &config, cli.dry_run, &token).await,
            Desktop::Kde => run_with(Kde::new(), wallpapers, &config, cli.dry_run, &token).await,
            Desktop::Mate
            | Desktop::Cinnamon
            | Desktop::I3
            | Desktop::Sway
            | Desktop::Unknown => {
                run_with(Feh, wallpapers, &config, cli.dry_run, &token).await
            }
        }
    })
}
