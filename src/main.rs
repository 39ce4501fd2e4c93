//! Folio - a portfolio you can walk around in
//!
//! Four presentation modes over one content catalog: a feed, a browse grid,
//! a top-down adventure map and a pocket layout for narrow terminals.

mod clipboard;
mod config;
mod content;
mod core;
mod data;
mod frontend;
mod validator;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use content::ContentCatalog;
use crate::core::zone::ZoneId;
use frontend::Frontend;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(ClapParser)]
#[command(name = "folio")]
#[command(about = "Terminal portfolio with feed, grid and adventure modes", long_about = None)]
struct Cli {
    /// Presentation mode: feed, grid, explore or mobile
    #[arg(short, long, value_name = "MODE")]
    mode: Option<String>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Content file path
    #[arg(long, value_name = "FILE")]
    content: Option<PathBuf>,

    /// Custom data directory (default: ~/.folio)
    /// Can also be set via FOLIO_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a content file for problems
    ValidateContent {
        /// Content file to check (default: content.toml in the data directory)
        path: Option<PathBuf>,
    },
    /// Print the zone table
    Zones {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct ZoneSummary<'a> {
    id: ZoneId,
    name: &'a str,
    icon: &'a str,
    x: f64,
    y: f64,
}

fn init_logging() -> Result<()> {
    let log_path = config::Config::log_path()?;
    if let Some(dir) = log_path.parent() {
        std::fs::create_dir_all(dir)
            .context(format!("Failed to create data directory {:?}", dir))?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context(format!("Failed to open log file {:?}", log_path))?;

    // TUI apps can't log to stdout, so we write to a file
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Content file to use: the explicit path, or the data directory copy
fn content_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => {
            config::Config::extract_defaults()?;
            config::Config::content_path()
        }
    }
}

fn validate_content(path: &Path, config: &config::Config) -> Result<()> {
    println!("Validating content file: {:?}", path);
    let threshold = config.navigation.proximity_threshold;

    let result = match validator::validate_content_file(path, threshold) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("✗ Failed to load content: {:#}", e);
            std::process::exit(1);
        }
    };

    let mut errors = 0;
    let mut warnings = 0;
    for issue in result.errors() {
        eprintln!("✗ Error: {}: {}", issue.subject, issue.message);
        errors += 1;
    }
    for issue in result.warnings() {
        println!("⚠ Warning: {}: {}", issue.subject, issue.message);
        warnings += 1;
    }

    if errors == 0 && warnings == 0 {
        println!("✓ Content is valid with no issues");
    } else {
        if errors > 0 {
            eprintln!("\n✗ Found {} error(s)", errors);
        }
        if warnings > 0 {
            println!("⚠ Found {} warning(s)", warnings);
        }
    }

    if result.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_zones(catalog: &ContentCatalog, json: bool) -> Result<()> {
    let zones: Vec<ZoneSummary> = catalog
        .zones
        .iter()
        .map(|z| ZoneSummary {
            id: z.id,
            name: &z.name,
            icon: &z.icon,
            x: z.x,
            y: z.y,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&zones)?);
        return Ok(());
    }

    for zone in &zones {
        println!(
            "{} {:<16} ({:>5.1}, {:>5.1})  {}",
            zone.icon,
            zone.id.as_str(),
            zone.x,
            zone.y,
            zone.name
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set custom data directory before anything resolves paths
    if let Some(data_dir) = &cli.data_dir {
        std::env::set_var("FOLIO_DIR", data_dir);
    }

    init_logging()?;
    tracing::info!("folio {} starting", env!("CARGO_PKG_VERSION"));
    if let Some(data_dir) = &cli.data_dir {
        tracing::info!("Using custom data directory: {:?}", data_dir);
    } else if let Ok(env_dir) = std::env::var("FOLIO_DIR") {
        tracing::info!("Using data directory from FOLIO_DIR: {}", env_dir);
    }

    let config = config::Config::load(cli.config.as_deref())?;

    if let Some(command) = cli.command {
        match command {
            Commands::ValidateContent { path } => {
                let path = content_path(path.as_deref().or(cli.content.as_deref()))?;
                validate_content(&path, &config)?;
            }
            Commands::Zones { json } => {
                let path = content_path(cli.content.as_deref())?;
                let catalog = ContentCatalog::load_from(&path)?;
                print_zones(&catalog, json)?;
            }
        }
        return Ok(());
    }

    let path = content_path(cli.content.as_deref())?;
    let catalog = ContentCatalog::load_from(&path)?;
    let avatar_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let avatar = catalog.load_avatar(&avatar_dir);

    run_tui(config, catalog, avatar, cli.mode)
}

/// Run TUI frontend
fn run_tui(
    config: config::Config,
    catalog: ContentCatalog,
    avatar: content::Avatar,
    mode: Option<String>,
) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(async_run_tui(config, catalog, avatar, mode));
    // The input reader is a blocking task; don't wait on it
    runtime.shutdown_background();
    result
}

async fn async_run_tui(
    config: config::Config,
    catalog: ContentCatalog,
    avatar: content::Avatar,
    mode: Option<String>,
) -> Result<()> {
    use crate::core::AppCore;
    use frontend::{FrontendEvent, TuiFrontend};
    use std::time::Instant;
    use tokio::time::MissedTickBehavior;

    let (width, _) = crossterm::terminal::size().context("Failed to read terminal size")?;
    let tick = config.ui.tick();
    let mut app_core = AppCore::new(config, catalog, avatar, mode.as_deref(), width)?;

    let mut frontend = TuiFrontend::new()?;
    let mut ticker = tokio::time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    while app_core.running {
        ticker.tick().await;

        for event in frontend.poll_events()? {
            let now = Instant::now();
            match event {
                FrontendEvent::Key { .. } => {
                    if let Some(key) = event.key_event() {
                        app_core.handle_key(key, now);
                    }
                }
                FrontendEvent::Mouse { .. } => {
                    if let Some(pointer) = event.pointer() {
                        app_core.handle_pointer(pointer, now);
                    }
                }
                FrontendEvent::Resize { width, height } => {
                    app_core.handle_resize(width, height, now)
                }
                FrontendEvent::Quit => app_core.running = false,
            }
            if !app_core.running {
                break;
            }
        }

        app_core.tick(Instant::now());
        if app_core.running && app_core.needs_render {
            frontend.render(&mut app_core)?;
        }
    }

    frontend.cleanup()?;
    tracing::info!("folio exiting");
    Ok(())
}
