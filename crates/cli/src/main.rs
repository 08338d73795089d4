//! inwatch CLI - print inotify events for one path

use anyhow::{Context, Result};
use clap::Parser;
use inwatch_core::{parse_mask, RawEventBatch, WatchMask};
use inwatch_watcher::{EventPump, InotifySession};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod limits;

use config::Config;

/// inwatch - describe file system events on a path as they happen
#[derive(Parser, Debug)]
#[command(name = "inwatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File or directory to watch (default: current directory)
    target: Option<PathBuf>,

    /// Comma-separated event kinds, e.g. IN_CREATE,IN_DELETE (default: all)
    mask: Option<String>,

    /// Log every decoded record to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Config file (default: <config dir>/inwatch/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config::load(cli.config.as_deref())?;
    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let target = match cli.target {
        Some(target) => {
            info!("Watching {}", target.display());
            target
        }
        None => {
            info!("Watching the current directory");
            PathBuf::from(".")
        }
    };
    let mask = resolve_mask(cli.mask.as_deref(), &config)?;

    if config.limits.raise_nofile {
        limits::set_nofile(config.limits.nofile_soft, config.limits.nofile_hard);
    }

    let mut session = InotifySession::open().context("inotify_init failed")?;
    session
        .add_watch(&target, mask)
        .context("add_watch failed")?;

    let pump = EventPump::new(session, target.display().to_string(), std::io::stdout().lock())
        .with_batch(RawEventBatch::with_capacity_for(config.watch.buffer_events));

    match pump.run() {
        Ok(never) => match never {},
        Err(e) => {
            error!("Stopped watching {}: {}", target.display(), e);
            Err(e).with_context(|| format!("Stopped watching {}", target.display()))
        }
    }
}

/// Log to stderr so stdout carries only event lines
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Pick the mask: command line, then config, then every kind
///
/// A mask that selects no kinds is a usage error.
fn resolve_mask(arg: Option<&str>, config: &Config) -> Result<WatchMask> {
    let spec = arg.or(config.watch.default_mask.as_deref());
    if spec.is_none() {
        info!("No mask specified, using IN_ALL_EVENTS");
    }

    let parsed = parse_mask(spec);
    if parsed.mask.is_empty() {
        anyhow::bail!(
            "Mask '{}' selects no event kinds (expected a comma-separated list of: {})",
            spec.unwrap_or_default(),
            WatchMask::all().to_spec()
        );
    }

    Ok(parsed.mask)
}
