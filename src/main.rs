//! Entry point for the NeuroBridge viewer.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml`.
//! - Launch the GUI with the loaded config.

mod app;
mod config;
mod theme;

use crate::app::run_app;
use crate::config::{AppConfig, load_config, serialize_config};
use anyhow::{Context, Result, anyhow};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const CONFIG_PATH: &str = "conf/config.toml";

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    frames_root: Option<PathBuf>,
    print_default_config: bool,
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    if args.print_default_config {
        print!("{}", serialize_config(&AppConfig::default())?);
        return Ok(());
    }

    let mut config = load_config(Path::new(CONFIG_PATH));
    if let Some(root) = args.frames_root {
        if !root.is_dir() {
            return Err(anyhow!("Frames directory not found: {}", root.display()));
        }
        config.frames_root = root.display().to_string();
    }
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        frames = %config.frames_root,
        count = config.frame_count,
        theme = %config.theme,
        level = %config.log_level,
        "Starting NeuroBridge viewer"
    );
    run_app(config).context("Failed to start the GUI")?;
    Ok(())
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs> {
    let mut parsed = CliArgs::default();
    for arg in args {
        match arg.as_str() {
            "--print-default-config" => parsed.print_default_config = true,
            flag if flag.starts_with("--") => {
                return Err(anyhow!(
                    "Unknown flag {flag}\nUsage: neurobridge [--print-default-config] [frames-root]"
                ));
            }
            _ if parsed.frames_root.is_some() => {
                return Err(anyhow!(
                    "Usage: neurobridge [--print-default-config] [frames-root]"
                ));
            }
            _ => parsed.frames_root = Some(PathBuf::from(arg)),
        }
    }
    Ok(parsed)
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    if env::var_os("RUST_LOG").is_some() {
        info!("RUST_LOG is set; ignoring config log level");
        return;
    }
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
