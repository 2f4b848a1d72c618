//! Configuration loading for the NeuroBridge viewer.
//!
//! All user-tunable settings are centralized here and loaded from
//! `conf/config.toml` if present. Missing tables or keys fall back to
//! defaults so the viewer can always launch.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::{load_config, parse_config, serialize_config};
pub use models::{AppConfig, LogLevel, OverlayConfig, ThemeMode};
