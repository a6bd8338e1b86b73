//! Shared setup of the demo programs.

use std::path::PathBuf;

use clap::Args;
use log::LevelFilter;

use gs_front::{Result, config::Config};

/// Command-line options common to all demos.
#[derive(Args, Debug)]
pub struct Common {
    /// Path to a TOML config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Subdivision level of the sphere, overriding the config.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=5))]
    pub level: Option<u32>,

    /// Draw triangle outlines instead of filled triangles.
    #[arg(short, long)]
    pub wireframe: bool,

    /// Maximum level of log messages (off, error, warn, info, debug, trace).
    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl Default for Common {
    fn default() -> Self {
        Self {
            config: None,
            level: None,
            wireframe: false,
            log_level: LevelFilter::Info,
        }
    }
}

impl Common {
    /// Loads the config file, if any, and applies the command-line
    /// overrides to it.
    ///
    /// # Errors
    /// If the config file cannot be loaded.
    pub fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(level) = self.level {
            config.scene.level = level;
        }
        if self.wireframe {
            config.scene.wireframe = true;
        }
        Ok(config)
    }
}

/// Installs a logger writing timestamped messages to stderr.
pub fn setup_logger(level: LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}:{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.level(),
                record.target(),
                record.line().unwrap_or(0),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}
