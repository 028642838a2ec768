use crate::config::ConfigManager;
use crate::error::{RaffleError, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `RAFFLE_LOG=debug`
pub const LOG_ENV: &str = "RAFFLE_LOG";

/// Send tracing output to the log file next to the config. The terminal is
/// owned by the TUI, so nothing is written to stdout or stderr.
pub fn init(config_manager: &ConfigManager) -> Result<()> {
    std::fs::create_dir_all(config_manager.dir())?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config_manager.get_log_path())?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| RaffleError::ConfigError(format!("Could not start logging: {}", e)))
}
