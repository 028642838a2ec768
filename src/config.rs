use crate::draw::DrawConfig;
use crate::error::{RaffleError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that moves the config directory away from ~/.raffle
pub const HOME_ENV: &str = "RAFFLE_HOME";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub num_winners: usize,
    pub allow_duplicates: bool,
    pub use_weights: bool,
    /// Where exports go; the current directory when unset
    pub export_dir: Option<String>,
    pub reveal_frames: u32,
    pub frame_interval_ms: u64,
    pub pause_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            num_winners: 1,
            allow_duplicates: false,
            use_weights: true,
            export_dir: None,
            reveal_frames: 30,
            frame_interval_ms: 100,
            pause_ms: 1000,
        }
    }
}

impl Config {
    pub fn draw_config(&self) -> DrawConfig {
        DrawConfig {
            num_winners: self.num_winners.max(1),
            allow_duplicates: self.allow_duplicates,
            use_weights: self.use_weights,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    /// Pause after each reveal, in frames
    pub fn pause_frames(&self) -> u32 {
        let frames = self.pause_ms / self.frame_interval_ms.max(1);
        u32::try_from(frames).unwrap_or(u32::MAX)
    }

    pub fn export_dir(&self) -> PathBuf {
        match &self.export_dir {
            Some(dir) if !dir.trim().is_empty() => expand_home(dir),
            _ => PathBuf::from("."),
        }
    }
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

pub struct ConfigManager {
    dir: PathBuf,
}

impl ConfigManager {
    /// Config manager rooted at $RAFFLE_HOME or ~/.raffle
    pub fn new() -> Result<Self> {
        if let Some(dir) = std::env::var_os(HOME_ENV) {
            return Ok(Self::with_dir(dir));
        }
        let home = dirs::home_dir()
            .ok_or(RaffleError::ConfigError("Could not determine home directory".to_string()))?;
        Ok(Self::with_dir(home.join(".raffle")))
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        ConfigManager { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn get_config_path(&self) -> PathBuf {
        self.dir.join("config.json")
    }

    pub fn get_log_path(&self) -> PathBuf {
        self.dir.join("raffle.log")
    }

    /// Check if setup has been run
    pub fn exists(&self) -> bool {
        self.get_config_path().exists()
    }

    /// Load the config, falling back to defaults when no file exists
    pub fn load(&self) -> Result<Config> {
        let path = self.get_config_path();
        if !path.exists() {
            return Ok(Config::default());
        }
        let raw = std::fs::read_to_string(&path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let raw = serde_json::to_string_pretty(config)?;
        std::fs::write(self.get_config_path(), raw)?;
        Ok(())
    }
}
