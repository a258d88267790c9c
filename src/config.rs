use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub round_duration: f64,
    pub max_health: u32,
    pub hits_for_speed_increase: u32,
    pub speed_growth_factor: f64,
    pub max_speed_multiplier: f64,
    pub base_cue_display_time: f64,
    pub min_cue_display_time: f64,
    pub base_timing_window: f64,
    pub min_timing_window: f64,
    pub base_cue_cooldown: f64,
    pub min_cue_cooldown: f64,
    pub perfect_window: f64,
    pub good_window: f64,
    pub late_window: f64,
    pub perfect_score: u32,
    pub good_score: u32,
    pub late_score: u32,
    pub first_cue_delay: f64,
    pub unsolicited_input_cooldown: f64,
    pub streak_milestone: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            round_duration: 90.0,
            max_health: 5,
            hits_for_speed_increase: 3,
            speed_growth_factor: 1.5,
            max_speed_multiplier: 4.0,
            base_cue_display_time: 0.6,
            min_cue_display_time: 0.3,
            base_timing_window: 0.2,
            min_timing_window: 0.15,
            base_cue_cooldown: 0.5,
            min_cue_cooldown: 0.4,
            perfect_window: 0.1,
            good_window: 0.25,
            late_window: 0.5,
            perfect_score: 100,
            good_score: 50,
            late_score: 10,
            first_cue_delay: 0.3,
            unsolicited_input_cooldown: 0.1,
            streak_milestone: 3,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive number of seconds, got {value}")]
    NonPositiveDuration { name: &'static str, value: f64 },
    #[error("{name} must not be negative, got {value}")]
    NegativeDuration { name: &'static str, value: f64 },
    #[error("timing windows must be strictly ascending (perfect {perfect} < good {good} < late {late})")]
    WindowsNotAscending { perfect: f64, good: f64, late: f64 },
    #[error("max_health must be at least 1")]
    NoHealth,
    #[error("{name} must be at least 1")]
    ZeroCount { name: &'static str },
    #[error("speed_growth_factor must be greater than 1.0, got {0}")]
    GrowthTooSmall(f64),
    #[error("max_speed_multiplier must be at least 1.0, got {0}")]
    MaxSpeedTooSmall(f64),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("round_duration", self.round_duration),
            ("base_cue_display_time", self.base_cue_display_time),
            ("min_cue_display_time", self.min_cue_display_time),
            ("base_timing_window", self.base_timing_window),
            ("min_timing_window", self.min_timing_window),
            ("base_cue_cooldown", self.base_cue_cooldown),
            ("min_cue_cooldown", self.min_cue_cooldown),
            ("perfect_window", self.perfect_window),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositiveDuration { name, value });
            }
        }

        let non_negative = [
            ("first_cue_delay", self.first_cue_delay),
            ("unsolicited_input_cooldown", self.unsolicited_input_cooldown),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NegativeDuration { name, value });
            }
        }

        if !(self.perfect_window < self.good_window && self.good_window < self.late_window) {
            return Err(ConfigError::WindowsNotAscending {
                perfect: self.perfect_window,
                good: self.good_window,
                late: self.late_window,
            });
        }

        if self.max_health == 0 {
            return Err(ConfigError::NoHealth);
        }
        if self.hits_for_speed_increase == 0 {
            return Err(ConfigError::ZeroCount {
                name: "hits_for_speed_increase",
            });
        }
        if self.streak_milestone == 0 {
            return Err(ConfigError::ZeroCount {
                name: "streak_milestone",
            });
        }
        if self.speed_growth_factor.is_nan() || self.speed_growth_factor <= 1.0 {
            return Err(ConfigError::GrowthTooSmall(self.speed_growth_factor));
        }
        if self.max_speed_multiplier.is_nan() || self.max_speed_multiplier < 1.0 {
            return Err(ConfigError::MaxSpeedTooSmall(self.max_speed_multiplier));
        }

        Ok(())
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "padwork") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("padwork_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "unreadable config, using defaults");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(std::io::Error::from)?;
        fs::write(&self.path, data)
    }
}
