//! Runtime game configuration
//!
//! Hosts may hand in a JSON document; any field left out falls back to the
//! compiled defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::levels::{LevelConfig, default_levels, level_at};

/// Configuration problems detected when a session starts
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Level table is empty")]
    NoLevels,

    #[error("Level {index} does not exist ({available} levels configured)")]
    MissingLevel { index: usize, available: usize },

    #[error("Level {index} is invalid: {reason}")]
    InvalidLevel { index: usize, reason: &'static str },

    #[error("Playfield must have positive size, got {width}x{height}")]
    InvalidPlayfield { width: f32, height: f32 },

    #[error("CRS config is invalid: {0}")]
    InvalidCrs(&'static str),
}

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 300,
            QualityPreset::High => 600,
        }
    }
}

/// CRS meter tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrsConfig {
    pub max: f32,
    /// Fraction of `max` at which the meter is critical
    pub critical_fraction: f32,
    pub recovery_rate: f32,
    /// Gain per second from a full-size clot
    pub accumulation_rate: f32,
}

impl Default for CrsConfig {
    fn default() -> Self {
        Self {
            max: CRS_MAX,
            critical_fraction: CRS_CRITICAL_FRACTION,
            recovery_rate: CRS_RECOVERY_RATE,
            accumulation_rate: CRS_ACCUMULATION_RATE,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield size in pixels
    pub width: f32,
    pub height: f32,
    pub quality: QualityPreset,
    /// Index into `levels` a session starts on
    pub start_level: usize,
    pub levels: Vec<LevelConfig>,
    pub crs: CrsConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            quality: QualityPreset::Medium,
            start_level: 0,
            levels: default_levels(),
            crs: CrsConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse a config document. Validation happens at session start.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a config document, falling back to defaults on failure
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Using default config: {}", e);
                Self::default()
            }
        }
    }

    /// Check the whole config; returns the level a session would start on
    pub fn validate(&self) -> Result<&LevelConfig, ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::InvalidPlayfield {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.crs.max > 0.0) {
            return Err(ConfigError::InvalidCrs("max must be positive"));
        }
        if !(0.0..=1.0).contains(&self.crs.critical_fraction) {
            return Err(ConfigError::InvalidCrs("critical_fraction must be within 0..=1"));
        }
        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        for (i, level) in self.levels.iter().enumerate() {
            level.validate(i)?;
        }
        level_at(&self.levels, self.start_level)
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        self.quality.max_particles()
    }
}
