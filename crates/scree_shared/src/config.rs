//! Level configuration.
//!
//! A plain record passed in at construction; loadable from TOML so a level
//! can be tuned without recompiling.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating a [`LevelConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Terrain and level tuning parameters.
///
/// All distances are in world units (y-down screen convention).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Horizontal distance between consecutive terrain samples.
    pub segment_length: f32,
    /// Full height of the terrain band; heights map into
    /// `[-max_level_height / 2, +max_level_height / 2]`.
    pub max_level_height: f32,
    /// Noise domain scale: world x is divided by this before sampling.
    pub noise_sample_size: f32,
    /// Horizontal margin of generated terrain kept around the camera.
    pub render_distance: f32,
    /// Number of segments per chunk.
    pub max_chunk_segments: usize,
    /// Absolute y of the closing points sealing each chunk's profile into
    /// a solid region far below the playfield.
    pub level_down_extension: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            segment_length: 10.0,
            max_level_height: 200.0,
            noise_sample_size: 400.0,
            render_distance: 600.0,
            max_chunk_segments: 50,
            level_down_extension: 2_000.0,
        }
    }
}

impl LevelConfig {
    /// Width of one chunk in world units.
    #[inline]
    #[must_use]
    pub fn chunk_width(&self) -> f32 {
        self.max_chunk_segments as f32 * self.segment_length
    }

    /// Parses a config from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed input and
    /// [`ConfigError::Invalid`] when a field fails validation.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, plus the
    /// errors of [`LevelConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks that every field is in its usable range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.segment_length > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "segment_length must be positive, got {}",
                self.segment_length
            )));
        }
        if !(self.max_level_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_level_height must be positive, got {}",
                self.max_level_height
            )));
        }
        if !(self.noise_sample_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "noise_sample_size must be positive, got {}",
                self.noise_sample_size
            )));
        }
        if !(self.render_distance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "render_distance must be positive, got {}",
                self.render_distance
            )));
        }
        if self.max_chunk_segments == 0 {
            return Err(ConfigError::Invalid(
                "max_chunk_segments must be at least 1".to_string(),
            ));
        }
        if self.level_down_extension <= self.max_level_height / 2.0 {
            return Err(ConfigError::Invalid(format!(
                "level_down_extension ({}) must lie below the terrain band",
                self.level_down_extension
            )));
        }
        Ok(())
    }
}
