//! Engine configuration
//!
//! Tolerances, interaction limits and modifier bindings for the transform
//! engine. Configuration can be stored as JSON or TOML; the format is picked
//! from the file extension.

use crate::constants::{
    DEFAULT_ANGLE_EPSILON_DEGREES, DEFAULT_DECIMALS, DEFAULT_EPSILON, HANDLE_TOLERANCE,
    MAX_DECIMALS, MIN_BBOX_SIZE, SINGULAR_THRESHOLD,
};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Keyboard modifier that can be bound to a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKey {
    Alt,
    Shift,
    Ctrl,
    Meta,
}

impl std::fmt::Display for ModifierKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alt => write!(f, "alt"),
            Self::Shift => write!(f, "shift"),
            Self::Ctrl => write!(f, "ctrl"),
            Self::Meta => write!(f, "meta"),
        }
    }
}

/// Transform engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tolerance for comparing scale factors and coordinates
    pub epsilon: f64,
    /// Rotations below this many degrees are not committed
    pub angle_epsilon_degrees: f64,
    /// Minimum bbox width/height in screen pixels while resizing
    pub min_bbox_size: f64,
    /// Decimal places used when writing numbers back to attributes
    pub decimals: u32,
    /// Handle hit-test radius in screen pixels
    pub handle_tolerance: f64,
    /// Determinant magnitude below which a transform is treated as singular
    pub singular_threshold: f64,
    /// Modifier turning a corner drag into a rotation
    pub rotate_modifier: ModifierKey,
    /// Modifier locking the aspect ratio of a corner scale
    pub aspect_modifier: ModifierKey,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            angle_epsilon_degrees: DEFAULT_ANGLE_EPSILON_DEGREES,
            min_bbox_size: MIN_BBOX_SIZE,
            decimals: DEFAULT_DECIMALS,
            handle_tolerance: HANDLE_TOLERANCE,
            singular_threshold: SINGULAR_THRESHOLD,
            rotate_modifier: ModifierKey::Alt,
            aspect_modifier: ModifierKey::Shift,
        }
    }
}

impl EngineConfig {
    /// Default location: `<config_dir>/vecshape/engine.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vecshape")
            .join("engine.toml")
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                ))
            }
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Load config if the file exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                ))
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("epsilon", self.epsilon)?;
        positive("angle_epsilon_degrees", self.angle_epsilon_degrees)?;
        positive("min_bbox_size", self.min_bbox_size)?;
        positive("handle_tolerance", self.handle_tolerance)?;
        positive("singular_threshold", self.singular_threshold)?;

        if self.decimals > MAX_DECIMALS {
            return Err(ConfigError::InvalidValue {
                key: "decimals".to_string(),
                reason: format!("must be at most {}", MAX_DECIMALS),
            });
        }

        if self.rotate_modifier == self.aspect_modifier {
            return Err(ConfigError::InvalidValue {
                key: "rotate_modifier".to_string(),
                reason: format!("conflicts with aspect_modifier ({})", self.aspect_modifier),
            });
        }

        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn positive(key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("must be a positive number, got {}", value),
        })
    }
}
