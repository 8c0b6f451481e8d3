//! Error handling for VecShape
//!
//! Provides error types for the layers of the engine:
//! - Transform errors (coordinate mapping, degenerate geometry)
//! - Configuration errors (loading, saving, validation)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Axis of a bounding box or scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}

/// Transform error type
///
/// Raised by the geometry operations when a transform cannot be applied
/// faithfully. The interaction layer turns every one of these into an abort
/// that leaves the element untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// The host coordinate transform has no inverse
    #[error("Coordinate transform is singular (determinant {determinant:e})")]
    SingularTransform {
        /// Determinant of the linear part of the transform.
        determinant: f64,
    },

    /// The shape has no usable extent along an axis the operation scales
    #[error("Cannot scale along {axis}: source extent is degenerate")]
    DegenerateExtent {
        /// The axis whose extent is near zero.
        axis: Axis,
    },

    /// The computed geometry contains NaN or infinite coordinates
    #[error("Transform produced non-finite geometry")]
    NonFiniteGeometry,

    /// A handle name that does not map to any handle
    #[error("Unknown handle: {name}")]
    UnknownHandle {
        /// The unrecognised handle name.
        name: String,
    },
}

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration value is out of its valid range
    #[error("Invalid setting '{key}': {reason}")]
    InvalidValue {
        /// The offending key.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The configuration file extension is not supported
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Main error type for VecShape
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Transform error
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
