//! # VecShape Core
//!
//! Error types, engine configuration and shared constants used by the
//! VecShape transform engine.

pub mod config;
pub mod constants;
pub mod error;

pub use config::{EngineConfig, ModifierKey};
pub use error::{Axis, ConfigError, Error, Result, TransformError};
