//! # VecShape
//!
//! Interactive move, scale and rotate for vector shape elements (rectangles,
//! circles, ellipses, lines, polylines, polygons and paths) held in a retained
//! document tree.
//!
//! ## Architecture
//!
//! VecShape is organized as a workspace with multiple crates:
//!
//! 1. **vecshape-core** - Errors, engine configuration, shared constants
//! 2. **vecshape-designer** - Path codec, geometry model, coordinate mapping,
//!    handles, transform operations, drag sessions and the interaction state machine
//! 3. **vecshape** - Command-line front end that drives the engine on element JSON
//!
//! ## Features
//!
//! - **Geometry-preserving transforms**: shapes are rewritten in their own
//!   attributes instead of gaining a wrapper transform
//! - **Kind morphing**: circles become ellipses under anisotropic scale;
//!   rectangles, circles and ellipses become polygons or arc paths when rotated
//! - **Abort safety**: every failed gesture restores the pre-drag snapshot

pub mod cli;

use std::path::Path;

pub use vecshape_core as core;
pub use vecshape_designer as designer;

pub use vecshape_core::{ConfigError, EngineConfig, Error, ModifierKey, Result, TransformError};
pub use vecshape_designer::{
    BoundingBox, Commit, CoordinateMapper, Element, Handle, HandleId, Interaction, Modifiers,
    Point, Preview, SessionOutcome, Shape, TransformSession,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr so command results on stdout stay machine readable
/// - RUST_LOG environment variable support
/// - Pretty or JSON formatting
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}

/// Load the engine configuration from `path`, or from the default location
/// (falling back to built-in defaults when nothing is there).
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::load_from_file(path)?,
        None => EngineConfig::load_or_default(&EngineConfig::default_path())?,
    };
    Ok(config)
}
