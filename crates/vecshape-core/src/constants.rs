//! Default tolerances and limits shared across the engine.

/// Scale factors closer than this are considered equal.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Rotations smaller than this (degrees) are discarded at commit.
pub const DEFAULT_ANGLE_EPSILON_DEGREES: f64 = 1e-3;

/// Minimum width/height in screen pixels during an interactive resize.
pub const MIN_BBOX_SIZE: f64 = 10.0;

/// Decimal places kept when serializing numbers into attributes.
pub const DEFAULT_DECIMALS: u32 = 3;

/// Largest supported rounding precision.
pub const MAX_DECIMALS: u32 = 9;

/// Hit-test radius for handles, in screen pixels.
pub const HANDLE_TOLERANCE: f64 = 6.0;

/// Transforms whose determinant magnitude falls below this are singular.
pub const SINGULAR_THRESHOLD: f64 = 1e-12;

/// Source extents below this cannot be scaled.
pub const DEGENERATE_EXTENT: f64 = 1e-9;
