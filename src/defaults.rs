//! Tolerances and thresholds shared by the analyzer, matcher and resolver.
//!
//! Distances are in floor units (one unit is half the spacing between
//! adjacent dancers in a line); angles are in radians.

/// Two angles closer than this are treated as the same direction.
pub const ANGLE_TOLERANCE: f64 = 0.1;

/// Default tolerance for `is_approx`.
pub const APPROX_DELTA: f64 = 0.1;

/// Dancers side by side and closer than this can hold hands.
pub const HANDHOLD_DISTANCE: f64 = 2.1;

/// A dancer further away than this is never someone's partner.
pub const PARTNER_DISTANCE: f64 = 3.0;

/// Distance ties between center candidates are broken at this gap.
pub const CENTER_GAP: f64 = 0.1;

/// Residual at which the clipped skew iteration stops.
pub const SKEW_TOLERANCE: f64 = 0.001;

/// Iteration cap for the clipped skew solver.
pub const SKEW_MAX_ITERATIONS: usize = 100;

/// Off-diagonal terms below this make the 2x2 SVD take a shortcut.
pub const SVD_EPSILON: f64 = 0.0001;

/// A transform with a smaller determinant is considered singular.
pub const SINGULAR_EPSILON: f64 = 1.0e-12;

/// Snapping only moves dancers when the fitted offset is at least this big.
pub const SNAP_THRESHOLD: f64 = 0.1;
