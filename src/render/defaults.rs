//! Default sizes and tuning constants (all in host coordinate units)

/// Stroke thickness when none is configured.
pub const WIDTH: f64 = 2.0;
pub const COLOR: &str = "black";

/// Tip glyphs are `TIP_SCALE * width` long; the line is inset by the same amount.
pub const TIP_SCALE: f64 = 3.0;
/// Half the lateral extent of triangle, square and diamond glyphs, in widths.
pub const TIP_HALF_SPAN: f64 = 1.5;

/// Points closer than this on both axes are treated as coincident.
pub const COINCIDENT_EPSILON: f64 = 0.1;
/// Fraction of the remaining distance used as the minimum router step.
pub const MIN_STEP_FRACTION: f64 = 0.10;
/// Upper bound on router steps; reaching it is reported, never truncated.
pub const MAX_ROUTE_STEPS: usize = 512;

/// Labels sit this far above their anchor point.
pub const LABEL_LIFT: f64 = 7.0;

/// Values smaller than this are written as `0` in path data.
pub const PATH_ZERO: f64 = 1e-9;
/// Significant digits kept when formatting path numbers.
pub const PATH_SIG_FIGS: i32 = 10;
