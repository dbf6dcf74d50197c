//! Orthogonal ("elbow") routing between two points.
//!
//! Each step leaves the current point along a single axis. The first step
//! honours the exit side of the start anchor; every later step starts from
//! a centered anchor and zig-zags, alternating axes while heading for the
//! end point. Routing stops once both remaining deltas drop below
//! [`COINCIDENT_EPSILON`].

use glam::DVec2;

use crate::errors::RouteError;
use crate::log::trace;
use crate::types::{Point, RelativeAnchor, sign};

use super::defaults::{COINCIDENT_EPSILON, MAX_ROUTE_STEPS, MIN_STEP_FRACTION};

/// The axis the previous routing step moved along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteAxis {
    /// No step taken yet.
    #[default]
    Unconstrained,
    Horizontal,
    Vertical,
}

impl RouteAxis {
    /// Axis of a single-axis direction. Anything that is not purely
    /// vertical counts as horizontal.
    fn of(direction: DVec2) -> Self {
        if direction.y != 0.0 && direction.x == 0.0 {
            RouteAxis::Vertical
        } else {
            RouteAxis::Horizontal
        }
    }

    fn other(self) -> Self {
        match self {
            RouteAxis::Horizontal => RouteAxis::Vertical,
            RouteAxis::Vertical => RouteAxis::Horizontal,
            RouteAxis::Unconstrained => RouteAxis::Unconstrained,
        }
    }

    /// Unit direction along this axis, signed like `delta`.
    fn toward(self, delta: DVec2) -> DVec2 {
        match self {
            RouteAxis::Horizontal => DVec2::new(sign(delta.x), 0.0),
            RouteAxis::Vertical => DVec2::new(0.0, sign(delta.y)),
            RouteAxis::Unconstrained => DVec2::ZERO,
        }
    }
}

/// Compute an axis-aligned route from `start` to `end`.
///
/// The result starts with `start` and ends with `end`. Consecutive points
/// differ along one axis, except that the last hop may also close a
/// residual smaller than [`COINCIDENT_EPSILON`] on the other axis. When the
/// two points already coincide the result is just `[end]`.
///
/// The entry side at `end` is not constrained; `_end_anchor` is accepted so
/// callers can pass both anchors symmetrically.
pub fn route(
    start: Point,
    start_anchor: RelativeAnchor,
    end: Point,
    _end_anchor: RelativeAnchor,
    last_axis: RouteAxis,
) -> Result<Vec<Point>, RouteError> {
    if !start.is_finite() || !end.is_finite() {
        return Err(RouteError::NonFinite { start, end });
    }

    let mut points = Vec::new();
    step(start, start_anchor, end, last_axis, 0, &mut points).map_err(|steps| {
        RouteError::DidNotConverge { steps, start, end }
    })?;
    Ok(points)
}

/// One routing step. Pushes `start` (or `end` on termination) and recurses.
/// On failure returns the number of steps taken.
fn step(
    start: Point,
    anchor: RelativeAnchor,
    end: Point,
    last_axis: RouteAxis,
    depth: usize,
    points: &mut Vec<Point>,
) -> Result<(), usize> {
    let delta = end - start;
    if delta.x.abs() < COINCIDENT_EPSILON && delta.y.abs() < COINCIDENT_EPSILON {
        points.push(end);
        return Ok(());
    }
    if depth >= MAX_ROUTE_STEPS {
        return Err(depth);
    }

    let direction = step_direction(anchor, delta, last_axis);
    let min_distance = delta.length() * MIN_STEP_FRACTION;

    let mut next = start;
    for i in 0..2 {
        if direction[i] == 0.0 {
            continue;
        }
        let remaining = delta[i].abs();
        next[i] = if remaining >= min_distance && direction[i] == sign(delta[i]) {
            // Land exactly on the end coordinate
            end[i]
        } else {
            start[i] + remaining.max(min_distance) * direction[i]
        };
    }

    if end.distance_squared(next) >= delta.length_squared() {
        next = start + min_distance * direction;
    }

    let axis = RouteAxis::of(direction);
    trace!(?start, ?next, ?axis, depth, "orthogonal route step");

    points.push(start);
    step(next, RelativeAnchor::CENTER, end, axis, depth + 1, points)
}

/// Pick the single-axis direction for a step.
fn step_direction(anchor: RelativeAnchor, delta: DVec2, last_axis: RouteAxis) -> DVec2 {
    let bias = anchor.exit_bias();

    if bias == DVec2::ZERO {
        let dominant = if delta.x.abs() > delta.y.abs() {
            RouteAxis::Horizontal
        } else {
            RouteAxis::Vertical
        };
        let axis = if dominant == last_axis {
            dominant.other()
        } else {
            dominant
        };
        let direction = axis.toward(delta);
        // Never take a zero-length step along an axis that is already done
        return if direction == DVec2::ZERO {
            dominant.toward(delta)
        } else {
            direction
        };
    }

    if bias.x != 0.0 && bias.y != 0.0 {
        let off = anchor.off_center();
        let preferred = if off.x > off.y {
            RouteAxis::Horizontal
        } else {
            RouteAxis::Vertical
        };
        let axis = if preferred == last_axis {
            preferred.other()
        } else {
            preferred
        };
        return match axis {
            RouteAxis::Horizontal => DVec2::new(bias.x, 0.0),
            _ => DVec2::new(0.0, bias.y),
        };
    }

    bias
}
