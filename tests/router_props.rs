//! Property tests for routing and path emission.

use float_cmp::approx_eq;
use glam::{DVec2, dvec2};
use proptest::prelude::*;
use tether::render::path_builder::{PathBuilder, PathCommand};
use tether::render::router::{RouteAxis, route};
use tether::render::tips::emit_tip;
use tether::{ConnectorConfig, Frame, Point, Rect, RelativeAnchor, TipKind, TipSpec};

const EPSILON: f64 = 0.1;

// ===================
// Strategies
// ===================

fn point_strategy() -> impl Strategy<Value = Point> {
    (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| dvec2(x, y))
}

/// Mostly 0, 0.5 or 1, sometimes an arbitrary fraction outside the box.
fn fraction_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        3 => prop::sample::select(vec![0.0, 0.5, 1.0]),
        1 => -0.5f64..1.5,
    ]
}

fn anchor_strategy() -> impl Strategy<Value = RelativeAnchor> {
    (fraction_strategy(), fraction_strategy()).prop_map(|(x, y)| RelativeAnchor::new(x, y))
}

fn last_axis_strategy() -> impl Strategy<Value = RouteAxis> {
    prop::sample::select(vec![
        RouteAxis::Unconstrained,
        RouteAxis::Horizontal,
        RouteAxis::Vertical,
    ])
}

fn tip_kind_strategy() -> impl Strategy<Value = TipKind> {
    prop::sample::select(vec![
        TipKind::Arrow,
        TipKind::Triangle,
        TipKind::Circle,
        TipKind::Square,
        TipKind::Diamond,
    ])
}

// ===================
// Property Test Functions
// ===================

/// Routes always finish, starting at `start` and ending exactly at `end`.
fn check_route_endpoints(
    start: Point,
    anchor: RelativeAnchor,
    end: Point,
    last_axis: RouteAxis,
) -> Result<(), TestCaseError> {
    let points = route(start, anchor, end, RelativeAnchor::CENTER, last_axis)
        .map_err(|e| TestCaseError::fail(e.to_string()))?;

    prop_assert_eq!(points.last().copied(), Some(end));
    let delta = (end - start).abs();
    if delta.x < EPSILON && delta.y < EPSILON {
        prop_assert_eq!(points, vec![end]);
    } else {
        prop_assert!(points.len() >= 2, "route too short: {points:?}");
        prop_assert_eq!(points[0], start);
    }
    Ok(())
}

/// Every segment moves along a single axis, up to the coincidence epsilon.
fn check_route_is_orthogonal(
    start: Point,
    anchor: RelativeAnchor,
    end: Point,
    last_axis: RouteAxis,
) -> Result<(), TestCaseError> {
    let points = route(start, anchor, end, RelativeAnchor::CENTER, last_axis)
        .map_err(|e| TestCaseError::fail(e.to_string()))?;

    for pair in points.windows(2) {
        let d = (pair[1] - pair[0]).abs();
        prop_assert!(
            d.x < EPSILON || d.y < EPSILON,
            "diagonal segment {:?} -> {:?} in {points:?}",
            pair[0],
            pair[1]
        );
    }
    Ok(())
}

/// Rotating a vector never changes its length.
fn check_transpose_preserves_length(
    rotation: f64,
    v: DVec2,
) -> Result<(), TestCaseError> {
    let mut builder = PathBuilder::new(0.0, 0.0);
    builder.set_rotation(rotation);
    let (x, y) = builder.transpose(v.x, v.y);
    prop_assert!(
        approx_eq!(f64, dvec2(x, y).length(), v.length(), epsilon = 1e-9),
        "|{v:?}| changed under rotation {rotation}"
    );
    Ok(())
}

/// Tip glyphs leave the pen where they found it, at any angle.
fn check_tip_returns_to_origin(
    kind: TipKind,
    flip: bool,
    rotation: f64,
    size: f64,
) -> Result<(), TestCaseError> {
    let mut builder = PathBuilder::new(0.0, 0.0);
    emit_tip(TipSpec { kind, flip }, rotation, size, &mut builder);

    let mut pen = DVec2::ZERO;
    for command in builder.commands() {
        match *command {
            PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => pen = dvec2(x, y),
            PathCommand::MoveBy { dx, dy }
            | PathCommand::LineBy { dx, dy }
            | PathCommand::ArcBy { dx, dy, .. } => pen += dvec2(dx, dy),
        }
    }
    prop_assert!(approx_eq!(f64, pen.x, 0.0, epsilon = 1e-9), "pen ended at {pen:?}");
    prop_assert!(approx_eq!(f64, pen.y, 0.0, epsilon = 1e-9), "pen ended at {pen:?}");
    prop_assert!(approx_eq!(f64, builder.rotation(), 0.0, epsilon = 1e-12));
    Ok(())
}

/// Direct connectors are one straight segment with matching end rotations.
fn check_direct_positioning(a: Point, b: Point) -> Result<(), TestCaseError> {
    let config = ConnectorConfig {
        end_tip: TipSpec::NONE,
        ..ConnectorConfig::default()
    };
    let from = Rect::new(a.x, a.y, 0.0, 0.0);
    let to = Rect::new(b.x, b.y, 0.0, 0.0);
    let rendered = tether::render_connector(from, to, Frame::default(), &config)
        .map_err(|e| TestCaseError::fail(e.to_string()))?;
    let positioning = rendered.positioning;

    prop_assert_eq!(positioning.route, vec![a, b]);
    prop_assert_eq!(positioning.rotation_start, positioning.rotation_end);
    Ok(())
}

// ===================
// Proptest Wrappers
// ===================

proptest! {
    #[test]
    fn route_endpoints(
        start in point_strategy(),
        anchor in anchor_strategy(),
        end in point_strategy(),
        last_axis in last_axis_strategy(),
    ) {
        check_route_endpoints(start, anchor, end, last_axis)?;
    }

    #[test]
    fn route_endpoints_near_coincident(
        start in point_strategy(),
        anchor in anchor_strategy(),
        offset in (-0.3f64..0.3, -0.3f64..0.3),
    ) {
        let end = start + dvec2(offset.0, offset.1);
        check_route_endpoints(start, anchor, end, RouteAxis::Unconstrained)?;
    }

    #[test]
    fn route_is_orthogonal(
        start in point_strategy(),
        anchor in anchor_strategy(),
        end in point_strategy(),
        last_axis in last_axis_strategy(),
    ) {
        check_route_is_orthogonal(start, anchor, end, last_axis)?;
    }

    #[test]
    fn route_is_orthogonal_for_nearly_aligned_points(
        start in point_strategy(),
        anchor in anchor_strategy(),
        length in -500.0f64..500.0,
        drift in -2.0f64..2.0,
        vertical in any::<bool>(),
    ) {
        let offset = if vertical { dvec2(drift, length) } else { dvec2(length, drift) };
        check_route_is_orthogonal(start, anchor, start + offset, RouteAxis::Unconstrained)?;
    }

    #[test]
    fn transpose_preserves_length(rotation in -20.0f64..20.0, v in point_strategy()) {
        check_transpose_preserves_length(rotation, v)?;
    }

    #[test]
    fn tip_returns_to_origin(
        kind in tip_kind_strategy(),
        flip in any::<bool>(),
        rotation in -7.0f64..7.0,
        size in 0.5f64..10.0,
    ) {
        check_tip_returns_to_origin(kind, flip, rotation, size)?;
    }

    #[test]
    fn direct_positioning(a in point_strategy(), b in point_strategy()) {
        check_direct_positioning(a, b)?;
    }
}
