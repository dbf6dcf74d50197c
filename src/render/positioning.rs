//! Turning anchor rectangles into concrete route geometry.

use glam::DVec2;

use crate::config::{ConnectorConfig, RoutingKind};
use crate::errors::RouteError;
use crate::types::{Frame, Point, Rect, RelativeAnchor};

use super::label::place_label;
use super::router::{self, RouteAxis};

/// Absolute point for `anchor` inside `rect`, shifted into `frame`.
pub fn resolve_point(rect: Rect, anchor: RelativeAnchor, frame: Frame) -> Point {
    rect.point_at(anchor) + frame.offset()
}

/// Resolved geometry of one connector.
#[derive(Debug, Clone, PartialEq)]
pub struct Positioning {
    /// First drawn point, after any start tip inset.
    pub start: Point,
    /// Last drawn point, after any end tip inset.
    pub end: Point,
    /// Direction leaving `start`, radians.
    pub rotation_start: f64,
    /// Direction arriving at `end`, radians.
    pub rotation_end: f64,
    /// Always at least two points, `start` first and `end` last.
    pub route: Vec<Point>,
}

impl Positioning {
    /// Compute the geometry for a connector between `from` and `to`.
    ///
    /// Tipped ends are pulled back along their segment by
    /// [`ConnectorConfig::tip_size`] so the glyph, not the line, touches the
    /// anchor.
    pub fn calculate(
        from: Rect,
        to: Rect,
        frame: Frame,
        config: &ConnectorConfig,
    ) -> Result<Self, RouteError> {
        let start = resolve_point(from, config.start_anchor, frame);
        let end = resolve_point(to, config.end_anchor, frame);
        if !start.is_finite() || !end.is_finite() {
            return Err(RouteError::NonFinite { start, end });
        }

        let mut positioning = match config.kind {
            RoutingKind::Direct => {
                let rotation = angle(end - start);
                Positioning {
                    start,
                    end,
                    rotation_start: rotation,
                    rotation_end: rotation,
                    route: vec![start, end],
                }
            }
            RoutingKind::Orthogonal => {
                let route = router::route(
                    start,
                    config.start_anchor,
                    end,
                    config.end_anchor,
                    RouteAxis::Unconstrained,
                )?;
                Self::from_route(start, end, route)
            }
        };

        let inset = config.tip_size();
        if !config.end_tip.is_none() {
            positioning.end -= inset * DVec2::from_angle(positioning.rotation_end);
            if let Some(last) = positioning.route.last_mut() {
                *last = positioning.end;
            }
        }
        if !config.start_tip.is_none() {
            positioning.start += inset * DVec2::from_angle(positioning.rotation_start);
            if let Some(first) = positioning.route.first_mut() {
                *first = positioning.start;
            }
        }

        Ok(positioning)
    }

    fn from_route(start: Point, end: Point, route: Vec<Point>) -> Self {
        let n = route.len();
        if n < 2 {
            // Coincident endpoints
            return Positioning {
                start,
                end,
                rotation_start: 0.0,
                rotation_end: 0.0,
                route: vec![start, end],
            };
        }
        Positioning {
            start,
            end,
            rotation_start: angle(route[1] - route[0]),
            rotation_end: angle(route[n - 1] - route[n - 2]),
            route,
        }
    }

    /// Where a label sits, plus its rotation for direct connectors.
    ///
    /// Direct labels ride the middle of the line and follow its angle;
    /// orthogonal labels sit upright on the widest horizontal run.
    pub fn label_placement(&self, kind: RoutingKind) -> (Point, Option<f64>) {
        match kind {
            RoutingKind::Direct => ((self.start + self.end) * 0.5, Some(self.rotation_start)),
            RoutingKind::Orthogonal => (place_label(&self.route), None),
        }
    }
}

fn angle(v: DVec2) -> f64 {
    v.y.atan2(v.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TipSpec;
    use glam::dvec2;
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 1e-9;

    fn assert_point_eq(actual: Point, expected: Point) {
        assert!(
            (actual - expected).length() < EPSILON,
            "{actual:?} != {expected:?}"
        );
    }

    fn bare(kind: RoutingKind) -> ConnectorConfig {
        ConnectorConfig {
            kind,
            start_tip: TipSpec::NONE,
            end_tip: TipSpec::NONE,
            ..ConnectorConfig::default()
        }
    }

    #[test]
    fn resolve_point_applies_frame() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        let frame = Frame::new(dvec2(0.0, 200.0), dvec2(5.0, 5.0));
        assert_eq!(
            resolve_point(rect, RelativeAnchor::BOTTOM_RIGHT, frame),
            dvec2(105.0, 265.0)
        );
    }

    #[test]
    fn direct_between_bottom_and_top_anchors() {
        let config = ConnectorConfig {
            start_anchor: RelativeAnchor::BOTTOM,
            end_anchor: RelativeAnchor::TOP,
            ..bare(RoutingKind::Direct)
        };
        let from = Rect::new(-50.0, -40.0, 100.0, 40.0);
        let to = Rect::new(50.0, 0.0, 100.0, 40.0);
        let positioning = Positioning::calculate(from, to, Frame::default(), &config).unwrap();

        assert_eq!(positioning.rotation_start, 0.0);
        assert_eq!(positioning.rotation_end, 0.0);
        assert_eq!(positioning.route, vec![dvec2(0.0, 0.0), dvec2(100.0, 0.0)]);
    }

    #[test]
    fn end_tip_insets_along_rotation() {
        let config = ConnectorConfig {
            end_tip: TipSpec::ARROW,
            ..bare(RoutingKind::Direct)
        };
        let from = Rect::new(0.0, 0.0, 0.0, 0.0);
        let to = Rect::new(0.0, 100.0, 0.0, 0.0);
        let positioning = Positioning::calculate(from, to, Frame::default(), &config).unwrap();

        assert_eq!(positioning.rotation_end, FRAC_PI_2);
        assert_point_eq(positioning.end, dvec2(0.0, 94.0));
        assert_eq!(positioning.route.last(), Some(&positioning.end));
    }

    #[test]
    fn start_tip_insets_forward() {
        let config = ConnectorConfig {
            start_tip: TipSpec::new(crate::config::TipKind::Circle),
            width: 1.0,
            ..bare(RoutingKind::Direct)
        };
        let from = Rect::new(0.0, 0.0, 0.0, 0.0);
        let to = Rect::new(30.0, 0.0, 0.0, 0.0);
        let positioning = Positioning::calculate(from, to, Frame::default(), &config).unwrap();

        assert_point_eq(positioning.start, dvec2(3.0, 0.0));
        assert_eq!(positioning.route[0], positioning.start);
        assert_eq!(positioning.end, dvec2(30.0, 0.0));
    }

    #[test]
    fn orthogonal_rotations_follow_first_and_last_segment() {
        let config = ConnectorConfig {
            start_anchor: RelativeAnchor::BOTTOM,
            ..bare(RoutingKind::Orthogonal)
        };
        // Point-sized rects so the anchor lands exactly on the origin
        let from = Rect::new(0.0, 0.0, 0.0, 0.0);
        let to = Rect::new(50.0, 80.0, 0.0, 0.0);
        let positioning = Positioning::calculate(from, to, Frame::default(), &config).unwrap();

        assert_eq!(
            positioning.route,
            vec![dvec2(0.0, 0.0), dvec2(0.0, 80.0), dvec2(50.0, 80.0)]
        );
        assert_eq!(positioning.rotation_start, FRAC_PI_2);
        assert_eq!(positioning.rotation_end, 0.0);
    }

    #[test]
    fn coincident_orthogonal_endpoints_widen_route() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        let positioning =
            Positioning::calculate(rect, rect, Frame::default(), &bare(RoutingKind::Orthogonal))
                .unwrap();

        assert_eq!(positioning.route, vec![dvec2(20.0, 20.0), dvec2(20.0, 20.0)]);
        assert_eq!(positioning.rotation_start, 0.0);
        assert_eq!(positioning.rotation_end, 0.0);
    }

    #[test]
    fn non_finite_rect_is_reported() {
        let from = Rect::new(f64::INFINITY, 0.0, 1.0, 1.0);
        let to = Rect::new(0.0, 0.0, 1.0, 1.0);
        let err = Positioning::calculate(from, to, Frame::default(), &bare(RoutingKind::Direct));
        assert!(matches!(err, Err(RouteError::NonFinite { .. })));
    }

    #[test]
    fn label_placement_by_kind() {
        let positioning = Positioning {
            start: dvec2(0.0, 0.0),
            end: dvec2(50.0, 80.0),
            rotation_start: FRAC_PI_2,
            rotation_end: 0.0,
            route: vec![dvec2(0.0, 0.0), dvec2(50.0, 0.0), dvec2(50.0, 80.0)],
        };
        assert_eq!(
            positioning.label_placement(RoutingKind::Direct),
            (dvec2(25.0, 40.0), Some(FRAC_PI_2))
        );
        assert_eq!(
            positioning.label_placement(RoutingKind::Orthogonal),
            (dvec2(25.0, 0.0), None)
        );
    }
}
