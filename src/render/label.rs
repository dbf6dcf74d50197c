//! Label anchor placement for multi-segment routes.

use crate::types::Point;

/// Midpoint of the widest horizontal run of `route`.
///
/// Segments with no horizontal extent are skipped, and the first of several
/// equally wide runs wins. Falls back to the first route point when nothing
/// qualifies (purely vertical routes), or the origin for an empty route.
pub fn place_label(route: &[Point]) -> Point {
    let mut best: Option<(f64, Point)> = None;

    for pair in route.windows(2) {
        let delta = pair[1] - pair[0];
        if delta.x == 0.0 {
            continue;
        }
        let width = delta.x.abs();
        if best.is_none_or(|(widest, _)| width > widest) {
            best = Some((width, pair[0] + delta * 0.5));
        }
    }

    match best {
        Some((_, midpoint)) => midpoint,
        None => route.first().copied().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn sole_horizontal_segment() {
        let route = [dvec2(0.0, 0.0), dvec2(50.0, 0.0), dvec2(50.0, 80.0)];
        assert_eq!(place_label(&route), dvec2(25.0, 0.0));
    }

    #[test]
    fn widest_run_wins() {
        let route = [
            dvec2(0.0, 0.0),
            dvec2(10.0, 0.0),
            dvec2(10.0, 40.0),
            dvec2(90.0, 40.0),
        ];
        assert_eq!(place_label(&route), dvec2(50.0, 40.0));
    }

    #[test]
    fn leftward_runs_count_by_magnitude() {
        let route = [
            dvec2(100.0, 0.0),
            dvec2(100.0, 20.0),
            dvec2(20.0, 20.0),
            dvec2(20.0, 60.0),
            dvec2(50.0, 60.0),
        ];
        assert_eq!(place_label(&route), dvec2(60.0, 20.0));
    }

    #[test]
    fn first_of_equal_runs_wins() {
        let route = [
            dvec2(0.0, 0.0),
            dvec2(30.0, 0.0),
            dvec2(30.0, 10.0),
            dvec2(60.0, 10.0),
        ];
        assert_eq!(place_label(&route), dvec2(15.0, 0.0));
    }

    #[test]
    fn vertical_route_falls_back_to_start() {
        let route = [dvec2(5.0, 0.0), dvec2(5.0, 80.0)];
        assert_eq!(place_label(&route), dvec2(5.0, 0.0));
        assert_eq!(place_label(&[]), dvec2(0.0, 0.0));
    }
}
