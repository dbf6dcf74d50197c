//! Geometric primitives shared by routing, positioning and rendering.
//!
//! Points are plain `glam::DVec2` values in the host's coordinate space
//! (y grows downwards, like the screen). Validation happens at the edges:
//! `try_new` constructors reject NaN and infinities so the pure geometry
//! below never has to.

use std::fmt;

use glam::{DVec2, dvec2};

/// An absolute point in the shared 2D space.
pub type Point = DVec2;

/// Error type for invalid numeric inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is negative when non-negative required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

fn check_non_negative(val: f64) -> Result<f64, NumericError> {
    let val = check_finite(val)?;
    if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Sign of a value with `sign(0) == 0`.
///
/// `f64::signum` maps zero to one, which would give a centered anchor an
/// exit side.
#[inline]
pub fn sign(val: f64) -> f64 {
    if val > 0.0 {
        1.0
    } else if val < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Axis-aligned bounding box of an anchor element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: DVec2,
    pub size: DVec2,
}

impl Rect {
    /// Create a rect (unchecked). Use `try_new` for host-provided values.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            origin: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }

    /// Create a rect with validation (rejects NaN, infinite, negative sizes)
    pub fn try_new(x: f64, y: f64, width: f64, height: f64) -> Result<Self, NumericError> {
        Ok(Rect::new(
            check_finite(x)?,
            check_finite(y)?,
            check_non_negative(width)?,
            check_non_negative(height)?,
        ))
    }

    pub fn width(&self) -> f64 {
        self.size.x
    }

    pub fn height(&self) -> f64 {
        self.size.y
    }

    pub fn center(&self) -> Point {
        self.origin + self.size * 0.5
    }

    /// The absolute point at a fractional position inside this rect.
    pub fn point_at(&self, anchor: RelativeAnchor) -> Point {
        self.origin + self.size * anchor.as_vec()
    }
}

/// Fractional position inside an element's bounding box.
///
/// Components are nominally in `[0, 1]`; values outside that range are
/// allowed and simply place the point outside the box. The distance from
/// 0.5 on each axis picks the side a route prefers to leave from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeAnchor {
    pub x: f64,
    pub y: f64,
}

impl RelativeAnchor {
    pub const CENTER: RelativeAnchor = RelativeAnchor { x: 0.5, y: 0.5 };
    pub const TOP: RelativeAnchor = RelativeAnchor { x: 0.5, y: 0.0 };
    pub const BOTTOM: RelativeAnchor = RelativeAnchor { x: 0.5, y: 1.0 };
    pub const LEFT: RelativeAnchor = RelativeAnchor { x: 0.0, y: 0.5 };
    pub const RIGHT: RelativeAnchor = RelativeAnchor { x: 1.0, y: 0.5 };
    pub const TOP_LEFT: RelativeAnchor = RelativeAnchor { x: 0.0, y: 0.0 };
    pub const TOP_RIGHT: RelativeAnchor = RelativeAnchor { x: 1.0, y: 0.0 };
    pub const BOTTOM_LEFT: RelativeAnchor = RelativeAnchor { x: 0.0, y: 1.0 };
    pub const BOTTOM_RIGHT: RelativeAnchor = RelativeAnchor { x: 1.0, y: 1.0 };

    /// Create an anchor (unchecked).
    pub const fn new(x: f64, y: f64) -> Self {
        RelativeAnchor { x, y }
    }

    /// Create an anchor with validation (rejects NaN and infinite components)
    pub fn try_new(x: f64, y: f64) -> Result<Self, NumericError> {
        Ok(RelativeAnchor::new(check_finite(x)?, check_finite(y)?))
    }

    /// Look up one of the nine compass anchors by name.
    pub fn named(name: &str) -> Option<Self> {
        let anchor = match name.to_ascii_lowercase().as_str() {
            "center" | "centre" | "c" => Self::CENTER,
            "top" | "n" | "north" => Self::TOP,
            "bottom" | "s" | "south" => Self::BOTTOM,
            "left" | "w" | "west" => Self::LEFT,
            "right" | "e" | "east" => Self::RIGHT,
            "top-left" | "nw" | "northwest" => Self::TOP_LEFT,
            "top-right" | "ne" | "northeast" => Self::TOP_RIGHT,
            "bottom-left" | "sw" | "southwest" => Self::BOTTOM_LEFT,
            "bottom-right" | "se" | "southeast" => Self::BOTTOM_RIGHT,
            _ => return None,
        };
        Some(anchor)
    }

    pub fn as_vec(self) -> DVec2 {
        dvec2(self.x, self.y)
    }

    /// Preferred exit side: `(sign(x - 0.5), sign(y - 0.5))`.
    pub fn exit_bias(self) -> DVec2 {
        dvec2(sign(self.x - 0.5), sign(self.y - 0.5))
    }

    /// Distance of each component from the center line.
    pub fn off_center(self) -> DVec2 {
        dvec2((self.x - 0.5).abs(), (self.y - 0.5).abs())
    }

    pub fn is_centered(self) -> bool {
        self.exit_bias() == DVec2::ZERO
    }
}

impl Default for RelativeAnchor {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Coordinate frame the connector is drawn into.
///
/// Anchor rects arrive in viewport coordinates; the drawing lives inside a
/// (possibly scrolled) parent, so every resolved point is shifted by
/// `scroll - parent_origin`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub scroll: DVec2,
    pub parent_origin: DVec2,
}

impl Frame {
    pub fn new(scroll: DVec2, parent_origin: DVec2) -> Self {
        Frame {
            scroll,
            parent_origin,
        }
    }

    pub fn offset(&self) -> DVec2 {
        self.scroll - self.parent_origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_of_zero_is_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(3.5), 1.0);
        assert_eq!(sign(-0.25), -1.0);
    }

    #[test]
    fn rect_try_new_rejects_nan() {
        assert_eq!(Rect::try_new(f64::NAN, 0.0, 1.0, 1.0), Err(NumericError::NaN));
    }

    #[test]
    fn rect_try_new_rejects_negative_size() {
        assert_eq!(Rect::try_new(0.0, 0.0, -1.0, 1.0), Err(NumericError::Negative));
        assert_eq!(
            Rect::try_new(0.0, 0.0, 1.0, f64::INFINITY),
            Err(NumericError::Infinite)
        );
    }

    #[test]
    fn rect_point_at_anchor() {
        let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(rect.point_at(RelativeAnchor::CENTER), dvec2(60.0, 40.0));
        assert_eq!(rect.point_at(RelativeAnchor::BOTTOM_RIGHT), dvec2(110.0, 60.0));
        assert_eq!(rect.point_at(RelativeAnchor::TOP), dvec2(60.0, 20.0));
        assert_eq!(rect.center(), dvec2(60.0, 40.0));
    }

    #[test]
    fn anchor_exit_bias() {
        assert_eq!(RelativeAnchor::CENTER.exit_bias(), DVec2::ZERO);
        assert_eq!(RelativeAnchor::BOTTOM.exit_bias(), dvec2(0.0, 1.0));
        assert_eq!(RelativeAnchor::LEFT.exit_bias(), dvec2(-1.0, 0.0));
        assert_eq!(RelativeAnchor::TOP_RIGHT.exit_bias(), dvec2(1.0, -1.0));
        assert!(RelativeAnchor::CENTER.is_centered());
        assert!(!RelativeAnchor::new(0.5, 0.6).is_centered());
    }

    #[test]
    fn anchor_named_lookup() {
        assert_eq!(RelativeAnchor::named("Bottom"), Some(RelativeAnchor::BOTTOM));
        assert_eq!(RelativeAnchor::named("ne"), Some(RelativeAnchor::TOP_RIGHT));
        assert_eq!(RelativeAnchor::named("middle"), None);
    }

    #[test]
    fn anchor_try_new_rejects_infinity() {
        assert_eq!(
            RelativeAnchor::try_new(f64::NEG_INFINITY, 0.5),
            Err(NumericError::Infinite)
        );
        assert!(RelativeAnchor::try_new(1.5, -0.5).is_ok());
    }

    #[test]
    fn frame_offset_subtracts_parent() {
        let frame = Frame::new(dvec2(0.0, 30.0), dvec2(10.0, 5.0));
        assert_eq!(frame.offset(), dvec2(-10.0, 25.0));
    }
}
