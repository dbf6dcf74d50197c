//! Tip glyphs drawn at connector endpoints.
//!
//! Each glyph is traced in a local frame where +x points along the route
//! and the glyph spans `TIP_SCALE * size` forward of the pen. Every trace
//! starts and ends at the local origin, so the pen is back on the route
//! once the glyph is done.

use enum_dispatch::enum_dispatch;

use crate::config::{TipKind, TipSpec};

use super::defaults::{TIP_HALF_SPAN, TIP_SCALE};
use super::path_builder::PathBuilder;

/// Emit `tip` into `builder` at the builder's current pen position,
/// oriented along `rotation` (radians).
///
/// The builder's rotation is restored before returning.
pub fn emit_tip(tip: TipSpec, rotation: f64, size: f64, builder: &mut PathBuilder) {
    let Some(glyph) = TipGlyph::for_kind(tip.kind) else {
        return;
    };

    builder.rotate(rotation);
    let mut pen = GlyphPen {
        builder: &mut *builder,
        forward: if tip.flip { -1.0 } else { 1.0 },
    };
    glyph.trace(&mut pen, size);
    builder.rotate(-rotation);
}

/// Relative drawing in glyph space.
///
/// A flipped pen mirrors the forward axis, so arcs also swap their sweep
/// direction to keep the mirrored outline.
pub struct GlyphPen<'b> {
    builder: &'b mut PathBuilder,
    forward: f64,
}

impl GlyphPen<'_> {
    fn line(&mut self, dx: f64, dy: f64) {
        self.builder.line_relative(dx * self.forward, dy);
    }

    fn jump(&mut self, dx: f64, dy: f64) {
        self.builder.move_relative(dx * self.forward, dy);
    }

    fn arc(&mut self, radius: f64, large_arc: bool, sweep: bool, dx: f64, dy: f64) {
        let sweep = if self.forward < 0.0 { !sweep } else { sweep };
        self.builder
            .arc_relative(radius, radius, 0.0, large_arc, sweep, dx * self.forward, dy);
    }
}

/// Common behavior for all tip glyphs
#[enum_dispatch]
pub trait Glyph {
    /// Trace the outline for a connector of width `size`.
    fn trace(&self, pen: &mut GlyphPen<'_>, size: f64);
}

/// Open chevron whose point sits `3 * size` forward.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrowGlyph;

impl Glyph for ArrowGlyph {
    fn trace(&self, pen: &mut GlyphPen<'_>, size: f64) {
        let reach = TIP_SCALE * size;
        pen.line(reach, 0.0);
        pen.jump(-reach, reach);
        pen.line(reach, -reach);
        pen.line(-reach, -reach);
        pen.jump(0.0, reach);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TriangleGlyph;

impl Glyph for TriangleGlyph {
    fn trace(&self, pen: &mut GlyphPen<'_>, size: f64) {
        let reach = TIP_SCALE * size;
        let half = TIP_HALF_SPAN * size;
        pen.line(0.0, half);
        pen.line(reach, -half);
        pen.line(-reach, -half);
        pen.line(0.0, half);
    }
}

/// Two semicircles between the pen and the point `3 * size` forward.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleGlyph;

impl Glyph for CircleGlyph {
    fn trace(&self, pen: &mut GlyphPen<'_>, size: f64) {
        let radius = TIP_HALF_SPAN * size;
        let diameter = 2.0 * radius;
        pen.jump(diameter, 0.0);
        pen.arc(radius, true, false, -diameter, 0.0);
        pen.arc(radius, true, false, diameter, 0.0);
        pen.jump(-diameter, 0.0);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SquareGlyph;

impl Glyph for SquareGlyph {
    fn trace(&self, pen: &mut GlyphPen<'_>, size: f64) {
        let reach = TIP_SCALE * size;
        let half = TIP_HALF_SPAN * size;
        pen.line(0.0, half);
        pen.line(reach, 0.0);
        pen.line(0.0, -reach);
        pen.line(-reach, 0.0);
        pen.line(0.0, half);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DiamondGlyph;

impl Glyph for DiamondGlyph {
    fn trace(&self, pen: &mut GlyphPen<'_>, size: f64) {
        let half = TIP_HALF_SPAN * size;
        pen.line(half, half);
        pen.line(half, -half);
        pen.line(-half, -half);
        pen.line(-half, half);
    }
}

/// Every drawable tip shape.
#[enum_dispatch(Glyph)]
#[derive(Debug, Clone, Copy)]
pub enum TipGlyph {
    ArrowGlyph,
    TriangleGlyph,
    CircleGlyph,
    SquareGlyph,
    DiamondGlyph,
}

impl TipGlyph {
    /// The glyph for a tip kind, or `None` when nothing is drawn.
    pub fn for_kind(kind: TipKind) -> Option<Self> {
        let glyph = match kind {
            TipKind::None => return None,
            TipKind::Arrow => ArrowGlyph.into(),
            TipKind::Triangle => TriangleGlyph.into(),
            TipKind::Circle => CircleGlyph.into(),
            TipKind::Square => SquareGlyph.into(),
            TipKind::Diamond => DiamondGlyph.into(),
        };
        Some(glyph)
    }
}
