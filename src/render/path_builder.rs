//! Turtle-style path builder for connector paths.
//!
//! The builder keeps a rotation accumulator next to the emitted commands.
//! Relative commands (`m`, `l`, `a`) are authored in a local frame where +x
//! is "forward" and are rotated into place as they are appended; absolute
//! commands (`M`, `L`) ignore the rotation entirely. This lets a tip glyph
//! be written once, pointing right, and reused at any route direction.
//!
//! # Example
//!
//! ```
//! use tether::render::path_builder::PathBuilder;
//!
//! let mut builder = PathBuilder::new(0.0, 0.0);
//! builder.line_absolute(10.0, 0.0);
//! builder.rotate(std::f64::consts::FRAC_PI_2);
//! // "forward 5" now points down the y axis
//! builder.line_relative(5.0, 0.0);
//! assert_eq!(builder.serialize(), "M 0 0 L 10 0 l 0 5");
//! ```

use std::fmt;

use super::svg::fmt_num;

/// A single emitted path command, already in absolute-frame deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// `M x y`
    MoveTo { x: f64, y: f64 },
    /// `m dx dy`
    MoveBy { dx: f64, dy: f64 },
    /// `L x y`
    LineTo { x: f64, y: f64 },
    /// `l dx dy`
    LineBy { dx: f64, dy: f64 },
    /// `a rx ry rotation large_arc sweep dx dy`
    ArcBy {
        rx: f64,
        ry: f64,
        rotation_deg: f64,
        large_arc: bool,
        sweep: bool,
        dx: f64,
        dy: f64,
    },
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PathCommand::MoveTo { x, y } => write!(f, "M {} {}", fmt_num(x), fmt_num(y)),
            PathCommand::MoveBy { dx, dy } => write!(f, "m {} {}", fmt_num(dx), fmt_num(dy)),
            PathCommand::LineTo { x, y } => write!(f, "L {} {}", fmt_num(x), fmt_num(y)),
            PathCommand::LineBy { dx, dy } => write!(f, "l {} {}", fmt_num(dx), fmt_num(dy)),
            PathCommand::ArcBy {
                rx,
                ry,
                rotation_deg,
                large_arc,
                sweep,
                dx,
                dy,
            } => write!(
                f,
                "a {} {} {} {} {} {} {}",
                fmt_num(rx),
                fmt_num(ry),
                fmt_num(rotation_deg),
                u8::from(large_arc),
                u8::from(sweep),
                fmt_num(dx),
                fmt_num(dy)
            ),
        }
    }
}

/// Builder for connector path data.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    commands: Vec<PathCommand>,
    /// Radians, never normalized.
    rotation: f64,
}

impl PathBuilder {
    /// Start a path with an absolute move to `(x, y)` and zero rotation.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            commands: vec![PathCommand::MoveTo { x, y }],
            rotation: 0.0,
        }
    }

    /// Add `delta` radians to the rotation accumulator.
    pub fn rotate(&mut self, delta: f64) {
        self.rotation += delta;
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Rotate a local-frame vector by the current accumulator.
    pub fn transpose(&self, dx: f64, dy: f64) -> (f64, f64) {
        let (sin, cos) = self.rotation.sin_cos();
        (dx * cos - dy * sin, dx * sin + dy * cos)
    }

    /// Pen-up relative move, in the local frame.
    pub fn move_relative(&mut self, dx: f64, dy: f64) {
        let (dx, dy) = self.transpose(dx, dy);
        self.commands.push(PathCommand::MoveBy { dx, dy });
    }

    /// Pen-down relative line, in the local frame.
    pub fn line_relative(&mut self, dx: f64, dy: f64) {
        let (dx, dy) = self.transpose(dx, dy);
        self.commands.push(PathCommand::LineBy { dx, dy });
    }

    /// Relative elliptical arc. Only the endpoint delta is rotated; radii
    /// and the ellipse angle are written as given.
    #[allow(clippy::too_many_arguments)]
    pub fn arc_relative(
        &mut self,
        rx: f64,
        ry: f64,
        rotation_deg: f64,
        large_arc: bool,
        sweep: bool,
        dx: f64,
        dy: f64,
    ) {
        let (dx, dy) = self.transpose(dx, dy);
        self.commands.push(PathCommand::ArcBy {
            rx,
            ry,
            rotation_deg,
            large_arc,
            sweep,
            dx,
            dy,
        });
    }

    /// Absolute line, unaffected by rotation.
    pub fn line_absolute(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::LineTo { x, y });
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Join all commands with single spaces, producing SVG path data.
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PathBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{command}")?;
        }
        Ok(())
    }
}
