//! Connector rendering pipeline
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes and tuning constants
//! - `path_builder`: Rotation-aware path command builder
//! - `router`: Orthogonal route computation
//! - `tips`: Tip glyphs drawn at connector ends
//! - `positioning`: Anchor resolution, rotations and tip insets
//! - `label`: Label placement on orthogonal routes
//! - `svg`: Number formatting and the SVG surface
//!
//! [`render_connector`] strings them together: positioning, then the path
//! string with both tips, then the label.

pub mod defaults;
pub mod label;
pub mod path_builder;
pub mod positioning;
pub mod router;
pub mod svg;
pub mod tips;

pub use path_builder::PathBuilder;
pub use positioning::Positioning;

use crate::config::{Color, ConnectorConfig};
use crate::errors::RouteError;
use crate::types::{Frame, Point, Rect};

/// A label ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel {
    pub text: String,
    /// Anchor point, before the upward lift.
    pub point: Point,
    /// Rotation in radians; only direct connectors turn their label.
    pub rotation: Option<f64>,
}

/// Everything a surface needs to draw one connector.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedConnector {
    /// Path data using `M`, `m`, `L`, `l` and `a` commands.
    pub path: String,
    pub color: Color,
    pub width: f64,
    pub label: Option<PlacedLabel>,
    pub positioning: Positioning,
}

/// Emit the path for a computed positioning: start tip, route, end tip.
pub fn build_path(positioning: &Positioning, config: &ConnectorConfig) -> PathBuilder {
    let mut builder = PathBuilder::new(positioning.start.x, positioning.start.y);
    tips::emit_tip(
        config.start_tip,
        positioning.rotation_start,
        config.width,
        &mut builder,
    );
    for point in positioning.route.iter().skip(1) {
        builder.line_absolute(point.x, point.y);
    }
    tips::emit_tip(
        config.end_tip,
        positioning.rotation_end,
        config.width,
        &mut builder,
    );
    builder
}

/// Run the full pipeline for one connector between the `from` and `to`
/// element boxes.
pub fn render_connector(
    from: Rect,
    to: Rect,
    frame: Frame,
    config: &ConnectorConfig,
) -> Result<RenderedConnector, RouteError> {
    let positioning = Positioning::calculate(from, to, frame, config)?;
    let path = build_path(&positioning, config).serialize();

    let label = config.label.as_ref().map(|text| {
        let (point, rotation) = positioning.label_placement(config.kind);
        PlacedLabel {
            text: text.clone(),
            point,
            rotation,
        }
    });

    Ok(RenderedConnector {
        path,
        color: config.color.clone(),
        width: config.width,
        label,
        positioning,
    })
}
