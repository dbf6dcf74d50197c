//! SVG output: path number formatting and an in-memory SVG surface.

use std::collections::BTreeMap;

use svg::node::Text as SvgText;
use svg::node::element as svg_element;

use crate::manager::{ConnectorHandle, Surface};

use super::defaults::{LABEL_LIFT, PATH_SIG_FIGS, PATH_ZERO};
use super::{PlacedLabel, RenderedConnector};

/// Format a number for path data: 10 significant figures, trailing zeros
/// trimmed, and tiny magnitudes written as `0`.
///
/// Trigonometric residue such as `cos(π/2) ≈ 6e-17` must not leak into the
/// output, and `-0` is never written.
pub(crate) fn fmt_num(value: f64) -> String {
    if value.abs() < PATH_ZERO {
        return "0".to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (PATH_SIG_FIGS - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", value, prec = decimals);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// A [`Surface`] that keeps the latest drawing of every connector and can
/// export them all as one SVG document.
#[derive(Debug, Default)]
pub struct SvgSurface {
    drawings: BTreeMap<ConnectorHandle, RenderedConnector>,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.drawings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawings.is_empty()
    }

    /// The latest drawing for `handle`, if it is still on the surface.
    pub fn get(&self, handle: ConnectorHandle) -> Option<&RenderedConnector> {
        self.drawings.get(&handle)
    }

    /// Build a `width` x `height` document with one path (plus optional
    /// label) per connector, in registration order.
    pub fn to_document(&self, width: f64, height: f64) -> svg::Document {
        let mut doc = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", fmt_num(width), fmt_num(height)),
            )
            .set("width", fmt_num(width))
            .set("height", fmt_num(height));

        for rendered in self.drawings.values() {
            doc = doc.add(render_path(rendered));
            if let Some(label) = &rendered.label {
                doc = doc.add(render_label(label));
            }
        }
        doc
    }
}

impl Surface for SvgSurface {
    fn draw(&mut self, handle: ConnectorHandle, rendered: &RenderedConnector) {
        self.drawings.insert(handle, rendered.clone());
    }

    fn remove(&mut self, handle: ConnectorHandle) {
        self.drawings.remove(&handle);
    }
}

fn render_path(rendered: &RenderedConnector) -> svg_element::Path {
    svg_element::Path::new()
        .set("d", rendered.path.as_str())
        .set("stroke", rendered.color.to_string())
        .set("stroke-width", fmt_num(rendered.width))
        .set("fill", "transparent")
}

/// Labels are lifted above their anchor point. Direct labels are also
/// turned to follow the line, pivoting on the anchor point.
fn render_label(label: &PlacedLabel) -> svg_element::Text {
    let mut text = svg_element::Text::new("")
        .set("x", fmt_num(label.point.x))
        .set("y", fmt_num(label.point.y - LABEL_LIFT))
        .set("text-anchor", "middle");

    if let Some(rotation) = label.rotation {
        text = text.set(
            "transform",
            format!(
                "rotate({} {} {})",
                fmt_num(rotation.to_degrees()),
                fmt_num(label.point.x),
                fmt_num(label.point.y)
            ),
        );
    }

    text.add(SvgText::new(label.text.as_str()))
}
