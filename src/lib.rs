//! Directional connectors between on-screen elements.
//!
//! A connector joins two anchor points, each a fractional position inside
//! an element's bounding box, and renders to SVG path data with optional
//! tip glyphs and a label. Routes are either a single straight segment or
//! an orthogonal "elbow" route that leaves the start element on the side
//! its anchor points to.
//!
//! ```
//! use tether::{ConnectorManager, ConnectorOptions, Rect, RoutingKind, SvgSurface};
//!
//! let a = Rect::new(0.0, 0.0, 80.0, 40.0);
//! let b = Rect::new(200.0, 120.0, 80.0, 40.0);
//!
//! let mut manager = ConnectorManager::new(SvgSurface::new());
//! let options = ConnectorOptions::new()
//!     .with_kind(RoutingKind::Orthogonal)
//!     .with_label("depends on");
//! manager.register(&a, &b, &options)?;
//!
//! let svg = manager.surface().to_document(400.0, 200.0).to_string();
//! assert!(svg.contains("depends on"));
//! # Ok::<(), tether::Error>(())
//! ```

pub mod config;
pub mod errors;
pub mod log;
pub mod manager;
pub mod render;
pub mod types;

pub use config::{Color, ConnectorConfig, ConnectorOptions, RoutingKind, TipKind, TipSpec};
pub use errors::{ConfigError, Error, RouteError};
pub use manager::{Anchor, ConnectorHandle, ConnectorManager, Surface};
pub use render::svg::SvgSurface;
pub use render::{PlacedLabel, Positioning, RenderedConnector, render_connector};
pub use types::{Frame, Point, Rect, RelativeAnchor};
