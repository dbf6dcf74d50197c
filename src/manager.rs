//! Connector lifecycle: registration, invalidation and removal.
//!
//! The manager never listens for anything on its own. Hosts call
//! [`ConnectorManager::invalidate_all`] (or [`ConnectorManager::invalidate`]
//! for a single connector) from whatever resize or scroll events they have,
//! and every call recomputes the affected connectors from scratch.

use std::cell::Cell;
use std::fmt;

use glam::DVec2;

use crate::config::{ConnectorConfig, ConnectorOptions};
use crate::errors::Error;
use crate::log::{debug, warn};
use crate::render::{Positioning, RenderedConnector, render_connector};
use crate::types::{Frame, Rect};

/// Something with an on-screen bounding box a connector can attach to.
pub trait Anchor: fmt::Debug {
    /// Current bounds, in the same viewport coordinates for every anchor.
    fn bounds(&self) -> Rect;
}

impl Anchor for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Lets a host move an element between invalidations.
impl Anchor for Cell<Rect> {
    fn bounds(&self) -> Rect {
        self.get()
    }
}

/// Where connectors end up being drawn.
pub trait Surface {
    /// Draw (or redraw) the connector identified by `handle`.
    fn draw(&mut self, handle: ConnectorHandle, rendered: &RenderedConnector);

    /// Take the connector's drawing off the surface.
    fn remove(&mut self, handle: ConnectorHandle);
}

/// Identifies a registered connector. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectorHandle(u64);

impl fmt::Display for ConnectorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connector#{}", self.0)
    }
}

#[derive(Debug)]
struct Connector<'a> {
    handle: ConnectorHandle,
    from: &'a dyn Anchor,
    to: &'a dyn Anchor,
    parent: Option<&'a dyn Anchor>,
    config: ConnectorConfig,
    /// Last computed geometry; recomputed on every invalidation.
    positioning: Positioning,
}

/// Owns every connector and keeps their drawings on a [`Surface`] current.
#[derive(Debug)]
pub struct ConnectorManager<'a, S> {
    surface: S,
    connectors: Vec<Connector<'a>>,
    scroll: DVec2,
    next_handle: u64,
}

impl<'a, S: Surface> ConnectorManager<'a, S> {
    pub fn new(surface: S) -> Self {
        ConnectorManager {
            surface,
            connectors: Vec::new(),
            scroll: DVec2::ZERO,
            next_handle: 0,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Record the host's current scroll offset.
    ///
    /// Takes effect on the next invalidation; nothing is redrawn here.
    pub fn set_scroll_offset(&mut self, scroll: DVec2) {
        self.scroll = scroll;
    }

    pub fn scroll_offset(&self) -> DVec2 {
        self.scroll
    }

    /// Create a connector from `from` to `to` and draw it.
    ///
    /// Options are resolved up front, so bad configuration fails here and
    /// nothing is registered.
    pub fn register(
        &mut self,
        from: &'a dyn Anchor,
        to: &'a dyn Anchor,
        options: &ConnectorOptions<'a>,
    ) -> Result<ConnectorHandle, Error> {
        let config = options.resolve()?;
        let handle = ConnectorHandle(self.next_handle);

        let rendered = render(from, to, options.parent, self.scroll, &config)?;
        self.next_handle += 1;
        debug!(%handle, kind = %config.kind, "registered connector");

        self.surface.draw(handle, &rendered);
        self.connectors.push(Connector {
            handle,
            from,
            to,
            parent: options.parent,
            config,
            positioning: rendered.positioning,
        });
        Ok(handle)
    }

    /// Recompute and redraw one connector.
    pub fn invalidate(&mut self, handle: ConnectorHandle) -> Result<(), Error> {
        let scroll = self.scroll;
        let connector = self
            .connectors
            .iter_mut()
            .find(|c| c.handle == handle)
            .ok_or(Error::UnknownConnector { handle })?;
        update(connector, scroll, &mut self.surface)
    }

    /// Recompute and redraw every connector.
    ///
    /// Connectors are independent: one that fails to route keeps its last
    /// drawing, the rest are still updated, and the first error is returned.
    pub fn invalidate_all(&mut self) -> Result<(), Error> {
        debug!(count = self.connectors.len(), "invalidating all connectors");
        let scroll = self.scroll;
        let mut first_error = None;
        for connector in &mut self.connectors {
            if let Err(err) = update(connector, scroll, &mut self.surface) {
                warn!(handle = %connector.handle, error = %err, "connector update failed");
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Drop a connector and remove its drawing. Returns `false` if the
    /// handle was not registered.
    pub fn deregister(&mut self, handle: ConnectorHandle) -> bool {
        let Some(index) = self.connectors.iter().position(|c| c.handle == handle) else {
            return false;
        };
        self.connectors.remove(index);
        self.surface.remove(handle);
        debug!(%handle, "deregistered connector");
        true
    }

    /// Geometry from the connector's most recent computation.
    pub fn positioning(&self, handle: ConnectorHandle) -> Option<&Positioning> {
        self.connectors
            .iter()
            .find(|c| c.handle == handle)
            .map(|c| &c.positioning)
    }

    /// Resolved configuration of a registered connector.
    pub fn config(&self, handle: ConnectorHandle) -> Option<&ConnectorConfig> {
        self.connectors
            .iter()
            .find(|c| c.handle == handle)
            .map(|c| &c.config)
    }

    /// Handles of all live connectors, in registration order.
    pub fn handles(&self) -> impl Iterator<Item = ConnectorHandle> + '_ {
        self.connectors.iter().map(|c| c.handle)
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }
}

fn render(
    from: &dyn Anchor,
    to: &dyn Anchor,
    parent: Option<&dyn Anchor>,
    scroll: DVec2,
    config: &ConnectorConfig,
) -> Result<RenderedConnector, Error> {
    let parent_origin = parent.map_or(DVec2::ZERO, |p| p.bounds().origin);
    let frame = Frame::new(scroll, parent_origin);
    Ok(render_connector(from.bounds(), to.bounds(), frame, config)?)
}

fn update<S: Surface>(
    connector: &mut Connector<'_>,
    scroll: DVec2,
    surface: &mut S,
) -> Result<(), Error> {
    let rendered = render(
        connector.from,
        connector.to,
        connector.parent,
        scroll,
        &connector.config,
    )?;
    debug!(handle = %connector.handle, path = %rendered.path, "updated connector");
    surface.draw(connector.handle, &rendered);
    connector.positioning = rendered.positioning;
    Ok(())
}
