//! Lay out three boxes, connect them, then print the connectors as SVG.
//!
//! Run with `RUST_LOG=debug cargo run --example render_svg --features tracing`
//! to see every routing step.

use std::cell::Cell;

use glam::dvec2;
use tether::{
    ConnectorManager, ConnectorOptions, Rect, RelativeAnchor, RoutingKind, SvgSurface, TipKind,
    TipSpec,
};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let parser = Rect::new(40.0, 40.0, 120.0, 50.0);
    let checker = Cell::new(Rect::new(300.0, 40.0, 120.0, 50.0));
    let emitter = Rect::new(300.0, 220.0, 120.0, 50.0);

    let mut manager = ConnectorManager::new(SvgSurface::new());

    manager.register(
        &parser,
        &checker,
        &ConnectorOptions::new()
            .with_start_anchor(RelativeAnchor::RIGHT)
            .with_end_anchor(RelativeAnchor::LEFT)
            .with_label("ast"),
    )?;

    let mut options = ConnectorOptions::new();
    options.set("kind", "orthogonal")?;
    options.set("start_anchor", "bottom")?;
    options.set("end_anchor", "left")?;
    options.set("start_tip", "circle")?;
    options.set("color", "#3366cc")?;
    options.set("label", "typed ast")?;
    manager.register(&parser, &emitter, &options)?;

    manager.register(
        &checker,
        &emitter,
        &ConnectorOptions::new()
            .with_kind(RoutingKind::Orthogonal)
            .with_start_anchor(RelativeAnchor::BOTTOM)
            .with_end_anchor(RelativeAnchor::TOP)
            .with_end_tip(TipSpec::new(TipKind::Diamond))
            .with_width(1.5),
    )?;

    // The host moved an element and scrolled; redraw everything.
    checker.set(Rect::new(340.0, 60.0, 120.0, 50.0));
    manager.set_scroll_offset(dvec2(0.0, 10.0));
    manager.invalidate_all()?;

    println!("{}", manager.surface().to_document(500.0, 320.0));
    Ok(())
}
