//! Error types with diagnostics using miette
//!
//! Configuration errors are fatal and surface immediately; routing errors
//! only appear for inputs the geometry cannot make progress on.

use miette::Diagnostic;
use thiserror::Error;

use crate::manager::ConnectorHandle;
use crate::types::Point;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised while turning connector options into a configuration
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown tip kind: {name}")]
    #[diagnostic(
        code(tether::config::unknown_tip_kind),
        help("expected one of: none, arrow, triangle, circle, square, diamond")
    )]
    UnknownTipKind { name: String },

    #[error("unknown routing kind: {name}")]
    #[diagnostic(
        code(tether::config::unknown_routing_kind),
        help("expected `direct` or `orthogonal`")
    )]
    UnknownRoutingKind { name: String },

    #[error("unknown option: {key}")]
    #[diagnostic(
        code(tether::config::unknown_option),
        help(
            "recognized options are width, color, kind, start_tip, end_tip, start_anchor, end_anchor and label"
        )
    )]
    UnknownOption { key: String },

    #[error("invalid value for `{key}`: {value}")]
    #[diagnostic(code(tether::config::invalid_value))]
    InvalidValue {
        key: String,
        value: String,
        #[help]
        reason: Option<String>,
    },

    #[error("invalid width: {value}")]
    #[diagnostic(
        code(tether::config::invalid_width),
        help("width must be a finite number greater than zero")
    )]
    InvalidWidth { value: f64 },

    #[error("invalid anchor ({x}, {y})")]
    #[diagnostic(
        code(tether::config::invalid_anchor),
        help("anchor components must be finite fractions of the element box")
    )]
    InvalidAnchor { x: f64, y: f64 },
}

// ============================================================================
// Routing Errors
// ============================================================================

/// Errors that occur while computing a route
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("connector endpoints are not finite: {start} -> {end}")]
    #[diagnostic(
        code(tether::route::non_finite),
        help("check the anchor element bounds and scroll offsets for NaN or infinity")
    )]
    NonFinite { start: Point, end: Point },

    #[error("orthogonal route did not converge after {steps} steps")]
    #[diagnostic(code(tether::route::did_not_converge))]
    DidNotConverge { steps: usize, start: Point, end: Point },
}

// ============================================================================
// Crate Errors
// ============================================================================

/// Any error the connector manager can report
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Route(#[from] RouteError),

    #[error("no connector registered for {handle:?}")]
    #[diagnostic(
        code(tether::unknown_connector),
        help("the connector may already have been deregistered")
    )]
    UnknownConnector { handle: ConnectorHandle },
}
