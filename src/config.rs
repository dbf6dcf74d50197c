//! Connector configuration.
//!
//! Hosts describe a connector with a partial [`ConnectorOptions`] value,
//! either through typed builder methods or string key/value pairs, and
//! [`ConnectorOptions::resolve`] fills in defaults to produce an immutable
//! [`ConnectorConfig`]. Resolution never touches the options it reads.

use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;
use crate::manager::Anchor;
use crate::render::defaults;
use crate::types::RelativeAnchor;

/// How the route between the two anchor points is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutingKind {
    /// One straight segment.
    #[default]
    Direct,
    /// Axis-aligned elbow segments.
    Orthogonal,
}

impl FromStr for RoutingKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("direct") || s.eq_ignore_ascii_case("straight") {
            Ok(Self::Direct)
        } else if s.eq_ignore_ascii_case("orthogonal") || s.eq_ignore_ascii_case("grid") {
            Ok(Self::Orthogonal)
        } else {
            Err(ConfigError::UnknownRoutingKind {
                name: s.to_string(),
            })
        }
    }
}

impl fmt::Display for RoutingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingKind::Direct => write!(f, "direct"),
            RoutingKind::Orthogonal => write!(f, "orthogonal"),
        }
    }
}

/// Shape drawn at a connector end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TipKind {
    #[default]
    None,
    Arrow,
    Triangle,
    Circle,
    Square,
    Diamond,
}

impl FromStr for TipKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const KINDS: [(&str, TipKind); 6] = [
            ("none", TipKind::None),
            ("arrow", TipKind::Arrow),
            ("triangle", TipKind::Triangle),
            ("circle", TipKind::Circle),
            ("square", TipKind::Square),
            ("diamond", TipKind::Diamond),
        ];
        let s = s.trim();
        KINDS
            .iter()
            .find(|(name, _)| s.eq_ignore_ascii_case(name))
            .map(|(_, kind)| *kind)
            .ok_or_else(|| ConfigError::UnknownTipKind {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for TipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TipKind::None => "none",
            TipKind::Arrow => "arrow",
            TipKind::Triangle => "triangle",
            TipKind::Circle => "circle",
            TipKind::Square => "square",
            TipKind::Diamond => "diamond",
        };
        f.write_str(name)
    }
}

/// A tip: its shape plus whether the glyph's forward axis is mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TipSpec {
    pub kind: TipKind,
    pub flip: bool,
}

impl TipSpec {
    pub const NONE: TipSpec = TipSpec::new(TipKind::None);
    pub const ARROW: TipSpec = TipSpec::new(TipKind::Arrow);

    pub const fn new(kind: TipKind) -> Self {
        TipSpec { kind, flip: false }
    }

    /// Same tip with the forward axis mirrored.
    pub const fn flipped(self) -> Self {
        TipSpec {
            kind: self.kind,
            flip: !self.flip,
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind == TipKind::None
    }
}

/// Parses `"<kind>"` or `"<kind> flip"`, e.g. `"Arrow"` or `"circle flip"`.
impl FromStr for TipSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let kind: TipKind = words.next().unwrap_or("").parse()?;
        let mut tip = TipSpec::new(kind);
        for word in words {
            if word.eq_ignore_ascii_case("flip") || word.eq_ignore_ascii_case("flipped") {
                tip.flip = !tip.flip;
            } else {
                return Err(ConfigError::InvalidValue {
                    key: "tip".to_string(),
                    value: s.to_string(),
                    reason: Some(format!("unexpected `{word}`, only `flip` may follow the kind")),
                });
            }
        }
        Ok(tip)
    }
}

impl fmt::Display for TipSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if self.flip {
            write!(f, " flip")?;
        }
        Ok(())
    }
}

/// Stroke color. Hex values are kept as RGB; anything else is passed
/// through to the renderer verbatim.
#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    Named(String),
    Rgb(u8, u8, u8),
}

impl Default for Color {
    fn default() -> Self {
        Color::Named(defaults::COLOR.to_string())
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        parse_hex(s).unwrap_or_else(|| Color::Named(s.trim().to_string()))
    }
}

fn parse_hex(s: &str) -> Option<Color> {
    let hex = s.trim().strip_prefix('#')?;
    let channel = |i: usize, len: usize| u8::from_str_radix(hex.get(i..i + len)?, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
        3 => {
            let (r, g, b) = (channel(0, 1)?, channel(1, 1)?, channel(2, 1)?);
            Some(Color::Rgb(r * 17, g * 17, b * 17))
        }
        _ => None,
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(s) => write!(f, "{}", s),
            Color::Rgb(r, g, b) => write!(f, "rgb({},{},{})", r, g, b),
        }
    }
}

/// Partially specified connector options. Unset fields take defaults on
/// [`resolve`](ConnectorOptions::resolve).
#[derive(Debug, Clone, Default)]
pub struct ConnectorOptions<'a> {
    pub width: Option<f64>,
    pub color: Option<Color>,
    pub kind: Option<RoutingKind>,
    pub start_tip: Option<TipSpec>,
    pub end_tip: Option<TipSpec>,
    pub start_anchor: Option<RelativeAnchor>,
    pub end_anchor: Option<RelativeAnchor>,
    pub label: Option<String>,
    /// Element whose origin the drawing is positioned relative to.
    pub parent: Option<&'a dyn Anchor>,
}

impl<'a> ConnectorOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_kind(mut self, kind: RoutingKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_start_tip(mut self, tip: TipSpec) -> Self {
        self.start_tip = Some(tip);
        self
    }

    pub fn with_end_tip(mut self, tip: TipSpec) -> Self {
        self.end_tip = Some(tip);
        self
    }

    pub fn with_start_anchor(mut self, anchor: RelativeAnchor) -> Self {
        self.start_anchor = Some(anchor);
        self
    }

    pub fn with_end_anchor(mut self, anchor: RelativeAnchor) -> Self {
        self.end_anchor = Some(anchor);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_parent(mut self, parent: &'a dyn Anchor) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set an option from its string form, the way markup attributes or a
    /// script object would supply it.
    ///
    /// Fails immediately on unknown keys and unparsable values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "width" => {
                let width = value.trim().parse::<f64>().map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                    reason: Some(e.to_string()),
                })?;
                self.width = Some(width);
            }
            "color" => self.color = Some(Color::from(value)),
            "kind" | "line_kind" => self.kind = Some(value.parse()?),
            "start_tip" => self.start_tip = Some(value.parse()?),
            "end_tip" => self.end_tip = Some(value.parse()?),
            "start_anchor" | "from_pos" => self.start_anchor = Some(parse_anchor(key, value)?),
            "end_anchor" | "to_pos" => self.end_anchor = Some(parse_anchor(key, value)?),
            "label" => self.label = Some(value.to_string()),
            _ => {
                return Err(ConfigError::UnknownOption {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Fill in defaults and validate.
    ///
    /// The start tip's `flip` is toggled here once, so a start tip points
    /// away from the line just like the default end arrow does.
    pub fn resolve(&self) -> Result<ConnectorConfig, ConfigError> {
        let width = self.width.unwrap_or(defaults::WIDTH);
        if !width.is_finite() || width <= 0.0 {
            return Err(ConfigError::InvalidWidth { value: width });
        }

        let start_anchor = check_anchor(self.start_anchor.unwrap_or_default())?;
        let end_anchor = check_anchor(self.end_anchor.unwrap_or_default())?;

        Ok(ConnectorConfig {
            width,
            color: self.color.clone().unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            start_tip: self.start_tip.unwrap_or(TipSpec::NONE).flipped(),
            end_tip: self.end_tip.unwrap_or(TipSpec::ARROW),
            start_anchor,
            end_anchor,
            label: self.label.clone(),
        })
    }
}

fn check_anchor(anchor: RelativeAnchor) -> Result<RelativeAnchor, ConfigError> {
    RelativeAnchor::try_new(anchor.x, anchor.y).map_err(|_| ConfigError::InvalidAnchor {
        x: anchor.x,
        y: anchor.y,
    })
}

/// Accepts `"x,y"` fractions or a compass name such as `"bottom"` or `"ne"`.
fn parse_anchor(key: &str, value: &str) -> Result<RelativeAnchor, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: Some(reason),
    };

    if let Some(anchor) = RelativeAnchor::named(value.trim()) {
        return Ok(anchor);
    }

    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| invalid("expected `x,y` or a compass name like `top` or `se`".to_string()))?;
    let x: f64 = x.trim().parse().map_err(|e| invalid(format!("{e}")))?;
    let y: f64 = y.trim().parse().map_err(|e| invalid(format!("{e}")))?;
    check_anchor(RelativeAnchor::new(x, y))
}

/// Fully resolved, immutable connector configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorConfig {
    pub width: f64,
    pub color: Color,
    pub kind: RoutingKind,
    pub start_tip: TipSpec,
    pub end_tip: TipSpec,
    pub start_anchor: RelativeAnchor,
    pub end_anchor: RelativeAnchor,
    pub label: Option<String>,
}

impl ConnectorConfig {
    /// Length of a tip glyph, and the inset applied at a tipped end.
    pub fn tip_size(&self) -> f64 {
        self.width * defaults::TIP_SCALE
    }
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        ConnectorConfig {
            width: defaults::WIDTH,
            color: Color::default(),
            kind: RoutingKind::Direct,
            start_tip: TipSpec::NONE.flipped(),
            end_tip: TipSpec::ARROW,
            start_anchor: RelativeAnchor::CENTER,
            end_anchor: RelativeAnchor::CENTER,
            label: None,
        }
    }
}
