//! Stroke definitions for rectangle outlines.
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"#000000"`, `0.5` |
//! | `width` | `stroke-width` | `1.0` |
//! | `style` | `stroke-dasharray` | `"5,5"`, `"2,3"` |

use std::str::FromStr;

use crate::color::Color;

/// Dash pattern of a stroke.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// 5px dash, 5px gap
    Dashed,
    /// 2px dot, 3px gap
    Dotted,
    /// Custom SVG dasharray pattern, e.g. `"10,5,2,3"`
    Custom(String),
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            _ if is_dasharray(s) => Ok(Self::Custom(s.to_string())),
            _ => Err(format!("invalid stroke style: {s:?}")),
        }
    }
}

/// A non-empty list of non-negative lengths separated by commas or whitespace.
fn is_dasharray(s: &str) -> bool {
    let mut lengths = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .peekable();
    lengths.peek().is_some()
        && lengths.all(|part| part.parse::<f32>().is_ok_and(|length| length.is_finite() && length >= 0.0))
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

/// A stroke definition for rendering rectangle borders.
///
/// # Examples
///
/// ```
/// use chronolane_core::draw::{StrokeDefinition, StrokeStyle};
/// use chronolane_core::color::Color;
///
/// let mut stroke = StrokeDefinition::new(Color::new("steelblue").unwrap(), 1.5);
/// stroke.set_style(StrokeStyle::Dashed);
/// assert_eq!(stroke.width(), 1.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a new solid stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Sets the dash pattern.
    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    /// Returns the stroke color.
    pub fn color(&self) -> &Color {
        &self.color
    }

    /// Returns the stroke width in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the dash pattern.
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Applies all stroke attributes (color, opacity, width, dasharray) to an SVG element.
///
/// ```
/// use chronolane_core::draw::StrokeDefinition;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::default();
/// let rect = svg_element::Rectangle::new().set("x", 0).set("y", 0);
/// let rect = chronolane_core::apply_stroke!(rect, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
