//! Text label definitions.
//!
//! # Overview
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`Text`] - A renderable label combining content with a [`TextDefinition`]
//!
//! # Measurement
//!
//! Label sizes are estimated from the character count and font size rather
//! than shaped against installed fonts. Collision checks between labels must
//! give the same answer on every machine, and an estimate is stable where real
//! font metrics are not.
//!
//! ```
//! # use std::rc::Rc;
//! # use chronolane_core::draw::{Text, TextDefinition};
//! let mut style = TextDefinition::new();
//! style.set_font_size(10);
//!
//! let text = Text::new(Rc::new(style), "Pump");
//! let size = text.calculate_size();
//! assert!((size.width() - 24.0).abs() < 1e-3);
//! assert!((size.height() - 12.0).abs() < 1e-3);
//! ```

use std::rc::Rc;

use svg::{node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Bounds, Point, Size},
};

/// Average glyph advance as a fraction of the font size.
const CHAR_WIDTH_RATIO: f32 = 0.6;

/// Line height as a multiple of the font size.
const LINE_HEIGHT_RATIO: f32 = 1.2;

/// Horizontal alignment of a label relative to its anchor point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Anchor is the left edge (default)
    #[default]
    Start,
    /// Anchor is the horizontal centre
    Middle,
}

impl TextAnchor {
    fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
        }
    }
}

/// Visual style for labels.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"Arial"` |
/// | Font size | `12` |
/// | Text color | `None` (SVG default, typically black) |
/// | Anchor | [`TextAnchor::Start`] |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    color: Option<Color>,
    anchor: TextAnchor,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the text color. `None` leaves the SVG default in place.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn set_anchor(&mut self, anchor: TextAnchor) {
        self.anchor = anchor;
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 12,
            color: None,
            anchor: TextAnchor::Start,
        }
    }
}

/// A single-line label.
#[derive(Debug, Clone)]
pub struct Text {
    definition: Rc<TextDefinition>,
    content: String,
}

impl Text {
    pub fn new(definition: Rc<TextDefinition>, content: impl Into<String>) -> Self {
        Self {
            definition,
            content: content.into(),
        }
    }

    /// Returns the text content of this element.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Estimated size of the rendered text.
    pub fn calculate_size(&self) -> Size {
        let font_size = f32::from(self.definition.font_size);
        let chars = self.content.chars().count() as f32;
        Size::new(
            chars * font_size * CHAR_WIDTH_RATIO,
            font_size * LINE_HEIGHT_RATIO,
        )
    }

    /// Bounding box of this label when anchored at `position`.
    ///
    /// `position.y()` is the vertical centre of the line; `position.x()` is
    /// interpreted according to the definition's [`TextAnchor`].
    pub fn bounds_at(&self, position: Point) -> Bounds {
        let size = self.calculate_size();
        let min_x = match self.definition.anchor {
            TextAnchor::Start => position.x(),
            TextAnchor::Middle => position.x() - size.width() / 2.0,
        };
        let min_y = position.y() - size.height() / 2.0;
        Bounds::new_from_top_left(Point::new(min_x, min_y), size)
    }
}

impl Drawable for Text {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let mut rendered_text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", self.definition.anchor.to_svg_value())
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size())
            .add(SvgText::new(self.content.as_str()));

        if let Some(color) = &self.definition.color {
            rendered_text = rendered_text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}
