//! Filled rectangles: individual rows, activity boxes and participation segments.

use std::rc::Rc;

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Size},
};

/// Reusable fill and outline style for rectangles of one class.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleDefinition {
    fill_color: Color,
    fill_opacity: f32,
    stroke: StrokeDefinition,
    corner_radius: f32,
    layer: RenderLayer,
}

impl RectangleDefinition {
    /// Creates a definition painting on `layer` with a white fill and default stroke.
    pub fn new(layer: RenderLayer) -> Self {
        Self {
            fill_color: Color::new("white").expect("'white' is a valid CSS color"),
            fill_opacity: 1.0,
            stroke: StrokeDefinition::default(),
            corner_radius: 0.0,
            layer,
        }
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    /// Sets the fill opacity, clamped to `0.0..=1.0`.
    pub fn set_fill_opacity(&mut self, opacity: f32) {
        self.fill_opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn set_stroke(&mut self, stroke: StrokeDefinition) {
        self.stroke = stroke;
    }

    pub fn set_corner_radius(&mut self, radius: f32) {
        self.corner_radius = radius.max(0.0);
    }

    pub fn fill_color(&self) -> &Color {
        &self.fill_color
    }

    pub fn fill_opacity(&self) -> f32 {
        self.fill_opacity
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn layer(&self) -> RenderLayer {
        self.layer
    }
}

/// A sized rectangle sharing a [`RectangleDefinition`].
///
/// The optional data key is written as a `data-key` attribute so that the
/// rendering host can find the shape again for hover and selection.
#[derive(Debug, Clone)]
pub struct Rectangle {
    definition: Rc<RectangleDefinition>,
    size: Size,
    data_key: Option<String>,
}

impl Rectangle {
    pub fn new(definition: Rc<RectangleDefinition>, size: Size) -> Self {
        Self {
            definition,
            size,
            data_key: None,
        }
    }

    /// Attaches an identifying key (builder style).
    pub fn with_data_key(mut self, key: impl Into<String>) -> Self {
        self.data_key = Some(key.into());
        self
    }

    pub fn data_key(&self) -> Option<&str> {
        self.data_key.as_deref()
    }
}

impl Drawable for Rectangle {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let definition = &self.definition;

        let mut rect = svg_element::Rectangle::new()
            .set("x", position.x())
            .set("y", position.y())
            .set("width", self.size.width())
            .set("height", self.size.height())
            .set("fill", definition.fill_color())
            .set("fill-opacity", definition.fill_opacity());

        if definition.corner_radius > 0.0 {
            rect = rect.set("rx", definition.corner_radius);
        }
        if let Some(key) = &self.data_key {
            rect = rect.set("data-key", key.as_str());
        }

        let rect = apply_stroke!(rect, definition.stroke());
        output.add_to_layer(definition.layer(), Box::new(rect));
        output
    }

    fn size(&self) -> Size {
        self.size
    }
}
