//! Positioned shapes handed to rendering surfaces.

use std::{fmt, rc::Rc};

use chronolane_core::{
    draw::{Drawable, LayeredOutput, Rectangle, RectangleDefinition, Text},
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

use crate::layout::rows::RowKey;

/// What a shape depicts.
///
/// Rendered into SVG as the `data-key` attribute, so a host can map a
/// clicked or hovered element back to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKey {
    Individual(RowKey),
    Activity(Id),
    Participation {
        activity_id: Id,
        row: RowKey,
        /// Position of the segment among the row's segments.
        segment: usize,
    },
    IndividualLabel(RowKey),
    ActivityLabel(Id),
}

impl fmt::Display for ShapeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Individual(row) => write!(f, "individual:{row}"),
            Self::Activity(id) => write!(f, "activity:{id}"),
            Self::Participation {
                activity_id,
                row,
                segment,
            } => write!(f, "participation:{activity_id}:{row}:{segment}"),
            Self::IndividualLabel(row) => write!(f, "label:individual:{row}"),
            Self::ActivityLabel(id) => write!(f, "label:activity:{id}"),
        }
    }
}

/// A filled rectangle at a fixed position.
#[derive(Debug, Clone)]
pub struct RectShape {
    key: ShapeKey,
    bounds: Bounds,
    rectangle: Rectangle,
}

impl RectShape {
    pub fn new(key: ShapeKey, bounds: Bounds, definition: Rc<RectangleDefinition>) -> Self {
        let rectangle = Rectangle::new(definition, bounds.to_size()).with_data_key(key.to_string());
        Self {
            key,
            bounds,
            rectangle,
        }
    }

    pub fn key(&self) -> ShapeKey {
        self.key
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn rectangle(&self) -> &Rectangle {
        &self.rectangle
    }
}

/// A text label anchored at a point.
///
/// The anchor's y-coordinate is the vertical centre of the line.
#[derive(Debug, Clone)]
pub struct LabelShape {
    key: ShapeKey,
    position: Point,
    text: Text,
}

impl LabelShape {
    pub fn new(key: ShapeKey, position: Point, text: Text) -> Self {
        Self { key, position, text }
    }

    pub fn key(&self) -> ShapeKey {
        self.key
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn text(&self) -> &Text {
        &self.text
    }

    pub fn content(&self) -> &str {
        self.text.content()
    }

    pub fn bounds(&self) -> Bounds {
        self.text.bounds_at(self.position)
    }
}

/// A drawable element of a chart.
#[derive(Debug, Clone)]
pub enum Shape {
    Rect(RectShape),
    Label(LabelShape),
}

impl Shape {
    pub fn key(&self) -> ShapeKey {
        match self {
            Self::Rect(rect) => rect.key(),
            Self::Label(label) => label.key(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Rect(rect) => rect.bounds(),
            Self::Label(label) => label.bounds(),
        }
    }

    pub fn as_rect(&self) -> Option<&RectShape> {
        match self {
            Self::Rect(rect) => Some(rect),
            Self::Label(_) => None,
        }
    }

    pub fn as_label(&self) -> Option<&LabelShape> {
        match self {
            Self::Label(label) => Some(label),
            Self::Rect(_) => None,
        }
    }
}

impl Drawable for Shape {
    /// Renders the shape at its own position, shifted by `offset`.
    fn render_to_layers(&self, offset: Point) -> LayeredOutput {
        match self {
            Self::Rect(rect) => rect
                .rectangle
                .render_to_layers(rect.bounds.min_point().add_point(offset)),
            Self::Label(label) => label
                .text
                .render_to_layers(label.position.add_point(offset)),
        }
    }

    fn size(&self) -> Size {
        self.bounds().to_size()
    }
}

#[cfg(test)]
mod tests {
    use chronolane_core::draw::{RenderLayer, TextDefinition};

    use super::*;

    #[test]
    fn test_shape_key_display() {
        let row = RowKey::Installation {
            component_id: Id::new("pump"),
            target_id: Id::new("slot"),
            installation_id: Id::new("i1"),
            host_installation_id: None,
        };

        assert_eq!(
            ShapeKey::Individual(RowKey::Individual(Id::new("crane"))).to_string(),
            "individual:crane"
        );
        assert_eq!(
            ShapeKey::Participation {
                activity_id: Id::new("lift"),
                row,
                segment: 2,
            }
            .to_string(),
            "participation:lift:pump::slot::i1:2"
        );
        assert_eq!(ShapeKey::ActivityLabel(Id::new("lift")).to_string(), "label:activity:lift");
    }

    #[test]
    fn test_rect_shape_carries_data_key() {
        let key = ShapeKey::Activity(Id::new("lift"));
        let bounds = Bounds::new_from_top_left(Point::new(5.0, 6.0), Size::new(7.0, 8.0));
        let shape = RectShape::new(
            key,
            bounds,
            Rc::new(RectangleDefinition::new(RenderLayer::Activity)),
        );

        assert_eq!(shape.rectangle().data_key(), Some("activity:lift"));
        assert_eq!(shape.rectangle().size(), Size::new(7.0, 8.0));
        assert_eq!(Shape::Rect(shape).bounds(), bounds);
    }

    #[test]
    fn test_label_render_is_offset() {
        let label = LabelShape::new(
            ShapeKey::ActivityLabel(Id::new("lift")),
            Point::new(10.0, 20.0),
            Text::new(Rc::new(TextDefinition::new()), "Lift"),
        );
        let shape = Shape::Label(label);

        assert!(shape.as_rect().is_none());
        assert_eq!(shape.as_label().map(LabelShape::content), Some("Lift"));
        assert!(!shape.render_to_layers(Point::new(1.0, 1.0)).is_empty());
    }
}
