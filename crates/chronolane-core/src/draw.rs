//! Drawable primitives for chart rendering.
//!
//! A space-time chart is made of two kinds of paintable things: filled
//! rectangles (rows, activity boxes, participation segments) and text labels.
//! Both implement the [`Drawable`] trait, which renders to layered SVG output
//! and reports a size.
//!
//! # Layer-Based Rendering
//!
//! Drawables render to one or more [`RenderLayer`]s, which are automatically ordered
//! during final SVG generation.

mod layer;
mod rectangle;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use rectangle::{Rectangle, RectangleDefinition};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{Text, TextAnchor, TextDefinition};

use crate::geometry::{Point, Size};

/// Trait for drawable chart elements that can be rendered to SVG layers.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable to one or more layers.
    ///
    /// # Arguments
    ///
    /// * `position` - The anchor where this drawable should be rendered. Rectangles
    ///   treat it as their top-left corner, text as its anchor point.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the size of this drawable.
    fn size(&self) -> Size;
}
