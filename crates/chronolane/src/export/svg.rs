//! SVG rendering of chart layouts.

use std::io::Write;

use log::{debug, error};
use svg::{Document, node::element as svg_element};

use chronolane_core::{
    color::Color,
    draw::{Drawable, LayeredOutput},
    geometry::{Point, Size},
};

use crate::{
    export::{self, Exporter},
    layout::ChartLayout,
};

/// Renders chart layouts into SVG documents.
#[derive(Debug, Clone, Default)]
pub struct Svg {
    background_color: Option<Color>,
}

impl Svg {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills the canvas with `color` behind every other shape.
    pub fn with_background_color(mut self, color: Option<Color>) -> Self {
        self.background_color = color;
        self
    }

    /// Builds the SVG document for `layout`.
    pub fn render_layout(&self, layout: &ChartLayout) -> Document {
        let size = layout.size();
        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", size.width(), size.height()))
            .set("width", size.width())
            .set("height", size.height());

        if let Some(background) = self.background(size) {
            doc = doc.add(background);
        }

        let mut output = LayeredOutput::new();
        for shape in layout.shapes() {
            output.merge(shape.render_to_layers(Point::default()));
        }

        for node in output.render() {
            doc = doc.add(node);
        }
        debug!(shapes = layout.shapes().len(); "SVG document rendered");
        doc
    }

    fn background(&self, size: Size) -> Option<svg_element::Rectangle> {
        let color = self.background_color.as_ref()?;
        Some(
            svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", size.width())
                .set("height", size.height())
                .set("fill", color)
                .set("fill-opacity", color.alpha()),
        )
    }
}

/// An [`Exporter`] writing SVG documents to any [`Write`] sink.
#[derive(Debug)]
pub struct SvgWriter<W> {
    svg: Svg,
    writer: W,
}

impl<W: Write> SvgWriter<W> {
    pub fn new(svg: Svg, writer: W) -> Self {
        Self { svg, writer }
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Exporter for SvgWriter<W> {
    fn export_layout(&mut self, layout: &ChartLayout) -> Result<(), export::Error> {
        let doc = self.svg.render_layout(layout);
        write!(self.writer, "{doc}").map_err(|err| {
            error!(err:err; "Failed to write SVG content");
            export::Error::Io(err)
        })
    }
}

/// Renders `layout` to an SVG string.
///
/// # Errors
///
/// Returns [`export::Error::Render`] if the document is not valid UTF-8.
pub fn render_to_string(svg: Svg, layout: &ChartLayout) -> Result<String, export::Error> {
    let mut writer = SvgWriter::new(svg, Vec::new());
    writer.export_layout(layout)?;
    String::from_utf8(writer.into_inner())
        .map_err(|err| export::Error::Render(format!("SVG output is not UTF-8: {err}")))
}

#[cfg(test)]
mod tests {
    use crate::{
        config::{ChartConfig, PresentationConfig},
        layout,
        model::{Activity, Individual, Model},
    };

    use super::*;

    fn sample_model() -> Model {
        Model::new()
            .with_individual(Individual::new("crane", "Crane"))
            .with_activity(Activity::new("lift", "Lift", 0.0, 4.0).with_participant("crane"))
    }

    fn sample_layout() -> ChartLayout {
        layout::layout(&sample_model(), &ChartConfig::default())
    }

    #[test]
    fn test_rounded_activity_boxes() {
        let mut presentation = PresentationConfig::default();
        presentation.activity.corner_radius = 4.0;
        let config = ChartConfig::default().with_presentation(presentation);

        let rounded = render_to_string(Svg::new(), &layout::layout(&sample_model(), &config)).unwrap();
        assert_eq!(rounded.matches("rx=").count(), 1);

        let square = render_to_string(Svg::new(), &sample_layout()).unwrap();
        assert!(!square.contains("rx="));
    }

    #[test]
    fn test_document_is_sized_to_canvas() {
        let layout = sample_layout();
        let svg = render_to_string(Svg::new(), &layout).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 1000 95""#));
        assert!(svg.contains(r#"width="1000""#));
    }

    #[test]
    fn test_layers_and_data_keys_are_written() {
        let svg = render_to_string(Svg::new(), &sample_layout()).unwrap();

        assert!(svg.contains(r#"data-layer="individual""#));
        assert!(svg.contains(r#"data-layer="participation""#));
        assert!(svg.contains(r#"data-layer="text""#));
        assert!(svg.contains(r#"data-key="individual:crane""#));
        assert!(svg.contains(r#"data-key="participation:lift:crane:0""#));

        let text_contents: Vec<&str> = svg
            .split("<text")
            .skip(1)
            .filter_map(|element| element.split_once('>'))
            .filter_map(|(_, rest)| rest.split_once("</text>"))
            .map(|(content, _)| content.trim())
            .collect();
        assert!(text_contents.contains(&"Lift"));

        let individual = svg.find(r#"data-layer="individual""#).unwrap();
        let text = svg.find(r#"data-layer="text""#).unwrap();
        assert!(individual < text);
    }

    #[test]
    fn test_background_is_first() {
        let background = Color::new("ivory").unwrap();
        let svg = render_to_string(
            Svg::new().with_background_color(Some(background)),
            &sample_layout(),
        )
        .unwrap();

        let first_rect = svg.find("<rect").expect("background rect");
        let first_layer = svg.find("<g").unwrap();
        assert!(first_rect < first_layer);

        let plain = render_to_string(Svg::new(), &sample_layout()).unwrap();
        assert!(plain.find("<g").unwrap() < plain.find("<rect").unwrap());
    }

    #[test]
    fn test_writer_error_is_io() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk gone"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut writer = SvgWriter::new(Svg::new(), Broken);
        let err = writer.export_layout(&sample_layout()).unwrap_err();
        assert!(matches!(err, export::Error::Io(_)));
    }
}
