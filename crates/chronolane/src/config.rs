//! Configuration types for chart layout and presentation.
//!
//! Every section implements [`serde::Deserialize`] with defaults for each
//! field, so a partial configuration (or none at all) never fails to load.
//!
//! # Overview
//!
//! - [`AppConfig`] - Root of a configuration file: a [`ChartConfig`] plus [`StyleConfig`].
//! - [`ChartConfig`] - Everything the layout engine reads.
//! - [`ViewPortConfig`], [`LayoutConfig`], [`LabelsConfig`], [`PresentationConfig`] - its sections.
//!
//! # Example
//!
//! ```
//! # use chronolane::config::ChartConfig;
//! let config: ChartConfig = toml::from_str(r#"
//!     [view_port]
//!     zoom = 2.0
//!
//!     [layout.individual]
//!     height = 30.0
//! "#).unwrap();
//!
//! assert_eq!(config.view_port().zoom, 2.0);
//! assert_eq!(config.layout().individual.height, 30.0);
//! // Untouched keys keep their defaults
//! assert_eq!(config.layout().individual.gap, 10.0);
//! ```

use log::warn;
use serde::Deserialize;

use chronolane_core::{
    color::Color,
    draw::{RectangleDefinition, RenderLayer, StrokeDefinition, StrokeStyle, TextAnchor, TextDefinition},
    identifier::Id,
};

/// Root of a configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(flatten)]
    chart: ChartConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(chart: ChartConfig, style: StyleConfig) -> Self {
        Self { chart, style }
    }

    /// Returns the chart configuration.
    pub fn chart(&self) -> &ChartConfig {
        &self.chart
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Everything the layout engine reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    view_port: ViewPortConfig,
    layout: LayoutConfig,
    labels: LabelsConfig,
    presentation: PresentationConfig,
}

impl ChartConfig {
    pub fn view_port(&self) -> &ViewPortConfig {
        &self.view_port
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn labels(&self) -> &LabelsConfig {
        &self.labels
    }

    pub fn presentation(&self) -> &PresentationConfig {
        &self.presentation
    }

    pub fn with_view_port(mut self, view_port: ViewPortConfig) -> Self {
        self.view_port = view_port;
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_labels(mut self, labels: LabelsConfig) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_presentation(mut self, presentation: PresentationConfig) -> Self {
        self.presentation = presentation;
        self
    }
}

/// Base canvas width and zoom.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewPortConfig {
    /// Base canvas width in pixels before zooming.
    pub x: f32,
    pub zoom: f32,
}

impl Default for ViewPortConfig {
    fn default() -> Self {
        Self {
            x: 1000.0,
            zoom: 1.0,
        }
    }
}

/// Layout section: row geometry, lane packing and activity level.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub individual: IndividualLayoutConfig,
    pub participation: ParticipationLayoutConfig,
    pub activity: ActivityLayoutConfig,
}

/// Row geometry, in pixels.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndividualLayoutConfig {
    pub top_margin: f32,
    pub bottom_margin: f32,
    /// Row height.
    pub height: f32,
    /// Vertical gap between rows.
    pub gap: f32,
    /// Left and right canvas margin.
    pub x_margin: f32,
    /// Inset between the chart edges and the mapped time domain; open-ended
    /// rows run into it.
    pub temporal_margin: f32,
    /// Width of the label column reserved when individual labels are enabled.
    pub text_length: f32,
}

impl Default for IndividualLayoutConfig {
    fn default() -> Self {
        Self {
            top_margin: 25.0,
            bottom_margin: 30.0,
            height: 20.0,
            gap: 10.0,
            x_margin: 40.0,
            temporal_margin: 10.0,
            text_length: 100.0,
        }
    }
}

/// Lane packing of concurrent participations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParticipationLayoutConfig {
    /// Height available to all lanes of a row, capped at the row height.
    pub max_band_height: f32,
    /// Gap between stacked lanes when more than one is active.
    pub lane_gap: f32,
}

impl Default for ParticipationLayoutConfig {
    fn default() -> Self {
        Self {
            max_band_height: 20.0,
            lane_gap: 1.0,
        }
    }
}

/// Which level of the activity breakdown is in view.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActivityLayoutConfig {
    /// Draw the children of this activity. `None` draws top-level activities.
    pub parent: Option<Id>,
}

/// Label settings for individuals and activities.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    pub individual: LabelConfig,
    pub activity: LabelConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub enabled: bool,
    /// Longer names are cut and end in `…`.
    pub max_chars: usize,
    pub font_size: u16,
    pub font_family: String,
    pub color: Option<String>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_chars: 24,
            font_size: 12,
            font_family: "Arial".to_string(),
            color: None,
        }
    }
}

impl LabelConfig {
    /// Builds the text style for labels of this class.
    pub fn text_definition(&self, anchor: TextAnchor) -> TextDefinition {
        let mut definition = TextDefinition::new();
        definition.set_font_size(self.font_size);
        definition.set_font_family(&self.font_family);
        definition.set_anchor(anchor);
        definition.set_color(
            self.color
                .as_deref()
                .map(|color| Color::new_or(color, Color::default())),
        );
        definition
    }
}

/// Fill and stroke settings per shape class, passed through verbatim.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub individual: ShapeStyle,
    pub installation: ShapeStyle,
    pub activity: ShapeStyle,
    pub participation: ShapeStyle,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            individual: ShapeStyle::new("#eef3f8", "#8aa4bd", 1.0),
            installation: ShapeStyle::new("#f5efe3", "#b59a68", 1.0),
            activity: ShapeStyle::new("#d8ecd4", "#5c8f52", 0.5),
            participation: ShapeStyle::new("#7fb36f", "#3f6b35", 0.9),
        }
    }
}

/// Fill, stroke, opacity and corner rounding of one shape class.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f32,
    /// `solid`, `dashed`, `dotted` or a custom dasharray.
    pub stroke_style: String,
    pub opacity: f32,
    pub corner_radius: f32,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::new("white", "black", 1.0)
    }
}

impl ShapeStyle {
    pub fn new(fill: &str, stroke: &str, opacity: f32) -> Self {
        Self {
            fill: fill.to_string(),
            stroke: stroke.to_string(),
            stroke_width: 1.0,
            stroke_style: "solid".to_string(),
            opacity,
            corner_radius: 0.0,
        }
    }

    /// Builds a rectangle definition painting on `layer`.
    ///
    /// Unparsable colors are replaced by the colors of `fallback`, or by the
    /// [`Color`] default when `fallback` is unparsable as well.
    pub fn rectangle_definition(&self, layer: RenderLayer, fallback: &ShapeStyle) -> RectangleDefinition {
        let fallback_fill = Color::new_or(&fallback.fill, Color::default());
        let fallback_stroke = Color::new_or(&fallback.stroke, Color::default());

        let mut stroke = StrokeDefinition::new(
            Color::new_or(&self.stroke, fallback_stroke),
            self.stroke_width,
        );
        match self.stroke_style.parse::<StrokeStyle>() {
            Ok(style) => stroke.set_style(style),
            Err(err) => warn!(err; "Falling back to a solid stroke"),
        }

        let mut definition = RectangleDefinition::new(layer);
        definition.set_fill_color(Color::new_or(&self.fill, fallback_fill));
        definition.set_fill_opacity(self.opacity);
        definition.set_stroke(stroke);
        definition.set_corner_radius(self.corner_radius);
        definition
    }
}

/// Visual styling configuration for the exported SVG.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Canvas background color, as a color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    pub fn new(background_color: Option<String>) -> Self {
        Self { background_color }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}
