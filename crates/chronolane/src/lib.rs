//! Chronolane - layout engine for space-time charts.
//!
//! A space-time chart lists individuals as horizontal rows against a time
//! axis and draws each activity as a box spanning the rows of its
//! participants. Given a [`model::Model`] snapshot and a
//! [`config::ChartConfig`], the engine computes exact geometry: row
//! rectangles (including derived rows for installed components), activity
//! boxes, participation segments packed into lanes and decluttered labels.

pub mod config;
mod error;
pub mod export;
pub mod layout;
pub mod model;

pub use chronolane_core::{color, draw, geometry, identifier};
pub use error::ChronolaneError;

use log::{debug, info, trace};

use config::{ChartConfig, StyleConfig};
use export::svg::{self, Svg};
use layout::ChartLayout;
use model::Model;

/// Builder for laying out and rendering charts.
///
/// # Examples
///
/// ```rust
/// use chronolane::{
///     ChartBuilder,
///     config::ChartConfig,
///     model::{Activity, Individual, Model},
/// };
///
/// let model = Model::new()
///     .with_individual(Individual::new("crane", "Crane"))
///     .with_activity(Activity::new("lift", "Lift", 0.0, 4.0).with_participant("crane"));
///
/// let builder = ChartBuilder::new(ChartConfig::default());
///
/// let layout = builder.layout(&model);
/// assert_eq!(layout.rows().count(), 1);
///
/// let svg = builder.render_svg(&model).expect("Failed to render");
/// assert!(svg.contains("Crane"));
/// ```
#[derive(Debug, Default)]
pub struct ChartBuilder {
    config: ChartConfig,
    style: StyleConfig,
}

impl ChartBuilder {
    /// Create a new chart builder with the given configuration.
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            style: StyleConfig::default(),
        }
    }

    /// Sets the export style (builder style).
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Parses a TOML model snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ChronolaneError::Parse`] if the source is not a valid model.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chronolane::ChartBuilder;
    ///
    /// let source = r#"
    ///     [[individual]]
    ///     id = "crane"
    ///     name = "Crane"
    /// "#;
    /// let model = ChartBuilder::default().parse(source).expect("Failed to parse model");
    /// assert_eq!(model.individuals().len(), 1);
    /// ```
    pub fn parse(&self, source: &str) -> Result<Model, ChronolaneError> {
        info!("Parsing model");
        let model = Model::from_toml(source)?;
        debug!(
            individuals = model.individuals().len(),
            activities = model.activities().len();
            "Model parsed successfully"
        );
        trace!(model:?; "Parsed model");
        Ok(model)
    }

    /// Computes the chart layout for `model`.
    pub fn layout(&self, model: &Model) -> ChartLayout {
        info!(
            individuals = model.individuals().len(),
            activities = model.activities().len();
            "Laying out chart"
        );
        let layout = layout::layout(model, &self.config);
        trace!(shapes:? = layout.shapes(); "Computed shapes");
        layout
    }

    /// Lays out `model` and renders it to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`ChronolaneError::Config`] for an invalid background color
    /// and [`ChronolaneError::Export`] if rendering fails.
    pub fn render_svg(&self, model: &Model) -> Result<String, ChronolaneError> {
        let layout = self.layout(model);
        self.render_layout_svg(&layout)
    }

    /// Renders an already computed layout to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`ChronolaneError::Config`] for an invalid background color
    /// and [`ChronolaneError::Export`] if rendering fails.
    pub fn render_layout_svg(&self, layout: &ChartLayout) -> Result<String, ChronolaneError> {
        let background = self
            .style
            .background_color()
            .map_err(ChronolaneError::Config)?;

        let rendered = svg::render_to_string(Svg::new().with_background_color(background), layout)?;
        debug!(bytes = rendered.len(); "SVG rendered");
        Ok(rendered)
    }
}
