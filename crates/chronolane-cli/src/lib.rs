//! Chronolane CLI library
//!
//! Reads a TOML model snapshot, lays it out as a space-time chart and writes
//! the chart as SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use error_adapter::{ErrorAdapter, render_report};

use std::fs;

use log::info;

use chronolane::{ChartBuilder, ChronolaneError};

/// Run the Chronolane CLI application
///
/// # Errors
///
/// Returns `ChronolaneError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Model parsing errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), ChronolaneError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing model"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = ChartBuilder::new(app_config.chart().clone()).with_style(app_config.style().clone());
    let model = builder.parse(&source)?;
    let svg = builder.render_svg(&model)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
