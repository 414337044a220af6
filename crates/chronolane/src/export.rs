//! Export of computed layouts.
//!
//! ```text
//! Model snapshot
//!     ↓ layout
//! ChartLayout (positioned shapes)
//!     ↓ export (this module)
//! Output document
//! ```
//!
//! Export operations return [`Error`], which converts into
//! [`ChronolaneError::Export`](crate::ChronolaneError::Export) at the crate
//! boundary.

/// SVG export backend.
pub mod svg;

use crate::layout::ChartLayout;

/// Abstraction for layout export backends.
pub trait Exporter {
    /// Exports a computed layout to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_layout(&mut self, layout: &ChartLayout) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
