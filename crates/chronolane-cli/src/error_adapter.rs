//! Error adapter for converting ChronolaneError to miette diagnostics.
//!
//! This module bridges the library's error type and miette's graphical
//! report formatting used by the CLI. Model parse errors point at the
//! offending span of the input file.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use chronolane::ChronolaneError;

/// Adapter rendering a [`ChronolaneError`] through miette.
pub struct ErrorAdapter(pub ChronolaneError);

impl fmt::Debug for ErrorAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ChronolaneError::Io(_) => "chronolane::io",
            ChronolaneError::Parse { .. } => "chronolane::parse",
            ChronolaneError::Config(_) => "chronolane::config",
            ChronolaneError::Export(_) => "chronolane::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            ChronolaneError::Parse { .. } => Some(Box::new(
                "model files hold [[individual]] and [[activity]] tables",
            )),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match &self.0 {
            ChronolaneError::Parse { src, .. } => Some(src as &dyn miette::SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let ChronolaneError::Parse {
            span: Some(span), ..
        } = &self.0
        else {
            return None;
        };

        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

/// Renders `err` as a graphical miette report.
pub fn render_report(err: ChronolaneError) -> String {
    let adapted = ErrorAdapter(err);
    let reporter = miette::GraphicalReportHandler::new();
    let mut writer = String::new();
    if reporter.render_report(&mut writer, &adapted).is_err() {
        return adapted.to_string();
    }
    writer
}
