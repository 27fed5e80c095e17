//! Diagnostic rendering through miette's graphical handler.

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, GraphicalTheme, LabeledSpan,
    NamedSource, SourceCode,
};
use mirth_diagnostics::{Diagnostic, Severity};
use std::fmt;

/// A scanner diagnostic paired with the file it came from.
#[derive(Debug)]
pub struct Report<'a> {
    diagnostic: &'a Diagnostic,
    source: NamedSource<String>,
}

impl<'a> Report<'a> {
    pub fn new(diagnostic: &'a Diagnostic, name: &str, text: &str) -> Self {
        Self {
            diagnostic,
            source: NamedSource::new(name, text.to_string()),
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.diagnostic.message)
    }
}

impl std::error::Error for Report<'_> {}

impl MietteDiagnostic for Report<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        Some(Box::new(self.diagnostic.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diagnostic.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.source)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let position = self.diagnostic.position;
        Some(Box::new(std::iter::once(LabeledSpan::at_offset(
            position.offset,
            format!("here ({})", position),
        ))))
    }
}

/// Render a diagnostic with a source excerpt.
pub fn render(diagnostic: &Diagnostic, name: &str, text: &str, color: bool) -> String {
    let theme = if color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let handler = GraphicalReportHandler::new_themed(theme);
    let report = Report::new(diagnostic, name, text);

    let mut out = String::new();
    if handler.render_report(&mut out, &report).is_err() {
        out = format!("{}: {}\n", name, diagnostic);
    }
    out
}
