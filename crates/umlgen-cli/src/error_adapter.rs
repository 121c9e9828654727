//! Error adapter for converting [`UmlgenError`] to miette diagnostics.
//!
//! This module provides the bridge between the library's error type and
//! miette's report formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use umlgen::UmlgenError;

/// Adapter giving a [`UmlgenError`] a diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a UmlgenError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            UmlgenError::Io(_) => "umlgen::io",
            UmlgenError::Config(_) => "umlgen::config",
            UmlgenError::CapabilityMissing { .. } => "umlgen::capability",
            UmlgenError::OutputDirectoryUnwritable { .. } => "umlgen::output",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help: Box<dyn fmt::Display + 'a> = match &self.0 {
            UmlgenError::Io(_) => return None,
            UmlgenError::Config(_) => Box::new(
                "check the configuration file, or pass --config to select another one",
            ),
            UmlgenError::CapabilityMissing { command, .. } => Box::new(format!(
                "install `{command}` manually, or set `native.install = []` to skip installation"
            )),
            UmlgenError::OutputDirectoryUnwritable { .. } => {
                Box::new("choose another location with --output-dir")
            }
        };
        Some(help)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
