//! Error types for umlgen operations.
//!
//! [`UmlgenError`] covers the conditions that stop a run or a job. Failures
//! of a single rendering strategy are not errors at this level; see
//! [`crate::strategy::StrategyError`].

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for umlgen operations.
#[derive(Debug, Error)]
pub enum UmlgenError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The primary renderer is absent and installing it failed. Fatal to the run.
    #[error("Rendering capability `{command}` is missing and could not be installed: {reason}")]
    CapabilityMissing { command: String, reason: String },

    /// Even the diagram source could not be saved. Fatal to the job.
    #[error("Output directory {} is not writable: {source}", path.display())]
    OutputDirectoryUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl UmlgenError {
    /// Create a new `OutputDirectoryUnwritable` error for `path`.
    pub fn output_unwritable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::OutputDirectoryUnwritable {
            path: path.into(),
            source,
        }
    }
}
