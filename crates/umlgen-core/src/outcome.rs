//! The per-job result of the rendering pipeline.

use std::path::{Path, PathBuf};

/// What happened to one [`DiagramJob`](crate::job::DiagramJob).
///
/// Exactly one of two shapes is ever constructed:
///
/// - **Rendered**: `succeeded` is true and `artifact_path` points at the
///   rendered document.
/// - **Degraded**: `succeeded` is false, `degraded_to_source_only` is true,
///   `artifact_path` points at the saved diagram source, and `diagnostic`
///   names the command that converts it manually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    succeeded: bool,
    artifact_path: Option<PathBuf>,
    degraded_to_source_only: bool,
    diagnostic: Option<String>,
}

impl RenderOutcome {
    /// Creates the outcome of a successful render.
    pub fn rendered(document: impl Into<PathBuf>) -> Self {
        Self {
            succeeded: true,
            artifact_path: Some(document.into()),
            degraded_to_source_only: false,
            diagnostic: None,
        }
    }

    /// Creates the outcome of a job that only kept its source.
    ///
    /// # Arguments
    ///
    /// * `source` - Path of the saved diagram source.
    /// * `manual_command` - Command line an operator can run to convert it.
    pub fn degraded(source: impl Into<PathBuf>, manual_command: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            artifact_path: Some(source.into()),
            degraded_to_source_only: true,
            diagnostic: Some(manual_command.into()),
        }
    }

    /// Returns true if the rendered document exists
    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Returns the path of the artifact left on disk
    pub fn artifact_path(&self) -> Option<&Path> {
        self.artifact_path.as_deref()
    }

    /// Returns true if only the diagram source was kept
    pub fn degraded_to_source_only(&self) -> bool {
        self.degraded_to_source_only
    }

    /// Returns the manual conversion command for a degraded job
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }
}
