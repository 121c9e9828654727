//! Rendering strategies.
//!
//! A strategy turns one job's source into a rendered document, or explains
//! why it could not. The pipeline holds an ordered list of strategies and
//! stops at the first [`StrategyResult::Success`].
//!
//! Available strategies:
//!
//! - [`NativeRenderer`] - invokes a local renderer executable.
//! - [`RemoteRenderer`] - fetches an image from a rendering service and
//!   composes it onto a page.

mod native;
mod remote;

pub use native::NativeRenderer;
pub use remote::{RemoteRenderer, compose_page, encode_source, request_url};

use std::{io, path::PathBuf, process::ExitStatus, time::Duration};

use log::Level;
use thiserror::Error;

use umlgen_core::job::{ArtifactPaths, DiagramJob};

/// Trait implemented by every rendering strategy.
pub trait RenderStrategy {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Attempt to render `job`, writing the document to `paths.document()`.
    ///
    /// Implementations never panic or return errors: every failure is folded
    /// into [`StrategyResult::Unavailable`] or [`StrategyResult::Failed`], and
    /// any partial document is removed before returning.
    fn render(&self, job: &DiagramJob, paths: &ArtifactPaths) -> StrategyResult;
}

/// Result of one strategy attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyResult {
    /// The document was written to the contained path.
    Success(PathBuf),
    /// The strategy could not be attempted (missing tool, no network, timeout).
    Unavailable(String),
    /// The strategy ran and did not produce a usable document.
    Failed(String),
}

impl StrategyResult {
    /// Level the pipeline logs this result at. Anything short of a rendered
    /// document is a warning.
    pub fn log_level(&self) -> Level {
        match self {
            StrategyResult::Success(_) => Level::Info,
            StrategyResult::Unavailable(_) | StrategyResult::Failed(_) => Level::Warn,
        }
    }
}

impl From<Result<PathBuf, StrategyError>> for StrategyResult {
    fn from(result: Result<PathBuf, StrategyError>) -> Self {
        match result {
            Ok(document) => StrategyResult::Success(document),
            Err(err) if err.is_unavailable() => StrategyResult::Unavailable(err.to_string()),
            Err(err) => StrategyResult::Failed(err.to_string()),
        }
    }
}

/// Errors raised inside a strategy before they are folded into a
/// [`StrategyResult`].
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("`{0}` was not found")]
    NotFound(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("disabled by configuration")]
    Disabled,

    #[error("request failed: {0}")]
    Transport(String),

    #[error("diagram source {} is missing", .0.display())]
    MissingSource(PathBuf),

    #[error("exited with {status}: {stderr}")]
    ExitStatus { status: ExitStatus, stderr: String },

    #[error("reported success but wrote no document at {}", .0.display())]
    MissingOutput(PathBuf),

    #[error("endpoint answered with HTTP status {0}")]
    Status(u16),

    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("could not compose page: {0}")]
    Compose(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StrategyError {
    /// Returns true if the strategy could not be attempted at all, as opposed
    /// to having run and failed.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StrategyError::NotFound(_)
                | StrategyError::Timeout(_)
                | StrategyError::Disabled
                | StrategyError::Transport(_)
        )
    }
}
