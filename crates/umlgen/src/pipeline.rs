//! The renderer pipeline.
//!
//! For every job the diagram source is saved first, then each strategy is
//! attempted once, in order, until one succeeds. When none does, the job
//! degrades to the saved source and a manual conversion command.
//!
//! After [`Renderer::render`] returns `Ok`, the output directory holds the
//! source file and either the rendered document (success) or no document at
//! all (degraded).

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, info, log, warn};

use umlgen_core::{
    job::{ArtifactPaths, DiagramJob},
    outcome::RenderOutcome,
};

use crate::{
    UmlgenError,
    config::{AppConfig, NativeConfig},
    strategy::{NativeRenderer, RemoteRenderer, RenderStrategy, StrategyResult},
};

/// Renders jobs through an ordered chain of strategies.
///
/// # Examples
///
/// ```rust,no_run
/// use umlgen::{Renderer, config::AppConfig, job::DiagramJob};
///
/// let renderer = Renderer::new(&AppConfig::default());
/// let job = DiagramJob::new("demo", "Demo", "@startuml\nA -> B\n@enduml\n");
///
/// let outcome = renderer.render(&job).expect("output directory is writable");
/// if !outcome.succeeded() {
///     println!("run: {}", outcome.diagnostic().unwrap_or_default());
/// }
/// ```
pub struct Renderer {
    output_dir: PathBuf,
    source_extension: String,
    document_extension: String,
    native: NativeConfig,
    strategies: Vec<Box<dyn RenderStrategy>>,
}

impl Renderer {
    /// Create a renderer with the standard chain: native, then remote.
    pub fn new(config: &AppConfig) -> Self {
        let strategies: Vec<Box<dyn RenderStrategy>> = vec![
            Box::new(NativeRenderer::new(config.native().clone())),
            Box::new(RemoteRenderer::new(
                config.remote().clone(),
                config.document().clone(),
            )),
        ];
        Self::with_strategies(config, strategies)
    }

    /// Create a renderer with a custom strategy chain.
    ///
    /// `config` still supplies the output location and the manual conversion
    /// command reported for degraded jobs.
    pub fn with_strategies(config: &AppConfig, strategies: Vec<Box<dyn RenderStrategy>>) -> Self {
        Self {
            output_dir: config.output().directory().to_path_buf(),
            source_extension: config.output().source_extension().to_string(),
            document_extension: config.document().extension().to_string(),
            native: config.native().clone(),
            strategies,
        }
    }

    /// Returns the directory artifacts are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the artifact locations for `job`.
    pub fn artifact_paths(&self, job: &DiagramJob) -> ArtifactPaths {
        job.artifact_paths(
            &self.output_dir,
            &self.source_extension,
            &self.document_extension,
        )
    }

    /// Render one job.
    ///
    /// Strategy failures never surface as errors; they lead to the next
    /// strategy and finally to a degraded outcome.
    ///
    /// # Errors
    ///
    /// Returns [`UmlgenError::OutputDirectoryUnwritable`] only when the
    /// diagram source itself cannot be saved.
    pub fn render(&self, job: &DiagramJob) -> Result<RenderOutcome, UmlgenError> {
        let paths = self.artifact_paths(job);
        info!(diagram = job.name(); "Rendering diagram");

        // No strategy runs unless the companion source is on disk
        persist_source(job, &paths)
            .map_err(|err| UmlgenError::output_unwritable(paths.output_dir(), err))?;

        // A document from an earlier run must not pass for this run's output
        discard_document(&paths);

        for strategy in &self.strategies {
            debug!(diagram = job.name(), strategy = strategy.name(); "Attempting strategy");

            let result = strategy.render(job, &paths);
            let level = result.log_level();
            match result {
                StrategyResult::Success(document) => {
                    info!(
                        diagram = job.name(),
                        strategy = strategy.name(),
                        path = document.display().to_string();
                        "Diagram rendered"
                    );
                    return Ok(RenderOutcome::rendered(document));
                }
                StrategyResult::Unavailable(reason) => {
                    log!(level, diagram = job.name(), strategy = strategy.name(), reason; "Strategy unavailable");
                }
                StrategyResult::Failed(reason) => {
                    log!(level, diagram = job.name(), strategy = strategy.name(), reason; "Strategy failed");
                }
            }
            discard_document(&paths);
        }

        self.degrade(job, &paths)
    }

    /// Falls back to the saved source and reports how to convert it manually.
    fn degrade(&self, job: &DiagramJob, paths: &ArtifactPaths) -> Result<RenderOutcome, UmlgenError> {
        // A strategy may have removed or replaced the source
        if !paths.source().is_file() {
            persist_source(job, paths)
                .map_err(|err| UmlgenError::output_unwritable(paths.output_dir(), err))?;
        }

        let command = self.native.manual_command(paths);
        warn!(
            diagram = job.name(),
            path = paths.source().display().to_string(),
            command;
            "No strategy succeeded, kept diagram source only"
        );

        Ok(RenderOutcome::degraded(paths.source(), command))
    }
}

/// Writes the job's source to its companion file, creating the directory.
fn persist_source(job: &DiagramJob, paths: &ArtifactPaths) -> io::Result<()> {
    fs::create_dir_all(paths.output_dir())?;
    fs::write(paths.source(), job.source())
}

/// Removes the document path if anything is there.
fn discard_document(paths: &ArtifactPaths) {
    let document = paths.document();
    match fs::remove_file(document) {
        Ok(()) => debug!(path = document.display().to_string(); "Discarded document"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            warn!(path = document.display().to_string(), err:%; "Could not discard document")
        }
    }
}
