//! Diagram jobs and the artifact paths derived from them.

use std::path::{Path, PathBuf};

/// One diagram to render.
///
/// A job is created by the caller from a diagram source provider and is never
/// mutated afterwards. The source text is opaque: it is handed to the
/// renderers exactly as given.
///
/// # Examples
///
/// ```
/// # use umlgen_core::job::DiagramJob;
/// let job = DiagramJob::new("class", "Class Diagram", "@startuml\nA -> B\n@enduml\n");
/// assert_eq!(job.name(), "class");
/// assert_eq!(job.output_base_name(), "Class Diagram");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramJob {
    name: String,
    output_base_name: String,
    source: String,
}

impl DiagramJob {
    /// Creates a new job.
    ///
    /// # Arguments
    ///
    /// * `name` - Short identifier used in logs and reports.
    /// * `output_base_name` - File name, without extension, of every artifact.
    /// * `source` - The diagram description.
    pub fn new(
        name: impl Into<String>,
        output_base_name: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            output_base_name: output_base_name.into(),
            source: source.into(),
        }
    }

    /// Returns the short identifier of the diagram
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the artifact file name without extension
    pub fn output_base_name(&self) -> &str {
        &self.output_base_name
    }

    /// Returns the diagram source text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Derives the artifact locations of this job inside `output_dir`.
    ///
    /// # Arguments
    ///
    /// * `output_dir` - Directory that receives the artifacts.
    /// * `source_extension` - Extension of the companion source file (e.g. `puml`).
    /// * `document_extension` - Extension of the rendered document (e.g. `pdf`).
    pub fn artifact_paths(
        &self,
        output_dir: &Path,
        source_extension: &str,
        document_extension: &str,
    ) -> ArtifactPaths {
        ArtifactPaths {
            output_dir: output_dir.to_path_buf(),
            source: output_dir.join(format!("{}.{source_extension}", self.output_base_name)),
            document: output_dir.join(format!("{}.{document_extension}", self.output_base_name)),
        }
    }
}

/// The on-disk locations belonging to one job.
///
/// The source file is always written; the document exists only when a
/// rendering strategy succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    output_dir: PathBuf,
    source: PathBuf,
    document: PathBuf,
}

impl ArtifactPaths {
    /// Returns the directory holding both artifacts
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the path of the companion source file
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Returns the path of the rendered document
    pub fn document(&self) -> &Path {
        &self.document
    }
}
