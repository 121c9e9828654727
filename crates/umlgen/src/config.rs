//! Configuration types for the rendering pipeline.
//!
//! All types implement [`serde::Deserialize`] for loading from external
//! sources. Every field is optional in the serialized form; missing values
//! fall back to the defaults documented on each field.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`OutputConfig`] - Where artifacts are written.
//! - [`NativeConfig`] - The local renderer executable and its installer.
//! - [`RemoteConfig`] - The remote rendering endpoint.
//! - [`DocumentConfig`] - Page composition of remotely rendered images.
//!
//! # Example
//!
//! ```
//! # use umlgen::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.native().command(), "plantuml");
//! assert!(config.validate().is_ok());
//! ```

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use umlgen_core::{job::ArtifactPaths, page::PageSize};

use crate::UmlgenError;

/// Placeholder replaced by the companion source file path.
pub const SOURCE_PLACEHOLDER: &str = "{source}";
/// Placeholder replaced by the rendered document path.
pub const DOCUMENT_PLACEHOLDER: &str = "{document}";
/// Placeholder replaced by the output directory.
pub const OUTPUT_DIR_PLACEHOLDER: &str = "{output_dir}";

/// Top-level configuration combining every section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Output section.
    #[serde(default)]
    output: OutputConfig,

    /// Local renderer section.
    #[serde(default)]
    native: NativeConfig,

    /// Remote endpoint section.
    #[serde(default)]
    remote: RemoteConfig,

    /// Page composition section.
    #[serde(default)]
    document: DocumentConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        output: OutputConfig,
        native: NativeConfig,
        remote: RemoteConfig,
        document: DocumentConfig,
    ) -> Self {
        Self {
            output,
            native,
            remote,
            document,
        }
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Returns the local renderer configuration.
    pub fn native(&self) -> &NativeConfig {
        &self.native
    }

    /// Returns the remote endpoint configuration.
    pub fn remote(&self) -> &RemoteConfig {
        &self.remote
    }

    /// Returns the page composition configuration.
    pub fn document(&self) -> &DocumentConfig {
        &self.document
    }

    /// Replaces the output directory.
    pub fn with_output_dir(mut self, directory: impl Into<PathBuf>) -> Self {
        self.output.directory = directory.into();
        self
    }

    /// Replaces the local renderer section.
    pub fn with_native(mut self, native: NativeConfig) -> Self {
        self.native = native;
        self
    }

    /// Replaces the remote endpoint section.
    pub fn with_remote(mut self, remote: RemoteConfig) -> Self {
        self.remote = remote;
        self
    }

    /// Enables or disables the remote strategy.
    pub fn with_remote_enabled(mut self, enabled: bool) -> Self {
        self.remote.enabled = enabled;
        self
    }

    /// Checks values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`UmlgenError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<(), UmlgenError> {
        if self.native.command.trim().is_empty() {
            return Err(UmlgenError::Config(
                "native.command must not be empty".to_string(),
            ));
        }
        if self.native.timeout_secs == 0 {
            return Err(UmlgenError::Config(
                "native.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.remote.enabled && self.remote.base_url.trim().is_empty() {
            return Err(UmlgenError::Config(
                "remote.base_url must not be empty".to_string(),
            ));
        }
        if self.remote.timeout_secs == 0 {
            return Err(UmlgenError::Config(
                "remote.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.document.margin) {
            return Err(UmlgenError::Config(format!(
                "document.margin must be in [0, 1), got {}",
                self.document.margin
            )));
        }
        if self.document.extension == self.output.source_extension {
            return Err(UmlgenError::Config(format!(
                "document.extension and output.source_extension must differ, both are `{}`",
                self.document.extension
            )));
        }
        Ok(())
    }
}

/// Where artifacts are written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory, created on demand. Default: `uml-diagrams`.
    directory: PathBuf,

    /// Extension of the companion source file. Default: `puml`.
    source_extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("uml-diagrams"),
            source_extension: "puml".to_string(),
        }
    }
}

impl OutputConfig {
    /// Returns the output directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns the companion source file extension.
    pub fn source_extension(&self) -> &str {
        &self.source_extension
    }
}

/// The local renderer executable.
///
/// `args` may contain [`SOURCE_PLACEHOLDER`], [`DOCUMENT_PLACEHOLDER`] and
/// [`OUTPUT_DIR_PLACEHOLDER`], substituted per job.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NativeConfig {
    /// Executable name or path. Default: `plantuml`.
    command: String,

    /// Arguments. Default: `["-tpdf", "{source}"]`.
    args: Vec<String>,

    /// Seconds before the process is killed. Default: 30.
    timeout_secs: u64,

    /// Install command line run once when the executable is missing. An
    /// empty list disables installation.
    /// Default: `brew install plantuml` on macOS, none elsewhere.
    install: Option<Vec<String>>,
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self {
            command: "plantuml".to_string(),
            args: vec!["-tpdf".to_string(), SOURCE_PLACEHOLDER.to_string()],
            timeout_secs: 30,
            install: default_install_command(),
        }
    }
}

fn default_install_command() -> Option<Vec<String>> {
    if cfg!(target_os = "macos") {
        Some(vec![
            "brew".to_string(),
            "install".to_string(),
            "plantuml".to_string(),
        ])
    } else {
        None
    }
}

impl NativeConfig {
    /// Creates a configuration invoking `command` with `args` and no installer.
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            timeout_secs: 30,
            install: None,
        }
    }

    /// Replaces the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Replaces the install command line.
    pub fn with_install(mut self, install: Option<Vec<String>>) -> Self {
        self.install = install;
        self
    }

    /// Returns the executable name.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Returns the unsubstituted argument template.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the process timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the install command line, if any.
    pub fn install(&self) -> Option<&[String]> {
        self.install.as_deref().filter(|install| !install.is_empty())
    }

    /// Returns the arguments with placeholders substituted for one job.
    pub fn resolved_args(&self, paths: &ArtifactPaths) -> Vec<String> {
        let source = paths.source().to_string_lossy();
        let document = paths.document().to_string_lossy();
        let output_dir = paths.output_dir().to_string_lossy();

        self.args
            .iter()
            .map(|arg| {
                arg.replace(SOURCE_PLACEHOLDER, &source)
                    .replace(DOCUMENT_PLACEHOLDER, &document)
                    .replace(OUTPUT_DIR_PLACEHOLDER, &output_dir)
            })
            .collect()
    }

    /// Returns the command line an operator can paste into a shell to render
    /// one job by hand.
    ///
    /// ```
    /// # use std::path::Path;
    /// # use umlgen::config::NativeConfig;
    /// # use umlgen_core::job::DiagramJob;
    /// let job = DiagramJob::new("class", "Class Diagram", "@startuml\n@enduml\n");
    /// let paths = job.artifact_paths(Path::new("out"), "puml", "pdf");
    ///
    /// let native = NativeConfig::new("plantuml", vec!["-tpdf".into(), "{source}".into()]);
    /// assert_eq!(native.manual_command(&paths), "plantuml -tpdf \"out/Class Diagram.puml\"");
    /// ```
    pub fn manual_command(&self, paths: &ArtifactPaths) -> String {
        std::iter::once(self.command.clone())
            .chain(self.resolved_args(paths))
            .map(|part| shell_quote(&part))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Wraps `part` in double quotes when a shell would split or expand it.
fn shell_quote(part: &str) -> String {
    let needs_quotes = part.is_empty()
        || part
            .chars()
            .any(|c| c.is_whitespace() || "'\"$`\\*?&;|<>()".contains(c));
    if needs_quotes {
        let escaped = part
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('$', "\\$")
            .replace('`', "\\`");
        format!("\"{escaped}\"")
    } else {
        part.to_string()
    }
}

/// The remote rendering endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Whether the remote strategy is attempted at all. Default: true.
    enabled: bool,

    /// Base URL the encoded source is appended to.
    /// Default: `http://www.plantuml.com/plantuml/img/`.
    base_url: String,

    /// Seconds for the whole request. Default: 30.
    timeout_secs: u64,

    /// Largest accepted response body. Default: 10 MiB.
    max_response_bytes: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "http://www.plantuml.com/plantuml/img/".to_string(),
            timeout_secs: 30,
            max_response_bytes: 10 * 1024 * 1024,
        }
    }
}

impl RemoteConfig {
    /// Creates an enabled configuration for `base_url` with default limits.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Replaces the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Returns true if the remote strategy should be attempted.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the response size limit in bytes.
    pub fn max_response_bytes(&self) -> u64 {
        self.max_response_bytes
    }
}

/// Page composition of remotely rendered images.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Page format. Default: [`PageSize::Letter`].
    page_size: PageSize,

    /// Fraction of the limiting page dimension left empty. Default: 0.1.
    margin: f32,

    /// Extension of the rendered document. Default: `pdf`.
    extension: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            margin: 0.1,
            extension: "pdf".to_string(),
        }
    }
}

impl DocumentConfig {
    /// Returns the page format.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Returns the margin fraction.
    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Returns the rendered document extension.
    pub fn extension(&self) -> &str {
        &self.extension
    }
}
