//! Remote rendering with local page composition.
//!
//! The diagram source is encoded into a GET request against a rendering
//! service. The returned image is decoded, scaled onto a single page and
//! written as a PDF document.

mod compose;
mod encode;

pub use compose::compose_page;
pub use encode::{encode_source, request_url};

use std::{fs, io, path::PathBuf};

use log::{debug, trace, warn};
use ureq::Agent;

use umlgen_core::job::{ArtifactPaths, DiagramJob};

use super::{RenderStrategy, StrategyError, StrategyResult};
use crate::config::{DocumentConfig, RemoteConfig};

/// Renders through an HTTP rendering service.
pub struct RemoteRenderer {
    config: RemoteConfig,
    document: DocumentConfig,
    agent: Agent,
}

impl RemoteRenderer {
    /// Create a renderer with its own HTTP agent bound by the configured timeout.
    pub fn new(config: RemoteConfig, document: DocumentConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(config.timeout()))
            .build()
            .into();

        Self {
            config,
            document,
            agent,
        }
    }

    fn try_render(&self, job: &DiagramJob, paths: &ArtifactPaths) -> Result<PathBuf, StrategyError> {
        if !self.config.enabled() {
            return Err(StrategyError::Disabled);
        }

        let url = request_url(self.config.base_url(), job.source())?;
        debug!(diagram = job.name(), url_len = url.len(); "Requesting remote render");

        let bytes = self.fetch(&url)?;
        trace!(diagram = job.name(), bytes = bytes.len(); "Received image payload");

        let image = image::load_from_memory(&bytes)?;
        let pdf = compose_page(
            &image,
            self.document.page_size().size(),
            self.document.margin(),
            job.name(),
        )?;

        write_document(paths, &pdf)?;
        Ok(paths.document().to_path_buf())
    }

    /// Issues the GET request and returns the body of a 2xx response.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, StrategyError> {
        let response = self.agent.get(url).call().map_err(|err| match err {
            ureq::Error::StatusCode(code) => StrategyError::Status(code),
            ureq::Error::Timeout(_) => StrategyError::Timeout(self.config.timeout()),
            other => StrategyError::Transport(other.to_string()),
        })?;

        response
            .into_body()
            .with_config()
            .limit(self.config.max_response_bytes())
            .read_to_vec()
            .map_err(|err| StrategyError::Transport(err.to_string()))
    }
}

impl RenderStrategy for RemoteRenderer {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn render(&self, job: &DiagramJob, paths: &ArtifactPaths) -> StrategyResult {
        self.try_render(job, paths).into()
    }
}

/// Writes the composed document, removing it again if the write is cut short.
fn write_document(paths: &ArtifactPaths, pdf: &[u8]) -> io::Result<()> {
    fs::create_dir_all(paths.output_dir())?;
    fs::write(paths.document(), pdf).inspect_err(|err| {
        warn!(path = paths.document().display().to_string(), err:%; "Writing document failed");
        let _ = fs::remove_file(paths.document());
    })
}
