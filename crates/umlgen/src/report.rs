//! Human-readable reporting of a batch run.
//!
//! [`RunReport`] collects one [`RenderOutcome`] per diagram and writes the
//! final tally. When any diagram degraded, a single guidance block lists the
//! manual conversion command of every degraded diagram.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use umlgen_core::outcome::RenderOutcome;

const RULE: &str = "============================================================";

/// Heading of the guidance block printed when diagrams degraded.
pub const GUIDANCE_HEADING: &str =
    "Some diagrams were not rendered; their PlantUML sources were saved.";

/// Where to get the renderer used by the manual conversion commands.
pub const RENDERER_DOWNLOAD_URL: &str = "https://plantuml.com/download";

/// One reported diagram.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    name: String,
    outcome: RenderOutcome,
}

impl ReportEntry {
    /// Returns the diagram name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the pipeline outcome
    pub fn outcome(&self) -> &RenderOutcome {
        &self.outcome
    }
}

/// Outcomes of a run, in the order the diagrams were rendered.
#[derive(Debug, Clone)]
pub struct RunReport {
    output_dir: PathBuf,
    entries: Vec<ReportEntry>,
}

impl RunReport {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            entries: Vec::new(),
        }
    }

    /// Adds the outcome of one diagram.
    pub fn record(&mut self, name: impl Into<String>, outcome: RenderOutcome) {
        self.entries.push(ReportEntry {
            name: name.into(),
            outcome,
        });
    }

    /// Returns every recorded entry
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Returns the directory the artifacts were written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the number of diagrams rendered to a document
    pub fn success_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.succeeded()).count()
    }

    /// Returns the number of recorded diagrams
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Returns the entries that kept only their source
    pub fn degraded(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries
            .iter()
            .filter(|e| e.outcome.degraded_to_source_only())
    }

    /// Writes the tally and, if needed, the guidance block.
    pub fn write_summary(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{RULE}")?;
        writeln!(
            out,
            "Generation complete: {}/{} diagrams generated",
            self.success_count(),
            self.total()
        )?;
        writeln!(out, "{RULE}")?;
        writeln!(out)?;
        writeln!(out, "Diagrams saved in: {}", self.output_dir.display())?;

        let commands: Vec<&str> = self
            .degraded()
            .filter_map(|e| e.outcome.diagnostic())
            .collect();
        if commands.is_empty() {
            return Ok(());
        }

        writeln!(out)?;
        writeln!(out, "{GUIDANCE_HEADING}")?;
        writeln!(out, "Install PlantUML ({RENDERER_DOWNLOAD_URL}), then run:")?;
        for command in commands {
            writeln!(out, "  {command}")?;
        }
        Ok(())
    }
}

/// Formats the one-line status of a finished diagram.
pub fn status_line(outcome: &RenderOutcome) -> String {
    let path = outcome
        .artifact_path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    if outcome.succeeded() {
        format!("✓ Generated: {path}")
    } else {
        format!("⚠ Not rendered, source saved: {path}")
    }
}
