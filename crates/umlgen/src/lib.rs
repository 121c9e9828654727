//! umlgen - Renders diagram sources into documents under partial backend
//! availability.
//!
//! Every job is run through an ordered chain of rendering strategies (a local
//! renderer executable, then a remote rendering service with local page
//! composition). When no strategy succeeds the job degrades to its saved
//! source, so each run always leaves a usable artifact behind.

pub mod config;
pub mod prober;
pub mod report;
pub mod strategy;

mod error;
mod pipeline;

pub use umlgen_core::{geometry, job, outcome, page};

pub use error::UmlgenError;
pub use pipeline::Renderer;
pub use prober::DependencyProber;
pub use report::RunReport;

use std::io::Write;

use log::info;

use job::DiagramJob;

/// Render `jobs` one after another, in order, writing a status line per job.
///
/// A degraded job does not stop the batch. The returned report holds one
/// outcome per job; print its tally with [`RunReport::write_summary`].
///
/// # Errors
///
/// Returns [`UmlgenError::OutputDirectoryUnwritable`] when a job's source
/// cannot be saved, and [`UmlgenError::Io`] when writing to `out` fails.
///
/// # Examples
///
/// ```rust,no_run
/// use umlgen::{Renderer, config::AppConfig, job::DiagramJob, render_all};
///
/// let renderer = Renderer::new(&AppConfig::default());
/// let jobs = vec![DiagramJob::new("demo", "Demo", "@startuml\nA -> B\n@enduml\n")];
///
/// let mut stdout = std::io::stdout();
/// let report = render_all(&renderer, &jobs, &mut stdout).expect("render failed");
/// report.write_summary(&mut stdout).expect("stdout closed");
/// ```
pub fn render_all(
    renderer: &Renderer,
    jobs: &[DiagramJob],
    out: &mut dyn Write,
) -> Result<RunReport, UmlgenError> {
    info!(jobs = jobs.len(), output_dir = renderer.output_dir().display().to_string(); "Rendering diagrams");

    let mut report = RunReport::new(renderer.output_dir());
    for job in jobs {
        write!(out, "Generating {}... ", job.output_base_name())?;
        out.flush()?;

        let outcome = renderer.render(job)?;
        writeln!(out, "{}", report::status_line(&outcome))?;
        report.record(job.name(), outcome);
    }

    info!(
        succeeded = report.success_count(),
        total = report.total();
        "Rendering finished"
    );
    Ok(report)
}
