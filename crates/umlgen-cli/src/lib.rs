//! CLI logic for the umlgen diagram generator.
//!
//! This module wires configuration loading, the dependency prober and the
//! rendering pipeline together for the built-in diagram catalog.

pub mod catalog;
pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::io::{self, Write};

use log::info;

use umlgen::{DependencyProber, Renderer, UmlgenError, job::DiagramJob, render_all};

const BANNER: &str = "UML Diagram Generator for Voice Automation Hub";
const RULE_WIDTH: usize = 60;

/// Run the umlgen CLI application, writing progress to stdout.
///
/// # Errors
///
/// See [`run_with_output`].
pub fn run(args: &Args) -> Result<(), UmlgenError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_output(args, &mut out)
}

/// Run the umlgen CLI application, writing progress to `out`.
///
/// A run in which some diagrams only have their source saved is still a
/// success; the summary written to `out` says which ones.
///
/// # Errors
///
/// Returns `UmlgenError` for:
/// - Configuration loading or validation errors, including unknown `--only` names
/// - A missing renderer whose installation failed
/// - An output directory where even the diagram sources cannot be saved
/// - Failures writing to `out`
pub fn run_with_output(args: &Args, out: &mut dyn Write) -> Result<(), UmlgenError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(dir) = &args.output_dir {
        app_config = app_config.with_output_dir(dir);
    }
    if args.offline {
        app_config = app_config.with_remote_enabled(false);
    }
    app_config.validate()?;

    if args.list {
        for entry in catalog::catalog() {
            writeln!(out, "{:<26}{}", entry.name(), entry.output_base_name())?;
        }
        return Ok(());
    }

    let jobs: Vec<DiagramJob> = catalog::select(&args.only)?
        .into_iter()
        .map(|entry| entry.job())
        .collect();

    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "{rule}\n{BANNER}\n{rule}\n")?;

    DependencyProber::new(app_config.native()).ensure()?;

    writeln!(out, "Generating UML diagrams...\n")?;
    let renderer = Renderer::new(&app_config);
    let report = render_all(&renderer, &jobs, out)?;
    report.write_summary(out)?;

    info!(
        succeeded = report.success_count(),
        total = report.total();
        "Run complete"
    );

    Ok(())
}
