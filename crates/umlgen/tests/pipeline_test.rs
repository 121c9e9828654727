//! Integration tests for the rendering pipeline against a local stand-in for
//! the remote rendering service.

mod common;

use std::{fs, path::Path, time::Duration};

use tempfile::tempdir;

use umlgen::{
    Renderer, UmlgenError,
    config::{AppConfig, NativeConfig, RemoteConfig},
    job::DiagramJob,
    render_all,
    report::GUIDANCE_HEADING,
};

use common::{MockEndpoint, eight_jobs, png_bytes, unreachable_base_url};

const MISSING_RENDERER: &str = "umlgen-test-renderer-that-does-not-exist";

fn missing_native() -> NativeConfig {
    NativeConfig::new(
        MISSING_RENDERER,
        vec!["-tpdf".to_string(), "{source}".to_string()],
    )
}

fn config(output: &Path, native: NativeConfig, base_url: &str) -> AppConfig {
    AppConfig::default()
        .with_output_dir(output)
        .with_native(native)
        .with_remote(RemoteConfig::new(base_url).with_timeout(Duration::from_secs(5)))
}

fn job() -> DiagramJob {
    DiagramJob::new(
        "sequence-execution",
        "Sequence Diagram - Command Execution",
        "@startuml\nactor User\nUser -> App : POST /api/execute\n@enduml\n",
    )
}

#[test]
fn test_remote_success_when_native_missing() {
    let dir = tempdir().unwrap();
    let endpoint = MockEndpoint::start(200, png_bytes(64, 32));
    let renderer = Renderer::new(&config(dir.path(), missing_native(), endpoint.base_url()));

    let outcome = renderer.render(&job()).unwrap();
    let paths = renderer.artifact_paths(&job());

    assert!(outcome.succeeded(), "{outcome:?}");
    assert!(!outcome.degraded_to_source_only());
    assert_eq!(outcome.artifact_path(), Some(paths.document()));
    assert!(fs::read(paths.document()).unwrap().starts_with(b"%PDF-"));
    assert_eq!(fs::read_to_string(paths.source()).unwrap(), job().source());
    assert_eq!(endpoint.request_count(), 1);
}

#[test]
fn test_server_error_degrades_to_source() {
    let dir = tempdir().unwrap();
    let endpoint = MockEndpoint::start(500, b"internal error".to_vec());
    let renderer = Renderer::new(&config(dir.path(), missing_native(), endpoint.base_url()));

    let outcome = renderer.render(&job()).unwrap();
    let paths = renderer.artifact_paths(&job());

    assert!(!outcome.succeeded());
    assert!(outcome.degraded_to_source_only());
    assert_eq!(fs::read(paths.source()).unwrap(), job().source().as_bytes());
    assert!(!paths.document().exists());
    assert_eq!(endpoint.request_count(), 1);

    let diagnostic = outcome.diagnostic().unwrap();
    assert!(diagnostic.starts_with(MISSING_RENDERER), "{diagnostic}");
    assert!(diagnostic.contains("Sequence Diagram - Command Execution.puml"));
}

#[test]
fn test_undecodable_payload_degrades_to_source() {
    let dir = tempdir().unwrap();
    let endpoint = MockEndpoint::start(200, b"<html>not an image</html>".to_vec());
    let renderer = Renderer::new(&config(dir.path(), missing_native(), endpoint.base_url()));

    let outcome = renderer.render(&job()).unwrap();

    assert!(outcome.degraded_to_source_only());
    assert!(!renderer.artifact_paths(&job()).document().exists());
}

#[test]
fn test_unreachable_endpoint_degrades_to_source() {
    let dir = tempdir().unwrap();
    let renderer = Renderer::new(&config(
        dir.path(),
        missing_native(),
        &unreachable_base_url(),
    ));

    let outcome = renderer.render(&job()).unwrap();

    assert!(outcome.degraded_to_source_only());
    assert!(renderer.artifact_paths(&job()).source().is_file());
}

#[test]
fn test_disabled_remote_is_never_contacted() {
    let dir = tempdir().unwrap();
    let endpoint = MockEndpoint::start(200, png_bytes(8, 8));
    let renderer = Renderer::new(
        &config(dir.path(), missing_native(), endpoint.base_url()).with_remote_enabled(false),
    );

    let outcome = renderer.render(&job()).unwrap();

    assert!(outcome.degraded_to_source_only());
    assert_eq!(endpoint.request_count(), 0);
}

#[cfg(unix)]
#[test]
fn test_native_success_issues_no_request() {
    let dir = tempdir().unwrap();
    let endpoint = MockEndpoint::start(200, png_bytes(8, 8));
    let native = NativeConfig::new(
        "sh",
        vec![
            "-c".to_string(),
            "printf '%%PDF-1.4 native' > \"$1\"".to_string(),
            "sh".to_string(),
            "{document}".to_string(),
        ],
    );
    let renderer = Renderer::new(&config(dir.path(), native, endpoint.base_url()));

    let outcome = renderer.render(&job()).unwrap();
    let paths = renderer.artifact_paths(&job());

    assert!(outcome.succeeded());
    assert_eq!(fs::read(paths.document()).unwrap(), b"%PDF-1.4 native");
    assert_eq!(endpoint.request_count(), 0);
}

#[test]
fn test_batch_all_rendered_remotely() {
    let dir = tempdir().unwrap();
    let endpoint = MockEndpoint::start(200, png_bytes(120, 80));
    let renderer = Renderer::new(&config(dir.path(), missing_native(), endpoint.base_url()));
    let jobs = eight_jobs();

    let mut out = Vec::new();
    let report = render_all(&renderer, &jobs, &mut out).unwrap();
    report.write_summary(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(report.success_count(), 8);
    assert_eq!(report.total(), 8);
    assert_eq!(report.degraded().count(), 0);
    assert!(text.contains("Generation complete: 8/8 diagrams generated"));
    assert!(!text.contains(GUIDANCE_HEADING));
    for job in &jobs {
        assert!(renderer.artifact_paths(job).document().is_file());
    }
    assert_eq!(endpoint.request_count(), 8);
}

#[test]
fn test_batch_all_degraded() {
    let dir = tempdir().unwrap();
    let endpoint = MockEndpoint::start(503, Vec::new());
    let renderer = Renderer::new(&config(dir.path(), missing_native(), endpoint.base_url()));
    let jobs = eight_jobs();

    let mut out = Vec::new();
    let report = render_all(&renderer, &jobs, &mut out).unwrap();
    report.write_summary(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(report.success_count(), 0);
    assert_eq!(report.degraded().count(), 8);
    assert!(text.contains("Generation complete: 0/8 diagrams generated"));
    assert_eq!(text.matches(GUIDANCE_HEADING).count(), 1);
    for job in &jobs {
        let paths = renderer.artifact_paths(job);
        assert_eq!(fs::read_to_string(paths.source()).unwrap(), job.source());
        assert!(!paths.document().exists());

        let command = NativeConfig::new(
            MISSING_RENDERER,
            vec!["-tpdf".to_string(), "{source}".to_string()],
        )
        .manual_command(&paths);
        assert_eq!(text.matches(command.as_str()).count(), 1, "{command}");
    }
}

#[test]
fn test_batch_stops_on_unwritable_output() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not-a-directory");
    fs::write(&blocker, b"").unwrap();
    let renderer = Renderer::new(
        &config(&blocker, missing_native(), &unreachable_base_url()).with_remote_enabled(false),
    );

    let mut out = Vec::new();
    let err = render_all(&renderer, &eight_jobs(), &mut out).unwrap_err();

    assert!(matches!(err, UmlgenError::OutputDirectoryUnwritable { .. }));
}

#[test]
fn test_occupied_source_path_never_reports_success() {
    let dir = tempdir().unwrap();
    let endpoint = MockEndpoint::start(200, png_bytes(64, 32));
    let renderer = Renderer::new(&config(dir.path(), missing_native(), endpoint.base_url()));
    let paths = renderer.artifact_paths(&job());
    fs::create_dir_all(paths.source()).unwrap();

    let err = renderer.render(&job()).unwrap_err();

    assert!(matches!(err, UmlgenError::OutputDirectoryUnwritable { .. }), "{err:?}");
    assert_eq!(endpoint.request_count(), 0);
    assert!(!paths.document().exists());
}
