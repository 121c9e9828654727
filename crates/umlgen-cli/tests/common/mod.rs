//! Shared helpers for the CLI integration tests.

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use umlgen_cli::Args;

// The HTTP responder and PNG fixtures are shared with the library's tests
#[path = "../../../umlgen/tests/common/mod.rs"]
mod library;

pub use library::{MockEndpoint, png_bytes};

/// A renderer executable name that does not exist on any test machine.
pub const MISSING_RENDERER: &str = "umlgen-test-missing-renderer";

/// Writes a configuration whose local renderer is missing, with no installer,
/// and whose remote endpoint is `base_url`.
pub fn write_config(dir: &Path, base_url: &str) -> PathBuf {
    write_config_with_install(dir, base_url, "[]")
}

/// Like [`write_config`], with `install` given as a TOML array literal.
pub fn write_config_with_install(dir: &Path, base_url: &str, install: &str) -> PathBuf {
    let path = dir.join("umlgen.toml");
    let content = format!(
        r#"
[native]
command = "{MISSING_RENDERER}"
install = {install}

[remote]
base_url = "{base_url}"
timeout_secs = 5
"#
    );
    fs::write(&path, content).expect("write config");
    path
}

/// Arguments for a run against `config` writing into `output_dir`.
pub fn args(config: &Path, output_dir: &Path) -> Args {
    Args {
        config: Some(config.to_string_lossy().to_string()),
        output_dir: Some(output_dir.to_string_lossy().to_string()),
        offline: false,
        only: Vec::new(),
        list: false,
        log_level: "off".to_string(),
    }
}

/// File names in `dir` with the given extension, sorted.
pub fn files_with_extension(dir: &Path, extension: &str) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().and_then(|s| s.to_str()) == Some(extension))
                .filter_map(|path| path.file_name().map(|n| n.to_string_lossy().to_string()))
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
