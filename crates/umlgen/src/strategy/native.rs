//! Local renderer invocation.
//!
//! The companion source file is passed to an external executable, bounded by
//! a timeout. Exit status 0 together with a document at the expected path is
//! success; anything else is removed and reported.

use std::{
    fs::File,
    io::{self, Read, Seek, SeekFrom},
    path::{Path, PathBuf},
    process::{Child, Command, ExitStatus, Stdio},
    thread,
    time::{Duration, Instant},
};

use log::{debug, trace, warn};

use umlgen_core::job::{ArtifactPaths, DiagramJob};

use super::{RenderStrategy, StrategyError, StrategyResult};
use crate::config::NativeConfig;

/// How often a running renderer is polled for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Longest stderr excerpt kept in a failure message.
const MAX_STDERR_CHARS: usize = 400;

/// Renders by running a local executable.
#[derive(Debug, Clone)]
pub struct NativeRenderer {
    config: NativeConfig,
}

impl NativeRenderer {
    pub fn new(config: NativeConfig) -> Self {
        Self { config }
    }

    fn try_render(&self, paths: &ArtifactPaths) -> Result<PathBuf, StrategyError> {
        if !paths.source().is_file() {
            return Err(StrategyError::MissingSource(paths.source().to_path_buf()));
        }

        let command = self.config.command();
        let args = self.config.resolved_args(paths);
        debug!(command, args:?; "Invoking native renderer");

        // Stderr goes to a file so a chatty renderer cannot fill a pipe and stall
        let mut stderr = tempfile::tempfile()?;
        let mut process = Command::new(command);
        process
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::from(stderr.try_clone()?));
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            // Own group, so a timeout also reaches workers the renderer starts
            process.process_group(0);
        }
        let mut child = process
            .spawn()
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => StrategyError::NotFound(command.to_string()),
                _ => StrategyError::Io(err),
            })?;

        let timeout = self.config.timeout();
        let Some(status) = wait_with_timeout(&mut child, timeout)? else {
            warn!(command, timeout:?; "Native renderer timed out, killing it");
            terminate(&mut child);
            remove_partial(paths.document());
            return Err(StrategyError::Timeout(timeout));
        };

        if !status.success() {
            remove_partial(paths.document());
            return Err(StrategyError::ExitStatus {
                status,
                stderr: read_excerpt(&mut stderr),
            });
        }

        if !paths.document().is_file() {
            return Err(StrategyError::MissingOutput(paths.document().to_path_buf()));
        }

        Ok(paths.document().to_path_buf())
    }
}

impl RenderStrategy for NativeRenderer {
    fn name(&self) -> &'static str {
        "native"
    }

    fn render(&self, _job: &DiagramJob, paths: &ArtifactPaths) -> StrategyResult {
        self.try_render(paths).into()
    }
}

/// Waits for `child` to exit, returning `None` once `timeout` has elapsed.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> io::Result<Option<ExitStatus>> {
    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            trace!(elapsed:? = started.elapsed(); "Native renderer exited");
            return Ok(Some(status));
        }

        let elapsed = started.elapsed();
        if elapsed >= timeout {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL.min(timeout - elapsed));
    }
}

/// Kills the renderer together with every process in its group, then reaps it.
///
/// Must be called before `child` has been reaped, while its pid still names
/// the group.
fn terminate(child: &mut Child) {
    #[cfg(unix)]
    {
        if let Ok(group) = libc::pid_t::try_from(child.id()) {
            // SAFETY: killpg has no memory effects; a stale group yields ESRCH
            let rc = unsafe { libc::killpg(group, libc::SIGKILL) };
            if rc != 0 {
                debug!(group, err:% = io::Error::last_os_error(); "Could not signal renderer group");
            }
        }
    }
    // The process may have exited between the last poll and the kill
    let _ = child.kill();
    let _ = child.wait();
    // Signalled group members may still be finishing their current write
    thread::sleep(POLL_INTERVAL);
}

/// Reads the tail of the captured stderr, trimmed for a one-line message.
fn read_excerpt(file: &mut File) -> String {
    let mut bytes = Vec::new();
    if file.seek(SeekFrom::Start(0)).is_err() || file.read_to_end(&mut bytes).is_err() {
        return "<stderr unavailable>".to_string();
    }

    let text = String::from_utf8_lossy(&bytes);
    let text = text.trim();
    if text.is_empty() {
        return "<no output>".to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let start = chars.len().saturating_sub(MAX_STDERR_CHARS);
    let excerpt: String = chars[start..].iter().collect();
    excerpt.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Deletes a document a failed attempt may have left behind.
fn remove_partial(document: &Path) {
    match std::fs::remove_file(document) {
        Ok(()) => debug!(path = document.display().to_string(); "Removed partial document"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            warn!(path = document.display().to_string(), err:%; "Could not remove partial document")
        }
    }
}
