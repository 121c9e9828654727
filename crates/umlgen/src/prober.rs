//! Startup check for the primary rendering capability.
//!
//! The prober looks up the local renderer executable and, when it is missing,
//! runs the configured install command once. The result only gates the run
//! as a whole: every strategy still performs its own availability handling
//! per job, because a present executable can still fail at render time.

use std::{
    path::PathBuf,
    process::{Command, Stdio},
};

use log::{debug, info, warn};

use crate::{UmlgenError, config::NativeConfig};

/// Checks for the local renderer and installs it if possible.
#[derive(Debug)]
pub struct DependencyProber<'a> {
    native: &'a NativeConfig,
}

impl<'a> DependencyProber<'a> {
    /// Create a prober for the configured local renderer.
    pub fn new(native: &'a NativeConfig) -> Self {
        Self { native }
    }

    /// Returns the resolved executable path, if it can be found.
    pub fn locate(&self) -> Option<PathBuf> {
        which::which(self.native.command()).ok()
    }

    /// Makes sure the capability is present, installing it once if needed.
    ///
    /// Returns `false` only when the executable is missing *and* the install
    /// attempt failed. The caller must then abort the run.
    pub fn ensure_capability(&self) -> bool {
        self.ensure().is_ok()
    }

    /// Like [`ensure_capability`](Self::ensure_capability), with the reason.
    ///
    /// # Errors
    ///
    /// Returns [`UmlgenError::CapabilityMissing`] when the executable is
    /// missing and the install command could not be run or exited with a
    /// failure status.
    pub fn ensure(&self) -> Result<(), UmlgenError> {
        let command = self.native.command();

        if let Some(path) = self.locate() {
            debug!(command, path = path.display().to_string(); "Renderer found");
            return Ok(());
        }

        let Some(install) = self.native.install() else {
            info!(command, hint = install_hint(command); "Renderer not found and no install command configured");
            return Ok(());
        };

        info!(command, install = install.join(" "); "Renderer not found, installing");
        self.install(install)
            .map_err(|reason| UmlgenError::CapabilityMissing {
                command: command.to_string(),
                reason,
            })?;

        if self.locate().is_none() {
            warn!(command; "Install command succeeded but the renderer is still not on PATH");
        }

        Ok(())
    }

    /// Runs the install command and waits for it to finish.
    fn install(&self, install: &[String]) -> Result<(), String> {
        let (program, args) = install
            .split_first()
            .ok_or_else(|| "install command is empty".to_string())?;

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .status()
            .map_err(|err| format!("could not run `{program}`: {err}"))?;

        if status.success() {
            info!(program; "Install command finished");
            Ok(())
        } else {
            Err(format!("`{}` exited with {status}", install.join(" ")))
        }
    }
}

/// Tells the operator how to have the prober install `command`.
fn install_hint(command: &str) -> String {
    let example = if cfg!(target_os = "windows") {
        format!(r#"["choco", "install", "-y", "{command}"]"#)
    } else {
        format!(r#"["sudo", "apt-get", "install", "-y", "{command}"]"#)
    };
    format!("set `native.install = {example}` in the configuration to install it automatically")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(command: &str, install: Option<&[&str]>) -> NativeConfig {
        NativeConfig::new(command, Vec::new())
            .with_install(install.map(|parts| parts.iter().map(|p| p.to_string()).collect()))
    }

    const MISSING: &str = "umlgen-test-renderer-that-does-not-exist";

    #[test]
    fn test_missing_without_installer_is_not_fatal() {
        let native = config(MISSING, None);
        let prober = DependencyProber::new(&native);

        assert!(prober.locate().is_none());
        assert!(prober.ensure_capability());
    }

    #[test]
    fn test_installer_that_cannot_start_is_fatal() {
        let native = config(MISSING, Some(&["umlgen-test-installer-that-does-not-exist"]));
        let prober = DependencyProber::new(&native);

        assert!(!prober.ensure_capability());
        match prober.ensure() {
            Err(UmlgenError::CapabilityMissing { command, reason }) => {
                assert_eq!(command, MISSING);
                assert!(reason.contains("could not run"), "unexpected reason: {reason}");
            }
            other => panic!("Expected CapabilityMissing, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_present_renderer_skips_install() {
        // The installer would fail, so success proves it never ran
        let native = config("sh", Some(&["false"]));
        let prober = DependencyProber::new(&native);

        assert!(prober.locate().is_some());
        assert!(prober.ensure_capability());
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_install_is_accepted() {
        let native = config(MISSING, Some(&["true"]));
        assert!(DependencyProber::new(&native).ensure_capability());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_install_is_fatal() {
        let native = config(MISSING, Some(&["false"]));
        let err = DependencyProber::new(&native).ensure().unwrap_err();
        assert!(err.to_string().contains(MISSING));
    }

    #[test]
    fn test_install_hint_names_config_key() {
        let hint = install_hint("plantuml");
        assert!(hint.contains("native.install = ["), "{hint}");
        assert!(hint.contains("\"plantuml\"]"), "{hint}");
    }
}
