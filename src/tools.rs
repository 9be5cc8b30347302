//! Blocking subprocess invocation of the external release tools.
//!
//! The changelog generator and the dependency-lock tool do the real work;
//! this module only runs them in the repository directory and turns non-zero
//! exit statuses into errors carrying the tool's stderr.

use crate::config::ToolsConfig;
use crate::error::{ReleaseError, Result};
use std::path::Path;
use std::process::Command;

/// External tool runner bound to a repository working directory.
pub struct ToolRunner<'a> {
    config: &'a ToolsConfig,
    workdir: &'a Path,
}

impl<'a> ToolRunner<'a> {
    pub fn new(config: &'a ToolsConfig, workdir: &'a Path) -> Self {
        ToolRunner { config, workdir }
    }

    /// Queries the changelog tool for the next bumped version.
    ///
    /// Runs `<changelog_command> --bumped-version` and returns its stdout
    /// with surrounding whitespace trimmed (the tagged version string).
    ///
    /// # Returns
    /// * `Ok(tagged)` - e.g. "v1.1.0"
    /// * `Err` - If the tool fails or reports no derivable bump
    pub fn bumped_version(&self) -> Result<String> {
        let stdout = self.run_capture(&self.config.changelog_command, &["--bumped-version"])?;
        let tagged = stdout.trim().to_string();
        if tagged.is_empty() {
            return Err(ReleaseError::tool(
                &self.config.changelog_command,
                "no bumped version reported (no releasable commits?)",
            ));
        }
        Ok(tagged)
    }

    /// Regenerates the cumulative changelog file, header stripped, tagged at
    /// the new version. Overwrites `output` unconditionally.
    pub fn write_changelog(&self, tag: &str, output: &str) -> Result<()> {
        self.run_checked(
            &self.config.changelog_command,
            &["--tag", tag, "--strip", "header", "-o", output],
        )
    }

    /// Writes the release notes file containing only the unreleased section,
    /// header stripped. Overwrites `output` unconditionally.
    pub fn write_release_notes(&self, output: &str) -> Result<()> {
        self.run_checked(
            &self.config.changelog_command,
            &["--unreleased", "--strip", "header", "-o", output],
        )
    }

    /// Regenerates the dependency lock file to reflect the new manifest.
    pub fn refresh_lock(&self) -> Result<()> {
        let args: Vec<&str> = self.config.lock_args.iter().map(String::as_str).collect();
        self.run_checked(&self.config.lock_command, &args)
    }

    fn run_capture(&self, program: &str, args: &[&str]) -> Result<String> {
        let output = Command::new(program)
            .args(args)
            .current_dir(self.workdir)
            .output()
            .map_err(|e| ReleaseError::tool(program, format!("could not invoke: {}", e)))?;

        if !output.status.success() {
            return Err(ReleaseError::tool(program, describe_failure(&output)));
        }

        String::from_utf8(output.stdout)
            .map_err(|_| ReleaseError::tool(program, "produced non-UTF-8 output"))
    }

    fn run_checked(&self, program: &str, args: &[&str]) -> Result<()> {
        let output = Command::new(program)
            .args(args)
            .current_dir(self.workdir)
            .output()
            .map_err(|e| ReleaseError::tool(program, format!("could not invoke: {}", e)))?;

        if !output.status.success() {
            return Err(ReleaseError::tool(program, describe_failure(&output)));
        }

        Ok(())
    }
}

fn describe_failure(output: &std::process::Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    match output.status.code() {
        Some(code) if stderr.is_empty() => format!("exit status {}", code),
        Some(code) => format!("exit status {}: {}", code, stderr),
        None if stderr.is_empty() => "terminated by signal".to_string(),
        None => format!("terminated by signal: {}", stderr),
    }
}
