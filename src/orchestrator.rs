//! The release workflow itself.
//!
//! Runs the release sequence end to end: resolve the bumped version, render
//! changelog artifacts, patch version strings, refresh the lock file, then
//! commit, push, tag, and push the tag. Every step is fail-fast: a partial
//! release (tag pushed without the changelog committed) is an inconsistent
//! end state, so the first error aborts everything that follows. Files
//! already edited are left in place for manual inspection.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::git_ops::GitRepo;
use crate::layout;
use crate::patch::{self, PatchOutcome};
use crate::tools::ToolRunner;
use crate::ui;
use crate::version::ReleaseVersion;

/// Arguments for the release workflow.
///
/// Mirrors the CLI args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOptions {
    /// Repository root to operate on
    pub repo_path: PathBuf,

    /// Git remote override (defaults to the configured remote)
    pub remote: Option<String>,

    /// Resolve the version and show the plan without touching anything
    pub dry_run: bool,

    /// Commit and tag locally but skip both pushes
    pub no_push: bool,
}

/// Result of a completed (or dry-run) release workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOutcome {
    /// The resolved version in both spellings
    pub version: ReleaseVersion,

    /// The branch the release was committed on
    pub branch: String,

    /// The release commit id (None for a dry run)
    pub commit: Option<String>,

    /// Whether the branch and tag were pushed to the remote
    pub pushed: bool,
}

/// Runs the release sequence against the repository in `options.repo_path`.
///
/// # Steps
/// 1. Query the changelog tool for the next bumped version
/// 2. Regenerate the cumulative changelog and the release notes
/// 3. Patch the manifest, version module, and version test (each optional)
/// 4. Refresh the dependency lock file
/// 5. Stage, commit, and push the current branch
/// 6. Create an annotated tag and push it
///
/// # Returns
/// * `Ok(ReleaseOutcome)` - The resolved version and what was published
/// * `Err` - The first failing step's error; nothing after it ran
pub fn run_release(config: &Config, options: &ReleaseOptions) -> Result<ReleaseOutcome> {
    let repo = GitRepo::open(&options.repo_path)?;
    let branch = repo.current_branch()?;
    let workdir = repo.workdir().to_path_buf();
    let remote = options
        .remote
        .clone()
        .unwrap_or_else(|| config.git.remote.clone());

    let runner = ToolRunner::new(&config.tools, &workdir);

    // Step 1: resolve the next version from commit history
    ui::display_status("Resolving next version from commit history...");
    let tagged = runner.bumped_version()?;
    let version = ReleaseVersion::from_tagged(&tagged, config.git.tag_marker)?;
    ui::display_success(&format!(
        "Next version: {} (plain {})",
        version.tagged(),
        version.plain()
    ));

    if options.dry_run {
        ui::display_plan(&version, &branch, &remote);
        return Ok(ReleaseOutcome {
            version,
            branch,
            commit: None,
            pushed: false,
        });
    }

    // Step 2: regenerate changelog artifacts
    ui::display_status("Regenerating changelog artifacts...");
    runner.write_changelog(version.tagged(), &config.files.changelog)?;
    runner.write_release_notes(&config.files.release_notes)?;

    // Step 3: patch version strings
    let manifest_path = workdir.join(&config.files.manifest);
    report_patch(
        &config.files.manifest,
        patch::patch_manifest(&manifest_path, version.plain())?,
    );

    let module_rel = match layout::resolve_version_module(&workdir, &config.files.source_root)? {
        Some(module_path) => {
            let rel = module_path
                .strip_prefix(&workdir)
                .unwrap_or(&module_path)
                .to_string_lossy()
                .into_owned();
            report_patch(
                &rel,
                patch::patch_version_module(&module_path, version.plain())?,
            );
            Some(rel)
        }
        None => None,
    };

    let test_path = workdir.join(&config.files.version_test);
    report_patch(
        &config.files.version_test,
        patch::patch_version_test(
            &test_path,
            version.plain(),
            &config.behavior.template_marker,
        )?,
    );

    // Step 4: refresh the dependency lock file
    if config.behavior.skip_lock {
        ui::display_status("Lock refresh disabled; skipping");
    } else {
        ui::display_status("Refreshing dependency lock file...");
        runner.refresh_lock()?;
    }

    // Step 5: stage and commit
    let mut required: Vec<&str> = vec![
        config.files.changelog.as_str(),
        config.files.release_notes.as_str(),
    ];
    if !config.behavior.skip_lock {
        required.push(config.files.lock_file.as_str());
    }
    let mut optional: Vec<&str> = vec![
        config.files.manifest.as_str(),
        config.files.version_test.as_str(),
    ];
    if let Some(rel) = module_rel.as_deref() {
        optional.push(rel);
    }

    let staged = repo.stage(&required, &optional)?;
    ui::display_status(&format!("Staged {} files", staged.len()));

    let message = config
        .git
        .commit_message
        .replace("{version}", version.plain());
    let commit = repo.commit(&message)?;
    ui::display_success(&format!("Committed {}", &commit[..7.min(commit.len())]));

    let tag_message = config.git.tag_message.replace("{tag}", version.tagged());

    if options.no_push {
        repo.create_annotated_tag(version.tagged(), &tag_message)?;
        ui::display_success(&format!("Created tag {} (not pushed)", version.tagged()));
        return Ok(ReleaseOutcome {
            version,
            branch,
            commit: Some(commit),
            pushed: false,
        });
    }

    // Step 6: publish
    ui::display_status(&format!("Pushing branch '{}' to '{}'...", branch, remote));
    repo.push_branch(&remote, &branch)?;

    repo.create_annotated_tag(version.tagged(), &tag_message)?;
    ui::display_status(&format!("Pushing tag {} to '{}'...", version.tagged(), remote));
    repo.push_tag(&remote, version.tagged())?;
    ui::display_success(&format!("Pushed tag {}", version.tagged()));

    Ok(ReleaseOutcome {
        version,
        branch,
        commit: Some(commit),
        pushed: true,
    })
}

fn report_patch(name: &str, outcome: PatchOutcome) {
    match outcome {
        PatchOutcome::Updated => ui::display_success(&format!("Patched {}", name)),
        PatchOutcome::Missing => ui::display_status(&format!("{} not present; skipped", name)),
        PatchOutcome::Templated => {
            ui::display_status(&format!("{} is templated; left untouched", name))
        }
        PatchOutcome::NoMatch => ui::display_warning(&format!(
            "{} has no version declaration; left untouched",
            name
        )),
    }
}
