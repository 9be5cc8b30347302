use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use relcut::orchestrator::{self, ReleaseOptions};
use relcut::{config, ui};

#[derive(clap::Parser)]
#[command(
    name = "relcut",
    about = "Cut a release: bump the version from conventional commits, regenerate changelogs, patch version strings, commit and tag"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, default_value = ".", help = "Repository root to release")]
    path: PathBuf,

    #[arg(short, long, help = "Git remote to push to (overrides config)")]
    remote: Option<String>,

    #[arg(short, long, help = "Skip confirmation prompts")]
    force: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "Commit and tag locally without pushing")]
    no_push: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() {
    if let Err(err) = run() {
        ui::display_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("relcut {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    if !args.force && !args.dry_run {
        let remote = args.remote.as_deref().unwrap_or(&config.git.remote);
        let prompt = format!(
            "Release from '{}' and push to '{}'? This commits, tags, and pushes",
            args.path.display(),
            remote
        );
        if !args.no_push && !ui::confirm_action(&prompt)? {
            println!("Release cancelled by user.");
            return Ok(());
        }
    }

    let options = ReleaseOptions {
        repo_path: args.path,
        remote: args.remote,
        dry_run: args.dry_run,
        no_push: args.no_push,
    };

    let outcome = orchestrator::run_release(&config, &options)?;

    // Print the resolved tag only for a completed release, not a dry run
    if outcome.commit.is_some() {
        println!("\n{}", outcome.version.tagged());
    }

    Ok(())
}
