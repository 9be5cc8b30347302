use crate::version::ReleaseVersion;
use anyhow::Result;
use console::style;
use std::io::{self, Write};

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// Show what a release would do, without doing it.
pub fn display_plan(version: &ReleaseVersion, branch: &str, remote: &str) {
    println!("\n{}", style("Release plan:").bold());
    println!("  Version:  {} (files get {})", version.tagged(), version.plain());
    println!("  Branch:   {}", branch);
    println!("  Remote:   {}", remote);
    println!("  Steps:    changelog + release notes, version patches, lock refresh,");
    println!("            commit, push, annotated tag {}, push tag", version.tagged());
}

pub fn confirm_action(prompt: &str) -> Result<bool> {
    print!("\n{} (y/N): ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_success() {
        // Visual verification test - output is printed to stdout
        display_success("test success");
    }

    #[test]
    fn test_display_plan() {
        let version = ReleaseVersion::from_tagged("v1.2.3", 'v').unwrap();
        display_plan(&version, "main", "origin");
    }
}
