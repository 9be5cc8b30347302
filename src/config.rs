use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for relcut.
///
/// Contains the external tool commands, the set of files touched by a
/// release, git publishing settings, and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_changelog_command() -> String {
    "git-cliff".to_string()
}

fn default_lock_command() -> String {
    "uv".to_string()
}

fn default_lock_args() -> Vec<String> {
    vec!["lock".to_string()]
}

/// External tools invoked during a release.
///
/// Only the program names (and the lock tool's subcommand) are configurable;
/// the changelog tool's flag shapes are fixed and assumed git-cliff
/// compatible.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ToolsConfig {
    #[serde(default = "default_changelog_command")]
    pub changelog_command: String,

    #[serde(default = "default_lock_command")]
    pub lock_command: String,

    #[serde(default = "default_lock_args")]
    pub lock_args: Vec<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        ToolsConfig {
            changelog_command: default_changelog_command(),
            lock_command: default_lock_command(),
            lock_args: default_lock_args(),
        }
    }
}

fn default_manifest() -> String {
    "pyproject.toml".to_string()
}

fn default_changelog() -> String {
    "CHANGELOG.md".to_string()
}

fn default_release_notes() -> String {
    "RELEASE_NOTES.md".to_string()
}

fn default_lock_file() -> String {
    "uv.lock".to_string()
}

fn default_source_root() -> String {
    "src".to_string()
}

fn default_version_test() -> String {
    "tests/test_version.py".to_string()
}

/// File locations touched by a release, relative to the repository root.
///
/// The manifest, version module, and version test are optional in the sense
/// that a missing file is skipped, not an error. The changelog and release
/// notes files are overwritten unconditionally by the changelog tool.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FilesConfig {
    #[serde(default = "default_manifest")]
    pub manifest: String,

    #[serde(default = "default_changelog")]
    pub changelog: String,

    #[serde(default = "default_release_notes")]
    pub release_notes: String,

    #[serde(default = "default_lock_file")]
    pub lock_file: String,

    #[serde(default = "default_source_root")]
    pub source_root: String,

    #[serde(default = "default_version_test")]
    pub version_test: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        FilesConfig {
            manifest: default_manifest(),
            changelog: default_changelog(),
            release_notes: default_release_notes(),
            lock_file: default_lock_file(),
            source_root: default_source_root(),
            version_test: default_version_test(),
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_tag_marker() -> char {
    'v'
}

fn default_commit_message() -> String {
    "chore(release): bump version to {version}".to_string()
}

fn default_tag_message() -> String {
    "Release {tag}".to_string()
}

/// Git publishing settings.
///
/// Message templates use `{version}` for the plain version and `{tag}` for
/// the tagged version.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GitConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_tag_marker")]
    pub tag_marker: char,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    #[serde(default = "default_tag_message")]
    pub tag_message: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            remote: default_remote(),
            tag_marker: default_tag_marker(),
            commit_message: default_commit_message(),
            tag_message: default_tag_message(),
        }
    }
}

fn default_template_marker() -> String {
    "{{cookiecutter".to_string()
}

/// Behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Token whose presence marks the version test as generated from a
    /// template; such a file is never patched.
    #[serde(default = "default_template_marker")]
    pub template_marker: String,

    /// Skip the lock-file refresh entirely (projects without a lock tool).
    #[serde(default)]
    pub skip_lock: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            template_marker: default_template_marker(),
            skip_lock: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tools: ToolsConfig::default(),
            files: FilesConfig::default(),
            git: GitConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `relcut.toml` in current directory
/// 3. `~/.config/.relcut.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./relcut.toml").exists() {
        fs::read_to_string("./relcut.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".relcut.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
