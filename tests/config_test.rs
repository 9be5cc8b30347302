// tests/config_test.rs
use relcut::config::{load_config, Config};
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.tools.changelog_command, "git-cliff");
    assert_eq!(config.tools.lock_command, "uv");
    assert_eq!(config.tools.lock_args, vec!["lock".to_string()]);
    assert_eq!(config.files.manifest, "pyproject.toml");
    assert_eq!(config.files.changelog, "CHANGELOG.md");
    assert_eq!(config.files.release_notes, "RELEASE_NOTES.md");
    assert_eq!(config.files.lock_file, "uv.lock");
    assert_eq!(config.files.source_root, "src");
    assert_eq!(config.files.version_test, "tests/test_version.py");
    assert_eq!(config.git.remote, "origin");
    assert_eq!(config.git.tag_marker, 'v');
    assert!(config.git.commit_message.contains("{version}"));
    assert!(config.git.tag_message.contains("{tag}"));
    assert_eq!(config.behavior.template_marker, "{{cookiecutter");
    assert!(!config.behavior.skip_lock);
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[tools]
changelog_command = "git-cliff"
lock_command = "poetry"
lock_args = ["lock", "--no-update"]

[files]
manifest = "Cargo.toml"

[git]
remote = "upstream"
tag_marker = "r"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.tools.lock_command, "poetry");
    assert_eq!(
        config.tools.lock_args,
        vec!["lock".to_string(), "--no-update".to_string()]
    );
    assert_eq!(config.files.manifest, "Cargo.toml");
    assert_eq!(config.git.remote, "upstream");
    assert_eq!(config.git.tag_marker, 'r');
    // Unspecified sections fall back to defaults
    assert_eq!(config.files.changelog, "CHANGELOG.md");
    assert_eq!(config.behavior.template_marker, "{{cookiecutter");
}

#[test]
fn test_missing_custom_path_is_an_error() {
    assert!(load_config(Some("/nonexistent/relcut.toml")).is_err());
}

#[test]
fn test_invalid_toml_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[tools\nbroken").unwrap();
    temp_file.flush().unwrap();

    assert!(load_config(Some(temp_file.path().to_str().unwrap())).is_err());
}

#[test]
#[serial]
fn test_relcut_toml_in_cwd_is_picked_up() {
    let tmp = tempfile::TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("relcut.toml"),
        "[git]\nremote = \"backup\"\n",
    )
    .unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(tmp.path()).unwrap();

    let config = load_config(None).unwrap();

    std::env::set_current_dir(original_dir).unwrap();

    assert_eq!(config.git.remote, "backup");
}

#[test]
#[serial]
fn test_no_config_file_falls_back_to_defaults() {
    let tmp = tempfile::TempDir::new().unwrap();
    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(tmp.path()).unwrap();

    let config = load_config(None).unwrap();

    std::env::set_current_dir(original_dir).unwrap();

    assert_eq!(config.git.remote, "origin");
}
