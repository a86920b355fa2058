// tests/config_test.rs
use semantic_versioner::config::{load_config, Config, DEFAULT_BUILD_NUMBER_ENV};
use serial_test::serial;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.branches.lookup("develop").label(), Some("dev"));
    assert_eq!(config.branches.lookup("test").label(), Some("alpha"));
    assert_eq!(config.branches.lookup("beta").label(), Some("beta"));
    assert!(!config.branches.lookup("main").is_prerelease());
    assert_eq!(config.files.version_file, "VERSION");
    assert_eq!(config.files.changelog_file, "CHANGELOG.md");
    assert_eq!(config.build.build_number_env, DEFAULT_BUILD_NUMBER_ENV);
    assert_eq!(config.hooks.post_release, None);
}

#[test]
fn test_load_from_file() {
    let temp_file = write_config(
        r#"
[branches.develop]
prerelease = "nightly"
build_metadata = "ts.{timestamp}"
auto_increment = false

[branches.release]
prerelease = "rc"
auto_increment = true

[files]
version_file = "meta/VERSION"

[build]
build_number_env = "CI_PIPELINE_IID"

[hooks]
post_release = "scripts/publish.sh"
"#,
    );

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();

    let develop = config.branches.lookup("develop");
    assert_eq!(develop.label(), Some("nightly"));
    assert_eq!(develop.build_metadata_template.as_deref(), Some("ts.{timestamp}"));
    assert!(!develop.auto_increment);
    assert_eq!(config.branches.lookup("release").label(), Some("rc"));
    assert_eq!(config.branches.lookup("test").label(), Some("alpha"));

    assert_eq!(config.files.version_file, "meta/VERSION");
    assert_eq!(config.files.changelog_file, "CHANGELOG.md");
    assert_eq!(config.build.build_number_env, "CI_PIPELINE_IID");
    assert_eq!(config.hooks.post_release.as_deref(), Some("scripts/publish.sh"));
}

#[test]
fn test_partial_file_keeps_defaults() {
    let temp_file = write_config("[hooks]\npost_release = \"hook.sh\"\n");
    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.branches, Config::default().branches);
    assert_eq!(config.files, Config::default().files);
}

#[test]
fn test_invalid_prerelease_label_rejected() {
    let temp_file = write_config("[branches.develop]\nprerelease = \"dev build\"\n");
    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().contains("Configuration error"));
    assert!(err.to_string().contains("develop"));
}

#[test]
fn test_malformed_toml_rejected() {
    let temp_file = write_config("[branches.develop\nprerelease = 1");
    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().contains("Configuration error"));
}

#[test]
fn test_missing_explicit_path_is_error() {
    let err = load_config(Some("/nonexistent/versioner.toml")).unwrap_err();
    assert!(err.to_string().contains("I/O error"));
}

#[test]
#[serial]
fn test_versioner_toml_in_current_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("versioner.toml"),
        "[files]\nchangelog_file = \"HISTORY.md\"\n",
    )
    .unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let config = load_config(None);
    std::env::set_current_dir(previous).unwrap();

    assert_eq!(config.unwrap().files.changelog_file, "HISTORY.md");
}
