//! Layered settings loading from files
use std::fs;

use kite_gate::settings::{load_layered, Settings};
use kite_gate::{Config, ConfigSource, FeatureGateResolver};

fn write_settings(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write settings file");
    path
}

#[test]
fn test_project_overrides_user() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let user = write_settings(
        &dir,
        "settings.toml",
        r#"
[completions]
disabledFileExtensions = [".go"]

[workbench]
colorTheme = "Default High Contrast"
"#,
    );
    let project = write_settings(
        &dir,
        ".kite.toml",
        r#"
[completions]
disabledFileExtensions = [".py"]
"#,
    );

    let settings = load_layered(Settings::default(), Some(user.as_path()), Some(project.as_path()));
    assert_eq!(settings.disabled_extensions(), Some(vec![".py".to_string()]));
    // Theme survives from the user layer
    assert_eq!(settings.color_theme(), Some("Default High Contrast"));

    let resolver = FeatureGateResolver::new(settings);
    assert!(!resolver.distinguished_family_enabled());
    assert!(resolver.is_eligible_file("main.go"));
}

#[test]
fn test_malformed_and_missing_files_fail_open() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let broken = write_settings(&dir, ".kite.toml", "completions = [not toml");
    let missing = dir.path().join("does-not-exist.toml");

    let cli = Settings::with_disabled([".c"]);
    let settings = load_layered(cli.clone(), Some(missing.as_path()), Some(broken.as_path()));
    assert_eq!(settings, cli);

    assert!(Settings::from_toml_file(&broken).is_err());
    assert!(Settings::load_optional(&missing).is_none());
}

#[test]
fn test_config_base_settings_reads_project_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let project = write_settings(
        &dir,
        ".kite.toml",
        r#"
[completions]
disabledFileExtensions = [".vue"]
"#,
    );

    let config = Config {
        cli_disabled: vec![".c".to_string()],
        user_settings_path: None,
        project_settings_path: Some(project),
        log_level: "info".to_string(),
    };

    // The project list replaces the command-line list
    assert_eq!(
        config.base_settings().disabled_extensions(),
        Some(vec![".vue".to_string()])
    );
}
