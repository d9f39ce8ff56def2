use foldermerge::config::{
    load_config, load_config_if_present, normalize_extension, parse_config, IdentifierMode,
    MergeConfig, OutputMode,
};
use foldermerge::errors::MergeError;
use std::path::PathBuf;
use tempfile::tempdir;
use tokio::fs;

#[test]
fn test_minimal_config_uses_defaults() {
    let raw = parse_config(r#"{ "folders": ["src"], "output": "out/merged.txt" }"#).unwrap();
    let config = MergeConfig::from_raw(raw).unwrap();

    assert_eq!(config.folders, vec![PathBuf::from("src")]);
    assert_eq!(config.output, Some(PathBuf::from("out/merged.txt")));
    assert_eq!(config.output_mode, OutputMode::Shared);
    assert_eq!(config.identifier, IdentifierMode::Path);
    assert!(config.consider_gitignore);
    assert!(!config.share_rules_across_folders);
    assert!(config.exclusions.excludes_extension(".png"));
    assert!(config.exclusions.excludes_extension(".gz"));
    assert!(!config.excludes_file("package-lock.json"));
}

#[test]
fn test_full_config() {
    let raw = parse_config(
        r#"{
            "folders": ["a", "b"],
            "outputMode": "perFolder",
            "identifier": "name",
            "ignoreExtensions": ["LOCK", ".Map"],
            "ignoreFiles": ["Cargo.lock"],
            "considerGitignore": false,
            "shareRulesAcrossFolders": true
        }"#,
    )
    .unwrap();
    let config = MergeConfig::from_raw(raw).unwrap();

    assert_eq!(config.output_mode, OutputMode::PerFolder);
    assert_eq!(config.identifier, IdentifierMode::Name);
    assert!(!config.consider_gitignore);
    assert!(config.share_rules_across_folders);
    assert!(config.exclusions.excludes_extension(".lock"));
    assert!(config.exclusions.excludes_extension(".map"));
    assert!(
        !config.exclusions.excludes_extension(".png"),
        "Configured extensions replace the built-in set"
    );
    assert!(config.excludes_file("Cargo.lock"));
    assert!(config.excludes_file("package-lock.json"));
    assert!(config.excludes_file("output.txt"));
}

#[test]
fn test_missing_folders_is_rejected() {
    let raw = parse_config(r#"{ "output": "merged.txt" }"#).unwrap();
    assert!(matches!(
        MergeConfig::from_raw(raw),
        Err(MergeError::ConfigError(_))
    ));
}

#[test]
fn test_empty_folders_is_rejected() {
    let raw = parse_config(r#"{ "folders": [], "output": "merged.txt" }"#).unwrap();
    assert!(matches!(
        MergeConfig::from_raw(raw),
        Err(MergeError::ConfigError(_))
    ));
}

#[test]
fn test_shared_mode_requires_output() {
    let raw = parse_config(r#"{ "folders": ["src"] }"#).unwrap();
    assert!(matches!(
        MergeConfig::from_raw(raw),
        Err(MergeError::ConfigError(_))
    ));
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    assert!(matches!(
        parse_config(r#"{ "folders": "#),
        Err(MergeError::ConfigParseError(_))
    ));
    assert!(matches!(
        parse_config(r#"{ "folders": "not-a-list" }"#),
        Err(MergeError::ConfigParseError(_))
    ));
}

#[test]
fn test_normalize_extension() {
    assert_eq!(normalize_extension("PNG"), ".png");
    assert_eq!(normalize_extension(".Tar"), ".tar");
    assert_eq!(normalize_extension(" gz "), ".gz");
}

#[tokio::test]
async fn test_load_config_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "folders": ["x"], "output": "y.txt" }"#)
        .await
        .unwrap();

    let raw = load_config(&path).await.unwrap();
    assert_eq!(raw.folders, Some(vec![PathBuf::from("x")]));

    let missing = load_config(&dir.path().join("absent.json")).await;
    assert!(matches!(missing, Err(MergeError::ConfigError(_))));
}

#[tokio::test]
async fn test_load_config_if_present() {
    let dir = tempdir().unwrap();
    let absent = dir.path().join("config.json");
    assert!(load_config_if_present(&absent).await.unwrap().is_none());

    fs::write(&absent, r#"{ "folders": ["x"], "output": "y.txt" }"#)
        .await
        .unwrap();
    let raw = load_config_if_present(&absent).await.unwrap();
    assert_eq!(raw.and_then(|r| r.folders), Some(vec![PathBuf::from("x")]));
}
