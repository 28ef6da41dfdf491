// tests/manifest_test.rs
use next_tag::manifest::{normalize_version, read_app_version, DEFAULT_APP_VERSION};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_pom_fixture_ignores_parent_and_dependency_versions() {
    let version = read_app_version(&fixture("pom.xml")).unwrap();
    assert_eq!(version.as_deref(), Some("2.4.1-SNAPSHOT"));
    assert_eq!(normalize_version(version.as_deref(), DEFAULT_APP_VERSION), "2.4.1");
}

#[test]
fn test_gradle_properties_fixture() {
    let version = read_app_version(&fixture("gradle.properties")).unwrap();
    assert_eq!(version.as_deref(), Some("3.0.7"));
}

#[test]
fn test_build_gradle_in_temp_dir() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("build.gradle");
    fs::write(
        &path,
        "plugins {\n    id 'java'\n}\n\nversion = \"v1.8.2-RC1\"\n",
    )
    .unwrap();

    let version = read_app_version(&path).unwrap();
    assert_eq!(normalize_version(version.as_deref(), DEFAULT_APP_VERSION), "1.8.2");
}

#[test]
fn test_missing_manifest_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let version = read_app_version(&dir.path().join("pom.xml")).unwrap();
    assert_eq!(version, None);
    assert_eq!(normalize_version(version.as_deref(), "0.3.0"), "0.3.0");
}

#[test]
fn test_two_part_version_is_not_a_core() {
    assert_eq!(normalize_version(Some("1.2"), DEFAULT_APP_VERSION), "0.0.1");
}

#[test]
fn test_groovy_dsl_fixture_without_separator() {
    let version = read_app_version(&fixture("build.gradle")).unwrap();
    assert_eq!(version.as_deref(), Some("1.2.3"));
    assert_eq!(normalize_version(version.as_deref(), DEFAULT_APP_VERSION), "1.2.3");
}
