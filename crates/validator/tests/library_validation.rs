//! End-to-end checks of the library entry pipeline against files on disk

use std::fs;
use std::path::{Path, PathBuf};

use expfactory_validator::{LibraryError, LibraryValidator, Reporter};
use serde_json::{Value, json};
use tempfile::TempDir;

const STROOP: &str = r#"{"name":"stroop","github":"https://github.com/org/stroop","maintainers":[{"name":"A B","email":"a@b.com","github":"@ab"}]}"#;

fn write_entry(dir: &Path, file_name: &str, content: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, content).unwrap();
    path
}

fn write_json(dir: &Path, file_name: &str, value: &Value) -> PathBuf {
    write_entry(dir, file_name, &value.to_string())
}

fn stroop() -> Value {
    serde_json::from_str(STROOP).unwrap()
}

fn validator() -> LibraryValidator {
    LibraryValidator::new(Reporter::quiet())
}

#[test]
fn test_valid_entry_passes() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_entry(temp_dir.path(), "stroop.json", STROOP);

    let validator = validator();
    assert!(validator.validate_all(&path));

    let entry = validator.check(&path).unwrap();
    assert_eq!(entry.name, "stroop");
    assert_eq!(entry.maintainers.len(), 1);
    assert_eq!(entry.maintainers[0].handle(), "ab");
}

#[test]
fn test_wrong_extension_is_rejected_without_reading() {
    // The file does not exist: a read attempt would surface as a Read error
    let validator = validator();
    assert!(!validator.validate_all(Path::new("entry.txt")));
    assert!(matches!(
        validator.check(Path::new("entry.txt")),
        Err(LibraryError::Extension(_))
    ));
}

#[test]
fn test_malformed_json_is_a_clean_failure() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_entry(temp_dir.path(), "broken.json", "{\"name\": \"stroop\",");

    let validator = validator();
    assert!(!validator.validate_all(&path));
    let err = validator.check(&path).unwrap_err();
    assert!(matches!(err, LibraryError::Parse { .. }));
    assert!(err.is_load_error());
}

#[test]
fn test_top_level_array_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_json(temp_dir.path(), "list.json", &json!([stroop()]));

    assert!(matches!(
        validator().check(&path),
        Err(LibraryError::NotAMapping(_))
    ));
}

#[test]
fn test_name_format() {
    let temp_dir = TempDir::new().unwrap();
    let validator = validator();

    let mut entry = stroop();
    entry["name"] = json!("MyTask");
    let path = write_json(temp_dir.path(), "upper.json", &entry);
    assert!(!validator.validate_all(&path));

    entry["name"] = json!("my_task1");
    let path = write_json(temp_dir.path(), "lower.json", &entry);
    assert!(validator.validate_all(&path));
}

#[test]
fn test_github_url() {
    let temp_dir = TempDir::new().unwrap();
    let validator = validator();

    let mut entry = stroop();
    entry["github"] = json!("not-a-url");
    let path = write_json(temp_dir.path(), "bad.json", &entry);
    assert!(!validator.validate_all(&path));

    entry["github"] = json!("https://github.com/org/repo");
    let path = write_json(temp_dir.path(), "good.json", &entry);
    assert!(validator.validate_all(&path));
}

#[test]
fn test_empty_maintainers_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let mut entry = stroop();
    entry["maintainers"] = json!([]);
    let path = write_json(temp_dir.path(), "nobody.json", &entry);

    let outcome = validator().outcome(&path);
    assert!(!outcome.passed);
    assert_eq!(
        outcome.reason.as_deref(),
        Some("\"maintainers\" must not be empty in nobody.json")
    );
}

#[test]
fn test_maintainer_without_at_prefix() {
    let temp_dir = TempDir::new().unwrap();
    let mut entry = stroop();
    entry["maintainers"] = json!([{ "name": "A", "email": "a@b.com", "github": "handle" }]);
    let path = write_json(temp_dir.path(), "handle.json", &entry);

    assert!(!validator().validate_all(&path));
    assert!(matches!(
        validator().check(&path),
        Err(LibraryError::MaintainerGithubPrefix { handle, .. }) if handle == "handle"
    ));
}

#[test]
fn test_maintainer_email() {
    let temp_dir = TempDir::new().unwrap();
    let validator = validator();

    let mut entry = stroop();
    entry["maintainers"][0]["email"] = json!("not-an-email");
    let path = write_json(temp_dir.path(), "bad_email.json", &entry);
    assert!(!validator.validate_all(&path));

    entry["maintainers"][0]["email"] = json!("a@b.org");
    let path = write_json(temp_dir.path(), "good_email.json", &entry);
    assert!(validator.validate_all(&path));
}

#[test]
fn test_extra_fields_are_preserved() {
    let temp_dir = TempDir::new().unwrap();
    let mut entry = stroop();
    entry["tags"] = json!(["attention"]);
    let path = write_json(temp_dir.path(), "tagged.json", &entry);

    let entry = validator().check(&path).unwrap();
    assert_eq!(entry.extra.get("tags"), Some(&json!(["attention"])));
}

#[test]
fn test_validation_is_read_only_and_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_entry(temp_dir.path(), "stroop.json", STROOP);
    let validator = LibraryValidator::new(Reporter::new(Reporter::MAX_LEVEL));

    let first = validator.outcome(&path);
    let second = validator.outcome(&path);

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&path).unwrap(), STROOP);
}

#[test]
fn test_quiet_does_not_change_results() {
    let temp_dir = TempDir::new().unwrap();
    let mut entry = stroop();
    entry["name"] = json!("Bad Name");
    let path = write_json(temp_dir.path(), "bad.json", &entry);

    let loud = LibraryValidator::with_quiet(false).outcome(&path);
    let quiet = LibraryValidator::with_quiet(true).outcome(&path);
    assert_eq!(loud, quiet);
}

#[test]
fn test_validate_library_directory() {
    let temp_dir = TempDir::new().unwrap();
    write_entry(temp_dir.path(), "b_stroop.json", STROOP);
    write_entry(temp_dir.path(), "a_broken.json", "not json");
    write_entry(temp_dir.path(), "notes.md", "# ignored");
    fs::create_dir(temp_dir.path().join("nested.json")).unwrap();

    let report = validator().validate_library(temp_dir.path());

    assert_eq!(report.results.len(), 2);
    assert!(report.results[0].path.ends_with("a_broken.json"));
    assert!(report.results[1].path.ends_with("b_stroop.json"));
    assert_eq!(report.passed_count(), 1);
    assert!(!report.passed());
    assert_eq!(report.failures().count(), 1);
}
