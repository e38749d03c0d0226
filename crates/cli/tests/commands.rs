//! Command handlers run against fixture experiment trees

use std::fs;
use std::path::Path;

use expfactory_cli::commands::{
    Command, ValidationFailed, failure_message, handle_command, library, validate,
};
use expfactory_cli::config::Config;
use expfactory_validator::Reporter;
use tempfile::TempDir;

const STROOP_ENTRY: &str = r#"{"name":"stroop","github":"https://github.com/org/stroop","maintainers":[{"name":"A B","email":"a@b.com","github":"@ab"}]}"#;

fn create_experiment(root: &Path, exp_id: &str, template: &str) {
    let folder = root.join(exp_id);
    fs::create_dir_all(&folder).unwrap();
    let config = format!(
        r#"[{{"exp_id": "{}", "name": "{}", "template": "{}", "run": ["experiment.js"]}}]"#,
        exp_id, exp_id, template
    );
    fs::write(folder.join("config.json"), config).unwrap();
    fs::write(folder.join("experiment.js"), "var experiment = [];").unwrap();
}

#[test]
fn test_validate_experiment_folder() {
    let temp_dir = TempDir::new().unwrap();
    create_experiment(temp_dir.path(), "stroop", "jspsych");

    let folder = temp_dir.path().join("stroop");
    assert!(validate::handle(Some(folder), None, &Reporter::quiet()).is_ok());
}

#[test]
fn test_validate_survey_checks_table() {
    let temp_dir = TempDir::new().unwrap();
    create_experiment(temp_dir.path(), "grit_survey", "survey");
    let folder = temp_dir.path().join("grit_survey");

    // No survey.tsv yet
    assert!(validate::handle(Some(folder.clone()), None, &Reporter::quiet()).is_err());

    fs::write(
        folder.join("survey.tsv"),
        "question_type\tquestion_text\trequired\tpage_number\toption_text\toption_values\n\
         radio\tI finish what I begin\t1\t1\tNo,Yes\t0,1\n",
    )
    .unwrap();
    assert!(validate::handle(Some(folder), None, &Reporter::quiet()).is_ok());
}

#[test]
fn test_validate_uses_configured_folder() {
    let temp_dir = TempDir::new().unwrap();
    create_experiment(temp_dir.path(), "flanker", "jspsych");

    let config = Config {
        folder: Some(temp_dir.path().join("flanker")),
        ..Config::default()
    };
    let result = handle_command(Command::Validate { folder: None }, &config, &Reporter::quiet());
    assert!(result.is_ok());
}

#[test]
fn test_library_file_and_directory() {
    let temp_dir = TempDir::new().unwrap();
    let entry = temp_dir.path().join("stroop.json");
    fs::write(&entry, STROOP_ENTRY).unwrap();

    let reporter = Reporter::quiet();
    assert!(library::handle(&entry, &reporter).is_ok());
    assert!(library::handle(temp_dir.path(), &reporter).is_ok());

    fs::write(temp_dir.path().join("broken.json"), "[]").unwrap();
    let err = library::handle(temp_dir.path(), &reporter).unwrap_err();
    assert!(err.to_string().starts_with("1 library entries failed validation"));

    let empty = TempDir::new().unwrap();
    assert!(library::handle(empty.path(), &reporter).is_err());
}

#[test]
fn test_library_rejects_non_json_extension() {
    let temp_dir = TempDir::new().unwrap();
    let entry = temp_dir.path().join("stroop.txt");
    fs::write(&entry, STROOP_ENTRY).unwrap();

    assert!(library::handle(&entry, &Reporter::quiet()).is_err());
}

#[test]
fn test_reported_failures_are_not_repeated() {
    let temp_dir = TempDir::new().unwrap();
    let entry = temp_dir.path().join("stroop.json");
    fs::write(&entry, r#"{"name":"Stroop","github":"x","maintainers":[]}"#).unwrap();

    let err = library::handle(&entry, &Reporter::default()).unwrap_err();
    assert!(err.downcast_ref::<ValidationFailed>().is_some());
    assert!(!err.to_string().contains("invalid characters"));
    assert!(failure_message(&err, false).is_none());

    create_experiment(temp_dir.path(), "stroop", "jspsych");
    fs::remove_file(temp_dir.path().join("stroop").join("experiment.js")).unwrap();
    let err = validate::handle(
        Some(temp_dir.path().join("stroop")),
        None,
        &Reporter::default(),
    )
    .unwrap_err();
    assert!(failure_message(&err, false).is_none());
}

#[test]
fn test_quiet_failure_prints_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("absent");

    let err = validate::handle(Some(missing), None, &Reporter::quiet()).unwrap_err();
    assert!(err.downcast_ref::<ValidationFailed>().is_none());
    assert!(failure_message(&err, true).is_none());
    assert!(failure_message(&err, false).is_some());
}
