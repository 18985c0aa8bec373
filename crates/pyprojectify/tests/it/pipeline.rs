//! Library-level tests of the extract -> merge -> write pipeline.

use pyprojectify::legacy::{LiteralValue, extract};
use pyprojectify::pyproject::{self, MergeOptions};
use pyprojectify::{MigrateError, MigrateOptions, PyProject};

use crate::common::{copy_fixture, fixture};

#[test]
fn extract_own_setup_py() {
    let path = fixture("pyprojectify").join("setup.py");
    let source = fs_err::read_to_string(&path).unwrap();
    let args = extract(&source, &path).unwrap();

    assert_eq!(args["name"], LiteralValue::Str("pyprojectify".to_owned()));
    assert_eq!(args["version"], LiteralValue::Str("0.2.0".to_owned()));
    assert_eq!(args["include_package_data"], LiteralValue::Bool(true));
    // `readme + '\n\n' + history` and `find_packages(...)` need evaluation.
    assert_eq!(args["long_description"], LiteralValue::Unresolved);
    assert_eq!(args["packages"], LiteralValue::Unresolved);
    // `test_requirements` is bound at the top level before the call.
    assert_eq!(
        args["tests_require"],
        LiteralValue::List(vec![LiteralValue::Str("pytest>=3".to_owned())])
    );
}

#[test]
fn migrate_own_setup_py() {
    let dir = copy_fixture("pyprojectify");
    let migration = PyProject::new(Some(dir.path().to_path_buf()))
        .migrate(&MigrateOptions::default())
        .unwrap();

    let content = fs_err::read_to_string(migration.written.unwrap()).unwrap();
    let table: toml::Table = toml::from_str(&content).unwrap();

    let project = table["project"].as_table().unwrap();
    assert_eq!(project["name"].as_str(), Some("pyprojectify"));
    assert_eq!(project["version"].as_str(), Some("0.2.0"));
    assert_eq!(project["long_description"].as_str(), Some(""));
    assert_eq!(project["classifiers"].as_array().unwrap().len(), 10);
    assert!(!project.contains_key("packages"));
    assert!(!project.contains_key("zip_safe"));

    assert_eq!(table["dependencies"]["Click"].as_str(), Some(">=8.0.3"));
    assert_eq!(table["dependencies"]["toml"].as_str(), Some("==0.10.2"));
    assert_eq!(
        table["script"]["pyprojectify"].as_str(),
        Some("pyprojectify.cli:main")
    );
    assert_eq!(
        table["build-system"]["requires"],
        toml::Value::Array(vec!["setuptools".into(), "wheel".into()])
    );
}

#[test]
fn setup_cfg_and_manifest_are_merged() {
    let dir = copy_fixture("with-setup-cfg");
    let migration = PyProject::new(Some(dir.path().to_path_buf()))
        .migrate(&MigrateOptions {
            require_entry_points: true,
            ..MigrateOptions::default()
        })
        .unwrap();
    let descriptor = &migration.descriptor;

    // Resolved through the `VERSION` assignment.
    assert_eq!(descriptor.project["version"].as_str(), Some("3.1.4"));
    // setup.cfg wins over the `setup()` keyword.
    assert_eq!(descriptor.project["description"].as_str(), Some("B"));
    assert_eq!(descriptor.project["author"].as_str(), Some("Ada Lovelace"));
    assert_eq!(
        descriptor.project["classifiers"].as_array().map(Vec::len),
        Some(2)
    );

    assert_eq!(
        descriptor.build_system.requires,
        ["setuptools", "wheel", "setuptools_scm"]
    );
    assert_eq!(descriptor.dependencies["attrs"], ">=22");
    assert_eq!(descriptor.dependencies["rich"], ">=13");
    assert_eq!(descriptor.dependencies["pytest"], ">=7");
    assert_eq!(descriptor.script["cfgdemo"], "cfgdemo.__main__:main");

    assert_eq!(
        descriptor.project["include"],
        toml::Value::Array(vec!["README.rst".into(), "LICENSE".into()])
    );
    assert_eq!(
        descriptor.project["exclude"],
        toml::Value::Array(vec!["tests/*".into()])
    );
    assert_eq!(descriptor.project["packages"], toml::Value::Array(Vec::new()));
}

#[test]
fn written_file_round_trips_to_descriptor() {
    let dir = copy_fixture("with-setup-cfg");
    let migration = PyProject::new(Some(dir.path().to_path_buf()))
        .migrate(&MigrateOptions::default())
        .unwrap();

    let content = fs_err::read_to_string(migration.written.unwrap()).unwrap();
    let reparsed: toml::Table = toml::from_str(&content).unwrap();
    assert_eq!(reparsed, migration.descriptor.to_table().unwrap());
    assert_eq!(content, migration.rendered);
}

#[test]
fn stages_compose_without_driver() {
    let source = "setup(name='demo', version='9.9', description=read_description())\n";
    let args = extract(source, std::path::Path::new("setup.py")).unwrap();
    let descriptor = pyproject::merge(&args, None, None, MergeOptions::default()).unwrap();

    let dir = tempfile::TempDir::new().unwrap();
    let target = dir.path().join("pyproject.toml");
    let outcome = pyproject::write(&descriptor, &target, None).unwrap();

    assert_eq!(outcome.backup, None);
    assert_eq!(descriptor.project["description"].as_str(), Some(""));
}

#[test]
fn syntax_error_fixture() {
    let dir = copy_fixture("syntax-error");
    let err = PyProject::new(Some(dir.path().to_path_buf()))
        .migrate(&MigrateOptions::default())
        .unwrap_err();
    assert!(matches!(err, MigrateError::Parse { .. }), "got {err:?}");
}
