//! End-to-end tests of the `pyprojectify` binary against fixture packages.

use crate::common::{copy_fixture, filters_for, pyprojectify_command};
use crate::pyprojectify_snapshot;

#[test]
fn migrate_literal_package() {
    let dir = copy_fixture("literal");
    let mut cmd = pyprojectify_command();
    cmd.arg(dir.path());

    pyprojectify_snapshot!(filters_for(dir.path()), cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    Migrated [TEMP_DIR]/pyproject.toml
    2 dependencies, 1 console script
    ");

    let content = fs_err::read_to_string(dir.path().join("pyproject.toml")).unwrap();
    let table: toml::Table = toml::from_str(&content).unwrap();
    assert_eq!(table["project"]["name"].as_str(), Some("literal"));
    assert_eq!(table["dependencies"]["requests"].as_str(), Some(">=2.0"));
    assert_eq!(table["dependencies"]["click"].as_str(), Some(""));
    assert_eq!(
        table["script"]["literal"].as_str(),
        Some("literal.cli:main")
    );
}

#[test]
fn migrate_from_current_directory() {
    let dir = copy_fixture("literal");
    let mut cmd = pyprojectify_command();
    cmd.current_dir(dir.path());
    cmd.arg("--quiet");

    let output = cmd.output().expect("Failed to execute pyprojectify");

    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    assert!(dir.path().join("pyproject.toml").is_file());
}

/// Running twice backs up the first run's output, byte for byte.
#[test]
fn second_run_backs_up_first_output() {
    let dir = copy_fixture("literal");
    let target = dir.path().join("pyproject.toml");

    let first = pyprojectify_command()
        .arg(dir.path())
        .output()
        .expect("Failed to execute pyprojectify");
    assert!(first.status.success());
    let first_output = fs_err::read(&target).unwrap();

    let mut cmd = pyprojectify_command();
    cmd.arg(dir.path());
    pyprojectify_snapshot!(filters_for(dir.path()), cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    warning: Moved the existing pyproject.toml to [TEMP_DIR]/pyproject.toml.bak
    Migrated [TEMP_DIR]/pyproject.toml
    2 dependencies, 1 console script
    ");

    assert_eq!(fs_err::read(dir.path().join("pyproject.toml.bak")).unwrap(), first_output);
    assert_eq!(fs_err::read(&target).unwrap(), first_output);
}

#[test]
fn dry_run_prints_document() {
    let dir = copy_fixture("literal");
    let mut cmd = pyprojectify_command();
    cmd.args(["--dry-run"]).arg(dir.path());

    let output = cmd.output().expect("Failed to execute pyprojectify");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("[build-system]"));
    assert!(stdout.contains("build-backend = \"setuptools.build_meta\""));
    assert!(stdout.contains("[script]"));
    assert!(!dir.path().join("pyproject.toml").exists());

    let table: toml::Table = toml::from_str(&stdout).unwrap();
    assert_eq!(table["project"]["version"].as_str(), Some("1.0.0"));
}

#[test]
fn missing_setup_py_is_an_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = pyprojectify_command();
    cmd.arg(dir.path());

    pyprojectify_snapshot!(filters_for(dir.path()), cmd, @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    error: Failed to migrate [TEMP_DIR]
      Caused by: No setup.py found in [TEMP_DIR]
    ");
}

#[test]
fn ambiguous_setup_calls_are_an_error() {
    let dir = copy_fixture("ambiguous");
    let mut cmd = pyprojectify_command();
    cmd.arg(dir.path());

    pyprojectify_snapshot!(filters_for(dir.path()), cmd, @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    error: Failed to migrate [TEMP_DIR]
      Caused by: Found 2 top-level `setup()` calls in setup.py; expected exactly one
    ");
    assert!(!dir.path().join("pyproject.toml").exists());
}

#[test]
fn syntax_error_reports_setup_py() {
    let dir = copy_fixture("syntax-error");
    let mut cmd = pyprojectify_command();
    cmd.arg(dir.path());

    let output = cmd.output().expect("Failed to execute pyprojectify");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr.contains("Failed to parse") && stderr.contains("setup.py"),
        "Unexpected stderr: {stderr}"
    );
}

#[test]
fn strict_requires_console_scripts() {
    let dir = tempfile::TempDir::new().unwrap();
    fs_err::write(
        dir.path().join("setup.py"),
        "from setuptools import setup\n\nsetup(name='library-only', version='0.3.0')\n",
    )
    .unwrap();
    let mut cmd = pyprojectify_command();
    cmd.arg("--strict").arg(dir.path());

    pyprojectify_snapshot!(filters_for(dir.path()), cmd, @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    error: No `entry_points.console_scripts` declared in setup.py or setup.cfg
    Remove `--strict` to migrate a package without console scripts.
    ");
    assert!(!dir.path().join("pyproject.toml").exists());
}

#[test]
fn library_without_console_scripts_migrates_with_warnings() {
    let dir = copy_fixture("no-entry-points");
    let mut cmd = pyprojectify_command();
    cmd.arg(dir.path());

    let output = cmd.output().expect("Failed to execute pyprojectify");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    // `find_packages()` cannot be resolved statically.
    assert!(
        stderr.contains("Cannot statically resolve expression"),
        "Expected an unresolved-expression warning, got: {stderr}"
    );
    assert!(stderr.contains("warning: No console scripts found"));
    assert!(stderr.contains("0 dependencies, 0 console scripts"));

    let content = fs_err::read_to_string(dir.path().join("pyproject.toml")).unwrap();
    let table: toml::Table = toml::from_str(&content).unwrap();
    assert!(table["script"].as_table().unwrap().is_empty());
}

#[test]
fn quiet_suppresses_diagnostics() {
    let dir = copy_fixture("no-entry-points");
    let mut cmd = pyprojectify_command();
    cmd.arg("-q").arg(dir.path());

    let output = cmd.output().expect("Failed to execute pyprojectify");

    assert!(output.status.success());
    assert!(
        output.stderr.is_empty(),
        "Expected no output with --quiet, got: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn verbose_shows_debug_logs() {
    let dir = copy_fixture("literal");
    let mut cmd = pyprojectify_command();
    cmd.arg("-vv").arg(dir.path());

    let output = cmd.output().expect("Failed to execute pyprojectify");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert!(
        stderr.contains("Extracted 4 keyword arguments"),
        "Expected debug logs with -vv, got: {stderr}"
    );
}
