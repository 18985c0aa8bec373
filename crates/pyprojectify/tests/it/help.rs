use crate::common::pyprojectify_command;

#[test]
fn help_lists_options() {
    let mut cmd = pyprojectify_command();
    cmd.arg("--help");

    let output = cmd.output().expect("Failed to execute pyprojectify");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Migrate a setuptools package from setup.py to pyproject.toml"));
    for flag in ["[PATH]", "--strict", "--dry-run", "--verbose", "--quiet"] {
        assert!(stdout.contains(flag), "Missing {flag} in help:\n{stdout}");
    }
}

#[test]
fn quiet_conflicts_with_verbose() {
    let mut cmd = pyprojectify_command();
    cmd.args(["--quiet", "--verbose"]);

    let output = cmd.output().expect("Failed to execute pyprojectify");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot be used with"));
}
