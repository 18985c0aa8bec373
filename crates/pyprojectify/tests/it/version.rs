use crate::common::pyprojectify_command;

#[test]
fn version_flag_shows_version() {
    let mut cmd = pyprojectify_command();
    cmd.arg("--version");

    let output = cmd.output().expect("Failed to execute pyprojectify");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(
        stdout.starts_with("pyprojectify "),
        "Expected version string starting with 'pyprojectify ', got: {stdout}"
    );
}

#[test]
fn short_version_flag_works() {
    let mut cmd = pyprojectify_command();
    cmd.arg("-V");

    let output = cmd.output().expect("Failed to execute pyprojectify");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}
