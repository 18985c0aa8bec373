use std::process::ExitCode;

use pyprojectify::main as pyprojectify_main;

fn main() -> ExitCode {
    pyprojectify_main(std::env::args_os())
}
