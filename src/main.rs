use std::process::ExitCode;

fn main() -> ExitCode {
  hevy_notes_lib::run()
}
