use std::process::ExitCode;

fn main() -> ExitCode {
    match wallpimpd::daemon::start() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
