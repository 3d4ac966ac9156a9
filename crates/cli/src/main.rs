use std::process::ExitCode;

fn main() -> ExitCode {
    trendwatch_cli::run()
}
