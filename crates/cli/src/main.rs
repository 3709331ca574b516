use std::process::ExitCode;

fn main() -> ExitCode {
    myclo_cli::run()
}
