use std::process::ExitCode;

fn main() -> ExitCode {
    nestegg::api::run_cli()
}
