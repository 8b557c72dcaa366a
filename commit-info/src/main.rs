use commit_info_telemetry::TelemetryConfig;
use git_commit_info::{ExitStatus, SystemGit, program};

fn main() -> ExitStatus {
    if let Err(err) = color_eyre::install() {
        eprintln!("failed to install error reporting: {err}");
    }
    let telemetry = TelemetryConfig::new().without_timestamps().init();

    let status = program::main_with(&SystemGit::default(), std::env::args_os());

    telemetry.flush_blocking();
    status
}
