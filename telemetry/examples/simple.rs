use tracing::{debug, error, info, trace, warn};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let telemetry = commit_info_telemetry::TelemetryConfig::new()
        .without_timestamps()
        .init();

    trace!("TRACE");
    debug!("DEBUG");
    info!("INFO");
    warn!("WARN");
    error!("ERROR");

    telemetry.flush_blocking();

    Ok(())
}
