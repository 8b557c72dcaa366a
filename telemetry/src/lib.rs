//! Standardized logging for the git-commit-info tools.
//!
//! Start with [`TelemetryConfig::new()`]. Everything goes to stderr, stdout is left
//! to the tools themselves.

use std::io::{IsTerminal as _, Write as _};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// The toplevel config for the telemetry crate. Start here.
#[derive(Debug)]
pub struct TelemetryConfig {
    global_filter: EnvFilter,
    timestamps: bool,
}

impl TelemetryConfig {
    /// Logs at `INFO` unless `RUST_LOG` says otherwise.
    #[expect(clippy::new_without_default, reason = "may add required args later")]
    #[must_use]
    pub fn new() -> Self {
        Self {
            global_filter: EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
            timestamps: true,
        }
    }

    /// Override the global filter to a custom filter.
    #[must_use]
    pub fn with_global_filter(self, filter: EnvFilter) -> Self {
        Self {
            global_filter: filter,
            ..self
        }
    }

    /// Drops timestamps from every line. Build systems usually prefix their own.
    #[must_use]
    pub fn without_timestamps(self) -> Self {
        Self {
            timestamps: false,
            ..self
        }
    }

    pub fn try_init(
        self,
    ) -> Result<TelemetryFlusher, tracing_subscriber::util::TryInitError> {
        let ansi = std::io::stderr().is_terminal();
        let timed_layer = self.timestamps.then(|| {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(ansi)
                .with_target(false)
        });
        let untimed_layer = (!self.timestamps).then(|| {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(ansi)
                .with_target(false)
                .without_time()
        });

        tracing_subscriber::registry()
            .with(timed_layer)
            .with(untimed_layer)
            .with(self.global_filter)
            .try_init()?;

        Ok(TelemetryFlusher { _private: () })
    }

    /// Initializes the telemetry config. Call this only once, at the beginning of the
    /// program.
    ///
    /// Calling this more than once or when another tracing subscriber is registered
    /// will cause a panic.
    pub fn init(self) -> TelemetryFlusher {
        self.try_init()
            .expect("failed to initialize commit-info-telemetry")
    }
}

/// Allows flushing all telemetry logs.
#[must_use = "call .flush_blocking at the end of the program, otherwise logs may get lost"]
pub struct TelemetryFlusher {
    _private: (),
}

impl TelemetryFlusher {
    /// Call this at the end of the program.
    pub fn flush_blocking(self) {
        std::io::stderr().flush().ok();
        std::io::stdout().flush().ok();
    }
}
