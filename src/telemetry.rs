//! Tracing setup for hosts embedding the digitizer.
//!
//! Nothing here runs implicitly: callers either use `init_default_tracing`
//! or install their own `tracing` subscriber and filters.

/// Installs a default `tracing` subscriber when the `telemetry` feature is
/// enabled.
///
/// The default filter surfaces this crate's per-run diagnostics (match
/// counts, hole statistics, smoothing) at `debug` while keeping everything
/// else at `info`; setting `RUST_LOG` overrides it entirely.
///
/// Returns `true` when initialization succeeds. Returns `false` when no
/// initialization is performed (feature disabled) or a global subscriber was
/// already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,digitize_rs=debug"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
