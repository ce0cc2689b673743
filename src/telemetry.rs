//! Telemetry helpers for applications embedding `chart-kit`.
//!
//! Registry overwrites, lazy strategy loads, skipped reconciliations and
//! backend recreation are reported through `tracing`. Hosts either call
//! `init_default_tracing` or install their own subscriber and filters.

/// Installs a compact `tracing` subscriber when the `telemetry` feature is enabled.
///
/// The filter comes from `RUST_LOG` and defaults to `chart_kit=info`.
/// Returns `false` when the feature is disabled or when the host already set
/// a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("chart_kit=info"));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
