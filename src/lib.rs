//! Collection Advisor: aggregates how containers (lists, sets, maps) are used
//! at runtime, per container instance.
//!
//! Containers are wrapped with [`tracked!`], which reports every operation to a
//! [`metrics::MetricsRegistry`]. The registry keeps the containers owned by the
//! tracked namespace and counts inserts, removals, lookups, clears, and size and
//! capacity changes for each of them.
use std::sync::Arc;

use error::ResultOkLogExt;

pub mod api;
pub mod config;
pub mod container;
pub mod demo;
pub mod error;
pub mod hook;
pub mod metrics;

/// Runs the Collection Advisor binary.
///
/// Reads the [`config::Config`] from the environment, runs the demo workload
/// against a fresh registry and writes the report to standard output or to the
/// configured file. If an export address is configured, the metrics are then
/// served as JSON until the process is stopped.
///
/// # Errors
///
/// Possible errors include:
/// - Invalid configuration values (e.g., a blank `COLLECTION_ADVISOR_NAMESPACE`).
/// - Failure to write the report to standard output.
/// - Failure to bind or serve the export address.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::from_env()?;
    log::debug!("Configuration: {:?}", config);

    let registry = Arc::new(metrics::MetricsRegistry::new(
        config.namespace.clone(),
        config.match_mode,
    ));

    demo::run(&registry);
    log::debug!("Tracked containers: {}", registry.size());

    let written = config.report_path.as_ref().and_then(|path| {
        registry
            .write_report_file(path)
            .ok_log(&format!("failed to write report to `{}`", path.display()))
    });
    if written.is_none() {
        registry.write_report(&mut std::io::stdout().lock())?;
    }

    if let Some(addr) = config.export_addr {
        api::ApiServer::new(Arc::clone(&registry))
            .listen(addr)
            .await?;
    }

    Ok(())
}
