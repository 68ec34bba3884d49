//! Serve command implementation.

use crate::config::ServerConfig;
use crate::error::{Result, TrackerError};
use crate::server;

/// Execute the serve command.
///
/// Builds the store, then blocks on the HTTP server until shutdown.
///
/// # Errors
///
/// Returns an error if the runtime cannot start or the server fails.
pub fn execute(config: &ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let state = server::bootstrap(config);
    tracing::debug!(
        seeded = config.seed,
        max_page_size = config.max_page_size,
        "Store ready"
    );

    runtime
        .block_on(server::serve(config, state))
        .map_err(TrackerError::Other)
}
