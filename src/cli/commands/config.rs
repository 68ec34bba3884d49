//! Config command implementation.

use crate::config::ServerConfig;
use crate::error::Result;

/// Print the resolved configuration.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(config: &ServerConfig, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("host: {}", config.host);
    println!("port: {}", config.port);
    println!("seed: {}", config.seed);
    println!("max-page-size: {}", config.max_page_size);
    println!("log-format: {}", config.log_format);
    Ok(())
}
