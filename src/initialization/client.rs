//! HTTP client initialization.

use std::time::Duration;

use reqwest::Client;

use crate::config::Config;
use crate::error_handling::InitializationError;

/// Builds the HTTP client used to reach the audit backend.
///
/// Applies the configured timeout and User-Agent. Timeouts live here, at the
/// transport edge; the state machines above never time anything out
/// themselves.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the client cannot be
/// constructed.
pub fn init_client(config: &Config) -> Result<Client, InitializationError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client_with_defaults() {
        let config = Config::default();
        assert!(init_client(&config).is_ok());
    }
}
