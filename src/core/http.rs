//! HTTP client utilities.
//!
//! Provides the shared HTTP client used by the status fetcher.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::error::{AistatusError, Result};

/// Build a configured HTTP client.
///
/// With `timeout` unset, requests never time out; a hung request is superseded
/// by the next poll.
///
/// # Errors
///
/// Returns error if client construction fails.
pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = ClientBuilder::new().user_agent(format!("aistatus/{}", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| AistatusError::ClientBuild(e.to_string()))
}
