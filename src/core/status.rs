//! Status page fetching.
//!
//! Fetches service status from statuspage.io endpoints. One routine serves
//! every service; the caller decides which reading slot the result updates.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::http::build_client;
use super::models::{StatusIndicator, StatusReport};
use super::service::{Service, ServiceId};
use crate::error::{AistatusError, Result};

/// Response from the statuspage.io summary API.
#[derive(Debug, Deserialize)]
struct StatuspageResponse {
    status: StatuspageStatus,
}

#[derive(Debug, Deserialize)]
struct StatuspageStatus {
    indicator: String,
    #[serde(default)]
    description: String,
}

/// Fetcher for service status pages.
#[derive(Debug, Clone)]
pub struct StatusFetcher {
    client: Client,
    timeout: Option<Duration>,
}

impl StatusFetcher {
    /// Create a fetcher with an optional per-request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            timeout,
        })
    }

    /// Fetch and parse one service's status page.
    ///
    /// # Errors
    /// Returns an error attributed to `service` on transport failure,
    /// non-success HTTP status, or a malformed status document.
    #[instrument(skip(self), fields(service = %service.id))]
    pub async fn fetch(&self, service: &Service) -> Result<StatusReport> {
        let url = service.status_url();
        debug!(%url, "Fetching status page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(service.id, &e))?;

        if !response.status().is_success() {
            return Err(AistatusError::HttpStatus {
                service: service.id,
                status: response.status().as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(service.id, &e))?;

        parse_status(service.id, &body)
    }

    fn transport_error(&self, service: ServiceId, err: &reqwest::Error) -> AistatusError {
        match self.timeout {
            Some(timeout) if err.is_timeout() => AistatusError::Timeout {
                service,
                seconds: timeout.as_secs(),
            },
            _ => AistatusError::Transport {
                service,
                message: err.to_string(),
            },
        }
    }
}

/// Parse a statuspage.io summary document.
///
/// # Errors
/// Returns [`AistatusError::ParseResponse`] if the body is not JSON or lacks
/// `status.indicator`.
pub fn parse_status(service: ServiceId, body: &str) -> Result<StatusReport> {
    let data: StatuspageResponse =
        serde_json::from_str(body).map_err(|e| AistatusError::ParseResponse {
            service,
            message: e.to_string(),
        })?;

    let indicator = StatusIndicator::from_statuspage(&data.status.indicator);
    Ok(StatusReport {
        service,
        indicator,
        reading: indicator.reading(),
        description: data.status.description,
        fetched_at: Utc::now(),
    })
}
