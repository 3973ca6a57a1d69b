//! Statuspage mocks for integration tests.
//!
//! Every service is served from one [`MockServer`] under its own path prefix,
//! matching the layout produced by `make_test_config_toml`.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aistatus::core::service::{STATUS_PATH, Service, ServiceId};
use aistatus::test_utils::statuspage_body;

/// Path the mock server answers on for one service.
pub fn status_path(id: ServiceId) -> String {
    format!("/{}{STATUS_PATH}", id.key())
}

/// Built-in services with their base URLs pointed at `server`.
pub fn mock_services(server: &MockServer) -> Vec<Service> {
    ServiceId::ALL
        .iter()
        .map(|&id| Service {
            base_url: format!("{}/{}", server.uri(), id.key()),
            ..Service::builtin(id)
        })
        .collect()
}

/// Serve `indicator` for one service. Call `server.reset()` before remounting.
pub async fn mount_indicator(server: &MockServer, id: ServiceId, indicator: &str) {
    Mock::given(method("GET"))
        .and(path(status_path(id)))
        .respond_with(ResponseTemplate::new(200).set_body_string(statuspage_body(indicator)))
        .mount(server)
        .await;
}

/// Serve `indicator` for every service.
pub async fn mount_all(server: &MockServer, indicator: &str) {
    for &id in ServiceId::ALL {
        mount_indicator(server, id, indicator).await;
    }
}

/// Serve a raw response for one service.
pub async fn mount_response(server: &MockServer, id: ServiceId, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(status_path(id)))
        .respond_with(response)
        .mount(server)
        .await;
}

/// A response that answers only after `delay`.
pub fn delayed(indicator: &str, delay: Duration) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(statuspage_body(indicator))
        .set_delay(delay)
}

/// Number of requests the server received for one service.
pub async fn request_count(server: &MockServer, id: ServiceId) -> usize {
    let wanted = status_path(id);
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == wanted)
        .count()
}
