//! Monitored service descriptors.
//!
//! The service list is fixed; only the tier and base URL of each service can
//! be changed through configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AistatusError;

/// Path of the statuspage.io summary endpoint, appended to each base URL.
pub const STATUS_PATH: &str = "/api/v2/status.json";

// =============================================================================
// Service Identity
// =============================================================================

/// The AI services whose status pages are polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceId {
    #[serde(rename = "openai")]
    OpenAi,
    Anthropic,
    Cursor,
}

impl ServiceId {
    /// All services in display order.
    pub const ALL: &'static [Self] = &[Self::OpenAi, Self::Anthropic, Self::Cursor];

    /// Config/CLI key for this service.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Cursor => "cursor",
        }
    }

    /// Display name used in tooltips and messages.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Cursor => "Cursor",
        }
    }

    /// Public statuspage base URL.
    #[must_use]
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::OpenAi => "https://status.openai.com",
            Self::Anthropic => "https://status.anthropic.com",
            Self::Cursor => "https://status.cursor.com",
        }
    }

    /// Tier used when configuration does not declare one.
    #[must_use]
    pub const fn default_tier(self) -> Tier {
        match self {
            Self::Cursor => Tier::Critical,
            Self::OpenAi | Self::Anthropic => Tier::Standard,
        }
    }

    /// Position in [`ServiceId::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::OpenAi => 0,
            Self::Anthropic => 1,
            Self::Cursor => 2,
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.display_name())
    }
}

impl FromStr for ServiceId {
    type Err = AistatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|id| id.key() == lower)
            .copied()
            .ok_or_else(|| AistatusError::UnknownService(s.to_string()))
    }
}

// =============================================================================
// Criticality Tier
// =============================================================================

/// How much a service's degradation weighs in the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Degradation alone forces the highest severity and raises an alert.
    Critical,
    /// Degradation raises the middle severity; never alerts.
    #[default]
    Standard,
}

impl Tier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Standard => "standard",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// =============================================================================
// Service Descriptor
// =============================================================================

/// A monitored service with its resolved endpoint and tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub id: ServiceId,
    pub tier: Tier,
    pub base_url: String,
}

impl Service {
    /// Descriptor with built-in endpoint and tier.
    #[must_use]
    pub fn builtin(id: ServiceId) -> Self {
        Self {
            id,
            tier: id.default_tier(),
            base_url: id.default_base_url().to_string(),
        }
    }

    /// Full status endpoint URL.
    #[must_use]
    pub fn status_url(&self) -> String {
        format!("{}{STATUS_PATH}", self.base_url.trim_end_matches('/'))
    }

    #[must_use]
    pub const fn is_critical(&self) -> bool {
        matches!(self.tier, Tier::Critical)
    }
}

/// The built-in set of monitored services, in display order.
#[must_use]
pub fn builtin_services() -> Vec<Service> {
    ServiceId::ALL.iter().copied().map(Service::builtin).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_services_are_in_display_order() {
        let services = builtin_services();
        let ids: Vec<_> = services.iter().map(|s| s.id).collect();
        assert_eq!(ids, ServiceId::ALL);
        for (i, id) in ServiceId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn only_cursor_is_critical_by_default() {
        let critical: Vec<_> = builtin_services()
            .into_iter()
            .filter(Service::is_critical)
            .map(|s| s.id)
            .collect();
        assert_eq!(critical, vec![ServiceId::Cursor]);
    }

    #[test]
    fn status_url_appends_api_path() {
        let svc = Service::builtin(ServiceId::OpenAi);
        assert_eq!(svc.status_url(), "https://status.openai.com/api/v2/status.json");

        let svc = Service {
            base_url: "http://127.0.0.1:8080/".to_string(),
            ..Service::builtin(ServiceId::Cursor)
        };
        assert_eq!(svc.status_url(), "http://127.0.0.1:8080/api/v2/status.json");
    }

    #[test]
    fn parse_service_id() {
        assert_eq!("OpenAI".parse::<ServiceId>().unwrap(), ServiceId::OpenAi);
        assert_eq!(" cursor ".parse::<ServiceId>().unwrap(), ServiceId::Cursor);
        assert!("gemini".parse::<ServiceId>().is_err());
    }

    #[test]
    fn service_id_serde_uses_keys() {
        let json = serde_json::to_string(&ServiceId::OpenAi).unwrap();
        assert_eq!(json, "\"openai\"");
        let tier: Tier = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(tier, Tier::Critical);
    }
}
