//! `services` command: list what is monitored.

use serde::Serialize;

use crate::cli::args::ServicesArgs;
use crate::core::models::RobotOutput;
use crate::core::service::{Service, Tier};
use crate::error::Result;
use crate::render::robot::render_json;
use crate::storage::ResolvedConfig;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ServiceRow {
    service: &'static str,
    name: &'static str,
    tier: Tier,
    status_url: String,
}

impl From<&Service> for ServiceRow {
    fn from(service: &Service) -> Self {
        Self {
            service: service.id.key(),
            name: service.id.display_name(),
            tier: service.tier,
            status_url: service.status_url(),
        }
    }
}

/// Render the service table.
#[must_use]
pub fn render_table(services: &[Service]) -> String {
    let mut out = format!("{:<12} {:<10} {}\n", "Service", "Tier", "Endpoint");
    out.push_str(&format!("{:-<12} {:-<10} {:-<40}\n", "", "", ""));
    for service in services {
        out.push_str(&format!(
            "{:<12} {:<10} {}\n",
            service.id.display_name(),
            service.tier,
            service.status_url()
        ));
    }
    out
}

/// Execute the `services` command.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn execute(args: &ServicesArgs, config: &ResolvedConfig) -> Result<()> {
    if args.json {
        let rows: Vec<ServiceRow> = config.services.iter().map(ServiceRow::from).collect();
        println!("{}", render_json(&RobotOutput::new("services", rows))?);
    } else {
        print!("{}", render_table(&config.services));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::service::builtin_services;

    #[test]
    fn table_lists_every_service_with_tier() {
        let table = render_table(&builtin_services());
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with("OpenAI"));
        assert!(lines[2].contains("standard"));
        assert!(lines[4].starts_with("Cursor"));
        assert!(lines[4].contains("critical"));
        assert!(lines[4].ends_with("https://status.cursor.com/api/v2/status.json"));
    }

    #[test]
    fn row_serializes_keys() {
        let row = ServiceRow::from(&builtin_services()[1]);
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["service"], "anthropic");
        assert_eq!(value["tier"], "standard");
    }
}
