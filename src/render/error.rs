//! Error rendering for the command line.

use colored::Colorize;
use serde::Serialize;

use crate::error::AistatusError;

/// JSON representation of an error for machine consumption.
#[derive(Serialize)]
struct ErrorJson {
    error_code: String,
    category: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    service: Option<String>,
}

impl ErrorJson {
    fn from_error(error: &AistatusError) -> Self {
        Self {
            error_code: error.error_code().to_string(),
            category: error.category().to_string(),
            message: error.to_string(),
            service: error.service().map(|s| s.key().to_string()),
        }
    }
}

/// Render an error for stderr.
#[must_use]
pub fn render_error(error: &AistatusError, json: bool, no_color: bool) -> String {
    if json {
        return render_error_json(error);
    }
    let header = format!("Error [{}]", error.error_code());
    if no_color {
        format!("{header}: {error}")
    } else {
        format!("{}: {error}", header.red().bold())
    }
}

/// Render error as structured JSON.
#[must_use]
pub fn render_error_json(error: &AistatusError) -> String {
    serde_json::to_string(&ErrorJson::from_error(error))
        .unwrap_or_else(|_| format!("Error [{}]: {error}", error.error_code()))
}
