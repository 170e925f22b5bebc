//! Error rendering for burner.
//!
//! Human mode prints a short message with the error code and a hint; robot
//! modes print a structured JSON object on stderr.

use colored::Colorize;
use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::error::BurnerError;

/// Render an error for the given output format.
#[must_use]
pub fn render_error(error: &BurnerError, format: OutputFormat, no_color: bool, pretty: bool) -> String {
    match format {
        OutputFormat::Json => render_error_json(error, pretty),
        // Md consumers are scripts too
        OutputFormat::Md => render_error_json(error, true),
        OutputFormat::Human => render_simple(error, no_color),
    }
}

/// Render error as structured JSON for machine consumption.
#[must_use]
pub fn render_error_json(error: &BurnerError, pretty: bool) -> String {
    let error_json = ErrorJson::from_error(error);
    let rendered = if pretty {
        serde_json::to_string_pretty(&error_json)
    } else {
        serde_json::to_string(&error_json)
    };
    rendered.unwrap_or_else(|_| render_simple(error, true))
}

fn render_simple(error: &BurnerError, no_color: bool) -> String {
    let label = if no_color {
        "Error".to_string()
    } else {
        "Error".red().bold().to_string()
    };

    let mut lines = vec![format!("{label} [{}]: {error}", error.error_code())];
    if let Some(hint) = error.hint() {
        let hint = format!("Hint: {hint}");
        lines.push(if no_color { hint } else { hint.dimmed().to_string() });
    }
    lines.join("\n")
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorJson {
    error_code: String,
    category: String,
    message: String,
    exit_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

impl ErrorJson {
    fn from_error(error: &BurnerError) -> Self {
        Self {
            error_code: error.error_code().to_string(),
            category: error.category().to_string(),
            message: error.to_string(),
            exit_code: error.exit_code().into(),
            hint: error.hint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_contains, assert_json_valid, assert_no_ansi_codes};

    fn sample() -> BurnerError {
        BurnerError::InvalidGroup {
            name: "Travel".to_string(),
            valid: "General, Social Media, Shopping, Forums".to_string(),
        }
    }

    #[test]
    fn simple_render_includes_code_and_hint() {
        let out = render_error(&sample(), OutputFormat::Human, true, false);
        assert_contains!(&out, "Error [BURNER-I004]");
        assert_contains!(&out, "Travel");
        assert_contains!(&out, "Hint: Run `burner groups`");
        assert_no_ansi_codes!(&out);
    }

    #[test]
    fn json_render_fields() {
        let out = render_error(&sample(), OutputFormat::Json, true, false);
        assert_json_valid!(&out);
        assert!(!out.contains('\n'));
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["errorCode"], "BURNER-I004");
        assert_eq!(json["category"], "Input error");
        assert_eq!(json["exitCode"], 3);
        assert!(json["hint"].is_string());
    }

    #[test]
    fn json_render_omits_missing_hint() {
        let err = BurnerError::InvalidField("id".to_string());
        let out = render_error_json(&err, false);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(json.get("hint").is_none());
    }

    #[test]
    fn md_format_is_pretty_json() {
        let out = render_error(&sample(), OutputFormat::Md, true, false);
        assert!(out.contains('\n'));
        assert_json_valid!(&out);
    }
}
