//! Output formatters for data source state.
//!
//! Responsibilities:
//! - Render the state produced by a read as JSON, YAML, or a table.
//!
//! Does NOT handle:
//! - Masking sensitive values; callers pass `redacted_state()` unless the
//!   user asked for secrets.

mod table;

use anyhow::Result;
use serde_json::Value;

use crate::args::OutputFormat;

pub use table::format_targets_table;

/// Render `state` (an object with `id` and `targets`) in `format`.
pub fn format_state(state: &Value, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(state)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(state)?),
        OutputFormat::Table => Ok(format_targets_table(state)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_is_pretty_and_parses_back() {
        let state = json!({"id": "t1", "targets": [{"name": "t1"}]});
        let out = format_state(&state, OutputFormat::Json).unwrap();
        assert!(out.contains('\n'));
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_yaml_contains_keys() {
        let state = json!({"id": "t1", "targets": [{"name": "t1"}]});
        let out = format_state(&state, OutputFormat::Yaml).unwrap();
        assert!(out.contains("id: t1"));
        assert!(out.contains("- name: t1"));
    }
}
