//! Table formatter for targets.
//!
//! Tab-separated, one row per target, with a leading `ID:` line for the
//! state identifier.

use serde_json::Value;

/// Representation for missing values.
pub const DEFAULT_MISSING_VALUE: &str = "N/A";

const HEADERS: [&str; 6] = ["NAME", "ID", "TYPE", "REGION", "DESTINATION", "STATUS"];

/// Format the targets of a read state as a table.
pub fn format_targets_table(state: &Value) -> String {
    let targets = state
        .get("targets")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut output = String::new();
    if let Some(id) = state.get("id").and_then(Value::as_str) {
        output.push_str(&format!("ID: {id}\n"));
    }

    if targets.is_empty() {
        output.push_str("No targets found.\n");
        return output;
    }

    output.push_str(&HEADERS.join("\t"));
    output.push('\n');
    for target in targets {
        let row = [
            field(target, "name"),
            field(target, "id"),
            field(target, "target_type"),
            field(target, "region"),
            destination(target),
            nested(target, "write_status", "status"),
        ];
        output.push_str(&row.join("\t"));
        output.push('\n');
    }
    output
}

fn field(target: &Value, key: &str) -> String {
    target
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_MISSING_VALUE)
        .to_string()
}

/// First element of a single-element nested list.
fn nested(target: &Value, list: &str, key: &str) -> String {
    target
        .get(list)
        .and_then(|v| v.get(0))
        .map(|elem| field(elem, key))
        .unwrap_or_else(|| DEFAULT_MISSING_VALUE.to_string())
}

/// COS bucket, or the LogDNA instance CRN.
fn destination(target: &Value) -> String {
    if target.get("cos_endpoint").is_some() {
        return nested(target, "cos_endpoint", "bucket");
    }
    nested(target, "logdna_endpoint", "target_crn")
}
