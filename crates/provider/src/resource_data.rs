//! Configuration and state handle passed to data source reads.
//!
//! Responsibilities:
//! - Hold user inputs and provider-computed attributes for one evaluation.
//! - Validate every write against the data source schema.
//! - Render state, optionally with sensitive values masked.
//!
//! Does NOT handle:
//! - Persistence between evaluations.
//!
//! Invariants:
//! - Every stored value conforms to the schema; a rejected `set` leaves the
//!   previous value untouched.
//! - Inputs may only target `optional` attributes.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{ProviderError, Result};
use crate::schema::Resource;

/// Placeholder rendered in place of sensitive values.
pub const SENSITIVE_PLACEHOLDER: &str = "(sensitive value)";

/// Mutable attribute map for one data source evaluation.
#[derive(Debug, Clone)]
pub struct ResourceData {
    schema: Arc<Resource>,
    attributes: Map<String, Value>,
    id: Option<String>,
}

impl ResourceData {
    /// Create an empty handle for `schema`.
    pub fn new(schema: Arc<Resource>) -> Self {
        Self {
            schema,
            attributes: Map::new(),
            id: None,
        }
    }

    /// Supply a user input. Only `optional` attributes accept input.
    pub fn with_input(mut self, key: &str, value: Value) -> Result<Self> {
        match self.schema.get(key) {
            Some(schema) if schema.optional => {}
            Some(_) => {
                return Err(ProviderError::SetAttribute {
                    key: key.to_string(),
                    message: "attribute is computed and cannot be configured".to_string(),
                });
            }
            None => {
                return Err(ProviderError::SetAttribute {
                    key: key.to_string(),
                    message: "not declared in schema".to_string(),
                });
            }
        }
        self.set(key, value)?;
        Ok(self)
    }

    /// Get a value only if it is set and not the zero value of its type.
    ///
    /// `""`, `false`, `0` and `[]` count as unset.
    pub fn get_ok(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !is_zero(v))
    }

    /// Get a string value with [`get_ok`](Self::get_ok) semantics.
    pub fn get_ok_str(&self, key: &str) -> Option<&str> {
        self.get_ok(key).and_then(Value::as_str)
    }

    /// Store `value` under `key` after validating it against the schema.
    pub fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.schema
            .validate_attribute(key, &value)
            .map_err(|message| ProviderError::SetAttribute {
                key: key.to_string(),
                message,
            })?;
        self.attributes.insert(key.to_string(), value);
        Ok(())
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn schema(&self) -> &Resource {
        &self.schema
    }

    /// Full state: `id` (when set) plus every attribute, sensitive values included.
    pub fn state(&self) -> Value {
        let mut out = Map::new();
        if let Some(id) = &self.id {
            out.insert("id".to_string(), Value::String(id.clone()));
        }
        out.extend(self.attributes.clone());
        Value::Object(out)
    }

    /// State with every sensitive attribute replaced by [`SENSITIVE_PLACEHOLDER`].
    pub fn redacted_state(&self) -> Value {
        let mut out = Map::new();
        if let Some(id) = &self.id {
            out.insert("id".to_string(), Value::String(id.clone()));
        }
        out.extend(
            self.schema
                .mask_object(&self.attributes, SENSITIVE_PLACEHOLDER),
        );
        Value::Object(out)
    }
}

fn is_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_i64() == Some(0) || n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
