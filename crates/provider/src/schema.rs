//! Declarative attribute schemas for provider data sources.
//!
//! Responsibilities:
//! - Describe every attribute a data source accepts or produces: its type,
//!   whether it is user-supplied (`optional`) or provider-filled (`computed`),
//!   and whether it is `sensitive` or `deprecated`.
//! - Validate attribute values against the declaration.
//!
//! Does NOT handle:
//! - Storing values (see [`crate::resource_data`]).
//!
//! Invariants:
//! - Every field is optional, computed, or both (checked by [`Resource::new`]).
//! - A `List` field has an element resource; scalar fields do not.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{ProviderError, Result};

/// Attribute value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    Bool,
    Int,
    /// List of nested objects described by [`Schema::elem`].
    List,
}

/// Declaration of a single attribute.
#[derive(Debug, Clone)]
pub struct Schema {
    pub value_type: ValueType,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    /// Deprecation message naming the replacement attribute.
    pub deprecated: Option<&'static str>,
    pub description: &'static str,
    pub elem: Option<Resource>,
}

impl Schema {
    fn of(value_type: ValueType, description: &'static str) -> Self {
        Self {
            value_type,
            optional: false,
            computed: false,
            sensitive: false,
            deprecated: None,
            description,
            elem: None,
        }
    }

    pub fn string(description: &'static str) -> Self {
        Self::of(ValueType::String, description)
    }

    pub fn bool(description: &'static str) -> Self {
        Self::of(ValueType::Bool, description)
    }

    pub fn int(description: &'static str) -> Self {
        Self::of(ValueType::Int, description)
    }

    pub fn list(description: &'static str, elem: Resource) -> Self {
        Self {
            elem: Some(elem),
            ..Self::of(ValueType::List, description)
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn deprecated(mut self, message: &'static str) -> Self {
        self.deprecated = Some(message);
        self
    }

    /// Check `value` against this declaration. `path` is used in error messages.
    fn validate(&self, path: &str, value: &Value) -> std::result::Result<(), String> {
        match (self.value_type, value) {
            (ValueType::String, Value::String(_)) => Ok(()),
            (ValueType::Bool, Value::Bool(_)) => Ok(()),
            (ValueType::Int, Value::Number(n)) if n.is_i64() => Ok(()),
            (ValueType::List, Value::Array(items)) => {
                let Some(elem) = &self.elem else {
                    return Err(format!("{path}: list has no element schema"));
                };
                for (idx, item) in items.iter().enumerate() {
                    let Value::Object(object) = item else {
                        return Err(format!("{path}.{idx}: expected object, got {}", kind(item)));
                    };
                    elem.validate_object(&format!("{path}.{idx}"), object)?;
                }
                Ok(())
            }
            (expected, other) => Err(format!(
                "{path}: expected {}, got {}",
                type_name(expected),
                kind(other)
            )),
        }
    }
}

fn type_name(value_type: ValueType) -> &'static str {
    match value_type {
        ValueType::String => "string",
        ValueType::Bool => "bool",
        ValueType::Int => "int",
        ValueType::List => "list",
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() => "int",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// A set of named attribute declarations.
#[derive(Debug, Clone, Default)]
pub struct Resource {
    fields: BTreeMap<&'static str, Schema>,
}

impl Resource {
    /// Build a resource, rejecting malformed declarations.
    pub fn new(fields: impl IntoIterator<Item = (&'static str, Schema)>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for (key, schema) in fields {
            if !schema.optional && !schema.computed {
                return Err(ProviderError::InvalidSchema {
                    key: key.to_string(),
                    message: "one of optional or computed must be set".to_string(),
                });
            }
            match (schema.value_type, &schema.elem) {
                (ValueType::List, None) => {
                    return Err(ProviderError::InvalidSchema {
                        key: key.to_string(),
                        message: "list requires an element resource".to_string(),
                    });
                }
                (ValueType::List, Some(_)) | (_, None) => {}
                (_, Some(_)) => {
                    return Err(ProviderError::InvalidSchema {
                        key: key.to_string(),
                        message: "only lists may have an element resource".to_string(),
                    });
                }
            }
            if map.insert(key, schema).is_some() {
                return Err(ProviderError::InvalidSchema {
                    key: key.to_string(),
                    message: "declared twice".to_string(),
                });
            }
        }
        Ok(Self { fields: map })
    }

    pub fn get(&self, key: &str) -> Option<&Schema> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Schema)> {
        self.fields.iter().map(|(k, v)| (*k, v))
    }

    /// Dotted paths of every sensitive attribute, nested ones included.
    ///
    /// `targets.cos_endpoint.api_key` names the `api_key` of any element.
    pub fn sensitive_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_sensitive("", &mut paths);
        paths
    }

    fn collect_sensitive(&self, prefix: &str, out: &mut Vec<String>) {
        for (key, schema) in &self.fields {
            let path = if prefix.is_empty() {
                (*key).to_string()
            } else {
                format!("{prefix}.{key}")
            };
            if schema.sensitive {
                out.push(path.clone());
            }
            if let Some(elem) = &schema.elem {
                elem.collect_sensitive(&path, out);
            }
        }
    }

    /// Validate a single top-level attribute value.
    pub fn validate_attribute(&self, key: &str, value: &Value) -> std::result::Result<(), String> {
        let schema = self
            .get(key)
            .ok_or_else(|| format!("{key}: not declared in schema"))?;
        schema.validate(key, value)
    }

    fn validate_object(&self, path: &str, object: &Map<String, Value>) -> std::result::Result<(), String> {
        for (key, value) in object {
            let schema = self
                .get(key)
                .ok_or_else(|| format!("{path}.{key}: not declared in schema"))?;
            schema.validate(&format!("{path}.{key}"), value)?;
        }
        Ok(())
    }

    /// Replace every sensitive value inside `value` (declared by `schema`) with `mask`.
    pub(crate) fn mask_value(schema: &Schema, value: &Value, mask: &str) -> Value {
        if schema.sensitive {
            return Value::String(mask.to_string());
        }
        match (&schema.elem, value) {
            (Some(elem), Value::Array(items)) => Value::Array(
                items
                    .iter()
                    .map(|item| match item {
                        Value::Object(object) => Value::Object(elem.mask_object(object, mask)),
                        other => other.clone(),
                    })
                    .collect(),
            ),
            _ => value.clone(),
        }
    }

    pub(crate) fn mask_object(&self, object: &Map<String, Value>, mask: &str) -> Map<String, Value> {
        object
            .iter()
            .map(|(key, value)| {
                let masked = match self.get(key) {
                    Some(schema) => Self::mask_value(schema, value, mask),
                    None => value.clone(),
                };
                (key.clone(), masked)
            })
            .collect()
    }
}
