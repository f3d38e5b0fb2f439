//! Field types, field descriptors, and schemas.
//!
//! A schema maps field names to descriptors. Descriptors built in code carry
//! a `FieldType` and can never be invalid; descriptors built from type names
//! or declarative JSON go through `FieldType::from_str`, which rejects
//! anything outside the closed type set.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{SchemaError, SchemaResult};
use crate::record::Value;
use crate::validation::hooks::{Check, Transform};

/// Closed set of field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Array,
    Boolean,
    Function,
    Integer,
    Number,
    Object,
    String,
    /// Passthrough, never coerced.
    Any,
}

impl FieldType {
    pub const ALL: [FieldType; 8] = [
        FieldType::Array,
        FieldType::Boolean,
        FieldType::Function,
        FieldType::Integer,
        FieldType::Number,
        FieldType::Object,
        FieldType::String,
        FieldType::Any,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Array => "array",
            FieldType::Boolean => "boolean",
            FieldType::Function => "function",
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::Object => "object",
            FieldType::String => "string",
            FieldType::Any => "any",
        }
    }

    /// Type names accepted by `from_str`, comma-joined for error messages.
    pub fn allowed() -> String {
        FieldType::ALL.map(|t| t.as_str()).join(",")
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownFieldType {
                found: s.to_string(),
            })
    }
}

/// Descriptor for one schema field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    field_type: FieldType,
    required: bool,
    default: Option<Value>,
    preparse: Option<Transform>,
    postparse: Option<Transform>,
    valid: Option<Check>,
}

impl FieldDescriptor {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: false,
            default: None,
            preparse: None,
            postparse: None,
            valid: None,
        }
    }

    /// Build a descriptor from a type name.
    ///
    /// # Errors
    /// `UnknownFieldType` if the name is not in the closed type set.
    pub fn parse(type_name: &str) -> SchemaResult<Self> {
        Ok(Self::new(type_name.parse()?))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn preparse<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.preparse = Some(Transform::new(f));
        self
    }

    pub fn postparse<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.postparse = Some(Transform::new(f));
        self
    }

    pub fn valid<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.valid = Some(Check::immediate(f));
        self
    }

    pub fn valid_async<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        self.valid = Some(Check::deferred(f));
        self
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn preparse_hook(&self) -> Option<&Transform> {
        self.preparse.as_ref()
    }

    pub fn postparse_hook(&self) -> Option<&Transform> {
        self.postparse.as_ref()
    }

    pub fn check(&self) -> Option<&Check> {
        self.valid.as_ref()
    }
}

/// Declarative, hook-free form of a descriptor, as found in JSON definitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    /// Kept as raw JSON so a non-string type is reported as a bad type.
    #[serde(rename = "type", default)]
    pub type_name: Option<serde_json::Value>,
    #[serde(default)]
    pub required: bool,
    /// `null` is a declared default; only a missing key means "no default".
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl FieldSpec {
    /// Convert into a descriptor for `field`.
    pub fn into_descriptor(self, field: &str) -> SchemaResult<FieldDescriptor> {
        let invalid = |found: String| SchemaError::InvalidSchemaType {
            field: field.to_string(),
            found,
        };
        let field_type: FieldType = match self.type_name {
            None => return Err(invalid("missing".to_string())),
            Some(serde_json::Value::String(name)) => {
                name.parse().map_err(|_| invalid(name.clone()))?
            }
            Some(other) => return Err(invalid(other.to_string())),
        };

        let mut descriptor = FieldDescriptor::new(field_type);
        descriptor.required = self.required;
        descriptor.default = self.default.map(Value::from);
        Ok(descriptor)
    }
}

/// Immutable mapping from field name to descriptor, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: IndexMap<String, FieldDescriptor>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field declaration. Redeclaring a name replaces it.
    pub fn field(mut self, name: &str, descriptor: FieldDescriptor) -> Self {
        self.fields.insert(name.to_string(), descriptor);
        self
    }

    /// Build a schema from a JSON object of field specs.
    ///
    /// # Errors
    /// - `InvalidDefinition` if the definition or a field spec is malformed
    /// - `InvalidSchemaType` if a field's type is missing or unknown
    pub fn from_definition(definition: &serde_json::Value) -> SchemaResult<Self> {
        let entries = definition.as_object().ok_or_else(|| {
            SchemaError::InvalidDefinition("schema definition must be an object".to_string())
        })?;

        let mut fields = IndexMap::with_capacity(entries.len());
        for (name, raw) in entries {
            if !raw.is_object() {
                return Err(SchemaError::InvalidDefinition(format!(
                    "field '{}' must be an object",
                    name
                )));
            }
            let spec: FieldSpec = serde_json::from_value(raw.clone()).map_err(|e| {
                SchemaError::InvalidDefinition(format!("field '{}': {}", name, e))
            })?;
            fields.insert(name.clone(), spec.into_descriptor(name)?);
        }

        log::debug!(
            "SCHEMA_DEFINITION_LOADED fields={:?}",
            fields.keys().collect::<Vec<_>>()
        );

        Ok(Self { fields })
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, FieldDescriptor)> for Schema {
    fn from_iter<I: IntoIterator<Item = (String, FieldDescriptor)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
