//! Sparse fieldsets and other per-call query options.

use serde_json::{Map, Value};

/// Sparse fieldset selection, sent as `fields[<type>]=a,b,c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fields {
    /// Field names, joined with `,`
    List(Vec<String>),
    /// Pre-joined field list
    Raw(String),
    /// Explicit `fields` object, sent as-is (may name several types)
    Map(Map<String, Value>),
    /// Send no fieldset, even where one is sent by default
    Omit,
}

impl Fields {
    /// Builds a field list.
    pub fn list<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(names.into_iter().map(Into::into).collect())
    }

    /// Returns the `fields` parameter value for `resource_type`, if any.
    #[must_use]
    pub fn to_param(&self, resource_type: &str) -> Option<Value> {
        let for_type = |value: String| {
            let mut map = Map::new();
            map.insert(resource_type.to_string(), Value::String(value));
            Value::Object(map)
        };

        match self {
            Self::List(names) => Some(for_type(names.join(","))),
            Self::Raw(value) => Some(for_type(value.clone())),
            Self::Map(map) => Some(Value::Object(map.clone())),
            Self::Omit => None,
        }
    }
}

impl From<&str> for Fields {
    fn from(value: &str) -> Self {
        Self::Raw(value.to_string())
    }
}

impl From<String> for Fields {
    fn from(value: String) -> Self {
        Self::Raw(value)
    }
}

impl From<Vec<String>> for Fields {
    fn from(names: Vec<String>) -> Self {
        Self::List(names)
    }
}

impl From<&[&str]> for Fields {
    fn from(names: &[&str]) -> Self {
        Self::list(names.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Fields {
    fn from(names: [&str; N]) -> Self {
        Self::list(names)
    }
}

/// Query options for list and retrieve calls.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use xkepster::resources::{Fields, QueryOptions};
///
/// let options = QueryOptions::new()
///     .with_param("page", json!({"size": 25}))
///     .with_fields(["first_name", "email"]);
///
/// let query = options.into_params("users");
/// assert_eq!(query["fields"], json!({"users": "first_name,email"}));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    /// Free-form parameters (filters, pagination, sorting)
    pub params: Map<String, Value>,
    /// Sparse fieldset
    pub fields: Option<Fields>,
    /// Passed through verbatim as `field_inputs`
    pub field_inputs: Option<Value>,
}

impl QueryOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Sets the sparse fieldset.
    #[must_use]
    pub fn with_fields(mut self, fields: impl Into<Fields>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// Sets `field_inputs`.
    #[must_use]
    pub fn with_field_inputs(mut self, field_inputs: Value) -> Self {
        self.field_inputs = Some(field_inputs);
        self
    }

    /// Merges everything into query parameters for `resource_type`.
    #[must_use]
    pub fn into_params(self, resource_type: &str) -> Map<String, Value> {
        let mut params = self.params;
        if let Some(fields) = self.fields.as_ref().and_then(|f| f.to_param(resource_type)) {
            params.insert("fields".to_string(), fields);
        }
        if let Some(field_inputs) = self.field_inputs {
            params.insert("field_inputs".to_string(), field_inputs);
        }
        params
    }
}
