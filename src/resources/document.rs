//! JSON:API request documents.

use serde_json::{Map, Value, json};

/// Builder for a single-resource document: `{"data": {type, id?, attributes, relationships?}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    kind: &'static str,
    id: Option<String>,
    attributes: Map<String, Value>,
    relationships: Map<String, Value>,
}

impl Resource {
    /// Starts a document for a new resource of `kind`.
    #[must_use]
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            id: None,
            attributes: Map::new(),
            relationships: Map::new(),
        }
    }

    /// Starts a document addressing the existing resource `id`.
    #[must_use]
    pub fn existing(kind: &'static str, id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::new(kind)
        }
    }

    /// Sets an attribute.
    #[must_use]
    pub fn attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    /// Sets an attribute only when `value` is present.
    #[must_use]
    pub fn optional_attribute<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.attribute(key, value),
            None => self,
        }
    }

    /// Adds a to-one relationship.
    #[must_use]
    pub fn to_one(mut self, name: &str, kind: &str, id: impl Into<String>) -> Self {
        self.relationships.insert(
            name.to_string(),
            json!({ "data": identifier(kind, id.into()) }),
        );
        self
    }

    /// Adds a to-many relationship.
    #[must_use]
    pub fn to_many<I, S>(mut self, name: &str, kind: &str, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let data: Vec<Value> = ids
            .into_iter()
            .map(|id| identifier(kind, id.into()))
            .collect();
        self.relationships
            .insert(name.to_string(), json!({ "data": data }));
        self
    }

    /// Finishes the document.
    #[must_use]
    pub fn into_document(self) -> Value {
        let mut data = Map::new();
        data.insert("type".to_string(), Value::from(self.kind));
        if let Some(id) = self.id {
            data.insert("id".to_string(), Value::String(id));
        }
        data.insert("attributes".to_string(), Value::Object(self.attributes));
        if !self.relationships.is_empty() {
            data.insert(
                "relationships".to_string(),
                Value::Object(self.relationships),
            );
        }

        json!({ "data": data })
    }
}

fn identifier(kind: &str, id: String) -> Value {
    json!({ "type": kind, "id": id })
}
