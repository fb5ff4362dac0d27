//! In-memory form model.
//!
//! Used by headless callers (server-side re-validation, tests, benchmarks)
//! and deserialisable from JSON so form definitions can be shipped as data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::field::{FieldAccessor, FieldLookup, FieldReference, FormAccessor};

/// A single input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl InputField {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    fn matches(&self, reference: &FieldReference<'_>) -> bool {
        match reference {
            FieldReference::Id(id) => self.id.as_deref() == Some(*id),
            FieldReference::Name(name) => self.name == *name,
        }
    }
}

impl FieldAccessor for InputField {
    fn identifier(&self) -> &str {
        &self.name
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: String) {
        self.value = value;
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Ordered collection of inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    #[serde(default)]
    pub fields: Vec<InputField>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: InputField) -> Self {
        self.fields.push(field);
        self
    }

    /// First field with the given name.
    pub fn by_name(&self, name: &str) -> Option<&InputField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut InputField> {
        self.fields.iter_mut().find(|field| field.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }
}

impl FieldLookup for Form {
    fn lookup(&self, reference: &FieldReference<'_>) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.matches(reference))
            .map(|field| field.value.as_str())
    }
}

impl FormAccessor for Form {
    type Field = InputField;

    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn field(&self, index: usize) -> Option<&InputField> {
        self.fields.get(index)
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut InputField> {
        self.fields.get_mut(index)
    }
}
