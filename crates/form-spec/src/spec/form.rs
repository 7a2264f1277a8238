use schemars::JsonSchema;
use serde::Serialize;

use crate::check::{SchemaIssue, check_spec};
use crate::spec::field::FieldSpec;

/// Top-level form definition.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct FormSpec {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<FieldSpec>,
}

impl FormSpec {
    pub fn new(id: impl Into<String>, title: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            fields,
        }
    }

    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn has_field(&self, id: &str) -> bool {
        self.field(id).is_some()
    }

    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.id.as_str())
    }

    /// Runs the static schema check and reports the first issue found.
    pub fn ensure_valid(&self) -> Result<(), SchemaIssue> {
        match check_spec(self).into_iter().next() {
            Some(issue) => Err(issue),
            None => Ok(()),
        }
    }
}
