use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::field::{FieldSpec, FieldType, ValidationRule};
use crate::spec::form::FormSpec;
use crate::values::FormValues;
use crate::visibility::{is_visible, resolve_required, resolve_visibility};

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

/// A single field-level failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationError {
    pub field_id: String,
    pub path: String,
    pub message: String,
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<ValidationError>,
    #[serde(default)]
    pub missing_required: Vec<String>,
    #[serde(default)]
    pub unknown_fields: Vec<String>,
}

impl ValidationResult {
    pub fn error_for(&self, field_id: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|error| error.field_id == field_id)
    }
}

pub fn validate(spec: &FormSpec, values: &FormValues) -> ValidationResult {
    let visibility = resolve_visibility(spec, values);
    let required = resolve_required(spec, values, &visibility);

    let mut errors = Vec::new();
    let mut missing_required = Vec::new();

    for field in &spec.fields {
        if !is_visible(&visibility, &field.id) {
            continue;
        }

        match values.filled(&field.id) {
            None => {
                if required.get(&field.id).copied().unwrap_or(false) {
                    missing_required.push(field.id.clone());
                }
            }
            Some(value) => {
                if let Some(error) = validate_value(field, value) {
                    errors.push(error);
                }
            }
        }
    }

    let unknown_fields: Vec<String> = values
        .keys()
        .filter(|key| !spec.has_field(key))
        .map(String::from)
        .collect();

    ValidationResult {
        valid: errors.is_empty() && missing_required.is_empty() && unknown_fields.is_empty(),
        errors,
        missing_required,
        unknown_fields,
    }
}

/// Checks one non-empty value, reporting the first failure only.
pub fn validate_value(field: &FieldSpec, value: &str) -> Option<ValidationError> {
    if field.kind.uses_options() && !accepts_option(field, value) {
        return Some(base_error(
            field,
            "value is not one of the available options",
            "invalid_option",
        ));
    }

    field
        .validation
        .iter()
        .find_map(|rule| enforce_rule(field, rule, value))
}

fn accepts_option(field: &FieldSpec, value: &str) -> bool {
    match field.kind {
        // Parts are compared verbatim, the same way visibility rules read them.
        FieldType::Checkbox => value.split(',').all(|part| field.option(part).is_some()),
        _ => field.option(value).is_some(),
    }
}

fn enforce_rule(field: &FieldSpec, rule: &ValidationRule, value: &str) -> Option<ValidationError> {
    let failed = match rule {
        ValidationRule::MinLength { min_length, .. } => value.chars().count() < *min_length,
        ValidationRule::MaxLength { max_length, .. } => value.chars().count() > *max_length,
        ValidationRule::Email { .. } => !is_email(value),
        ValidationRule::Pattern { pattern, .. } => match Regex::new(pattern) {
            Ok(regex) => !regex.is_match(value),
            // Broken patterns are reported by the schema check instead.
            Err(_) => false,
        },
    };

    failed.then(|| base_error(field, rule.message(), rule.code()))
}

pub fn is_email(text: &str) -> bool {
    EMAIL_REGEX
        .as_ref()
        .is_some_and(|regex| regex.is_match(text.trim()))
}

fn base_error(field: &FieldSpec, message: &str, code: &str) -> ValidationError {
    ValidationError {
        field_id: field.id.clone(),
        path: format!("/{}", field.id),
        message: message.into(),
        code: code.into(),
    }
}
