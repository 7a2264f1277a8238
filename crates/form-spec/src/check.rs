use std::collections::BTreeSet;

use regex::Regex;
use thiserror::Error;

use crate::spec::field::ValidationRule;
use crate::spec::form::FormSpec;

/// Structural problems that make a form's rules unable to evaluate meaningfully.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaIssue {
    #[error("field '{field}' depends on unknown field '{target}'")]
    UnknownDependency { field: String, target: String },
    #[error("field '{field}' depends on itself")]
    SelfDependency { field: String },
    #[error("field id '{field}' is declared more than once")]
    DuplicateField { field: String },
    #[error("field '{field}' must declare at least one option")]
    MissingOptions { field: String },
    #[error("field '{field}' has invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },
}

/// Collects every issue in declaration order.
pub fn check_spec(spec: &FormSpec) -> Vec<SchemaIssue> {
    let mut issues = Vec::new();
    let mut seen = BTreeSet::new();

    for field in &spec.fields {
        if !seen.insert(field.id.as_str()) {
            issues.push(SchemaIssue::DuplicateField {
                field: field.id.clone(),
            });
        }

        if field.kind.uses_options() && field.options.is_empty() {
            issues.push(SchemaIssue::MissingOptions {
                field: field.id.clone(),
            });
        }

        for target in field.dependencies() {
            if target == field.id {
                issues.push(SchemaIssue::SelfDependency {
                    field: field.id.clone(),
                });
            } else if !spec.has_field(target) {
                issues.push(SchemaIssue::UnknownDependency {
                    field: field.id.clone(),
                    target: target.to_string(),
                });
            }
        }

        for rule in &field.validation {
            if let ValidationRule::Pattern { pattern, .. } = rule
                && let Err(err) = Regex::new(pattern)
            {
                issues.push(SchemaIssue::InvalidPattern {
                    field: field.id.clone(),
                    pattern: pattern.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    issues
}
