use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::rule::VisibilityRule;
use crate::spec::required::{Required, RequiredSchema};

/// Supported input kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single choice among the declared options.
    Radio,
    /// Multi-line free text.
    Textarea,
    /// One or more toggles, one per declared option.
    Checkbox,
    Email,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Radio => "radio",
            FieldType::Textarea => "textarea",
            FieldType::Checkbox => "checkbox",
            FieldType::Email => "email",
        }
    }

    /// Choice-like kinds only accept declared option values.
    pub fn uses_options(&self) -> bool {
        matches!(self, FieldType::Radio | FieldType::Checkbox)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Styling hints handed through to renderers untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldPresentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_class_name: Option<String>,
}

impl FieldPresentation {
    pub fn is_empty(&self) -> bool {
        self.class_name.is_none() && self.label_class_name.is_none()
    }
}

pub const DEFAULT_EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// A single value constraint with the message shown when it fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationRule {
    MinLength {
        min_length: usize,
        message: String,
    },
    MaxLength {
        max_length: usize,
        message: String,
    },
    Email {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Pattern {
        pattern: String,
        message: String,
    },
}

impl ValidationRule {
    pub fn min_length(min_length: usize, message: impl Into<String>) -> Self {
        ValidationRule::MinLength {
            min_length,
            message: message.into(),
        }
    }

    pub fn email() -> Self {
        ValidationRule::Email { message: None }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ValidationRule::MinLength { .. } => "min_length",
            ValidationRule::MaxLength { .. } => "max_length",
            ValidationRule::Email { .. } => "email",
            ValidationRule::Pattern { .. } => "pattern",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ValidationRule::MinLength { message, .. }
            | ValidationRule::MaxLength { message, .. }
            | ValidationRule::Pattern { message, .. } => message,
            ValidationRule::Email { message } => {
                message.as_deref().unwrap_or(DEFAULT_EMAIL_MESSAGE)
            }
        }
    }
}

/// Declarative description of one input field.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct FieldSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[schemars(with = "RequiredSchema")]
    pub required: Required,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation: Vec<ValidationRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<VisibilityRule>,
    #[serde(default, skip_serializing_if = "FieldPresentation::is_empty")]
    pub presentation: FieldPresentation,
}

impl FieldSpec {
    pub fn new(id: impl Into<String>, kind: FieldType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            placeholder: None,
            description: None,
            options: Vec::new(),
            required: Required::default(),
            validation: Vec::new(),
            visibility: None,
            presentation: FieldPresentation::default(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_options<I, V, L>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        self.options = options
            .into_iter()
            .map(|(value, label)| FieldOption::new(value, label))
            .collect();
        self
    }

    pub fn with_required(mut self, required: impl Into<Required>) -> Self {
        self.required = required.into();
        self
    }

    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.validation.push(rule);
        self
    }

    pub fn with_visibility(mut self, visibility: VisibilityRule) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn with_classes(
        mut self,
        class_name: impl Into<String>,
        label_class_name: impl Into<String>,
    ) -> Self {
        self.presentation = FieldPresentation {
            class_name: Some(class_name.into()),
            label_class_name: Some(label_class_name.into()),
        };
        self
    }

    pub fn option(&self, value: &str) -> Option<&FieldOption> {
        self.options.iter().find(|option| option.value == value)
    }

    /// Every field id this field's rules read from, visibility first.
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.visibility
            .iter()
            .flat_map(|rule| rule.depends_on.iter().map(String::as_str))
            .chain(self.required.depends_on().iter().copied())
    }
}
