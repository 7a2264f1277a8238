use serde_json::{Map, Value, json};

use crate::{
    spec::{
        field::{FieldOption, FieldType},
        form::FormSpec,
    },
    values::FormValues,
    visibility::{is_visible, resolve_required, resolve_visibility},
};

/// Status labels returned by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// A visible required field is still empty.
    NeedInput,
    /// Every actively required field is filled.
    Complete,
}

impl RenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStatus::NeedInput => "need_input",
            RenderStatus::Complete => "complete",
        }
    }
}

/// Progress counters exposed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderProgress {
    pub answered: usize,
    pub total: usize,
}

/// Describes a single field for render outputs.
#[derive(Debug, Clone)]
pub struct RenderField {
    pub id: String,
    pub label: String,
    pub kind: FieldType,
    pub placeholder: Option<String>,
    pub description: Option<String>,
    pub options: Vec<FieldOption>,
    pub required: bool,
    pub visible: bool,
    pub current_value: Option<String>,
    pub class_name: Option<String>,
    pub label_class_name: Option<String>,
}

impl RenderField {
    /// Whether an option is currently selected (checkboxes may hold several).
    pub fn is_selected(&self, option: &FieldOption) -> bool {
        self.current_value.as_deref().is_some_and(|value| match self.kind {
            FieldType::Checkbox => value.split(',').any(|part| part.trim() == option.value),
            _ => value == option.value,
        })
    }
}

/// Collected payload used by both text and JSON renderers.
#[derive(Debug, Clone)]
pub struct RenderPayload {
    pub form_id: String,
    pub form_title: String,
    pub status: RenderStatus,
    pub next_field_id: Option<String>,
    pub progress: RenderProgress,
    pub fields: Vec<RenderField>,
}

impl RenderPayload {
    pub fn field(&self, id: &str) -> Option<&RenderField> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn visible_fields(&self) -> impl Iterator<Item = &RenderField> {
        self.fields.iter().filter(|field| field.visible)
    }
}

/// Build the renderer payload from the form and the current values.
pub fn build_render_payload(spec: &FormSpec, values: &FormValues) -> RenderPayload {
    let visibility = resolve_visibility(spec, values);
    let required = resolve_required(spec, values, &visibility);

    let fields = spec
        .fields
        .iter()
        .map(|field| RenderField {
            id: field.id.clone(),
            label: field.label.clone(),
            kind: field.kind,
            placeholder: field.placeholder.clone(),
            description: field.description.clone(),
            options: field.options.clone(),
            required: required.get(&field.id).copied().unwrap_or(false),
            visible: is_visible(&visibility, &field.id),
            current_value: values.filled(&field.id).map(String::from),
            class_name: field.presentation.class_name.clone(),
            label_class_name: field.presentation.label_class_name.clone(),
        })
        .collect::<Vec<_>>();

    let pending = |field: &&RenderField| field.visible && field.current_value.is_none();
    let next_required = fields
        .iter()
        .filter(pending)
        .find(|field| field.required)
        .map(|field| field.id.clone());
    let status = if next_required.is_some() {
        RenderStatus::NeedInput
    } else {
        RenderStatus::Complete
    };
    let next_field_id =
        next_required.or_else(|| fields.iter().find(pending).map(|field| field.id.clone()));

    let total = fields.iter().filter(|field| field.visible).count();
    let answered = fields
        .iter()
        .filter(|field| field.visible && field.current_value.is_some())
        .count();

    RenderPayload {
        form_id: spec.id.clone(),
        form_title: spec.title.clone(),
        status,
        next_field_id,
        progress: RenderProgress { answered, total },
        fields,
    }
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &RenderPayload) -> Value {
    let fields = payload
        .fields
        .iter()
        .map(|field| {
            let mut map = Map::new();
            map.insert("id".into(), Value::String(field.id.clone()));
            map.insert("label".into(), Value::String(field.label.clone()));
            map.insert("type".into(), Value::String(field.kind.as_str().into()));
            map.insert("required".into(), Value::Bool(field.required));
            map.insert("visible".into(), Value::Bool(field.visible));
            if let Some(placeholder) = &field.placeholder {
                map.insert("placeholder".into(), Value::String(placeholder.clone()));
            }
            map.insert(
                "description".into(),
                field
                    .description
                    .clone()
                    .map(Value::String)
                    .unwrap_or(Value::Null),
            );
            if !field.options.is_empty() {
                map.insert(
                    "options".into(),
                    Value::Array(
                        field
                            .options
                            .iter()
                            .map(|option| {
                                json!({
                                    "value": option.value,
                                    "label": option.label,
                                    "selected": field.is_selected(option),
                                })
                            })
                            .collect(),
                    ),
                );
            }
            if let Some(current_value) = &field.current_value {
                map.insert("current_value".into(), Value::String(current_value.clone()));
            }
            if let Some(class_name) = &field.class_name {
                map.insert("class_name".into(), Value::String(class_name.clone()));
            }
            if let Some(label_class_name) = &field.label_class_name {
                map.insert(
                    "label_class_name".into(),
                    Value::String(label_class_name.clone()),
                );
            }
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "form_id": payload.form_id,
        "form_title": payload.form_title,
        "status": payload.status.as_str(),
        "next_field_id": payload.next_field_id,
        "progress": {
            "answered": payload.progress.answered,
            "total": payload.progress.total,
        },
        "fields": fields,
    })
}

/// Render the visible fields as human-friendly text.
pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();

    for field in payload.visible_fields() {
        let mut heading = format!("[{}] {}", field.id, field.label);
        if field.required {
            heading.push_str(" *");
        }
        lines.push(heading);
        if let Some(description) = &field.description {
            lines.push(format!("    {}", description));
        }

        match field.kind {
            FieldType::Radio => {
                for option in &field.options {
                    let mark = if field.is_selected(option) { "(x)" } else { "( )" };
                    lines.push(format!("    {} {}", mark, option.label));
                }
            }
            FieldType::Checkbox => {
                for option in &field.options {
                    let mark = if field.is_selected(option) { "[x]" } else { "[ ]" };
                    lines.push(format!("    {} {}", mark, option.label));
                }
            }
            FieldType::Textarea | FieldType::Email => match (&field.current_value, &field.placeholder) {
                (Some(value), _) => lines.push(format!("    > {}", value)),
                (None, Some(placeholder)) => lines.push(format!("    > ({})", placeholder)),
                (None, None) => lines.push("    > ".to_string()),
            },
        }
    }

    lines.push(format!(
        "Status: {} ({}/{})",
        payload.status.as_str(),
        payload.progress.answered,
        payload.progress.total
    ));

    lines.join("\n")
}
