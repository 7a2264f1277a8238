#![allow(missing_docs)]

pub mod check;
pub mod render;
pub mod rule;
pub mod session;
pub mod spec;
pub mod submit;
pub mod validate;
pub mod values;
pub mod visibility;

pub use check::{SchemaIssue, check_spec};
pub use render::{
    RenderField, RenderPayload, RenderProgress, RenderStatus, build_render_payload,
    render_json_ui, render_text,
};
pub use rule::{Condition, VisibilityRule};
pub use session::{FormSession, SessionError};
pub use spec::{
    FieldOption, FieldPresentation, FieldSpec, FieldType, FormSpec, Required, RequiredFn,
    ValidationRule,
};
pub use submit::SubmitHandler;
pub use validate::{ValidationError, ValidationResult, is_email, validate};
pub use values::FormValues;
pub use visibility::{RequiredMap, VisibilityMap, resolve_required, resolve_visibility};
