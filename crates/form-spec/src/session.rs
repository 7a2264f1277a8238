use thiserror::Error;
use tracing::debug;

use crate::render::{RenderPayload, build_render_payload};
use crate::spec::form::FormSpec;
use crate::submit::SubmitHandler;
use crate::validate::{ValidationResult, validate};
use crate::values::FormValues;
use crate::visibility::{VisibilityMap, resolve_visibility};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("form '{form}' has no field '{field}'")]
    UnknownField { form: String, field: String },
}

/// Holds the interactive state of one form and drives submission.
pub struct FormSession<'a, H> {
    spec: &'a FormSpec,
    values: FormValues,
    handler: H,
}

impl<'a, H: SubmitHandler> FormSession<'a, H> {
    pub fn new(spec: &'a FormSpec, handler: H) -> Self {
        Self {
            spec,
            values: FormValues::new(),
            handler,
        }
    }

    /// Seeds the session with existing values; undeclared keys are kept and reported on submit.
    pub fn with_values(mut self, values: FormValues) -> Self {
        self.values = values;
        self
    }

    pub fn spec(&self) -> &'a FormSpec {
        self.spec
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> Result<(), SessionError> {
        if !self.spec.has_field(id) {
            return Err(SessionError::UnknownField {
                form: self.spec.id.clone(),
                field: id.to_string(),
            });
        }
        let value = value.into();
        debug!(form = %self.spec.id, field = id, value = %value, "field value set");
        self.values.insert(id, value);
        Ok(())
    }

    pub fn clear_value(&mut self, id: &str) -> Option<String> {
        debug!(form = %self.spec.id, field = id, "field value cleared");
        self.values.remove(id)
    }

    pub fn visibility(&self) -> VisibilityMap {
        resolve_visibility(self.spec, &self.values)
    }

    pub fn payload(&self) -> RenderPayload {
        build_render_payload(self.spec, &self.values)
    }

    /// Validates without notifying the handler.
    pub fn validation(&self) -> ValidationResult {
        validate(self.spec, &self.values)
    }

    /// Validates and hands the values to the handler exactly once, valid or not.
    pub fn submit(&self) -> ValidationResult {
        let result = self.validation();
        debug!(
            form = %self.spec.id,
            valid = result.valid,
            missing = result.missing_required.len(),
            errors = result.errors.len(),
            "form submit attempted"
        );
        self.handler.on_submit(&self.values, result.valid);
        result
    }

    pub fn into_values(self) -> FormValues {
        self.values
    }
}
