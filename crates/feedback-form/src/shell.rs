use handlebars::Handlebars;
use serde_json::json;
use thiserror::Error;

use form_spec::{RenderPayload, render_text};

const PAGE_TEMPLATE: &str = "{{title}}\n{{divider}}\n{{form}}\n";
const DIVIDER_WIDTH: usize = 48;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("page template is invalid: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("page render failed: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Renders the page shell: heading, divider, then the embedded form.
pub fn render_page(payload: &RenderPayload) -> Result<String, ShellError> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_escape_fn(handlebars::no_escape);
    registry.register_template_string("page", PAGE_TEMPLATE)?;

    let data = json!({
        "title": payload.form_title,
        "divider": "─".repeat(DIVIDER_WIDTH.max(payload.form_title.chars().count())),
        "form": render_text(payload),
    });
    Ok(registry.render("page", &data)?)
}
