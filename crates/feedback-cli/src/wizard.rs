use form_spec::{
    FieldType, FormValues, RenderField, RenderPayload, RenderProgress, ValidationResult,
};

/// Controls which bits of state the wizard prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: field prompts only.
    Clean,
    /// Verbose output: status and visible fields before each prompt.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// Prints prompts and progress while the form is being filled in.
pub struct WizardPresenter {
    verbosity: Verbosity,
    header_printed: bool,
}

impl WizardPresenter {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            header_printed: false,
        }
    }

    pub fn show_header(&mut self, payload: &RenderPayload) {
        if self.header_printed {
            return;
        }
        println!("{}", payload.form_title);
        println!("{}", "─".repeat(payload.form_title.chars().count()));
        println!("Type 'submit' to send the form early or 'exit' to abort.");
        self.header_printed = true;
    }

    pub fn show_status(&self, payload: &RenderPayload) {
        if !self.verbosity.is_verbose() {
            return;
        }
        println!(
            "Status: {} ({}/{})",
            payload.status.as_str(),
            payload.progress.answered,
            payload.progress.total
        );
        println!("Visible fields:");
        for field in payload.visible_fields() {
            let mut entry = format!(" - {} ({})", field.id, field.label);
            if field.required {
                entry.push_str(" [required]");
            }
            if let Some(value) = &field.current_value {
                entry.push_str(&format!(" = {}", value));
            }
            println!("{}", entry);
        }
    }

    pub fn show_prompt(&self, prompt: &PromptContext) {
        let mut line = format!("{}/{} {}", prompt.index, prompt.total, prompt.label);
        if prompt.required {
            line.push_str(" *");
        }
        if let Some(hint) = &prompt.hint {
            line.push(' ');
            line.push_str(hint);
        }
        println!("{}", line);
        if let Some(description) = &prompt.description {
            println!("{}", description);
        }
        for choice in &prompt.choices {
            println!("  {}", choice);
        }
    }

    pub fn show_parse_error(&self, error: &AnswerParseError) {
        eprintln!("Invalid answer: {}", error.user_message);
        if self.verbosity.is_verbose()
            && let Some(debug) = &error.debug_message
        {
            eprintln!("  Expected: {}", debug);
        }
    }

    pub fn show_completion(&self, values: &FormValues, result: &ValidationResult) {
        if result.valid {
            println!("Thanks for your feedback ✅");
        } else {
            println!("Submitted, but the form is incomplete.");
        }
        if self.verbosity.is_verbose() {
            println!("Values: {}", values);
        }
    }
}

/// Context used to format a single prompt.
pub struct PromptContext {
    pub index: usize,
    pub total: usize,
    pub label: String,
    pub description: Option<String>,
    pub required: bool,
    pub hint: Option<String>,
    pub choices: Vec<String>,
}

impl PromptContext {
    pub fn new(field: &RenderField, progress: &RenderProgress) -> Self {
        let choices = match field.kind {
            FieldType::Radio | FieldType::Checkbox if field.options.len() > 1 => field
                .options
                .iter()
                .map(|option| format!("{}) {}", option.value, option.label))
                .collect(),
            _ => Vec::new(),
        };
        Self {
            index: (progress.answered + 1).min(progress.total.max(1)),
            total: progress.total,
            label: field.label.clone(),
            description: field.description.clone(),
            required: field.required,
            hint: hint_for(field),
            choices,
        }
    }
}

fn hint_for(field: &RenderField) -> Option<String> {
    match field.kind {
        FieldType::Radio => Some("(pick one)".to_string()),
        FieldType::Checkbox => match field.options.as_slice() {
            [only] => Some(format!("[{}] (yes/no)", only.label)),
            _ => Some("(comma-separated)".to_string()),
        },
        FieldType::Email => Some("(email)".to_string()),
        FieldType::Textarea => field
            .placeholder
            .as_ref()
            .map(|placeholder| format!("({})", placeholder)),
    }
}

/// Error produced when parsing answers from the user.
#[derive(Debug)]
pub struct AnswerParseError {
    pub user_message: String,
    pub debug_message: Option<String>,
}

impl AnswerParseError {
    pub fn new(user_message: impl Into<String>, debug_message: Option<String>) -> Self {
        Self {
            user_message: user_message.into(),
            debug_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_form::feedback_form;
    use form_spec::{RenderStatus, build_render_payload};

    #[test]
    fn prompt_lists_rating_choices() {
        let payload = build_render_payload(feedback_form(), &FormValues::new());
        assert_eq!(payload.status, RenderStatus::NeedInput);
        let rating = payload.field("rating").expect("rating");
        let prompt = PromptContext::new(rating, &payload.progress);
        assert_eq!(prompt.index, 1);
        assert_eq!(prompt.total, 2);
        assert!(prompt.required);
        assert_eq!(prompt.choices.len(), 5);
        assert_eq!(prompt.choices[2], "3) 3 - Good");
    }

    #[test]
    fn single_checkbox_prompts_for_toggle() {
        let values = FormValues::from_iter([("rating", "3")]);
        let payload = build_render_payload(feedback_form(), &values);
        let contact = payload.field("contactMe").expect("contactMe");
        let prompt = PromptContext::new(contact, &payload.progress);
        assert!(prompt.choices.is_empty());
        assert!(prompt.hint.as_deref().is_some_and(|hint| hint.ends_with("(yes/no)")));
        assert_eq!(prompt.index, 2);
        assert_eq!(prompt.total, 3);
    }
}
