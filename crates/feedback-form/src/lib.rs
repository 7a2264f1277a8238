use std::sync::LazyLock;

use form_spec::{
    FieldSpec, FieldType, FormSession, FormSpec, FormValues, Required, SchemaIssue,
    SubmitHandler, ValidationRule, VisibilityRule,
};
use tracing::debug;

pub mod shell;
pub mod submit;

pub use shell::{ShellError, render_page};
pub use submit::{DiagnosticLog, LoggingSubmit, TracingLog};

pub const FORM_ID: &str = "productFeedback";
pub const FORM_TITLE: &str = "Product Feedback";

const INPUT_CLASSES: &str = "border border-gray-400 rounded p-2 w-full";
const LABEL_CLASSES: &str = "block mb-1 font-medium";

static FEEDBACK_FORM: LazyLock<FormSpec> = LazyLock::new(build_feedback_form);

/// The product feedback form, built once per process.
pub fn feedback_form() -> &'static FormSpec {
    &FEEDBACK_FORM
}

/// Email becomes mandatory once the user agrees to be contacted.
pub fn contact_requested(values: &FormValues) -> bool {
    values.get("contactMe") == Some("yes")
}

fn build_feedback_form() -> FormSpec {
    FormSpec::new(
        FORM_ID,
        FORM_TITLE,
        vec![
            FieldSpec::new("rating", FieldType::Radio, "How would you rate our product?")
                .with_options([
                    ("1", "1 - Poor"),
                    ("2", "2 - Fair"),
                    ("3", "3 - Good"),
                    ("4", "4 - Very Good"),
                    ("5", "5 - Excellent"),
                ])
                .with_required(true),
            FieldSpec::new("feedback", FieldType::Textarea, "Your feedback")
                .with_placeholder("What did you like or dislike?")
                .with_rule(ValidationRule::min_length(10, "Please provide more detail"))
                .with_classes(INPUT_CLASSES, LABEL_CLASSES),
            FieldSpec::new(
                "contactMe",
                FieldType::Checkbox,
                "Can we contact you about this feedback?",
            )
            .with_visibility(VisibilityRule::equals("rating", "3"))
            .with_options([(
                "yes",
                "I confirm that I have parental consent to use this service",
            )])
            .with_description("Please check this field to be able to submit the form"),
            FieldSpec::new("email", FieldType::Email, "Your email")
                .with_required(Required::Dynamic {
                    depends_on: &["contactMe"],
                    predicate: contact_requested,
                })
                .with_rule(ValidationRule::email())
                .with_visibility(VisibilityRule::equals("contactMe", "yes"))
                .with_classes(INPUT_CLASSES, LABEL_CLASSES),
        ],
    )
}

/// Checks the feedback form and binds it to a submission handler.
pub fn mount<H: SubmitHandler>(handler: H) -> Result<FormSession<'static, H>, SchemaIssue> {
    let spec = feedback_form();
    spec.ensure_valid()?;
    debug!(form = %spec.id, fields = spec.fields.len(), "feedback form mounted");
    Ok(FormSession::new(spec, handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_spec::{Condition, check_spec, resolve_visibility, validate};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingLog {
        calls: RefCell<Vec<(FormValues, bool)>>,
    }

    impl DiagnosticLog for RecordingLog {
        fn record(&self, values: &FormValues, is_valid: bool) {
            self.calls.borrow_mut().push((values.clone(), is_valid));
        }
    }

    fn happy_values() -> FormValues {
        FormValues::from_iter([
            ("rating", "5"),
            ("feedback", "Great product, loved it!"),
            ("contactMe", "yes"),
            ("email", "user@example.com"),
        ])
    }

    #[test]
    fn declares_four_fields_in_order() {
        let ids: Vec<_> = feedback_form().field_ids().collect();
        assert_eq!(ids, vec!["rating", "feedback", "contactMe", "email"]);
        assert_eq!(feedback_form().id, FORM_ID);
        assert_eq!(feedback_form().title, FORM_TITLE);
    }

    #[test]
    fn rating_offers_five_levels() {
        let rating = feedback_form().field("rating").expect("rating");
        assert_eq!(rating.kind, FieldType::Radio);
        assert!(!rating.required.is_dynamic());
        assert!(rating.required.evaluate(&FormValues::new()));
        let labels: Vec<_> = rating.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["1 - Poor", "2 - Fair", "3 - Good", "4 - Very Good", "5 - Excellent"]
        );
    }

    #[test]
    fn contact_me_shows_for_rating_three() {
        let field = feedback_form().field("contactMe").expect("contactMe");
        let rule = field.visibility.as_ref().expect("visibility rule");
        assert_eq!(rule.depends_on, vec!["rating"]);
        assert_eq!(rule.condition, Condition::Equals);
        assert_eq!(rule.value, "3");
    }

    #[test]
    fn email_follows_contact_consent() {
        let field = feedback_form().field("email").expect("email");
        let rule = field.visibility.as_ref().expect("visibility rule");
        assert_eq!(rule.depends_on, vec!["contactMe"]);
        assert_eq!(rule.condition, Condition::Equals);
        assert_eq!(rule.value, "yes");

        assert_eq!(field.required.depends_on(), &["contactMe"]);
        let yes = FormValues::from_iter([("contactMe", "yes")]);
        let no = FormValues::from_iter([("contactMe", "")]);
        let other = FormValues::from_iter([("contactMe", "Yes")]);
        assert!(field.required.evaluate(&yes));
        assert!(!field.required.evaluate(&no));
        assert!(!field.required.evaluate(&other));
        assert!(!field.required.evaluate(&FormValues::new()));
        assert_eq!(field.validation, vec![ValidationRule::email()]);
    }

    #[test]
    fn feedback_requires_detail() {
        let field = feedback_form().field("feedback").expect("feedback");
        assert!(field.validation.contains(&ValidationRule::MinLength {
            min_length: 10,
            message: "Please provide more detail".into(),
        }));
    }

    #[test]
    fn schema_references_resolve() {
        assert!(check_spec(feedback_form()).is_empty());
    }

    #[test]
    fn submit_logs_values_and_validity_once() {
        let values = happy_values();
        let handler = LoggingSubmit::with_log(RecordingLog::default());
        handler.on_submit(&values, true);

        let calls = handler.log().calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], (values, true));
    }

    #[test]
    fn mounted_session_logs_invalid_submissions_too() {
        let session = mount(LoggingSubmit::with_log(RecordingLog::default()))
            .expect("feedback form is consistent")
            .with_values(FormValues::from_iter([("feedback", "meh")]));
        let result = session.submit();
        assert!(!result.valid);
        assert_eq!(result.missing_required, vec!["rating"]);
        assert_eq!(result.errors[0].message, "Please provide more detail");

        let calls = session.handler().log().calls.borrow();
        assert_eq!(calls.len(), 1);
        assert!(!calls[0].1);
    }

    #[test]
    fn consent_flow_requires_email() {
        let mut session = mount(LoggingSubmit::with_log(RecordingLog::default()))
            .expect("feedback form is consistent");
        session.set_value("rating", "3").expect("rating");
        session
            .set_value("feedback", "Solid, but the setup was slow.")
            .expect("feedback");
        assert!(session.submit().valid);

        session.set_value("contactMe", "yes").expect("contactMe");
        let result = session.submit();
        assert_eq!(result.missing_required, vec!["email"]);

        session.set_value("email", "user@example.com").expect("email");
        assert!(session.submit().valid);
        assert_eq!(session.handler().log().calls.borrow().len(), 3);
    }

    #[test]
    fn email_hidden_when_rating_hides_consent() {
        // contactMe holds a stale "yes" but is hidden, so email is hidden as well.
        let values = happy_values();
        let visibility = resolve_visibility(feedback_form(), &values);
        assert!(!visibility["contactMe"]);
        assert!(!visibility["email"]);
        assert!(validate(feedback_form(), &values).valid);
    }

    #[test]
    fn consent_must_match_the_option_exactly() {
        for consent in [" yes", ",", "yes,"] {
            let values = FormValues::from_iter([
                ("rating", "3"),
                ("feedback", "The onboarding was smooth."),
                ("contactMe", consent),
            ]);
            assert!(!resolve_visibility(feedback_form(), &values)["email"]);
            let result = validate(feedback_form(), &values);
            assert!(!result.valid, "{consent:?} accepted");
            assert_eq!(
                result.error_for("contactMe").map(|error| error.code.as_str()),
                Some("invalid_option")
            );
        }
    }
}
