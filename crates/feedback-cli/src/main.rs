mod wizard;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use feedback_form::{LoggingSubmit, feedback_form, mount, render_page};
use form_spec::{
    FieldType, FormSpec, FormValues, RenderField, ValidationResult, build_render_payload,
    check_spec, render_json_ui, validate, validate::validate_value,
};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wizard::{AnswerParseError, PromptContext, Verbosity, WizardPresenter};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const DEFAULT_LOG_FILTER: &str = "product_feedback=info,feedback_form=info,form_spec=info";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Product feedback form",
    long_about = "Renders, validates and submits the product feedback form from the terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderMode {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Render the page with the form for the given values.
    Show {
        /// Optional JSON file with the current field values.
        #[arg(long, value_name = "VALUES")]
        values: Option<PathBuf>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
    /// Print the form definition as JSON.
    Schema {
        /// Print the JSON Schema of the form model instead of the form itself.
        #[arg(long)]
        json_schema: bool,
    },
    /// Check that every field dependency resolves.
    Check,
    /// Validate field values against the form.
    Validate {
        /// JSON file with the field values.
        #[arg(long, value_name = "VALUES")]
        values: PathBuf,
    },
    /// Submit field values; the outcome is written to the diagnostic log.
    Submit {
        /// JSON file with the field values.
        #[arg(long, value_name = "VALUES")]
        values: PathBuf,
    },
    /// Fill in the form interactively, then submit it.
    Fill {
        /// Optional JSON file with initial values.
        #[arg(long, value_name = "VALUES")]
        values: Option<PathBuf>,
        /// Show status and the visible fields before each prompt.
        #[arg(long, alias = "debug")]
        verbose: bool,
    },
}

fn main() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Show { values, format } => run_show(values, format),
        Command::Schema { json_schema } => run_schema(json_schema),
        Command::Check => run_check(),
        Command::Validate { values } => run_validate(values),
        Command::Submit { values } => run_submit(values),
        Command::Fill { values, verbose } => run_fill(values, verbose),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_values(path: &Path) -> CliResult<FormValues> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    let values: FormValues = serde_json::from_str(&contents).map_err(|err| {
        format!(
            "{} is not a flat JSON object of strings: {}",
            path.display(),
            err
        )
    })?;
    debug!(path = %path.display(), count = values.len(), "values loaded");
    Ok(values)
}

fn load_optional_values(path: Option<PathBuf>) -> CliResult<FormValues> {
    match path {
        Some(path) => load_values(&path),
        None => Ok(FormValues::new()),
    }
}

fn run_show(values_path: Option<PathBuf>, format: RenderMode) -> CliResult<()> {
    let values = load_optional_values(values_path)?;
    let payload = build_render_payload(feedback_form(), &values);
    match format {
        RenderMode::Text => print!("{}", render_page(&payload)?),
        RenderMode::Json => println!(
            "{}",
            serde_json::to_string_pretty(&render_json_ui(&payload))?
        ),
    }
    Ok(())
}

fn run_schema(json_schema: bool) -> CliResult<()> {
    let output = if json_schema {
        serde_json::to_string_pretty(&schemars::schema_for!(FormSpec))?
    } else {
        serde_json::to_string_pretty(feedback_form())?
    };
    println!("{}", output);
    Ok(())
}

fn run_check() -> CliResult<()> {
    let issues = check_spec(feedback_form());
    if issues.is_empty() {
        println!("Schema check passed: {} fields", feedback_form().fields.len());
        return Ok(());
    }
    println!("Schema issues:");
    for issue in &issues {
        println!("  {}", issue);
    }
    Err(format!("{} schema issue(s) found", issues.len()).into())
}

fn run_validate(values_path: PathBuf) -> CliResult<()> {
    let values = load_values(&values_path)?;
    let result = validate(feedback_form(), &values);
    println!(
        "Validation result: {}",
        if result.valid { "valid" } else { "invalid" }
    );
    describe_validation(&result);

    if result.valid {
        Ok(())
    } else {
        Err("validation failed".into())
    }
}

fn run_submit(values_path: PathBuf) -> CliResult<()> {
    let values = load_values(&values_path)?;
    let session = mount(LoggingSubmit::new())?.with_values(values);
    let result = session.submit();
    println!(
        "Submitted ({})",
        if result.valid { "valid" } else { "invalid" }
    );
    describe_validation(&result);
    Ok(())
}

fn describe_validation(result: &ValidationResult) {
    if !result.errors.is_empty() {
        println!("Errors:");
        for error in &result.errors {
            println!("  {} - {}", error.path, error.message);
        }
    }
    if !result.missing_required.is_empty() {
        println!(
            "Missing required fields: {}",
            result.missing_required.join(", ")
        );
    }
    if !result.unknown_fields.is_empty() {
        println!("Unknown fields: {}", result.unknown_fields.join(", "));
    }
}

fn run_fill(values_path: Option<PathBuf>, verbose: bool) -> CliResult<()> {
    let values = load_optional_values(values_path)?;
    let mut session = mount(LoggingSubmit::new())?.with_values(values);
    let mut presenter = WizardPresenter::new(Verbosity::from_verbose(verbose));
    let mut prompted: Vec<String> = Vec::new();

    loop {
        let payload = session.payload();
        presenter.show_header(&payload);
        presenter.show_status(&payload);

        let Some(field) = payload
            .visible_fields()
            .find(|field| field.current_value.is_none() && !prompted.contains(&field.id))
        else {
            break;
        };

        let prompt = PromptContext::new(field, &payload.progress);
        match prompt_field(&prompt, field, session.spec(), &presenter)? {
            PromptOutcome::Answer(value) => session.set_value(&field.id, value)?,
            PromptOutcome::Skip => {}
            PromptOutcome::SubmitNow => break,
        }
        prompted.push(field.id.clone());
    }

    let result = session.submit();
    presenter.show_completion(session.values(), &result);
    describe_validation(&result);
    Ok(())
}

enum PromptOutcome {
    Answer(String),
    Skip,
    SubmitNow,
}

fn prompt_field(
    prompt: &PromptContext,
    field: &RenderField,
    spec: &FormSpec,
    presenter: &WizardPresenter,
) -> CliResult<PromptOutcome> {
    loop {
        presenter.show_prompt(prompt);
        print!("> ");
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(PromptOutcome::SubmitNow);
        }

        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("exit") {
            return Err("form aborted by user".into());
        }
        if trimmed.eq_ignore_ascii_case("submit") {
            return Ok(PromptOutcome::SubmitNow);
        }

        match parse_answer(field, trimmed) {
            Ok(None) => return Ok(PromptOutcome::Skip),
            Ok(Some(value)) => match check_answer(spec, field, &value) {
                Ok(()) => return Ok(PromptOutcome::Answer(value)),
                Err(err) => presenter.show_parse_error(&err),
            },
            Err(err) => presenter.show_parse_error(&err),
        }
    }
}

fn check_answer(
    spec: &FormSpec,
    field: &RenderField,
    value: &str,
) -> Result<(), AnswerParseError> {
    let Some(definition) = spec.field(&field.id) else {
        return Ok(());
    };
    match validate_value(definition, value) {
        Some(error) => Err(AnswerParseError::new(
            error.message,
            Some(format!("rule '{}' failed", error.code)),
        )),
        None => Ok(()),
    }
}

fn parse_answer(field: &RenderField, raw: &str) -> Result<Option<String>, AnswerParseError> {
    if raw.is_empty() {
        if field.required {
            return Err(AnswerParseError::new("This field is required.", None));
        }
        return Ok(None);
    }

    match field.kind {
        FieldType::Radio => parse_choice(field, raw).map(Some),
        FieldType::Checkbox => parse_checkbox(field, raw),
        FieldType::Textarea | FieldType::Email => Ok(Some(raw.to_string())),
    }
}

fn parse_choice(field: &RenderField, raw: &str) -> Result<String, AnswerParseError> {
    field
        .options
        .iter()
        .find(|option| {
            option.value.eq_ignore_ascii_case(raw) || option.label.eq_ignore_ascii_case(raw)
        })
        .map(|option| option.value.clone())
        .ok_or_else(|| {
            let allowed = option_values(field);
            AnswerParseError::new(
                format!("Choose one of: {}.", allowed),
                Some(format!("allowed values: {}", allowed)),
            )
        })
}

fn parse_checkbox(field: &RenderField, raw: &str) -> Result<Option<String>, AnswerParseError> {
    if let [only] = field.options.as_slice() {
        return match raw.to_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" => Ok(Some(only.value.clone())),
            "false" | "f" | "no" | "n" | "0" => Ok(None),
            _ => Err(AnswerParseError::new(
                "Please enter yes or no.",
                Some("expected boolean (y/n/true/false)".to_string()),
            )),
        };
    }

    let mut checked = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        checked.push(parse_choice(field, part)?);
    }
    Ok(Some(checked.join(",")))
}

fn option_values(field: &RenderField) -> String {
    field
        .options
        .iter()
        .map(|option| option.value.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_field(id: &str) -> RenderField {
        let values = FormValues::from_iter([("rating", "3"), ("contactMe", "yes")]);
        build_render_payload(feedback_form(), &values)
            .field(id)
            .cloned()
            .expect("field exists")
    }

    #[test]
    fn parses_choice_by_value_or_label() {
        let rating = render_field("rating");
        assert_eq!(parse_answer(&rating, "4").expect("value"), Some("4".into()));
        assert_eq!(
            parse_answer(&rating, "5 - excellent").expect("label"),
            Some("5".into())
        );
        let err = parse_answer(&rating, "7").expect_err("out of range");
        assert_eq!(err.user_message, "Choose one of: 1, 2, 3, 4, 5.");
    }

    #[test]
    fn parses_single_checkbox_as_toggle() {
        let contact = render_field("contactMe");
        assert_eq!(parse_answer(&contact, "y").expect("yes"), Some("yes".into()));
        assert_eq!(parse_answer(&contact, "no").expect("no"), None);
        assert!(parse_answer(&contact, "maybe").is_err());
    }

    #[test]
    fn blank_answer_depends_on_requiredness() {
        let rating = render_field("rating");
        assert!(parse_answer(&rating, "").is_err());
        let feedback = render_field("feedback");
        assert_eq!(parse_answer(&feedback, "").expect("optional"), None);
        let email = render_field("email");
        assert!(email.required);
        assert!(parse_answer(&email, "").is_err());
    }

    #[test]
    fn answers_are_checked_against_rules() {
        let feedback = render_field("feedback");
        let err = check_answer(feedback_form(), &feedback, "short").expect_err("too short");
        assert_eq!(err.user_message, "Please provide more detail");
        assert!(check_answer(feedback_form(), &feedback, "Plenty of detail here").is_ok());
    }
}
