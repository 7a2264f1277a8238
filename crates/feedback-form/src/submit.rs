use form_spec::{FormValues, SubmitHandler};
use tracing::info;

/// Destination for submitted form data.
pub trait DiagnosticLog {
    fn record(&self, values: &FormValues, is_valid: bool);
}

/// Writes each submission as a single `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl DiagnosticLog for TracingLog {
    fn record(&self, values: &FormValues, is_valid: bool) {
        info!(target: "feedback_form::submit", values = %values, is_valid, "feedback submitted");
    }
}

/// Submission handler that forwards every attempt to a diagnostic log, unmodified.
#[derive(Debug, Clone, Default)]
pub struct LoggingSubmit<L = TracingLog> {
    log: L,
}

impl LoggingSubmit {
    pub fn new() -> Self {
        Self { log: TracingLog }
    }
}

impl<L: DiagnosticLog> LoggingSubmit<L> {
    pub fn with_log(log: L) -> Self {
        Self { log }
    }

    pub fn log(&self) -> &L {
        &self.log
    }
}

impl<L: DiagnosticLog> SubmitHandler for LoggingSubmit<L> {
    fn on_submit(&self, values: &FormValues, is_valid: bool) {
        self.log.record(values, is_valid);
    }
}
