use crate::values::FormValues;

/// Receives the collected values and the overall validity on every submit attempt.
pub trait SubmitHandler {
    fn on_submit(&self, values: &FormValues, is_valid: bool);
}

impl<F> SubmitHandler for F
where
    F: Fn(&FormValues, bool),
{
    fn on_submit(&self, values: &FormValues, is_valid: bool) {
        self(values, is_valid)
    }
}
