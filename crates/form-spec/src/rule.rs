use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::values::FormValues;

/// Comparison applied between a dependency's current value and the rule's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Equals,
    Contains,
    /// Numeric comparison; non-numeric operands never match.
    GreaterThan,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Equals => "equals",
            Condition::Contains => "contains",
            Condition::GreaterThan => "greater_than",
        }
    }

    pub fn evaluate(&self, actual: &str, expected: &str) -> bool {
        match self {
            Condition::Equals => actual == expected,
            Condition::Contains => actual.contains(expected),
            Condition::GreaterThan => match (parse_number(actual), parse_number(expected)) {
                (Some(actual), Some(expected)) => actual > expected,
                _ => false,
            },
        }
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Shows a field only while every dependency satisfies the condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VisibilityRule {
    pub depends_on: Vec<String>,
    pub condition: Condition,
    pub value: String,
}

impl VisibilityRule {
    pub fn new<I, S>(depends_on: I, condition: Condition, value: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            depends_on: depends_on.into_iter().map(Into::into).collect(),
            condition,
            value: value.into(),
        }
    }

    pub fn equals(depends_on: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new([depends_on.into()], Condition::Equals, value)
    }

    /// Evaluates the rule against the snapshot. A dependency without a value fails the rule.
    pub fn evaluate(&self, values: &FormValues) -> bool {
        self.depends_on.iter().all(|dependency| {
            values
                .get(dependency)
                .is_some_and(|actual| self.condition.evaluate(actual, &self.value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equals_is_exact() {
        assert!(Condition::Equals.evaluate("3", "3"));
        assert!(!Condition::Equals.evaluate("3 ", "3"));
        assert!(!Condition::Equals.evaluate("Yes", "yes"));
    }

    #[test]
    fn contains_matches_substrings() {
        assert!(Condition::Contains.evaluate("news,updates", "updates"));
        assert!(!Condition::Contains.evaluate("news", "updates"));
    }

    #[test]
    fn greater_than_compares_numerically() {
        assert!(Condition::GreaterThan.evaluate("10", "3"));
        assert!(!Condition::GreaterThan.evaluate("3", "3"));
        assert!(!Condition::GreaterThan.evaluate("abc", "3"));
        assert!(!Condition::GreaterThan.evaluate("4", "three"));
    }

    #[test]
    fn rule_requires_every_dependency() {
        let rule = VisibilityRule::new(["a", "b"], Condition::Equals, "yes");
        let both = FormValues::from_iter([("a", "yes"), ("b", "yes")]);
        let one = FormValues::from_iter([("a", "yes"), ("b", "no")]);
        let missing = FormValues::from_iter([("a", "yes")]);
        assert!(rule.evaluate(&both));
        assert!(!rule.evaluate(&one));
        assert!(!rule.evaluate(&missing));
    }

    #[test]
    fn serializes_condition_in_snake_case() {
        let rule = VisibilityRule::new(["rating"], Condition::GreaterThan, "3");
        let value = serde_json::to_value(&rule).expect("json");
        assert_eq!(value["condition"], "greater_than");
        assert_eq!(value["depends_on"][0], "rating");
    }
}
