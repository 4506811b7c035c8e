// src/tally/outcome.rs
// =============================================================================
// Per-job results and the report the coordinator accumulates.
//
// Every submitted argument yields exactly one Outcome:
// - Success: the URL and how often the word occurred
// - Failure: the argument and the error that stopped it
//
// Rust concepts:
// - Enums with struct variants, serialized with an internal "status" tag
// - serialize_with: errors are written to JSON through their Display text
// =============================================================================

use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::TallyError;

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Success {
        source: String,
        occurrences: usize,
    },
    Failure {
        source: String,
        #[serde(serialize_with = "serialize_display")]
        cause: TallyError,
    },
}

impl Outcome {
    pub fn success(source: impl Into<String>, occurrences: usize) -> Self {
        Outcome::Success {
            source: source.into(),
            occurrences,
        }
    }

    pub fn failure(source: impl Into<String>, cause: TallyError) -> Self {
        Outcome::Failure {
            source: source.into(),
            cause,
        }
    }

    /// The argument this outcome belongs to.
    pub fn source(&self) -> &str {
        match self {
            Outcome::Success { source, .. } | Outcome::Failure { source, .. } => source,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

// "<url>\t\t<count>" for successes, the error message for failures.
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success {
                source,
                occurrences,
            } => write!(f, "{}\t\t{}", source, occurrences),
            Outcome::Failure { cause, .. } => write!(f, "{}", cause),
        }
    }
}

fn serialize_display<S: Serializer>(cause: &TallyError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(cause)
}

/// Everything drained during one run.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
    pub sum: usize,
}

impl Report {
    /// Adds one drained outcome. Only successes contribute to the sum.
    pub fn record(&mut self, outcome: Outcome) {
        if let Outcome::Success { occurrences, .. } = &outcome {
            self.sum += occurrences;
        }
        self.outcomes.push(outcome);
    }

    /// The closing "Sum: \t\t<total>" line.
    pub fn sum_line(&self) -> String {
        format!("Sum: \t\t{}", self.sum)
    }

    pub fn successes(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Outcome> {
        vec![
            Outcome::success("https://a.example", 3),
            Outcome::failure(
                "example.com",
                TallyError::MissingScheme {
                    input: "example.com".to_string(),
                },
            ),
            Outcome::success("https://b.example", 0),
            Outcome::success("https://c.example", 7),
        ]
    }

    fn sum_in_order(order: &[usize]) -> usize {
        let mut outcomes: Vec<Option<Outcome>> = sample().into_iter().map(Some).collect();
        let mut report = Report::default();
        for &i in order {
            report.record(outcomes[i].take().unwrap());
        }
        assert_eq!(report.outcomes.len(), 4);
        report.sum
    }

    #[test]
    fn test_sum_is_independent_of_drain_order() {
        let orders = [[0, 1, 2, 3], [3, 2, 1, 0], [1, 3, 0, 2], [2, 0, 3, 1]];
        for order in &orders {
            assert_eq!(sum_in_order(order), 10, "order {:?}", order);
        }
    }

    #[test]
    fn test_successes_and_failures_are_split() {
        let mut report = Report::default();
        for outcome in sample() {
            report.record(outcome);
        }
        assert_eq!(report.successes().count(), 3);
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.failures().next().unwrap().source(), "example.com");
    }

    #[test]
    fn test_success_display_is_tab_separated() {
        let outcome = Outcome::success("https://a.example", 3);
        assert_eq!(outcome.to_string(), "https://a.example\t\t3");
    }

    #[test]
    fn test_sum_line_format() {
        let mut report = Report::default();
        assert_eq!(report.sum_line(), "Sum: \t\t0");

        for outcome in sample() {
            report.record(outcome);
        }
        assert_eq!(report.sum_line(), "Sum: \t\t10");
    }

    #[test]
    fn test_json_shape() {
        let mut report = Report::default();
        for outcome in sample().into_iter().take(2) {
            report.record(outcome);
        }
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["sum"], 3);
        assert_eq!(json["outcomes"][0]["status"], "success");
        assert_eq!(json["outcomes"][0]["occurrences"], 3);
        assert_eq!(json["outcomes"][1]["status"], "failure");
        assert_eq!(
            json["outcomes"][1]["cause"],
            "please specify protocol for example.com"
        );
    }
}
