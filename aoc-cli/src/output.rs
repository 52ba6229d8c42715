//! Output formatting for command results

use aoc_http_client::Submission;
use aoc_puzzle::Outcome;
use std::time::Duration;

/// Format a submission result for display
pub fn format_submission(submission: &Submission) -> String {
    match (&submission.outcome, submission.wait_time) {
        (Outcome::Wait, Some(wait)) => format!(
            "{} (wait {})",
            format_outcome(&submission.outcome),
            format_duration(wait)
        ),
        (outcome, _) => format_outcome(outcome),
    }
}

/// Format a submission outcome for display
pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Correct => "✓ That's the right answer!".to_string(),
        Outcome::IncorrectTooHigh => "✗ That's not the right answer; it is too high".to_string(),
        Outcome::IncorrectTooLow => "✗ That's not the right answer; it is too low".to_string(),
        Outcome::Incorrect => "✗ That's not the right answer".to_string(),
        Outcome::Wait => "⏳ You gave an answer too recently".to_string(),
        Outcome::WrongLevel => {
            "⏭ You don't seem to be solving the right level. Did you already complete it?"
                .to_string()
        }
        Outcome::AnswersForOthers => {
            "✗ That's the right answer for someone else's input".to_string()
        }
        Outcome::Unrecognized { status, text } => {
            format!("⚠ Unrecognized response (status {}): {}", status, text)
        }
    }
}

/// Format a wait time as minutes and seconds
fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    match (secs / 60, secs % 60) {
        (0, s) => format!("{}s", s),
        (m, 0) => format!("{}m", m),
        (m, s) => format!("{}m {}s", m, s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(34)), "34s");
        assert_eq!(format_duration(Duration::from_secs(120)), "2m");
        assert_eq!(format_duration(Duration::from_secs(302)), "5m 2s");
    }

    #[test]
    fn test_wait_includes_remaining_time() {
        let submission = Submission {
            outcome: Outcome::Wait,
            wait_time: Some(Duration::from_secs(62)),
        };
        assert_eq!(
            format_submission(&submission),
            "⏳ You gave an answer too recently (wait 1m 2s)"
        );

        let submission = Submission {
            outcome: Outcome::Wait,
            wait_time: None,
        };
        assert_eq!(format_submission(&submission), "⏳ You gave an answer too recently");
    }

    #[test]
    fn test_outcomes_are_distinct() {
        let outcomes = [
            Outcome::Correct,
            Outcome::IncorrectTooHigh,
            Outcome::IncorrectTooLow,
            Outcome::Incorrect,
            Outcome::Wait,
            Outcome::WrongLevel,
            Outcome::AnswersForOthers,
        ];
        let mut messages: Vec<_> = outcomes.iter().map(format_outcome).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), outcomes.len());
    }
}
