//! Classification of the site's answer to a submission
//!
//! The site replies with prose. The outcome is read off the first paragraph
//! of the response's `<article>` by matching an ordered table of phrase
//! signatures; the first signature that fits wins.

use regex::Regex;
use scraper::{Html, Selector};
use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

static ARTICLE_PARAGRAPH_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article > p").expect("article selector is valid"));
static MAIN_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("main").expect("main selector is valid"));
static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("body selector is valid"));
static WAIT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"You have (.+?) left to wait\.").expect("wait pattern is valid")
});

/// Classified result of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The answer was accepted
    Correct,
    /// Wrong, and the site hinted the answer is too high
    IncorrectTooHigh,
    /// Wrong, and the site hinted the answer is too low
    IncorrectTooLow,
    /// Wrong, without a directional hint
    Incorrect,
    /// An answer was given too recently; the submission was not checked
    Wait,
    /// The level submitted is locked or already solved
    WrongLevel,
    /// The answer is right, but for another user's input
    AnswersForOthers,
    /// No signature matched; kept for diagnosing site changes
    Unrecognized {
        /// HTTP status of the response
        status: u16,
        /// Text the signatures were matched against
        text: String,
    },
}

impl Outcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, Outcome::Correct)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Correct => write!(f, "correct"),
            Outcome::IncorrectTooHigh => write!(f, "incorrect (too high)"),
            Outcome::IncorrectTooLow => write!(f, "incorrect (too low)"),
            Outcome::Incorrect => write!(f, "incorrect"),
            Outcome::Wait => write!(f, "wait"),
            Outcome::WrongLevel => write!(f, "wrong level"),
            Outcome::AnswersForOthers => write!(f, "answer for someone else"),
            Outcome::Unrecognized { status, .. } => write!(f, "unrecognized (status {})", status),
        }
    }
}

/// Phrases identifying one outcome
#[derive(Debug)]
pub struct Signature {
    /// Every phrase must appear
    pub all_of: &'static [&'static str],
    /// No phrase may appear
    pub none_of: &'static [&'static str],
    pub outcome: Outcome,
}

impl Signature {
    fn matches(&self, text: &str) -> bool {
        self.all_of.iter().all(|phrase| text.contains(phrase))
            && !self.none_of.iter().any(|phrase| text.contains(phrase))
    }
}

const NOT_RIGHT: &str = "That's not the right answer";

/// Response signatures, in matching order
///
/// Matching is case-sensitive substring containment. The order matters
/// because responses share phrases.
pub static SIGNATURES: &[Signature] = &[
    Signature {
        all_of: &["That's the right answer"],
        none_of: &[],
        outcome: Outcome::Correct,
    },
    Signature {
        all_of: &[NOT_RIGHT, "too high"],
        none_of: &[],
        outcome: Outcome::IncorrectTooHigh,
    },
    Signature {
        all_of: &[NOT_RIGHT, "too low"],
        none_of: &[],
        outcome: Outcome::IncorrectTooLow,
    },
    Signature {
        all_of: &[NOT_RIGHT],
        none_of: &["too high", "too low", "for someone else"],
        outcome: Outcome::Incorrect,
    },
    Signature {
        all_of: &["You gave an answer too recently"],
        none_of: &[],
        outcome: Outcome::Wait,
    },
    Signature {
        all_of: &["You don't seem to be solving the right level"],
        none_of: &[],
        outcome: Outcome::WrongLevel,
    },
    Signature {
        all_of: &["for someone else"],
        none_of: &[],
        outcome: Outcome::AnswersForOthers,
    },
];

/// Text of the response the signatures are matched against
///
/// The first paragraph directly inside `<article>`; pages without one fall
/// back to the text of `<main>`, then of `<body>`.
pub fn response_text(html: &str) -> String {
    let document = Html::parse_document(html);
    [
        &*ARTICLE_PARAGRAPH_SELECTOR,
        &*MAIN_SELECTOR,
        &*BODY_SELECTOR,
    ]
    .into_iter()
    .find_map(|selector| document.select(selector).next())
    .map(|element| element.text().collect::<String>())
    .unwrap_or_default()
}

/// Classify an already extracted response text
pub fn classify_text(text: &str, status: u16) -> Outcome {
    match SIGNATURES.iter().find(|signature| signature.matches(text)) {
        Some(signature) => {
            debug!(outcome = %signature.outcome, "classified submission response");
            signature.outcome.clone()
        }
        None => {
            debug!(status, "submission response matched no signature");
            Outcome::Unrecognized {
                status,
                text: text.to_string(),
            }
        }
    }
}

/// Classify the HTML response to a submitted answer
pub fn classify(html: &str, status: u16) -> Outcome {
    classify_text(&response_text(html), status)
}

/// Time left before the next submission, from a [`Outcome::Wait`] response text
///
/// Parses the site's "You have 1m 2s left to wait." phrase.
pub fn wait_time(text: &str) -> Option<Duration> {
    let captures = WAIT_REGEX.captures(text)?;
    humantime::parse_duration(captures.get(1)?.as_str()).ok()
}
