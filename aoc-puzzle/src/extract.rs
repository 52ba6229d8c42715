//! Content extraction from puzzle and input pages

use crate::error::PuzzleError;
use crate::markdown::HtmlFragment;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

static MAIN_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("main").expect("main selector is valid"));
static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("body selector is valid"));
static PARAGRAPH_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("p selector is valid"));
static CODE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("code").expect("code selector is valid"));

/// What the site answers instead of an input when no session is sent
const LOGIN_WALL: &str = "Puzzle inputs differ by user";

/// Extract the puzzle statement container (`<main>`) from a puzzle page
///
/// Fails with [`PuzzleError::NotFound`] when the page has no `<main>` or it
/// is empty, which happens when the site layout changed.
pub fn extract_description(page: &str) -> Result<HtmlFragment, PuzzleError> {
    let document = Html::parse_document(page);
    let main = document
        .select(&MAIN_SELECTOR)
        .next()
        .ok_or(PuzzleError::NotFound { container: "main" })?;

    let html = main.inner_html();
    if html.trim().is_empty() {
        return Err(PuzzleError::NotFound { container: "main" });
    }
    debug!(bytes = html.len(), "extracted description");
    Ok(HtmlFragment::new(html))
}

/// Extract the personalized input from an input page
///
/// The site serves inputs as plain text, which is returned verbatim. An HTML
/// document is reduced to the text of its `<body>`. An empty body or the
/// site's login notice mean the session is missing or expired.
pub fn extract_input(page: &str) -> Result<String, PuzzleError> {
    const NOT_FOUND: PuzzleError = PuzzleError::NotFound { container: "body" };

    if page.trim_start().starts_with(LOGIN_WALL) {
        debug!("input page asks for a login");
        return Err(NOT_FOUND);
    }

    let input = if looks_like_document(page) {
        let document = Html::parse_document(page);
        let body = document.select(&BODY_SELECTOR).next().ok_or(NOT_FOUND)?;
        body.text().collect::<String>()
    } else {
        page.to_owned()
    };

    if input.trim().is_empty() || input.trim_start().starts_with(LOGIN_WALL) {
        return Err(NOT_FOUND);
    }
    Ok(input)
}

// Plain-text inputs are never parsed as HTML: the parser would drop leading
// whitespace and treat `<` as markup.
fn looks_like_document(page: &str) -> bool {
    let head = page.trim_start().get(..64).unwrap_or(page.trim_start());
    let head = head.to_ascii_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html") || head.starts_with("<body")
}

/// Worked examples of a puzzle, in first-seen order without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleSet {
    examples: Vec<String>,
    seen: HashSet<String>,
}

impl ExampleSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an example, returning false when the exact text is already present
    pub fn insert(&mut self, example: String) -> bool {
        if self.seen.contains(&example) {
            return false;
        }
        self.seen.insert(example.clone());
        self.examples.push(example);
        true
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.examples.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.examples
    }

    /// Pair every example with its file name: `example01`, `example02`, ...
    pub fn files(&self) -> impl Iterator<Item = (String, &str)> {
        self.examples
            .iter()
            .enumerate()
            .map(|(i, example)| (format!("example{:02}", i + 1), example.as_str()))
    }
}

impl<'a> IntoIterator for &'a ExampleSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.examples.iter()
    }
}

impl IntoIterator for ExampleSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.examples.into_iter()
    }
}

/// Collect the code blocks the puzzle text introduces as examples
///
/// Every `<p>` whose text mentions "example" (any case) is checked for an
/// immediately following `<pre>` sibling; the text of its `<code>` (or of
/// the `<pre>` itself) is one example. Pages that phrase things differently
/// simply yield no examples.
pub fn extract_examples(page: &str) -> ExampleSet {
    let document = Html::parse_document(page);
    let mut examples = ExampleSet::new();

    for paragraph in document.select(&PARAGRAPH_SELECTOR) {
        let text = paragraph.text().collect::<String>();
        if !text.to_lowercase().contains("example") {
            continue;
        }

        let Some(next) = paragraph.next_siblings().find_map(ElementRef::wrap) else {
            continue;
        };
        if next.value().name() != "pre" {
            continue;
        }

        let block = match next.select(&CODE_SELECTOR).next() {
            Some(code) => code.text().collect::<String>(),
            None => next.text().collect::<String>(),
        };
        if block.is_empty() {
            continue;
        }
        if !examples.insert(block) {
            debug!("skipping repeated example block");
        }
    }

    debug!(count = examples.len(), "extracted examples");
    examples
}
