//! AOC HTTP client implementation

use crate::error::AocError;
use aoc_puzzle::{
    ExampleSet, HtmlFragment, Level, MarkdownConverter, Outcome, PuzzleRef, classify_text,
    extract_description, extract_examples, extract_input, response_text, wait_time,
};
use reqwest::blocking::{RequestBuilder, Response};
use reqwest::header::HeaderValue;
use std::time::Duration;
use tracing::{debug, info};
use zeroize::Zeroize;

/// User agent sent when the caller does not configure the HTTP client
const USER_AGENT: &str = concat!("aocli/", env!("CARGO_PKG_VERSION"));

/// Result of an answer submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Classified response
    pub outcome: Outcome,
    /// Time left before another answer is accepted, for [`Outcome::Wait`]
    pub wait_time: Option<Duration>,
}

/// The main AOC HTTP client
///
/// Fetches puzzle pages and inputs and posts answers. The client never
/// retries and never caches; each call is one request.
///
/// # Example
///
/// ```no_run
/// use aoc_http_client::AocClient;
/// use aoc_puzzle::PuzzleRef;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AocClient::new()?;
/// let input = client.get_input(PuzzleRef::new(2024, 1)?, "your_session_cookie")?;
/// println!("Input: {}", input);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AocClient {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
}

impl AocClient {
    /// Create a new AOC client with rustls-tls configuration and no redirect policy
    ///
    /// # Errors
    ///
    /// Returns `AocError::ClientInit` if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, AocError> {
        Self::builder().build()
    }

    /// Create a builder for configuring the AOC client
    ///
    /// # Example
    ///
    /// ```no_run
    /// use aoc_http_client::AocClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = AocClient::builder()
    ///     .base_url("http://localhost:1234")?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> AocClientBuilder {
        AocClientBuilder::new()
    }

    /// Site root requests are sent to
    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    /// Markdown converter resolving links against this client's site
    pub fn markdown_converter(&self, year: i32) -> Result<MarkdownConverter, AocError> {
        Ok(MarkdownConverter::for_year(self.base_url.as_str(), year)?)
    }

    /// Create a secure cookie header value from a session string
    ///
    /// The header is flagged sensitive and the temporary string is zeroized.
    fn create_cookie_header(session: &str) -> Result<HeaderValue, AocError> {
        let mut cookie_string = format!("session={}", session);
        let header_value = HeaderValue::from_bytes(cookie_string.as_bytes())
            .map_err(|_| AocError::ClientInit("Invalid session cookie format".to_string()));
        cookie_string.zeroize();

        let mut sensitive_header = header_value?;
        sensitive_header.set_sensitive(true);
        Ok(sensitive_header)
    }

    /// Resolve a site path such as `/2023/day/1/input` against the base URL
    fn url(&self, path: &str) -> Result<reqwest::Url, AocError> {
        self.base_url
            .join(path)
            .map_err(|e| AocError::ClientInit(format!("Invalid request path {}: {}", path, e)))
    }

    /// Attach the session cookie, if any, and send
    fn send(&self, request: RequestBuilder, session: Option<&str>) -> Result<Response, AocError> {
        let request = match session {
            Some(session) => request.header("Cookie", Self::create_cookie_header(session)?),
            None => request,
        };
        let response = request.send()?;
        debug!(status = %response.status(), url = %response.url(), "received response");

        if !response.status().is_success() {
            return Err(AocError::InvalidStatus {
                status: response.status(),
            });
        }
        Ok(response)
    }

    /// Fetch the raw HTML of a puzzle page
    ///
    /// Anonymous requests only see level one; pass the session to include
    /// level two once level one is solved.
    ///
    /// # Errors
    ///
    /// * `AocError::Request` - Network error
    /// * `AocError::InvalidStatus` - HTTP error (e.g., 404 if the puzzle is not unlocked)
    /// * `AocError::Encoding` - Response is not valid UTF-8
    pub fn get_page(&self, puzzle: PuzzleRef, session: Option<&str>) -> Result<String, AocError> {
        let url = self.url(&puzzle.day_path())?;
        info!(%puzzle, "fetching puzzle page");

        let response = self.send(self.client.get(url), session)?;
        response.text().map_err(|_| AocError::Encoding)
    }

    /// Fetch the puzzle statement of a puzzle page
    ///
    /// # Errors
    ///
    /// Same as [`get_page`](Self::get_page), plus `AocError::Puzzle` when the
    /// page has no statement container.
    pub fn get_description(
        &self,
        puzzle: PuzzleRef,
        session: Option<&str>,
    ) -> Result<HtmlFragment, AocError> {
        let page = self.get_page(puzzle, session)?;
        Ok(extract_description(&page)?)
    }

    /// Fetch the worked examples of a puzzle page
    pub fn get_examples(
        &self,
        puzzle: PuzzleRef,
        session: Option<&str>,
    ) -> Result<ExampleSet, AocError> {
        let page = self.get_page(puzzle, session)?;
        Ok(extract_examples(&page))
    }

    /// Fetch puzzle input for a specific year and day
    ///
    /// # Errors
    ///
    /// * `AocError::Request` - Network error
    /// * `AocError::InvalidStatus` - HTTP error (e.g., 400 without a valid session)
    /// * `AocError::Encoding` - Response is not valid UTF-8
    /// * `AocError::Puzzle` - The response holds no input
    pub fn get_input(&self, puzzle: PuzzleRef, session: &str) -> Result<String, AocError> {
        let url = self.url(&puzzle.input_path())?;
        info!(%puzzle, "fetching puzzle input");

        let response = self.send(self.client.get(url), Some(session))?;
        let body = response.text().map_err(|_| AocError::Encoding)?;
        Ok(extract_input(&body)?)
    }

    /// Submit an answer for a puzzle level
    ///
    /// # Returns
    ///
    /// The classified [`Outcome`]; a wait time is attached when the site
    /// throttled the submission and named one.
    ///
    /// # Errors
    ///
    /// * `AocError::Request` - Network error
    /// * `AocError::InvalidStatus` - HTTP error
    /// * `AocError::Encoding` - Response is not valid UTF-8
    pub fn submit_answer(
        &self,
        puzzle: PuzzleRef,
        level: Level,
        answer: &str,
        session: &str,
    ) -> Result<Submission, AocError> {
        let url = self.url(&puzzle.answer_path())?;
        info!(%puzzle, %level, "submitting answer");

        let form = [("level", level.to_string()), ("answer", answer.to_string())];
        let response = self.send(self.client.post(url).form(&form), Some(session))?;
        let status = response.status().as_u16();
        let html = response.text().map_err(|_| AocError::Encoding)?;

        let text = response_text(&html);
        let outcome = classify_text(&text, status);
        let wait_time = match outcome {
            Outcome::Wait => wait_time(&text),
            _ => None,
        };
        Ok(Submission { outcome, wait_time })
    }
}

/// Builder for configuring an AOC HTTP client
///
/// The redirect policy is always disabled: the site redirects requests with
/// a rejected session, and that redirect must surface as an error.
///
/// # Example
///
/// ```no_run
/// use aoc_http_client::AocClient;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AocClient::builder()
///     .base_url("http://localhost:1234")?
///     .client_builder(
///         reqwest::blocking::Client::builder()
///             .timeout(Duration::from_secs(10))
///     )
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AocClientBuilder {
    base_url: Option<reqwest::Url>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
}

impl AocClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            base_url: None,
            client_builder: None,
        }
    }

    /// Set a custom base URL for the client
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, AocError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Set a custom HTTP client builder (timeouts, proxies, ...)
    ///
    /// The redirect policy is overridden to `Policy::none()` regardless.
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Build the AOC client with the configured settings
    pub fn build(self) -> Result<AocClient, AocError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => reqwest::Url::parse(aoc_puzzle::BASE_URL)
                .map_err(|e| AocError::ClientInit(e.to_string()))?,
        };

        let builder = self.client_builder.unwrap_or_else(|| {
            reqwest::blocking::Client::builder()
                .use_rustls_tls()
                .user_agent(USER_AGENT)
        });

        let client = builder
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AocError::ClientInit(e.to_string()))?;

        Ok(AocClient { client, base_url })
    }
}

impl Default for AocClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_puzzle::PuzzleError;
    use proptest::prelude::*;

    const PUZZLE_PAGE: &str = r#"<html><body><main><article class="day-desc"><h2>--- Day 2: Cube Conundrum ---</h2>
<p>For example, the record of a few games might look like this:</p>
<pre><code>Game 1: 3 blue, 4 red
</code></pre>
<p>See <a href="1">yesterday</a>.</p>
</article></main></body></html>"#;

    fn client_for(server: &mockito::Server) -> AocClient {
        AocClient::builder()
            .base_url(server.url())
            .unwrap()
            .build()
            .unwrap()
    }

    fn response_page(text: &str) -> String {
        format!("<html><body><main><article><p>{}</p></article></main></body></html>", text)
    }

    #[test]
    fn test_default_base_url() {
        let client = AocClient::builder().build().unwrap();
        assert_eq!(client.base_url().as_str(), "https://adventofcode.com/");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = AocClient::builder().base_url("not a valid url");
        assert!(result.is_err());
    }

    #[test]
    fn test_redirect_is_not_followed() {
        let mut server = mockito::Server::new();
        let home = server.mock("GET", "/").with_status(200).expect(0).create();
        let input = server
            .mock("GET", "/2023/day/1/input")
            .with_status(302)
            .with_header("location", "/")
            .expect(1)
            .create();

        let client = client_for(&server);
        let puzzle = PuzzleRef::new(2023, 1).unwrap();
        match client.get_input(puzzle, "expired") {
            Err(AocError::InvalidStatus { status }) => assert_eq!(status.as_u16(), 302),
            other => panic!("Expected InvalidStatus, got {:?}", other),
        }

        home.assert();
        input.assert();
    }

    #[test]
    fn test_description_and_examples() {
        let mut server = mockito::Server::new();
        let page = server
            .mock("GET", "/2023/day/2")
            .with_status(200)
            .with_body(PUZZLE_PAGE)
            .expect(2)
            .create();

        let client = client_for(&server);
        let puzzle = PuzzleRef::new(2023, 2).unwrap();

        let description = client.get_description(puzzle, None).unwrap();
        let markdown = client
            .markdown_converter(puzzle.year)
            .unwrap()
            .convert(&description)
            .unwrap();
        assert!(markdown.starts_with("## --- Day 2: Cube Conundrum ---"));
        assert!(markdown.contains(&format!("[yesterday]({}/2023/day/1)", server.url())));

        let examples = client.get_examples(puzzle, None).unwrap();
        assert_eq!(examples.into_vec(), vec!["Game 1: 3 blue, 4 red\n".to_string()]);

        page.assert();
    }

    #[test]
    fn test_session_cookie_is_sent() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2022/day/5/input")
            .match_header("cookie", "session=abc123")
            .with_status(200)
            .with_body("    [D]    \n[N] [C]    \n")
            .expect(1)
            .create();

        let client = client_for(&server);
        let input = client
            .get_input(PuzzleRef::new(2022, 5).unwrap(), "abc123")
            .unwrap();
        assert_eq!(input, "    [D]    \n[N] [C]    \n");
        mock.assert();
    }

    #[test]
    fn test_missing_main_is_puzzle_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/2023/day/3")
            .with_status(200)
            .with_body("<html><body><p>Something else</p></body></html>")
            .create();

        let client = client_for(&server);
        let result = client.get_description(PuzzleRef::new(2023, 3).unwrap(), None);
        assert!(matches!(
            result,
            Err(AocError::Puzzle(PuzzleError::NotFound { container: "main" }))
        ));
    }

    #[test]
    fn test_throttled_submission_carries_wait_time() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/2023/day/4/answer")
            .with_status(200)
            .with_body(response_page(
                "You gave an answer too recently; you have to wait after submitting an answer before trying again.  You have 1m 5s left to wait. [Return to Day 4]",
            ))
            .create();

        let client = client_for(&server);
        let submission = client
            .submit_answer(PuzzleRef::new(2023, 4).unwrap(), Level::Two, "7", "s")
            .unwrap();
        assert_eq!(submission.outcome, Outcome::Wait);
        assert_eq!(submission.wait_time, Some(Duration::from_secs(65)));
    }

    #[test]
    fn test_unrecognized_submission_keeps_text() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/2023/day/4/answer")
            .with_status(200)
            .with_body(response_page("Something unexpected."))
            .create();

        let client = client_for(&server);
        let submission = client
            .submit_answer(PuzzleRef::new(2023, 4).unwrap(), Level::One, "7", "s")
            .unwrap();
        assert_eq!(
            submission.outcome,
            Outcome::Unrecognized {
                status: 200,
                text: "Something unexpected.".to_string()
            }
        );
        assert_eq!(submission.wait_time, None);
    }

    // **Feature: aocli, Property: Submission request construction**
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_submission_request_construction(
            year in 2015i32..2030,
            day in 1i32..=25,
            level_token in prop::sample::select(vec!["1", "2"]),
            answer in "[0-9]{1,10}",
            session in "[a-f0-9]{32,128}",
        ) {
            let mut server = mockito::Server::new();
            let expected_path = format!("/{}/day/{}/answer", year, day);

            let mock = server.mock("POST", expected_path.as_str())
                .match_header("cookie", format!("session={}", session).as_str())
                .match_body(
                    mockito::Matcher::AllOf(vec![
                        mockito::Matcher::UrlEncoded("level".into(), level_token.to_string()),
                        mockito::Matcher::UrlEncoded("answer".into(), answer.clone()),
                    ])
                )
                .with_status(200)
                .with_body(response_page("That's the right answer!  You are one gold star closer."))
                .expect(1)
                .create();

            let client = client_for(&server);
            let puzzle = PuzzleRef::new(year, day).unwrap();
            let result = client.submit_answer(puzzle, Level::from_token(level_token), &answer, &session);

            mock.assert();
            prop_assert_eq!(
                result.unwrap(),
                Submission { outcome: Outcome::Correct, wait_time: None }
            );
        }
    }

    // **Feature: aocli, Property: Non-success status error handling**
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_non_success_status_error_handling(
            year in 2015i32..2030,
            day in 1i32..=25,
            status_code in prop::sample::select(vec![301, 302, 303, 400, 401, 404, 500, 502, 503]),
        ) {
            let mut server = mockito::Server::new();
            let expected_path = format!("/{}/day/{}", year, day);

            let mock = server.mock("GET", expected_path.as_str())
                .with_status(status_code)
                .with_body("Error response")
                .expect(1)
                .create();

            let client = client_for(&server);
            let result = client.get_page(PuzzleRef::new(year, day).unwrap(), None);

            match result {
                Err(AocError::InvalidStatus { status }) => {
                    prop_assert_eq!(status.as_u16(), status_code as u16);
                }
                other => prop_assert!(false, "Expected AocError::InvalidStatus, got {:?}", other),
            }
            mock.assert();
        }
    }
}
