//! Writing puzzle files to disk

use crate::cli::Selection;
use crate::error::CliError;
use aoc_http_client::AocClient;
use aoc_puzzle::{PuzzleRef, extract_description, extract_examples};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DESCRIPTION_FILE: &str = "description.md";
pub const INPUT_FILE: &str = "input";

/// Download the selected puzzle files into `dir`, returning the written paths
///
/// The description and examples come from the puzzle page, which is fetched
/// once and only with the session when one is available. The input always
/// needs the session.
pub fn write_puzzle(
    client: &AocClient,
    puzzle: PuzzleRef,
    selection: Selection,
    session: Option<&str>,
    dir: &Path,
) -> Result<Vec<PathBuf>, CliError> {
    if selection.input && session.is_none() {
        return Err(CliError::MissingSession("to download the input"));
    }

    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    if selection.description || selection.examples {
        let page = client.get_page(puzzle, session)?;

        if selection.description {
            eprintln!("Downloading description...");
            let fragment = extract_description(&page)?;
            let markdown = client.markdown_converter(puzzle.year)?.convert(&fragment)?;
            written.push(write_file(dir, DESCRIPTION_FILE, &markdown)?);
        }

        if selection.examples {
            eprintln!("Downloading examples...");
            let examples = extract_examples(&page);
            if examples.is_empty() {
                eprintln!("No examples found on the puzzle page");
            }
            for (name, example) in examples.files() {
                written.push(write_file(dir, &name, example)?);
            }
        }
    }

    if let (true, Some(session)) = (selection.input, session) {
        eprintln!("Downloading input...");
        let input = client.get_input(puzzle, session)?;
        written.push(write_file(dir, INPUT_FILE, &input)?);
    }

    info!(%puzzle, files = written.len(), "puzzle files written");
    Ok(written)
}

fn write_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf, CliError> {
    let path = dir.join(name);
    fs::write(&path, content)?;
    debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PAGE: &str = r#"<!DOCTYPE html><html><body><main><article class="day-desc">
<h2>--- Day 1: Trebuchet?! ---</h2>
<p>For example:</p>
<pre><code>1abc2
pqr3stu8vwx
</code></pre>
<p>Consider your <em>entire</em> calibration document.</p>
<p>In this example, the values are:</p>
<pre><code>two1nine
</code></pre>
</article></main></body></html>"#;

    fn client_for(server: &mockito::Server) -> AocClient {
        AocClient::builder()
            .base_url(server.url())
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_writes_all_files() {
        let mut server = mockito::Server::new();
        let page = server
            .mock("GET", "/2023/day/1")
            .with_status(200)
            .with_body(PAGE)
            .expect(1)
            .create();
        let input = server
            .mock("GET", "/2023/day/1/input")
            .match_header("cookie", "session=abc")
            .with_status(200)
            .with_body("1abc2\n")
            .expect(1)
            .create();

        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("day01");
        let puzzle = PuzzleRef::new(2023, 1).unwrap();
        let written =
            write_puzzle(&client_for(&server), puzzle, Selection::ALL, Some("abc"), &dir).unwrap();

        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["description.md", "example01", "example02", "input"]);

        let description = fs::read_to_string(dir.join(DESCRIPTION_FILE)).unwrap();
        assert!(description.starts_with("## --- Day 1: Trebuchet?! ---\n\n"));
        assert!(description.contains("Consider your **entire** calibration document."));
        assert_eq!(
            fs::read_to_string(dir.join("example01")).unwrap(),
            "1abc2\npqr3stu8vwx\n"
        );
        assert_eq!(fs::read_to_string(dir.join("example02")).unwrap(), "two1nine\n");
        assert_eq!(fs::read_to_string(dir.join(INPUT_FILE)).unwrap(), "1abc2\n");

        page.assert();
        input.assert();
    }

    #[test]
    fn test_description_only_needs_no_session() {
        let mut server = mockito::Server::new();
        let _page = server
            .mock("GET", "/2023/day/1")
            .with_status(200)
            .with_body(PAGE)
            .create();
        let input = server.mock("GET", "/2023/day/1/input").expect(0).create();

        let temp = TempDir::new().unwrap();
        let selection = Selection {
            description: true,
            examples: false,
            input: false,
        };
        let puzzle = PuzzleRef::new(2023, 1).unwrap();
        let written =
            write_puzzle(&client_for(&server), puzzle, selection, None, temp.path()).unwrap();

        assert_eq!(written, vec![temp.path().join(DESCRIPTION_FILE)]);
        assert!(!temp.path().join("example01").exists());
        input.assert();
    }

    #[test]
    fn test_input_without_session_is_rejected_before_any_request() {
        let mut server = mockito::Server::new();
        let page = server.mock("GET", "/2023/day/1").expect(0).create();

        let temp = TempDir::new().unwrap();
        let puzzle = PuzzleRef::new(2023, 1).unwrap();
        let result = write_puzzle(&client_for(&server), puzzle, Selection::ALL, None, temp.path());

        assert!(matches!(result, Err(CliError::MissingSession(_))));
        page.assert();
    }
}
