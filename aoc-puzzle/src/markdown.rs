//! HTML to Markdown conversion of puzzle descriptions
//!
//! Standard CommonMark mappings, except that `<em>` becomes strong text: the
//! site uses emphasis for the terms a reader should spot at a glance, which
//! Markdown renderers would otherwise show as barely visible italics.

use crate::error::PuzzleError;
use crate::puzzle::BASE_URL;
use scraper::{ElementRef, Html, Node};
use url::Url;

/// Nesting depth at which conversion gives up
const MAX_DEPTH: usize = 256;

/// Elements whose content never belongs in the document
const SKIPPED: &[&str] = &[
    "script", "style", "noscript", "form", "input", "button", "select", "textarea", "template",
];

/// Elements rendered transparently as a sequence of blocks
const CONTAINERS: &[&str] = &[
    "html", "body", "main", "article", "section", "div", "header", "footer", "nav", "aside",
];

/// Markup scoped to one region of a page, e.g. the puzzle statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HtmlFragment(String);

impl HtmlFragment {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to Markdown, resolving links against the site's pages for `year`
    pub fn to_markdown(&self, year: i32) -> Result<String, PuzzleError> {
        MarkdownConverter::for_year(BASE_URL, year)?.convert(self)
    }
}

/// Converts description fragments to Markdown
#[derive(Debug, Clone)]
pub struct MarkdownConverter {
    base: Url,
}

impl MarkdownConverter {
    /// Converter resolving relative links against `base`
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// Converter for the puzzle pages of `year` on `site`, i.e. `{site}/{year}/day/`
    pub fn for_year(site: &str, year: i32) -> Result<Self, PuzzleError> {
        let base = Url::parse(site)
            .and_then(|site| site.join(&format!("/{}/day/", year)))
            .map_err(|e| PuzzleError::Conversion(format!("invalid base URL {}: {}", site, e)))?;
        Ok(Self::new(base))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Render `fragment` as a Markdown document
    pub fn convert(&self, fragment: &HtmlFragment) -> Result<String, PuzzleError> {
        let html = Html::parse_fragment(fragment.as_str());
        let mut renderer = Renderer::new(&self.base);
        renderer.blocks(html.root_element(), 0)?;

        let mut document = renderer.finish("\n\n");
        if !document.is_empty() {
            document.push('\n');
        }
        Ok(document)
    }
}

struct Renderer<'a> {
    base: &'a Url,
    out: Vec<String>,
}

impl<'a> Renderer<'a> {
    fn new(base: &'a Url) -> Self {
        Self {
            base,
            out: Vec::new(),
        }
    }

    fn finish(self, separator: &str) -> String {
        self.out.join(separator)
    }

    fn push_block(&mut self, block: String) {
        let block = block.trim().to_string();
        if !block.is_empty() {
            self.out.push(block);
        }
    }

    /// Push running text, escaping what would start a heading, list or quote
    fn push_paragraph(&mut self, text: String) {
        let text = text
            .trim()
            .split('\n')
            .map(escape_line_start)
            .collect::<Vec<_>>()
            .join("\n");
        self.push_block(text);
    }

    /// Render the children of `parent`, grouping loose inline content into paragraphs
    fn blocks(&mut self, parent: ElementRef<'_>, depth: usize) -> Result<(), PuzzleError> {
        check_depth(depth)?;
        let mut pending = String::new();

        for child in parent.children() {
            match child.value() {
                Node::Text(text) => push_text(&mut pending, text),
                Node::Element(element) => {
                    let Some(child) = ElementRef::wrap(child) else {
                        continue;
                    };
                    if is_block(element.name()) {
                        self.push_paragraph(std::mem::take(&mut pending));
                        self.block(child, depth + 1)?;
                    } else {
                        self.inline(child, &mut pending, depth + 1)?;
                    }
                }
                _ => {}
            }
        }

        self.push_paragraph(pending);
        Ok(())
    }

    fn block(&mut self, element: ElementRef<'_>, depth: usize) -> Result<(), PuzzleError> {
        let name = element.value().name();
        match name {
            "p" => {
                let text = self.inline_children(element, depth)?;
                self.push_paragraph(text);
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = name[1..].parse::<usize>().unwrap_or(1);
                let text = self.inline_children(element, depth)?;
                self.push_block(format!("{} {}", "#".repeat(level), text.trim()));
            }
            "pre" => self.push_block(code_block(&element.text().collect::<String>())),
            "ul" | "ol" => {
                let list = self.list(element, name == "ol", depth)?;
                self.push_block(list);
            }
            "blockquote" => {
                let mut inner = Renderer::new(self.base);
                inner.blocks(element, depth)?;
                let quoted = inner
                    .finish("\n\n")
                    .lines()
                    .map(|line| {
                        if line.is_empty() {
                            ">".to_string()
                        } else {
                            format!("> {}", line)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                self.push_block(quoted);
            }
            "hr" => self.out.push("* * *".to_string()),
            _ if SKIPPED.contains(&name) => {}
            _ => self.blocks(element, depth)?,
        }
        Ok(())
    }

    fn list(
        &self,
        list: ElementRef<'_>,
        ordered: bool,
        depth: usize,
    ) -> Result<String, PuzzleError> {
        let items = list
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|item| item.value().name() == "li");

        let mut rendered = Vec::new();
        for (index, item) in items.enumerate() {
            let marker = if ordered {
                format!("{}. ", index + 1)
            } else {
                "- ".to_string()
            };

            let mut inner = Renderer::new(self.base);
            inner.blocks(item, depth + 1)?;
            let body = inner.finish("\n");

            let indent = " ".repeat(marker.len());
            let mut lines = body.lines();
            let first = lines.next().unwrap_or_default();
            let mut entry = format!("{}{}", marker, first);
            for line in lines {
                entry.push('\n');
                if !line.is_empty() {
                    entry.push_str(&indent);
                    entry.push_str(line);
                }
            }
            rendered.push(entry);
        }
        Ok(rendered.join("\n"))
    }

    fn inline_children(
        &self,
        element: ElementRef<'_>,
        depth: usize,
    ) -> Result<String, PuzzleError> {
        check_depth(depth)?;
        let mut out = String::new();
        for child in element.children() {
            match child.value() {
                Node::Text(text) => push_text(&mut out, text),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.inline(child, &mut out, depth + 1)?;
                    }
                }
                _ => {}
            }
        }
        Ok(out)
    }

    fn inline(
        &self,
        element: ElementRef<'_>,
        out: &mut String,
        depth: usize,
    ) -> Result<(), PuzzleError> {
        let name = element.value().name();
        match name {
            "em" | "strong" | "b" => {
                let inner = self.inline_children(element, depth)?;
                wrap(out, &inner, "**");
            }
            "i" => {
                let inner = self.inline_children(element, depth)?;
                wrap(out, &inner, "*");
            }
            "code" => {
                let span = code_span(&element.text().collect::<String>());
                let emphasized = element
                    .descendants()
                    .filter_map(ElementRef::wrap)
                    .any(|e| matches!(e.value().name(), "em" | "strong" | "b"));
                if emphasized {
                    wrap(out, &span, "**");
                } else {
                    append(out, &span);
                }
            }
            "a" => {
                let text = self.inline_children(element, depth)?;
                match element.value().attr("href") {
                    Some(href) => {
                        let target = self.resolve(href)?;
                        append(out, &format!("[{}]({})", text.trim(), target));
                    }
                    None => append(out, &text),
                }
            }
            "img" => {
                if let Some(src) = element.value().attr("src") {
                    let alt = element.value().attr("alt").unwrap_or_default();
                    append(out, &format!("![{}]({})", escape(alt), self.resolve(src)?));
                }
            }
            "br" => out.push_str("  \n"),
            _ if SKIPPED.contains(&name) => {}
            _ => {
                let inner = self.inline_children(element, depth)?;
                append(out, &inner);
            }
        }
        Ok(())
    }

    /// Make `href` absolute; in-page anchors stay untouched
    fn resolve(&self, href: &str) -> Result<String, PuzzleError> {
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            return Ok(href.to_string());
        }
        self.base
            .join(href)
            .map(String::from)
            .map_err(|e| PuzzleError::Conversion(format!("cannot resolve link {:?}: {}", href, e)))
    }
}

fn check_depth(depth: usize) -> Result<(), PuzzleError> {
    if depth > MAX_DEPTH {
        return Err(PuzzleError::Conversion(format!(
            "markup nested deeper than {} elements",
            MAX_DEPTH
        )));
    }
    Ok(())
}

fn is_block(name: &str) -> bool {
    matches!(
        name,
        "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "pre" | "ul" | "ol" | "blockquote" | "hr"
    ) || CONTAINERS.contains(&name)
        || SKIPPED.contains(&name)
}

/// Append `piece`, never producing two spaces in a row at the seam
fn append(out: &mut String, piece: &str) {
    if out.ends_with(' ') && piece.starts_with(' ') {
        out.push_str(&piece[1..]);
    } else {
        out.push_str(piece);
    }
}

/// Append a text node, collapsing whitespace and escaping Markdown syntax
fn push_text(out: &mut String, text: &str) {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                collapsed.push(' ');
            }
            in_space = true;
        } else {
            in_space = false;
            collapsed.push_str(&escape(c.encode_utf8(&mut [0; 4])));
        }
    }
    append(out, &collapsed);
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '*' | '_' | '`' | '[' | ']' | '<') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Escape a line start that Markdown would read as block syntax
///
/// Covers ATX headings, bullet markers, block quotes and ordered list
/// markers such as `1.` or `3)`.
fn escape_line_start(line: &str) -> String {
    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];

    if body.starts_with(['#', '-', '+', '>']) {
        return format!("{}\\{}", indent, body);
    }

    let digits = body.len() - body.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let rest = &body[digits..];
    if digits > 0
        && rest.starts_with(['.', ')'])
        && rest[1..].chars().next().is_none_or(char::is_whitespace)
    {
        return format!("{}{}\\{}", indent, &body[..digits], rest);
    }
    line.to_string()
}

/// Length of the unescaped run of `*` ending `out`
fn trailing_marker_len(out: &str) -> usize {
    let body = out.trim_end_matches('*');
    let stars = out.len() - body.len();
    let backslashes = body.len() - body.trim_end_matches('\\').len();
    if stars > 0 && backslashes % 2 == 1 {
        stars - 1
    } else {
        stars
    }
}

/// Surround `inner` with `marker`, keeping edge whitespace outside the markers
fn wrap(out: &mut String, inner: &str, marker: &str) {
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        append(out, inner);
        return;
    }
    if inner.starts_with(char::is_whitespace) {
        append(out, " ");
        out.push_str(marker);
    } else {
        // A closing marker directly before the opening one would read as one long run
        let touching = trailing_marker_len(out);
        let code_seam = out.trim_end_matches('*').ends_with('`') && trimmed.starts_with('`');
        if touching == marker.len() && !code_seam {
            out.truncate(out.len() - marker.len());
        } else {
            if touching > 0 {
                out.push(' ');
            }
            out.push_str(marker);
        }
    }
    out.push_str(trimmed);
    out.push_str(marker);
    if inner.ends_with(char::is_whitespace) {
        out.push(' ');
    }
}

fn code_span(text: &str) -> String {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let fence = "`".repeat(longest_run(&text, '`') + 1);
    if text.starts_with('`') || text.ends_with('`') {
        format!("{} {} {}", fence, text, fence)
    } else {
        format!("{}{}{}", fence, text, fence)
    }
}

fn code_block(text: &str) -> String {
    let fence = "`".repeat(longest_run(text, '`').max(2) + 1);
    let mut body = text.to_string();
    if !body.ends_with('\n') {
        body.push('\n');
    }
    format!("{}\n{}{}", fence, body, fence)
}

fn longest_run(text: &str, needle: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == needle {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn convert(html: &str) -> String {
        HtmlFragment::new(html).to_markdown(2023).unwrap()
    }

    #[test]
    fn test_em_is_bold() {
        assert_eq!(convert("<em>word</em>"), "**word**\n");
        assert_eq!(
            convert("<p>The <em>calibration value</em> is found.</p>"),
            "The **calibration value** is found.\n"
        );
    }

    #[test]
    fn test_edge_whitespace_stays_outside_markers() {
        assert_eq!(convert("<p>a<em> b </em>c</p>"), "a **b** c\n");
    }

    #[test]
    fn test_italic_and_strong() {
        assert_eq!(convert("<p><i>x</i> and <strong>y</strong></p>"), "*x* and **y**\n");
    }

    #[test]
    fn test_description_layout() {
        let html = r#"<article class="day-desc"><h2>--- Day 1: Trebuchet?! ---</h2>
<p>Something is wrong.</p>
<p>For example:</p>
<pre><code>1abc2
a1b2c3d4e5f
</code></pre>
<p>The answer is <code><em>142</em></code>.</p>
</article>"#;
        let expected = "## --- Day 1: Trebuchet?! ---\n\n\
Something is wrong.\n\n\
For example:\n\n\
```\n1abc2\na1b2c3d4e5f\n```\n\n\
The answer is **`142`**.\n";
        assert_eq!(convert(html), expected);
    }

    #[test]
    fn test_links_resolve_against_year() {
        assert_eq!(
            convert(r#"<p>See <a href="1">day one</a>.</p>"#),
            "See [day one](https://adventofcode.com/2023/day/1).\n"
        );
        assert_eq!(
            convert(r#"<p><a href="/2023/support">Support</a></p>"#),
            "[Support](https://adventofcode.com/2023/support)\n"
        );
        assert_eq!(
            convert(r#"<p><a href="https://en.wikipedia.org/wiki/Trebuchet">x</a></p>"#),
            "[x](https://en.wikipedia.org/wiki/Trebuchet)\n"
        );
        assert_eq!(convert(r##"<p><a href="#part2">x</a></p>"##), "[x](#part2)\n");
    }

    #[test]
    fn test_custom_site() {
        let converter = MarkdownConverter::for_year("http://localhost:8080", 2019).unwrap();
        assert_eq!(converter.base().as_str(), "http://localhost:8080/2019/day/");
        let md = converter
            .convert(&HtmlFragment::new(r#"<a href="3">d3</a>"#))
            .unwrap();
        assert_eq!(md, "[d3](http://localhost:8080/2019/day/3)\n");
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            convert("<ul><li>one</li><li>two <em>2</em></li></ul>"),
            "- one\n- two **2**\n"
        );
        assert_eq!(convert("<ol><li>a</li><li>b</li></ol>"), "1. a\n2. b\n");
        assert_eq!(
            convert("<ul><li>outer<ul><li>inner</li></ul></li></ul>"),
            "- outer\n  - inner\n"
        );
    }

    #[test]
    fn test_escaping_and_code_spans() {
        assert_eq!(convert("<p>a*b [c]</p>"), "a\\*b \\[c\\]\n");
        assert_eq!(convert("<p><code>a*b</code></p>"), "`a*b`\n");
        assert_eq!(convert("<p><code>`x`</code></p>"), "`` `x` ``\n");
    }

    #[test]
    fn test_angle_brackets_are_escaped() {
        assert_eq!(convert("<p>if a &lt;b&gt; then</p>"), "if a \\<b> then\n");
        assert_eq!(convert("<p><code>&lt;b&gt;</code></p>"), "`<b>`\n");
    }

    #[test]
    fn test_block_syntax_at_line_start_is_escaped() {
        assert_eq!(convert("<p>1. not a list</p>"), "1\\. not a list\n");
        assert_eq!(convert("<p>12) not a list</p>"), "12\\) not a list\n");
        assert_eq!(convert("<p># not heading</p>"), "\\# not heading\n");
        assert_eq!(convert("<p>- not an item</p>"), "\\- not an item\n");
        assert_eq!(convert("<p>+ plus</p>"), "\\+ plus\n");
        assert_eq!(convert("<p>&gt; not quoted</p>"), "\\> not quoted\n");
        assert_eq!(convert("loose # text"), "loose # text\n");
        assert_eq!(convert("2023. The year"), "2023\\. The year\n");
        assert_eq!(convert("<p>1.5 is a number</p>"), "1.5 is a number\n");
        assert_eq!(convert("<ul><li>- dash</li></ul>"), "- \\- dash\n");
        assert_eq!(
            convert("<p>first<br/>- second</p>"),
            "first  \n\\- second\n"
        );
    }

    #[test]
    fn test_adjacent_emphasis_merges() {
        assert_eq!(convert("<p>x <em>a</em><em>b</em></p>"), "x **ab**\n");
        assert_eq!(convert("<p><em>a</em><strong>b</strong>c</p>"), "**ab**c\n");
        assert_eq!(convert("<p><em>a</em><i>b</i></p>"), "**a** *b*\n");
        assert_eq!(
            convert("<p><em><code>1</code></em><em><code>2</code></em></p>"),
            "**`1`** **`2`**\n"
        );
        assert_eq!(convert("<p>a*<em>b</em></p>"), "a\\***b**\n");
    }

    #[test]
    fn test_forms_are_dropped() {
        let html = r#"<article><p>Text.</p></article><form method="post"><input type="text" name="answer"/><input type="submit" value="[Submit]"/></form><p>To play, log in.</p>"#;
        assert_eq!(convert(html), "Text.\n\nTo play, log in.\n");
    }

    #[test]
    fn test_empty_fragment() {
        assert_eq!(convert(""), "");
    }

    #[test]
    fn test_unresolvable_link_is_an_error() {
        let result = HtmlFragment::new(r#"<a href="http://[::1">x</a>"#).to_markdown(2023);
        assert!(matches!(result, Err(PuzzleError::Conversion(_))));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_em_never_renders_italic(word in "[a-zA-Z0-9]{1,20}", before in "[a-z ]{0,10}") {
            let md = convert(&format!("<p>{}<em>{}</em></p>", before, word));
            let bold = format!("**{}**", word);
            prop_assert!(md.contains(&bold), "expected {} in {:?}", bold, md);
            let italic = format!("*{}*", word);
            prop_assert!(!md.replace(&bold, "").contains(&italic));
        }

        #[test]
        fn prop_numbered_paragraph_is_not_a_list(n in 0u32..10_000, word in "[a-z]{1,8}") {
            let md = convert(&format!("<p>{}. {}</p>", n, word));
            prop_assert_eq!(md, format!("{}\\. {}\n", n, word));
        }

        #[test]
        fn prop_adjacent_emphasis_is_one_run(words in prop::collection::vec("[a-z]{1,6}", 2..5)) {
            let html = words.iter().map(|w| format!("<em>{}</em>", w)).collect::<String>();
            let md = convert(&format!("<p>{}</p>", html));
            prop_assert_eq!(md, format!("**{}**\n", words.concat()));
        }
    }
}
