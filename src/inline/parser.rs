// src/inline/parser.rs
// =============================================================================
// Reads the entry document line by line and reports the lines we care about.
//
// How it works:
// 1. Each physical line is trimmed
// 2. A trimmed line that starts with '<' but doesn't end with '>' is an
//    opening tag wrapped across lines; it's buffered and glued (no separator)
//    to the next trimmed line, until a line ending in '>' completes it
// 3. The resulting logical line is classified:
//      - contains "<head"       -> HeadOpen, then the line's own event
//      - an <img src=...> tag   -> Image
//      - <link rel=stylesheet>  -> Stylesheet (external hrefs stay Plain)
//      - <script src=...>       -> Script (external srcs stay Plain)
//      - <title>...</title>     -> Title
//      - anything else          -> Plain
//
// Only the first recognized element on a logical line is looked at.
// =============================================================================

use std::collections::VecDeque;
use std::str::Lines;

use scraper::{Html, Selector};

/// Tags worth a closer look; anything else passes straight through
const INTERESTING_TAGS: [&str; 4] = ["<link", "<script", "<title", "<img"];

/// One thing the parser found, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// A line to copy to the output as-is
    Plain(String),
    /// The next event's line opens <head>; always followed by that event
    HeadOpen,
    /// A local or remote <img>; `before`/`after` are the line text around it
    Image(ImageTag),
    /// A local stylesheet link
    Stylesheet { href: String },
    /// A local script reference
    Script { src: String },
    /// The <title> element and its text
    Title { text: String, line: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTag {
    pub src: String,
    /// Every attribute other than src, as written
    pub extra: String,
    pub before: String,
    pub after: String,
}

/// Lazy iterator of LineEvents over a document
pub struct LineParser<'a> {
    lines: Lines<'a>,
    /// Opening tag fragment waiting for its closing '>'
    pending: Option<String>,
    /// Event held back while HeadOpen is handed out first
    queued: VecDeque<LineEvent>,
}

impl<'a> LineParser<'a> {
    pub fn new(document: &'a str) -> Self {
        Self {
            lines: document.lines(),
            pending: None,
            queued: VecDeque::new(),
        }
    }

    /// Pulls physical lines until one logical line is complete
    ///
    /// Returns (text to classify, text to emit). A line that was never joined
    /// keeps its original indentation when emitted.
    fn next_logical(&mut self) -> Option<(String, String)> {
        loop {
            let Some(raw) = self.lines.next() else {
                if let Some(fragment) = self.pending.take() {
                    log::warn!("dropping unterminated tag at end of document: {}", fragment);
                }
                return None;
            };

            let trimmed = raw.trim();
            let (logical, joined) = match self.pending.take() {
                Some(mut fragment) => {
                    fragment.push_str(trimmed);
                    (fragment, true)
                }
                None => (trimmed.to_string(), false),
            };

            if logical.starts_with('<') && !logical.ends_with('>') {
                self.pending = Some(logical);
                continue;
            }

            let emitted = if joined { logical.clone() } else { raw.to_string() };
            return Some((logical, emitted));
        }
    }
}

impl Iterator for LineParser<'_> {
    type Item = LineEvent;

    fn next(&mut self) -> Option<LineEvent> {
        if let Some(event) = self.queued.pop_front() {
            return Some(event);
        }

        let (logical, emitted) = self.next_logical()?;
        let event = classify(&logical, emitted);

        if logical.contains("<head") {
            self.queued.push_back(event);
            return Some(LineEvent::HeadOpen);
        }

        Some(event)
    }
}

/// True for references that live outside the repository
pub fn is_external(reference: &str) -> bool {
    let lower = reference.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("//")
}

/// Decides what a single logical line is
///
/// `logical` is inspected, `emitted` is what gets carried in the event.
pub fn classify(logical: &str, emitted: String) -> LineEvent {
    if logical.is_empty() || !INTERESTING_TAGS.iter().any(|tag| logical.contains(tag)) {
        return LineEvent::Plain(emitted);
    }

    // Images are matched on the raw text so the rest of the line survives
    if let Some(image) = find_image(&emitted) {
        return LineEvent::Image(image);
    }

    classify_element(logical, emitted)
}

fn classify_element(logical: &str, line: String) -> LineEvent {
    let fragment = Html::parse_fragment(logical);

    // Selector is a constant and known to be valid
    let selector = Selector::parse("link, script, title").unwrap();

    let Some(element) = fragment.select(&selector).next() else {
        return LineEvent::Plain(line);
    };
    let value = element.value();

    match value.name() {
        "link" if value.attr("rel").map(str::trim) == Some("stylesheet") => {
            match value.attr("href") {
                Some(href) if !is_external(href) => LineEvent::Stylesheet {
                    href: href.to_string(),
                },
                _ => LineEvent::Plain(line),
            }
        }
        "script" => match value.attr("src") {
            Some(src) if !is_external(src) => LineEvent::Script {
                src: src.to_string(),
            },
            _ => LineEvent::Plain(line),
        },
        "title" => LineEvent::Title {
            text: element.text().collect::<String>().trim().to_string(),
            line,
        },
        _ => LineEvent::Plain(line),
    }
}

/// Finds the first `<img ... src="..." ...>` tag in a line
fn find_image(line: &str) -> Option<ImageTag> {
    let mut search_from = 0;

    while let Some(offset) = line[search_from..].find("<img") {
        let start = search_from + offset;
        let body_start = start + "<img".len();
        search_from = body_start;

        // "<img" must be followed by whitespace, or it's some other tag
        if !line[body_start..].starts_with(|c: char| c.is_ascii_whitespace()) {
            continue;
        }

        let Some(close) = tag_end(&line[body_start..]) else {
            return None;
        };
        let end = body_start + close;

        let attributes = line[body_start..end].trim().trim_end_matches('/');
        if let Some((src, extra)) = split_src(attributes) {
            return Some(ImageTag {
                src,
                extra,
                before: line[..start].to_string(),
                after: line[end + 1..].to_string(),
            });
        }
    }

    None
}

/// Offset of the '>' closing a tag, skipping any '>' inside quotes
fn tag_end(body: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in body.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            _ => {}
        }
    }
    None
}

/// Pulls the quoted src attribute out of an attribute list
///
/// Returns (src value, remaining attributes joined by a single space).
fn split_src(attributes: &str) -> Option<(String, String)> {
    let mut cursor = 0;

    while let Some(offset) = attributes[cursor..].find("src") {
        let start = cursor + offset;
        cursor = start + "src".len();

        // Must be a whole attribute name, not data-src or srcset. Joined
        // lines can put it right after the previous attribute's closing quote.
        let standalone = attributes[..start]
            .chars()
            .next_back()
            .map_or(true, |c| c.is_ascii_whitespace() || c == '"' || c == '\'');
        if !standalone {
            continue;
        }

        let rest = attributes[cursor..].trim_start();
        let Some(rest) = rest.strip_prefix('=') else {
            continue;
        };
        let rest = rest.trim_start();

        let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') else {
            continue;
        };
        let Some(len) = rest[1..].find(quote) else {
            return None;
        };

        let value = rest[1..1 + len].to_string();
        let value_end = attributes.len() - rest.len() + 1 + len + 1;

        let extra = [attributes[..start].trim(), attributes[value_end..].trim()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        return Some((value, extra));
    }

    None
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why implement Iterator instead of returning a Vec?
//    - The inliner pulls one event, fetches what it needs, then pulls the next
//    - Nothing past the current line is parsed before it's needed
//    - It also lets tests just .collect() the events
//
// 2. Why a VecDeque for `queued`?
//    - A "<head" line produces two events (HeadOpen, then the line itself)
//    - next() can only return one, so the second waits in the queue
//
// 3. What is let-else?
//    - let Some(x) = expr else { return ... };
//    - Binds x when the pattern matches, otherwise runs the else block
//    - The else block must leave the function (return, continue, panic)
// -----------------------------------------------------------------------------
