//! Turns reference text into a one-sentence definition and an example.

use regex::Regex;
use std::sync::LazyLock;

pub const MAX_DEFINITION_CHARS: usize = 500;
pub const MAX_EXAMPLE_CHARS: usize = 200;

const EXTRACT_EXAMPLE_KEYWORDS: [&str; 4] = ["example", "used", "saying", "means"];
const HTML_EXAMPLE_MARKERS: [&str; 4] = ["example", "quot", "\"", "'"];

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid sentence regex"));
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// A parsed definition with an optional example sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub definition: String,
    pub example: Option<String>,
}

fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK.split(text).map(str::trim).collect()
}

/// Cuts `text` to at most `max` characters, ending in `...` when shortened.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Parses a plain-text article intro.
///
/// The first sentence becomes the definition; the first later sentence
/// mentioning an example keyword becomes the example.
pub fn parse_extract(extract: &str) -> Option<ParsedEntry> {
    let sentences = split_sentences(extract);
    let definition = sentences.first().copied().filter(|s| !s.is_empty())?;

    let example = sentences[1..]
        .iter()
        .find(|s| {
            let lower = s.to_lowercase();
            EXTRACT_EXAMPLE_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .map(|s| s.to_string());

    Some(ParsedEntry {
        definition: truncate_chars(definition, MAX_DEFINITION_CHARS),
        example,
    })
}

/// Removes tags and collapses whitespace.
pub fn strip_html(html: &str) -> String {
    let text = HTML_TAG.replace_all(html, " ");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Parses a rendered dictionary page section.
///
/// The definition is the first sentence of reasonable length (21 to 299
/// characters); the example is the first other sentence carrying a
/// quotation marker.
pub fn parse_dictionary_html(html: &str) -> Option<ParsedEntry> {
    let text = strip_html(html);
    if text.is_empty() {
        return None;
    }

    let mut definition: Option<&str> = None;
    let mut example: Option<String> = None;
    for sentence in split_sentences(&text) {
        let len = sentence.chars().count();
        if definition.is_none() && len > 20 && len < 300 {
            definition = Some(sentence);
        } else if example.is_none() {
            let lower = sentence.to_lowercase();
            if HTML_EXAMPLE_MARKERS.iter().any(|m| lower.contains(m)) {
                example = Some(sentence.chars().take(MAX_EXAMPLE_CHARS).collect());
            }
        }
    }

    definition.map(|d| ParsedEntry {
        definition: d.to_string(),
        example,
    })
}
