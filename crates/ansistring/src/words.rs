//! Character classification and literal word-span search.
//!
//! Word styling resolves each literal word to its non-overlapping
//! occurrence spans with a left-to-right scan; no pattern syntax is
//! involved, every word is matched as-is.

use std::ops::Range;

/// Returns true for the whitespace characters used in word-boundary and
/// default-split searches.
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Returns true for ASCII punctuation.
pub fn is_punctuation(c: char) -> bool {
    matches!(
        c,
        '~' | '\\'
            | '%'
            | '\''
            | '@'
            | '_'
            | '('
            | '.'
            | ':'
            | '$'
            | '&'
            | '"'
            | '='
            | '<'
            | '-'
            | '*'
            | ']'
            | ')'
            | '^'
            | '/'
            | '['
            | '{'
            | ','
            | ';'
            | '|'
            | '+'
            | '>'
            | '?'
            | '}'
            | '`'
            | '!'
            | '#'
    )
}

/// Returns true for whitespace or punctuation.
pub fn is_separator(c: char) -> bool {
    is_whitespace(c) || is_punctuation(c)
}

fn chars_match(a: char, b: char, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a == b || a.to_lowercase().eq(b.to_lowercase())
    }
}

/// Finds the non-overlapping occurrence spans of any of `words`, scanning
/// left to right. At each position the words are tried in the given order,
/// and a match advances the scan past its end. Spans are char ranges.
pub fn word_spans(text: &str, words: &[&str], case_sensitive: bool) -> Vec<Range<usize>> {
    let haystack: Vec<char> = text.chars().collect();
    let needles: Vec<Vec<char>> = words
        .iter()
        .map(|w| w.chars().collect())
        .filter(|w: &Vec<char>| !w.is_empty())
        .collect();

    let mut spans = Vec::new();
    let mut pos = 0;
    'scan: while pos < haystack.len() {
        for needle in &needles {
            if pos + needle.len() > haystack.len() {
                continue;
            }
            let matched = needle
                .iter()
                .zip(&haystack[pos..pos + needle.len()])
                .all(|(&n, &h)| chars_match(n, h, case_sensitive));
            if matched {
                spans.push(pos..pos + needle.len());
                pos += needle.len();
                continue 'scan;
            }
        }
        pos += 1;
    }
    spans
}
