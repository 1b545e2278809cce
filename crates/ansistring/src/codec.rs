//! Decoder for escape-coded text.
//!
//! Encoding is the render step in [`crate::string`]; this module is the
//! inverse. The scanner strips every escape sequence matching the
//! structural grammar (CSI sequences, two-byte `ESC`-introduced Fe
//! sequences, and single-byte C1 controls) and records, at the text
//! position following removal, the parameter lists of the `m`-terminated
//! ones. A `0` parameter closes the open style run and commits it as map
//! entries; any other valid parameter opens or extends the run.
//!
//! Decoding never fails: text that only looks like an escape sequence
//! passes through as text, and parameter units that do not parse are
//! skipped.

use std::collections::BTreeMap;

use crate::sgr::Param;
use crate::string::AnsiString;
use crate::style_map::StyleMap;

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes the body of a CSI sequence (the introducer is already
    /// consumed): parameter bytes, intermediate bytes, then a final byte
    /// in `@`-`~`. Returns the parameter text and the final byte, or
    /// `None` if the input ends or derails before a final byte.
    fn consume_csi(&mut self) -> Option<(String, char)> {
        let params_start = self.pos;
        while matches!(self.peek(), Some('0'..='?')) {
            self.advance();
        }
        let params_end = self.pos;
        while matches!(self.peek(), Some(' '..='/')) {
            self.advance();
        }
        match self.peek() {
            Some(final_byte @ '@'..='~') => {
                self.advance();
                Some((self.input[params_start..params_end].to_string(), final_byte))
            }
            _ => None,
        }
    }
}

/// Splits a CSI parameter list into units, grouping the `38`/`48`/`58`
/// selectors with their `5;n` or `2;r;g;b` payloads.
fn split_units(params: &str) -> Vec<String> {
    let parts: Vec<&str> = params.split(';').collect();
    let mut units = Vec::new();
    let mut i = 0;
    while i < parts.len() {
        if matches!(parts[i], "38" | "48" | "58") {
            let take = match parts.get(i + 1) {
                Some(&"5") => 3,
                Some(&"2") => 5,
                _ => 1,
            };
            let end = (i + take).min(parts.len());
            units.push(parts[i..end].join(";"));
            i = end;
        } else {
            units.push(parts[i].to_string());
            i += 1;
        }
    }
    units
}

/// Decodes escape-coded text into an [`AnsiString`].
pub fn decode(input: &str) -> AnsiString {
    let mut scanner = Scanner::new(input);
    let mut plain = String::new();
    let mut position = 0usize;
    // Stripped-text char position -> parameter lists of m-terminated
    // sequences removed there, in source order.
    let mut sequences: BTreeMap<usize, Vec<String>> = BTreeMap::new();

    while let Some(c) = scanner.peek() {
        match c {
            '\x1b' => {
                let mark = scanner.pos;
                scanner.advance();
                match scanner.peek() {
                    Some('[') => {
                        scanner.advance();
                        match scanner.consume_csi() {
                            Some((params, 'm')) => {
                                sequences.entry(position).or_default().push(params);
                            }
                            Some(_) => {}
                            None => {
                                scanner.pos = mark;
                                scanner.advance();
                                plain.push('\x1b');
                                position += 1;
                            }
                        }
                    }
                    Some('@'..='Z' | '\\'..='_') => {
                        scanner.advance();
                    }
                    _ => {
                        plain.push('\x1b');
                        position += 1;
                    }
                }
            }
            '\u{9b}' => {
                let mark = scanner.pos;
                scanner.advance();
                match scanner.consume_csi() {
                    Some((params, 'm')) => {
                        sequences.entry(position).or_default().push(params);
                    }
                    Some(_) => {}
                    None => {
                        scanner.pos = mark;
                        scanner.advance();
                        plain.push('\u{9b}');
                        position += 1;
                    }
                }
            }
            '\u{80}'..='\u{9a}' | '\u{9c}'..='\u{9f}' => {
                scanner.advance();
            }
            _ => {
                scanner.advance();
                plain.push(c);
                position += 1;
            }
        }
    }

    let mut styles = StyleMap::new();
    let mut open = String::new();
    let mut run_start = 0usize;
    for (&pos, param_lists) in &sequences {
        for params in param_lists {
            for unit in split_units(params) {
                match unit.parse::<Param>() {
                    Ok(param) if param.is_reset() => {
                        if !open.is_empty() {
                            for index in run_start..pos {
                                styles.set(index, open.clone());
                            }
                            open.clear();
                        }
                    }
                    Ok(param) => {
                        open.push_str(&param.escape());
                        run_start = pos;
                    }
                    Err(_) => {}
                }
            }
        }
    }

    AnsiString::with_styles(plain, styles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        let decoded = decode("Hello, World!");
        assert_eq!(decoded.plain(), "Hello, World!");
        assert!(decoded.styles().is_empty());
    }

    #[test]
    fn per_char_encoding() {
        let decoded = decode("\x1b[1mH\x1b[0mi");
        assert_eq!(decoded.plain(), "Hi");
        assert_eq!(decoded.styles().get(0), Some("\x1b[1m"));
        assert_eq!(decoded.styles().get(1), None);
    }

    #[test]
    fn run_encoding_fills_every_position() {
        let decoded = decode("\x1b[38;2;0;0;255mHello\x1b[0m!");
        assert_eq!(decoded.plain(), "Hello!");
        for index in 0..5 {
            assert_eq!(decoded.styles().get(index), Some("\x1b[38;2;0;0;255m"));
        }
        assert_eq!(decoded.styles().get(5), None);
    }

    #[test]
    fn adjacent_runs_with_reset_do_not_bleed() {
        let decoded = decode("\x1b[31mab\x1b[0m--\x1b[32mcd\x1b[0m");
        assert_eq!(decoded.plain(), "ab--cd");
        assert_eq!(decoded.styles().get(0), Some("\x1b[31m"));
        assert_eq!(decoded.styles().get(1), Some("\x1b[31m"));
        assert_eq!(decoded.styles().get(2), None);
        assert_eq!(decoded.styles().get(3), None);
        assert_eq!(decoded.styles().get(4), Some("\x1b[32m"));
        assert_eq!(decoded.styles().get(5), Some("\x1b[32m"));
        assert_eq!(decoded.styles().len(), 4);
    }

    #[test]
    fn non_sgr_sequences_are_stripped_without_styling() {
        let decoded = decode("\x1b[10;10HHello");
        assert_eq!(decoded.plain(), "Hello");
        assert!(decoded.styles().is_empty());
    }

    #[test]
    fn stray_escape_stays_in_text() {
        let decoded = decode("a\x1b");
        assert_eq!(decoded.plain(), "a\x1b");
    }

    #[test]
    fn unterminated_csi_stays_in_text() {
        let decoded = decode("a\x1b[38;2");
        assert_eq!(decoded.plain(), "a\x1b[38;2");
    }

    #[test]
    fn c1_controls_are_stripped() {
        let decoded = decode("a\u{90}b");
        assert_eq!(decoded.plain(), "ab");
    }

    #[test]
    fn trailing_resets_are_ignored() {
        let decoded = decode("\x1b[1mX\x1b[0m\x1b[0m\x1b[0m");
        assert_eq!(decoded.plain(), "X");
        assert_eq!(decoded.styles().get(0), Some("\x1b[1m"));
        assert_eq!(decoded.styles().len(), 1);
    }

    #[test]
    fn unclosed_style_is_dropped() {
        let decoded = decode("\x1b[1mabc");
        assert_eq!(decoded.plain(), "abc");
        assert!(decoded.styles().is_empty());
    }

    #[test]
    fn invalid_units_are_skipped() {
        let decoded = decode("\x1b[38;5;300mab\x1b[0m");
        assert_eq!(decoded.plain(), "ab");
    }

    #[test]
    fn split_units_groups_payloads() {
        assert_eq!(
            split_units("1;38;2;255;0;0;4"),
            vec!["1", "38;2;255;0;0", "4"]
        );
        assert_eq!(split_units("48;5;17"), vec!["48;5;17"]);
        assert_eq!(split_units("0"), vec!["0"]);
    }
}
