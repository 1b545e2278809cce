//! The styled string type.
//!
//! [`AnsiString`] owns a plain string and a [`StyleMap`] keyed by character
//! position. Styling calls mutate the map in place; every operation that
//! produces new text (slicing, concatenation, splitting, joining, case
//! conversion, trimming, padding) constructs a new value with the map
//! renumbered relative to the new text, dropping entries whose source
//! position falls outside the new span.
//!
//! Rendering is lazy: the escape-coded form is recomputed only when the
//! map reports having changed since the previous render. Display and
//! equality both go through the rendered form, so two values are equal
//! exactly when they print the same.

use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::ops::{Add, Bound, Range, RangeBounds};

use crate::codec;
use crate::sgr::{Mode, Param};
use crate::style_map::StyleMap;
use crate::words;

/// A plain string paired with per-character ANSI styling.
///
/// All positions are character indices; a position absent from the map
/// carries no styling. The value is single-owner by design: the render
/// memo uses interior mutability and is not synchronized.
#[derive(Clone)]
pub struct AnsiString {
    plain: String,
    char_len: usize,
    styles: StyleMap,
    rendered: RefCell<String>,
    rendered_valid: Cell<bool>,
}

impl AnsiString {
    /// Creates an unstyled value.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_styles(text, StyleMap::new())
    }

    /// Creates a value with an initial style map.
    ///
    /// Every key is expected to be a valid character index into `text`;
    /// out-of-range entries are never rendered.
    pub fn with_styles(text: impl Into<String>, styles: StyleMap) -> Self {
        let plain = text.into();
        let char_len = plain.chars().count();
        Self {
            plain,
            char_len,
            styles,
            rendered: RefCell::new(String::new()),
            rendered_valid: Cell::new(false),
        }
    }

    /// Decodes previously escape-coded text. Inverse of [`Self::styled`]
    /// for anything this codec produced; foreign sequences are stripped
    /// (or kept as text when they match nothing).
    pub fn from_ansi(input: &str) -> Self {
        codec::decode(input)
    }

    /// The unstyled text.
    pub fn plain(&self) -> &str {
        &self.plain
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.char_len
    }

    /// Returns true when the text is empty.
    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    /// The style map.
    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    /// Mutable access to the style map.
    pub fn styles_mut(&mut self) -> &mut StyleMap {
        &mut self.styles
    }

    /// The escape-coded form, recomputed only when the map has changed.
    pub fn styled(&self) -> Ref<'_, str> {
        if self.styles.take_modified() || !self.rendered_valid.get() {
            *self.rendered.borrow_mut() = self.render();
            self.rendered_valid.set(true);
        }
        Ref::map(self.rendered.borrow(), |s| s.as_str())
    }

    /// Length of the escape-coded form in characters.
    pub fn styled_len(&self) -> usize {
        self.styled().chars().count()
    }

    fn render(&self) -> String {
        let mut out = String::with_capacity(self.plain.len());
        for (index, ch) in self.plain.chars().enumerate() {
            match self.styles.get(index) {
                Some(codes) => {
                    out.push_str(codes);
                    out.push(ch);
                    out.push_str("\x1b[0m");
                }
                None => out.push(ch),
            }
        }
        out
    }

    /// Clamps a span to the valid index range.
    fn clamp_span(&self, span: &Range<usize>) -> Range<usize> {
        let start = span.start.min(self.char_len);
        let end = span.end.min(self.char_len).max(start);
        start..end
    }

    fn byte_at(&self, char_index: usize) -> usize {
        self.plain
            .char_indices()
            .nth(char_index)
            .map(|(byte, _)| byte)
            .unwrap_or(self.plain.len())
    }

    // ------------------------------------------------------------------
    // Styling
    // ------------------------------------------------------------------

    /// Accumulates a parameter at every index of each half-open span.
    ///
    /// An empty span list styles the whole text. Out-of-range portions
    /// are clamped, never an error. The reset parameter clears styling
    /// instead, exactly like [`Self::unstyle`].
    pub fn style(&mut self, param: &Param, spans: &[Range<usize>]) -> &mut Self {
        if param.is_reset() {
            return self.unstyle(spans);
        }
        let escape = param.escape();
        if spans.is_empty() {
            for index in 0..self.char_len {
                self.styles.append(index, &escape);
            }
        } else {
            for span in spans {
                for index in self.clamp_span(span) {
                    self.styles.append(index, &escape);
                }
            }
        }
        self
    }

    /// Styles every non-overlapping occurrence of the given literal words.
    pub fn style_matching(
        &mut self,
        param: &Param,
        word_list: &[&str],
        case_sensitive: bool,
    ) -> &mut Self {
        let spans = words::word_spans(&self.plain, word_list, case_sensitive);
        self.style(param, &spans)
    }

    /// Removes style entries in the given spans; an empty span list
    /// clears the whole map. Unstyled positions are silent no-ops.
    pub fn unstyle(&mut self, spans: &[Range<usize>]) -> &mut Self {
        if spans.is_empty() {
            self.styles.clear();
        } else {
            for span in spans {
                for index in self.clamp_span(span) {
                    self.styles.remove(index);
                }
            }
        }
        self
    }

    /// Removes styling from every occurrence of the given literal words.
    pub fn unstyle_matching(&mut self, word_list: &[&str], case_sensitive: bool) -> &mut Self {
        let spans = words::word_spans(&self.plain, word_list, case_sensitive);
        self.unstyle(&spans)
    }

    /// Applies a bare attribute code.
    pub fn attr(&mut self, code: u8, spans: &[Range<usize>]) -> &mut Self {
        self.style(&Param::Attr(code), spans)
    }

    /// Applies a bare attribute code to every occurrence of the words.
    pub fn attr_matching(&mut self, code: u8, word_list: &[&str], case_sensitive: bool) -> &mut Self {
        self.style_matching(&Param::Attr(code), word_list, case_sensitive)
    }

    /// Applies a true-color foreground.
    pub fn fg(&mut self, r: u8, g: u8, b: u8, spans: &[Range<usize>]) -> &mut Self {
        self.style(&Param::Rgb(Mode::Fg, r, g, b), spans)
    }

    /// Applies a true-color foreground to every occurrence of the words.
    pub fn fg_matching(
        &mut self,
        r: u8,
        g: u8,
        b: u8,
        word_list: &[&str],
        case_sensitive: bool,
    ) -> &mut Self {
        self.style_matching(&Param::Rgb(Mode::Fg, r, g, b), word_list, case_sensitive)
    }

    /// Applies an indexed (0-255) foreground color.
    pub fn fg_indexed(&mut self, n: u8, spans: &[Range<usize>]) -> &mut Self {
        self.style(&Param::Indexed(Mode::Fg, n), spans)
    }

    /// Applies an indexed foreground to every occurrence of the words.
    pub fn fg_indexed_matching(
        &mut self,
        n: u8,
        word_list: &[&str],
        case_sensitive: bool,
    ) -> &mut Self {
        self.style_matching(&Param::Indexed(Mode::Fg, n), word_list, case_sensitive)
    }

    /// Applies a true-color background.
    pub fn bg(&mut self, r: u8, g: u8, b: u8, spans: &[Range<usize>]) -> &mut Self {
        self.style(&Param::Rgb(Mode::Bg, r, g, b), spans)
    }

    /// Applies a true-color background to every occurrence of the words.
    pub fn bg_matching(
        &mut self,
        r: u8,
        g: u8,
        b: u8,
        word_list: &[&str],
        case_sensitive: bool,
    ) -> &mut Self {
        self.style_matching(&Param::Rgb(Mode::Bg, r, g, b), word_list, case_sensitive)
    }

    /// Applies an indexed (0-255) background color.
    pub fn bg_indexed(&mut self, n: u8, spans: &[Range<usize>]) -> &mut Self {
        self.style(&Param::Indexed(Mode::Bg, n), spans)
    }

    /// Applies an indexed background to every occurrence of the words.
    pub fn bg_indexed_matching(
        &mut self,
        n: u8,
        word_list: &[&str],
        case_sensitive: bool,
    ) -> &mut Self {
        self.style_matching(&Param::Indexed(Mode::Bg, n), word_list, case_sensitive)
    }

    /// Applies a true-color underline.
    pub fn ul(&mut self, r: u8, g: u8, b: u8, spans: &[Range<usize>]) -> &mut Self {
        self.style(&Param::Rgb(Mode::Ul, r, g, b), spans)
    }

    /// Applies a true-color underline to every occurrence of the words.
    pub fn ul_matching(
        &mut self,
        r: u8,
        g: u8,
        b: u8,
        word_list: &[&str],
        case_sensitive: bool,
    ) -> &mut Self {
        self.style_matching(&Param::Rgb(Mode::Ul, r, g, b), word_list, case_sensitive)
    }

    /// Applies an indexed (0-255) underline color.
    pub fn ul_indexed(&mut self, n: u8, spans: &[Range<usize>]) -> &mut Self {
        self.style(&Param::Indexed(Mode::Ul, n), spans)
    }

    /// Applies an indexed underline to every occurrence of the words.
    pub fn ul_indexed_matching(
        &mut self,
        n: u8,
        word_list: &[&str],
        case_sensitive: bool,
    ) -> &mut Self {
        self.style_matching(&Param::Indexed(Mode::Ul, n), word_list, case_sensitive)
    }

    // ------------------------------------------------------------------
    // Text operations (each constructs a new value with a renumbered map)
    // ------------------------------------------------------------------

    /// Copies the character range into a new value, styles renumbered to
    /// start at zero. Bounds are clamped to the valid range.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> AnsiString {
        let start = match range.start_bound() {
            Bound::Included(&n) => n,
            Bound::Excluded(&n) => n + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&n) => n + 1,
            Bound::Excluded(&n) => n,
            Bound::Unbounded => self.char_len,
        };
        let span = self.clamp_span(&(start..end));
        let text = self.plain[self.byte_at(span.start)..self.byte_at(span.end)].to_string();
        AnsiString::with_styles(text, self.styles.slice(span))
    }

    fn concat(&self, other: &AnsiString) -> AnsiString {
        let mut styles = self.styles.slice(0..self.char_len);
        styles.extend(
            other
                .styles
                .iter()
                .map(|(index, codes)| (index + self.char_len, codes.to_string())),
        );
        let mut plain = self.plain.clone();
        plain.push_str(&other.plain);
        AnsiString::with_styles(plain, styles)
    }

    fn piece(&self, text: &str, char_start: usize, char_count: usize) -> AnsiString {
        AnsiString::with_styles(
            text.to_string(),
            self.styles.slice(char_start..char_start + char_count),
        )
    }

    /// Splits on a literal separator. Every piece carries the subset of
    /// style entries whose source position fell inside it, renumbered to
    /// zero; separators contribute no styling. An empty separator returns
    /// the value unsplit.
    pub fn split(&self, sep: &str) -> Vec<AnsiString> {
        if sep.is_empty() {
            return vec![self.clone()];
        }
        let sep_chars = sep.chars().count();
        let mut pieces = Vec::new();
        let mut byte_cursor = 0usize;
        let mut char_cursor = 0usize;
        for (match_byte, _) in self.plain.match_indices(sep) {
            let text = &self.plain[byte_cursor..match_byte];
            let count = text.chars().count();
            pieces.push(self.piece(text, char_cursor, count));
            char_cursor += count + sep_chars;
            byte_cursor = match_byte + sep.len();
        }
        let tail = &self.plain[byte_cursor..];
        pieces.push(self.piece(tail, char_cursor, tail.chars().count()));
        pieces
    }

    /// Like [`Self::split`] but pieces are yielded right-to-left.
    pub fn rsplit(&self, sep: &str) -> Vec<AnsiString> {
        let mut pieces = self.split(sep);
        pieces.reverse();
        pieces
    }

    /// Splits on runs of whitespace, discarding the separators and any
    /// leading or trailing run.
    pub fn split_whitespace(&self) -> Vec<AnsiString> {
        let mut pieces = Vec::new();
        let mut current = String::new();
        let mut start = 0usize;
        for (index, ch) in self.plain.chars().enumerate() {
            if words::is_whitespace(ch) {
                if !current.is_empty() {
                    pieces.push(self.piece(&current, start, index - start));
                    current.clear();
                }
            } else {
                if current.is_empty() {
                    start = index;
                }
                current.push(ch);
            }
        }
        if !current.is_empty() {
            pieces.push(self.piece(&current, start, self.char_len - start));
        }
        pieces
    }

    /// Joins pieces with this value as the separator. The joiner's own
    /// style entries repeat between each pair of pieces at the correct
    /// cumulative offset; each piece's styling is lifted at its offset.
    pub fn join(&self, pieces: &[AnsiString]) -> AnsiString {
        let mut plain = String::new();
        let mut styles = StyleMap::new();
        let mut offset = 0usize;
        for (i, item) in pieces.iter().enumerate() {
            if i > 0 {
                styles.extend(
                    self.styles
                        .iter()
                        .map(|(index, codes)| (index + offset, codes.to_string())),
                );
                plain.push_str(&self.plain);
                offset += self.char_len;
            }
            styles.extend(
                item.styles
                    .iter()
                    .map(|(index, codes)| (index + offset, codes.to_string())),
            );
            plain.push_str(&item.plain);
            offset += item.char_len;
        }
        AnsiString::with_styles(plain, styles)
    }

    /// Uppercases the text. A character that expands under case mapping
    /// carries its source style to every produced character.
    pub fn to_uppercase(&self) -> AnsiString {
        self.convert_case(|ch, out| out.extend(ch.to_uppercase()))
    }

    /// Lowercases the text, styles carried as in [`Self::to_uppercase`].
    pub fn to_lowercase(&self) -> AnsiString {
        self.convert_case(|ch, out| out.extend(ch.to_lowercase()))
    }

    fn convert_case(&self, convert: impl Fn(char, &mut Vec<char>)) -> AnsiString {
        let mut plain = String::new();
        let mut styles = StyleMap::new();
        let mut produced = Vec::new();
        let mut out_index = 0usize;
        for (index, ch) in self.plain.chars().enumerate() {
            produced.clear();
            convert(ch, &mut produced);
            for &out_ch in &produced {
                if let Some(codes) = self.styles.get(index) {
                    styles.set(out_index, codes.to_string());
                }
                plain.push(out_ch);
                out_index += 1;
            }
        }
        AnsiString::with_styles(plain, styles)
    }

    /// Drops leading and trailing whitespace, styles renumbered.
    pub fn trim(&self) -> AnsiString {
        self.trim_start().trim_end()
    }

    /// Drops leading whitespace, styles renumbered.
    pub fn trim_start(&self) -> AnsiString {
        let start = self
            .plain
            .chars()
            .position(|c| !words::is_whitespace(c))
            .unwrap_or(self.char_len);
        self.slice(start..)
    }

    /// Drops trailing whitespace, styles renumbered.
    pub fn trim_end(&self) -> AnsiString {
        let end = self.char_len
            - self
                .plain
                .chars()
                .rev()
                .position(|c| !words::is_whitespace(c))
                .unwrap_or(self.char_len);
        self.slice(..end)
    }

    /// Character position of the first occurrence of `needle`.
    pub fn find(&self, needle: &str) -> Option<usize> {
        self.plain
            .find(needle)
            .map(|byte| self.plain[..byte].chars().count())
    }

    /// Character position of the last occurrence of `needle`.
    pub fn rfind(&self, needle: &str) -> Option<usize> {
        self.plain
            .rfind(needle)
            .map(|byte| self.plain[..byte].chars().count())
    }

    /// Left-justifies to `width` characters with `fill`.
    pub fn pad_right(&self, width: usize, fill: char) -> AnsiString {
        if width <= self.char_len {
            return self.clone();
        }
        self.concat(&AnsiString::new(repeat_char(fill, width - self.char_len)))
    }

    /// Right-justifies to `width` characters with `fill`.
    pub fn pad_left(&self, width: usize, fill: char) -> AnsiString {
        if width <= self.char_len {
            return self.clone();
        }
        AnsiString::new(repeat_char(fill, width - self.char_len)).concat(self)
    }

    /// Centers to `width` characters with `fill`. The extra character of
    /// an odd margin goes left when the target width is odd.
    pub fn center(&self, width: usize, fill: char) -> AnsiString {
        if width <= self.char_len {
            return self.clone();
        }
        let margin = width - self.char_len;
        let left = margin / 2 + (margin & width & 1);
        AnsiString::new(repeat_char(fill, left))
            .concat(self)
            .concat(&AnsiString::new(repeat_char(fill, margin - left)))
    }
}

fn repeat_char(fill: char, count: usize) -> String {
    std::iter::repeat(fill).take(count).collect()
}

impl Default for AnsiString {
    fn default() -> Self {
        Self::new("")
    }
}

impl From<&str> for AnsiString {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for AnsiString {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for AnsiString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.styled())
    }
}

impl fmt::Debug for AnsiString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnsiString")
            .field("plain", &self.plain)
            .field("styles", &self.styles)
            .finish()
    }
}

impl PartialEq for AnsiString {
    fn eq(&self, other: &Self) -> bool {
        *self.styled() == *other.styled()
    }
}

impl PartialEq<str> for AnsiString {
    fn eq(&self, other: &str) -> bool {
        *self.styled() == *other
    }
}

impl PartialEq<&str> for AnsiString {
    fn eq(&self, other: &&str) -> bool {
        *self.styled() == **other
    }
}

impl PartialEq<String> for AnsiString {
    fn eq(&self, other: &String) -> bool {
        *self.styled() == *other.as_str()
    }
}

impl Add<&AnsiString> for &AnsiString {
    type Output = AnsiString;

    fn add(self, rhs: &AnsiString) -> AnsiString {
        self.concat(rhs)
    }
}

impl Add for AnsiString {
    type Output = AnsiString;

    fn add(self, rhs: AnsiString) -> AnsiString {
        self.concat(&rhs)
    }
}

impl Add<&str> for &AnsiString {
    type Output = AnsiString;

    fn add(self, rhs: &str) -> AnsiString {
        self.concat(&AnsiString::new(rhs))
    }
}

impl Add<&str> for AnsiString {
    type Output = AnsiString;

    fn add(self, rhs: &str) -> AnsiString {
        self.concat(&AnsiString::new(rhs))
    }
}

impl Add<&AnsiString> for &str {
    type Output = AnsiString;

    fn add(self, rhs: &AnsiString) -> AnsiString {
        AnsiString::new(self).concat(rhs)
    }
}

impl Add<AnsiString> for &str {
    type Output = AnsiString;

    fn add(self, rhs: AnsiString) -> AnsiString {
        AnsiString::new(self).concat(&rhs)
    }
}
