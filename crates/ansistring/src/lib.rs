//! Per-character ANSI styling over plain text.
//!
//! This crate pairs a plain string with a sparse map from character position
//! to accumulated SGR escape text, and keeps that map consistent under
//! slicing, concatenation, splitting and joining.
//!
//! # Overview
//!
//! - [`AnsiString`] owns the text and its [`StyleMap`] and renders lazily:
//!   every styled character is emitted as `ESC[<params>m<char>ESC[0m`.
//! - [`Param`] models one SGR parameter unit: a bare attribute code, an
//!   indexed color (`38;5;n`) or a true color (`38;2;r;g;b`), for the
//!   foreground, background or underline [`Mode`].
//! - [`AnsiString::from_ansi`] decodes previously escape-coded text back
//!   into the same model.
//!
//! # Usage
//!
//! ```
//! use ansistring::{sgr, AnsiString};
//!
//! let mut s = AnsiString::new("Hello, World!");
//! s.attr(sgr::BOLD, &[0..5]);
//! s.fg(255, 0, 0, &[7..12]);
//! assert_eq!(s.plain(), "Hello, World!");
//!
//! let round_trip = AnsiString::from_ansi(&s.styled());
//! assert_eq!(round_trip, s);
//! ```

pub mod codec;
pub mod error;
pub mod sgr;
pub mod string;
pub mod style_map;
pub mod words;

// Re-export main types at crate root
pub use error::ParamParseError;
pub use sgr::{Mode, Param};
pub use string::AnsiString;
pub use style_map::StyleMap;
