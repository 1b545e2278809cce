//! Umbrella crate: per-character ANSI styling plus the multicolor
//! gradient DSL.
//!
//! See the `ansistring` crate for the styled string model and codec, and
//! the `multicolor` crate for the gradient interpreter.

pub use ansistring::{sgr, words, AnsiString, Mode, Param, StyleMap};
pub use multicolor::{presets, slots, ColorState, Multicolor, ParseError, Slot};
