//! A compact DSL for multi-step color transitions across text spans.
//!
//! A multicolor sequence describes per-channel value trajectories over an
//! ordered list of target slots. Instructions address one channel of one
//! mode (foreground, background or underline), commands group instructions
//! into atomic steps, and trailing flags post-process the whole schedule.
//!
//! # Grammar
//!
//! ```text
//! sequence    = [start-command "$"] command ("#" command)* [flags]
//! command     = instruction ("|" instruction)* ["?"|"??"] ["repeat(" ("auto"|digits) ")"]
//! instruction = channel op value ":" [mode] ["minmax(" num-or-inf "," num-or-inf ")"]
//! channel     = "r" | "g" | "b"        op = "=" | "+" | "-" | ">"
//! value       = number | "random(" int "," int ")" | mode "_" channel
//! mode        = "fg" | "bg" | "ul"
//! flags       = any of "@" (reverse) "!" (mirror) "&" (cycle) "*" (skip-first)
//! ```
//!
//! # Usage
//!
//! ```
//! use ansistring::AnsiString;
//! use multicolor::{slots, Multicolor};
//!
//! let mut text = AnsiString::new("abcdefghijklmnopqrstuvwxyz");
//! let targets = slots::per_char(text.len());
//! let rainbow = Multicolor::parse(multicolor::presets::RAINBOW).unwrap();
//! rainbow.apply(&mut text, &targets);
//! assert_eq!(text.styles().get(0), Some("\x1b[38;2;255;0;0m"));
//! ```

pub mod error;
pub mod interp;
pub mod parser;
pub mod presets;
pub mod slots;
pub mod state;
pub mod types;

// Re-export main types at crate root
pub use error::ParseError;
pub use interp::Multicolor;
pub use slots::Slot;
pub use state::ColorState;
pub use types::{
    Bounds, Channel, Command, Instruction, Op, Repeat, ResetMode, Sequence, SequenceFlags, Value,
};
