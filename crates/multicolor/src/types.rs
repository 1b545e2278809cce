//! Data model for parsed multicolor sequences.

use ansistring::Mode;
use bitflags::bitflags;

/// One of the red/green/blue channels within a mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    R,
    G,
    B,
}

impl Channel {
    pub(crate) fn index(self) -> usize {
        match self {
            Channel::R => 0,
            Channel::G => 1,
            Channel::B => 2,
        }
    }
}

/// Instruction operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// `=`: assign the value.
    Set,
    /// `+`: add the value.
    Add,
    /// `-`: subtract the value.
    Sub,
    /// `>`: step toward the value, the distance divided over the
    /// command's repeat count.
    Goto,
}

/// Instruction value form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    /// A literal number.
    Number(f64),
    /// A uniform integer from the inclusive range, redrawn per repetition
    /// and per cycle replay.
    Random(i64, i64),
    /// Another mode/channel's current value, read at evaluation time.
    ChannelRef(Mode, Channel),
}

/// Per-instruction clamp bounds. Ends may be infinite (`minmax(0,inf)`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub lo: f64,
    pub hi: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self { lo: 0.0, hi: 255.0 }
    }
}

impl Bounds {
    /// Clamps a channel value into the bounds. The parser guarantees
    /// `lo <= hi`.
    pub fn clamp(self, value: f64) -> f64 {
        value.clamp(self.lo, self.hi)
    }
}

/// One channel operation within a command.
#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    pub channel: Channel,
    pub op: Op,
    pub value: Value,
    /// Defaults to the foreground when the DSL omits it.
    pub mode: Mode,
    pub bounds: Bounds,
}

/// A command's repeat count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    /// No marker: the command contributes a single step.
    One,
    /// `repeat(n)`.
    Count(u32),
    /// `repeat(auto)`: a fair share of the remaining slot budget.
    Auto,
}

/// What to restore after a command's step has been styled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetMode {
    None,
    /// `?`: the state from just before the command ran.
    Previous,
    /// `??`: the sequence's starting values.
    Start,
}

/// An ordered set of instructions applied together as one atomic step.
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    pub instructions: Vec<Instruction>,
    pub reset: ResetMode,
    pub repeat: Repeat,
}

bitflags! {
    /// Trailing sequence flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SequenceFlags: u8 {
        /// `@`: invert operators and play the trajectory end-to-start.
        const REVERSE = 1 << 0;
        /// `!`: append an operator-inverted, order-reversed copy.
        const MIRROR = 1 << 1;
        /// `&`: replay the schedule round-robin until every slot is covered.
        const CYCLE = 1 << 2;
        /// `*`: style the first slot with the start values directly.
        const SKIP_FIRST = 1 << 3;
    }
}

/// A fully parsed multicolor sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    /// Optional absolute initial state, executed once and not counted
    /// against the target slots.
    pub start: Option<Command>,
    pub commands: Vec<Command>,
    pub flags: SequenceFlags,
}
