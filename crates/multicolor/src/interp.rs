//! The gradient interpreter.
//!
//! A parsed [`Sequence`] is driven against an ordered list of target
//! [`Slot`]s: repeat counts are resolved against the slot budget, goto
//! operators are rewritten into fixed-size steps, commands expand into a
//! step schedule, the trailing flags post-process that schedule, and each
//! slot is then styled with the color state its step produces.

use ansistring::{AnsiString, Mode, Param};
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::ParseError;
use crate::parser;
use crate::slots::Slot;
use crate::state::ColorState;
use crate::types::{
    Bounds, Channel, Command, Op, Repeat, ResetMode, Sequence, SequenceFlags, Value,
};

/// A parsed multicolor sequence, ready to apply.
#[derive(Clone, Debug)]
pub struct Multicolor {
    sequence: Sequence,
}

#[derive(Clone, Copy, Debug)]
enum StepKind {
    Set,
    Add,
    Sub,
}

/// One fully resolved channel operation inside a scheduled step.
#[derive(Clone, Debug)]
struct StepOp {
    mode: Mode,
    channel: Channel,
    kind: StepKind,
    amount: f64,
    bounds: Bounds,
    /// Present when the source value was `random(a,b)`; cycle replays
    /// redraw it instead of reusing the expansion-time draw.
    random: Option<(i64, i64)>,
}

/// One scheduled step: a command application bound to one target slot.
#[derive(Clone, Debug)]
struct Step {
    ops: Vec<StepOp>,
    reset: ResetMode,
}

impl Step {
    fn invert(&mut self) {
        for op in &mut self.ops {
            op.kind = match op.kind {
                StepKind::Add => StepKind::Sub,
                StepKind::Sub => StepKind::Add,
                StepKind::Set => StepKind::Set,
            };
        }
    }
}

/// How one instruction turns into per-repetition step operations.
struct Template {
    mode: Mode,
    channel: Channel,
    kind: StepKind,
    source: AmountSource,
    bounds: Bounds,
}

enum AmountSource {
    Fixed(f64),
    Random(i64, i64),
}

impl Multicolor {
    /// Parses a sequence string.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Ok(Self {
            sequence: parser::parse_sequence(input)?,
        })
    }

    /// The parsed sequence.
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Applies the sequence with an OS-seeded generator and zeroed
    /// initial color state.
    pub fn apply(&self, text: &mut AnsiString, slots: &[Slot]) {
        let mut rng = SmallRng::from_os_rng();
        self.apply_with(text, slots, ColorState::default(), &mut rng);
    }

    /// Applies the sequence against an explicit initial state and random
    /// source, so callers (and tests) can pin both.
    pub fn apply_with<R: Rng>(
        &self,
        text: &mut AnsiString,
        slots: &[Slot],
        origin: ColorState,
        rng: &mut R,
    ) {
        let sequence = &self.sequence;
        if slots.is_empty() || sequence.commands.is_empty() {
            return;
        }
        let flags = sequence.flags;
        let skip_first = flags.contains(SequenceFlags::SKIP_FIRST);
        let budget = slots.len() - usize::from(skip_first);

        let mut state = origin;
        let mut start_modes: Vec<Mode> = Vec::new();
        if let Some(start) = &sequence.start {
            apply_start(&mut state, start, rng, &mut start_modes);
        }
        let start_state = state;

        let repeats = resolve_repeats(&sequence.commands, budget);
        debug!(
            "multicolor: repeats {:?} over {} slots (budget {})",
            repeats,
            slots.len(),
            budget
        );

        let mut steps = expand(&sequence.commands, &repeats, &mut state, &start_state, rng);

        let mut reversed = false;
        if flags.contains(SequenceFlags::MIRROR) && steps.len() > 1 {
            let mut mirrored: Vec<Step> = steps.iter().rev().cloned().collect();
            for step in &mut mirrored {
                step.invert();
            }
            steps.extend(mirrored);
        } else if flags.contains(SequenceFlags::REVERSE) && !steps.is_empty() {
            // Materialize the forward trajectory, then walk it backward:
            // operators flip, order reverses, and the application below
            // continues from the state the forward pass ended on.
            state = start_state;
            let total = if flags.contains(SequenceFlags::CYCLE) {
                budget
            } else {
                steps.len()
            };
            for index in 0..total {
                let redraw = index >= steps.len();
                run_step(&mut state, &steps[index % steps.len()], redraw, rng, &start_state);
            }
            for step in &mut steps {
                step.invert();
            }
            steps.reverse();
            reversed = true;
        }
        if !reversed {
            state = start_state;
        }
        debug!(
            "multicolor: schedule holds {} steps (flags {:?})",
            steps.len(),
            flags
        );

        let mut slot_iter = slots.iter();
        if skip_first {
            if let Some(first) = slot_iter.next() {
                let mut modes = start_modes.clone();
                if reversed {
                    for step in &steps {
                        for op in &step.ops {
                            if !modes.contains(&op.mode) {
                                modes.push(op.mode);
                            }
                        }
                    }
                }
                for mode in modes {
                    let (r, g, b) = state.rgb8(mode);
                    text.style(&Param::Rgb(mode, r, g, b), first.ranges());
                }
            }
        }

        if steps.is_empty() {
            return;
        }
        let cycle = flags.contains(SequenceFlags::CYCLE);
        for (index, slot) in slot_iter.enumerate() {
            if !cycle && index >= steps.len() {
                // Documented boundary: trailing slots receive no styling.
                break;
            }
            let redraw = index >= steps.len();
            let step = &steps[index % steps.len()];
            let touched = run_step(&mut state, step, redraw, rng, &start_state);
            for (mode, (r, g, b)) in touched {
                text.style(&Param::Rgb(mode, r, g, b), slot.ranges());
            }
        }
    }
}

/// Executes the start command: plain assignments into the state.
fn apply_start<R: Rng>(
    state: &mut ColorState,
    command: &Command,
    rng: &mut R,
    touched: &mut Vec<Mode>,
) {
    for instruction in &command.instructions {
        let value = match instruction.value {
            Value::Number(n) => n,
            Value::Random(lo, hi) => rng.random_range(lo..=hi) as f64,
            Value::ChannelRef(mode, channel) => state.get(mode, channel),
        };
        state.set(
            instruction.mode,
            instruction.channel,
            instruction.bounds.clamp(value),
        );
        if !touched.contains(&instruction.mode) {
            touched.push(instruction.mode);
        }
    }
}

/// Resolves every command's repeat count against the slot budget.
///
/// Explicit counts claim their share first (a count below the remaining
/// budget is raised to it); `auto` markers then split what is left, each
/// taking the ceiling of `remaining / outstanding` as the scan moves left
/// to right. A count of zero removes the command from the schedule.
fn resolve_repeats(commands: &[Command], slot_budget: usize) -> Vec<u32> {
    let mut remaining = slot_budget as i64;
    let mut outstanding = commands
        .iter()
        .filter(|c| c.repeat == Repeat::Auto)
        .count() as i64;

    let mut resolved = vec![0u32; commands.len()];
    for (index, command) in commands.iter().enumerate() {
        match command.repeat {
            Repeat::One => resolved[index] = 1,
            Repeat::Count(0) => {}
            Repeat::Count(count) => {
                let mut count = count as i64;
                if count < remaining {
                    count = remaining;
                }
                remaining -= count;
                resolved[index] = count as u32;
            }
            Repeat::Auto => {}
        }
    }
    for (index, command) in commands.iter().enumerate() {
        if command.repeat == Repeat::Auto {
            let share = if remaining > 0 {
                (remaining + outstanding - 1) / outstanding
            } else {
                0
            };
            remaining -= share;
            outstanding -= 1;
            resolved[index] = share as u32;
        }
    }
    resolved
}

/// Expands commands into the step schedule, mutating the working state so
/// later goto resolutions see where earlier commands left off.
fn expand<R: Rng>(
    commands: &[Command],
    repeats: &[u32],
    state: &mut ColorState,
    start_state: &ColorState,
    rng: &mut R,
) -> Vec<Step> {
    let mut steps = Vec::new();
    for (command, &repeat) in commands.iter().zip(repeats) {
        if repeat == 0 {
            continue;
        }
        let templates: Vec<Template> = command
            .instructions
            .iter()
            .map(|instruction| {
                let (kind, source) = match instruction.op {
                    Op::Goto => {
                        let target = match instruction.value {
                            Value::Number(n) => n,
                            Value::Random(lo, hi) => rng.random_range(lo..=hi) as f64,
                            Value::ChannelRef(mode, channel) => state.get(mode, channel),
                        };
                        let current = state.get(instruction.mode, instruction.channel);
                        let span = f64::from(repeat.max(1));
                        if current <= target {
                            (StepKind::Add, AmountSource::Fixed((target - current) / span))
                        } else {
                            (StepKind::Sub, AmountSource::Fixed((current - target) / span))
                        }
                    }
                    Op::Set | Op::Add | Op::Sub => {
                        let kind = match instruction.op {
                            Op::Set => StepKind::Set,
                            Op::Add => StepKind::Add,
                            _ => StepKind::Sub,
                        };
                        let source = match instruction.value {
                            Value::Number(n) => AmountSource::Fixed(n),
                            Value::Random(lo, hi) => AmountSource::Random(lo, hi),
                            Value::ChannelRef(mode, channel) => {
                                AmountSource::Fixed(state.get(mode, channel))
                            }
                        };
                        (kind, source)
                    }
                };
                Template {
                    mode: instruction.mode,
                    channel: instruction.channel,
                    kind,
                    source,
                    bounds: instruction.bounds,
                }
            })
            .collect();

        for _ in 0..repeat {
            let ops = templates
                .iter()
                .map(|template| {
                    let (amount, random) = match template.source {
                        AmountSource::Fixed(value) => (value, None),
                        AmountSource::Random(lo, hi) => {
                            (rng.random_range(lo..=hi) as f64, Some((lo, hi)))
                        }
                    };
                    StepOp {
                        mode: template.mode,
                        channel: template.channel,
                        kind: template.kind,
                        amount,
                        bounds: template.bounds,
                        random,
                    }
                })
                .collect();
            let step = Step {
                ops,
                reset: command.reset,
            };
            run_step(state, &step, false, rng, start_state);
            steps.push(step);
        }
    }
    steps
}

/// Applies one step to the state. Returns, for every mode the step
/// touched, the render-ready triple read before any reset restore, so the
/// styling reflects the step even when the state is rolled back.
fn run_step<R: Rng>(
    state: &mut ColorState,
    step: &Step,
    redraw: bool,
    rng: &mut R,
    start_state: &ColorState,
) -> Vec<(Mode, (u8, u8, u8))> {
    let snapshot = matches!(step.reset, ResetMode::Previous).then(|| *state);
    let mut touched: Vec<Mode> = Vec::new();
    for op in &step.ops {
        let amount = match (redraw, op.random) {
            (true, Some((lo, hi))) => rng.random_range(lo..=hi) as f64,
            _ => op.amount,
        };
        let current = state.get(op.mode, op.channel);
        let next = match op.kind {
            StepKind::Set => amount,
            StepKind::Add => current + amount,
            StepKind::Sub => current - amount,
        };
        state.set(op.mode, op.channel, op.bounds.clamp(next));
        if !touched.contains(&op.mode) {
            touched.push(op.mode);
        }
    }
    let rendered = touched
        .into_iter()
        .map(|mode| (mode, state.rgb8(mode)))
        .collect();
    match step.reset {
        ResetMode::Previous => {
            if let Some(previous) = snapshot {
                *state = previous;
            }
        }
        ResetMode::Start => *state = *start_state,
        ResetMode::None => {}
    }
    rendered
}
