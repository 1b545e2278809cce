//! Parser for the multicolor DSL.
//!
//! The structural delimiters are handled by splitting: `$` separates an
//! optional start command, `#` separates commands, and the trailing flag
//! characters are peeled off the end. Each command is then parsed with
//! nom against the instruction grammar. Any mismatch fails the whole
//! sequence with a descriptive error; nothing is partially applied.

pub mod instruction;

use crate::error::ParseError;
use crate::types::{Command, Op, Repeat, ResetMode, Sequence, SequenceFlags};

pub use crate::parser::instruction::command;

/// Parses a full multicolor sequence.
pub fn parse_sequence(input: &str) -> Result<Sequence, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let (body, flags) = strip_flags(trimmed);
    if body.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parts = body.splitn(3, '$');
    let first = parts.next().unwrap_or("");
    let (start_text, commands_text) = match (parts.next(), parts.next()) {
        (None, _) => (None, first),
        (Some(rest), None) => (Some(first), rest),
        (Some(_), Some(_)) => return Err(ParseError::MultipleStarts),
    };

    let start = match start_text {
        Some(text) => Some(parse_start_command(text)?),
        None => None,
    };

    let mut commands = Vec::new();
    for chunk in commands_text.split('#') {
        commands.push(parse_command(chunk)?);
    }

    Ok(Sequence {
        start,
        commands,
        flags,
    })
}

/// Peels the trailing flag characters (and surrounding whitespace) off
/// the sequence text.
fn strip_flags(input: &str) -> (&str, SequenceFlags) {
    let mut flags = SequenceFlags::empty();
    let mut body = input;
    while let Some(c) = body.chars().next_back() {
        let flag = match c {
            '@' => SequenceFlags::REVERSE,
            '!' => SequenceFlags::MIRROR,
            '&' => SequenceFlags::CYCLE,
            '*' => SequenceFlags::SKIP_FIRST,
            _ if c.is_whitespace() => {
                body = &body[..body.len() - c.len_utf8()];
                continue;
            }
            _ => break,
        };
        flags |= flag;
        body = &body[..body.len() - c.len_utf8()];
    }
    (body, flags)
}

/// Parses one command chunk, requiring the grammar to consume it fully.
fn parse_command(text: &str) -> Result<Command, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::InvalidCommand {
            command: text.to_string(),
            detail: "empty command".to_string(),
        });
    }
    match command(trimmed) {
        Ok(("", parsed)) => Ok(parsed),
        Ok((rest, _)) => Err(ParseError::TrailingInput {
            command: trimmed.to_string(),
            trailing: rest.to_string(),
        }),
        Err(err) => Err(ParseError::InvalidCommand {
            command: trimmed.to_string(),
            detail: err.to_string(),
        }),
    }
}

/// Parses and validates the start command: plain assignments only, no
/// repeat or reset markers.
fn parse_start_command(text: &str) -> Result<Command, ParseError> {
    let parsed = parse_command(text)?;
    let assignments_only = parsed
        .instructions
        .iter()
        .all(|instruction| instruction.op == Op::Set);
    if !assignments_only || parsed.repeat != Repeat::One || parsed.reset != ResetMode::None {
        return Err(ParseError::InvalidStart);
    }
    Ok(parsed)
}
