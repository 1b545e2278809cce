//! nom combinators for the instruction grammar.

use ansistring::Mode;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit1, multispace0, one_of};
use nom::combinator::{map, map_res, opt, recognize};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair, preceded, separated_pair, tuple};
use nom::IResult;

use crate::types::{Bounds, Channel, Command, Instruction, Op, Repeat, ResetMode, Value};

fn channel(input: &str) -> IResult<&str, Channel> {
    map(one_of("rgb"), |c| match c {
        'r' => Channel::R,
        'g' => Channel::G,
        _ => Channel::B,
    })(input)
}

fn operator(input: &str) -> IResult<&str, Op> {
    map(one_of("=+->"), |c| match c {
        '=' => Op::Set,
        '+' => Op::Add,
        '-' => Op::Sub,
        _ => Op::Goto,
    })(input)
}

fn mode(input: &str) -> IResult<&str, Mode> {
    alt((
        map(tag("fg"), |_| Mode::Fg),
        map(tag("bg"), |_| Mode::Bg),
        map(tag("ul"), |_| Mode::Ul),
    ))(input)
}

fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            opt(char('-')),
            digit1,
            opt(pair(char('.'), digit1)),
        ))),
        |text: &str| text.parse::<f64>(),
    )(input)
}

fn integer(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), |text: &str| {
        text.parse::<i64>()
    })(input)
}

fn random_value(input: &str) -> IResult<&str, Value> {
    map_res(
        delimited(
            tag("random("),
            separated_pair(
                preceded(multispace0, integer),
                preceded(multispace0, char(',')),
                preceded(multispace0, integer),
            ),
            preceded(multispace0, char(')')),
        ),
        |(lo, hi)| {
            if lo <= hi {
                Ok(Value::Random(lo, hi))
            } else {
                Err("empty random range")
            }
        },
    )(input)
}

fn channel_ref(input: &str) -> IResult<&str, Value> {
    map(separated_pair(mode, char('_'), channel), |(m, c)| {
        Value::ChannelRef(m, c)
    })(input)
}

fn value(input: &str) -> IResult<&str, Value> {
    alt((random_value, channel_ref, map(number, Value::Number)))(input)
}

fn num_or_inf(input: &str) -> IResult<&str, f64> {
    alt((
        map(tag("-inf"), |_| f64::NEG_INFINITY),
        map(tag("inf"), |_| f64::INFINITY),
        number,
    ))(input)
}

fn minmax(input: &str) -> IResult<&str, Bounds> {
    map_res(
        delimited(
            tag("minmax("),
            separated_pair(
                preceded(multispace0, num_or_inf),
                preceded(multispace0, char(',')),
                preceded(multispace0, num_or_inf),
            ),
            preceded(multispace0, char(')')),
        ),
        |(lo, hi)| {
            if lo <= hi {
                Ok(Bounds { lo, hi })
            } else {
                Err("empty bounds")
            }
        },
    )(input)
}

fn reset_marker(input: &str) -> IResult<&str, ResetMode> {
    alt((
        map(tag("??"), |_| ResetMode::Start),
        map(char('?'), |_| ResetMode::Previous),
    ))(input)
}

fn repeat_marker(input: &str) -> IResult<&str, Repeat> {
    delimited(
        tag("repeat("),
        alt((
            map(tag("auto"), |_| Repeat::Auto),
            map_res(digit1, |digits: &str| {
                digits.parse::<u32>().map(Repeat::Count)
            }),
        )),
        char(')'),
    )(input)
}

/// One instruction: `channel op value ":" [mode] [minmax]`.
pub fn instruction(input: &str) -> IResult<&str, Instruction> {
    let (input, _) = multispace0(input)?;
    let (input, chan) = channel(input)?;
    let (input, op) = operator(input)?;
    let (input, val) = value(input)?;
    let (input, _) = char(':')(input)?;
    let (input, instruction_mode) = opt(mode)(input)?;
    let (input, bounds) = opt(preceded(multispace0, minmax))(input)?;
    Ok((
        input,
        Instruction {
            channel: chan,
            op,
            value: val,
            mode: instruction_mode.unwrap_or(Mode::Fg),
            bounds: bounds.unwrap_or_default(),
        },
    ))
}

/// One command: a `|`-separated instruction list with optional reset and
/// repeat markers.
pub fn command(input: &str) -> IResult<&str, Command> {
    let (input, instructions) =
        separated_list1(preceded(multispace0, char('|')), instruction)(input)?;
    let (input, reset) = opt(preceded(multispace0, reset_marker))(input)?;
    let (input, repeat) = opt(preceded(multispace0, repeat_marker))(input)?;
    let (input, _) = multispace0(input)?;
    Ok((
        input,
        Command {
            instructions,
            reset: reset.unwrap_or(ResetMode::None),
            repeat: repeat.unwrap_or(Repeat::One),
        },
    ))
}
