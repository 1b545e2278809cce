//! Integration tests for the gradient interpreter.

use ansistring::AnsiString;
use multicolor::{presets, slots, ColorState, Multicolor, Slot};
use rand::rngs::SmallRng;
use rand::SeedableRng;

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

fn fg_param(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{r};{g};{b}m")
}

fn apply(sequence: &str, text: &str) -> AnsiString {
    let mut value = AnsiString::new(text);
    let slots = slots::per_char(value.len());
    Multicolor::parse(sequence)
        .unwrap()
        .apply(&mut value, &slots);
    value
}

/// The canonical 26-slot rainbow: start at red, six auto-repeat goto
/// commands rotating the hue, cycle + skip-first.
const RAINBOW_TABLE: [(u8, u8, u8); 26] = [
    (255, 0, 0),
    (255, 51, 0),
    (255, 102, 0),
    (255, 153, 0),
    (255, 204, 0),
    (255, 255, 0),
    (191, 255, 0),
    (127, 255, 0),
    (63, 255, 0),
    (0, 255, 0),
    (0, 255, 63),
    (0, 255, 127),
    (0, 255, 191),
    (0, 255, 255),
    (0, 191, 255),
    (0, 127, 255),
    (0, 63, 255),
    (0, 0, 255),
    (63, 0, 255),
    (127, 0, 255),
    (191, 0, 255),
    (255, 0, 255),
    (255, 0, 191),
    (255, 0, 127),
    (255, 0, 63),
    (255, 0, 0),
];

#[test]
fn rainbow_reference_table() {
    let value = apply(presets::RAINBOW, ALPHABET);
    for (index, &(r, g, b)) in RAINBOW_TABLE.iter().enumerate() {
        assert_eq!(
            value.styles().get(index),
            Some(fg_param(r, g, b).as_str()),
            "position {index}"
        );
    }
    assert_eq!(value.styles().len(), 26);
}

#[test]
fn reversed_rainbow_mirrors_the_forward_table() {
    let value = apply(presets::REVERSED_RAINBOW, ALPHABET);
    for (index, &(r, g, b)) in RAINBOW_TABLE.iter().rev().enumerate() {
        assert_eq!(
            value.styles().get(index),
            Some(fg_param(r, g, b).as_str()),
            "position {index}"
        );
    }
    // Both ends of the rotation are red.
    assert_eq!(value.styles().get(0), Some(fg_param(255, 0, 0).as_str()));
    assert_eq!(value.styles().get(25), Some(fg_param(255, 0, 0).as_str()));
}

#[test]
fn linear_ramp_cycles_and_clamps_at_render() {
    let value = apply(
        "r=84:|g=161:|b=255: $ r+9:minmax(0,inf)|g+4:minmax(0,inf) &*",
        ALPHABET,
    );
    for index in 0..26 {
        let k = index as i64;
        let r = (84 + 9 * k).min(255) as u8;
        let g = (161 + 4 * k).min(255) as u8;
        assert_eq!(
            value.styles().get(index),
            Some(fg_param(r, g, 255).as_str()),
            "position {index}"
        );
    }
}

#[test]
fn reversed_ramp_mirrors_the_forward_ramp() {
    let forward = apply(
        "r=84:|g=161:|b=255: $ r+9:minmax(0,inf)|g+4:minmax(0,inf) &*",
        ALPHABET,
    );
    let reversed = apply(
        "r=84:|g=161:|b=255: $ r+9:minmax(0,inf)|g+4:minmax(0,inf) @&*",
        ALPHABET,
    );
    for index in 0..26 {
        assert_eq!(
            reversed.styles().get(index),
            forward.styles().get(25 - index),
            "position {index}"
        );
    }
}

#[test]
fn mirror_appends_the_inverted_descent() {
    let value = apply(
        "r=84:|g=161:|b=255: $ r+50:minmax(0,inf)|g+25:minmax(0,inf) # b-70:minmax(0,inf) !&*",
        ALPHABET,
    );
    assert_eq!(value.styles().get(0), Some(fg_param(84, 161, 255).as_str()));
    for index in 1..26 {
        let expected = match (index - 1) % 4 {
            0 => (134, 186, 255),
            1 => (134, 186, 185),
            2 => (134, 186, 255),
            _ => (84, 161, 255),
        };
        let (r, g, b) = expected;
        assert_eq!(
            value.styles().get(index),
            Some(fg_param(r, g, b).as_str()),
            "position {index}"
        );
    }
}

#[test]
fn goto_with_auto_repeat_lands_on_the_target() {
    // 4 slots, 0 -> 255: steps of 63.75 land exactly on 255.
    let value = apply("r>255: repeat(auto)", "abcd");
    assert_eq!(value.styles().get(3), Some(fg_param(255, 0, 0).as_str()));

    // 8 slots, the other direction.
    let value = apply("r=255: $ r>0: repeat(auto)", "abcdefgh");
    assert_eq!(value.styles().get(7), Some(fg_param(0, 0, 0).as_str()));
}

#[test]
fn reset_previous_restores_state_between_commands() {
    let value = apply("r+10:? # g+5:", "ab");
    assert_eq!(value.styles().get(0), Some(fg_param(10, 0, 0).as_str()));
    assert_eq!(value.styles().get(1), Some(fg_param(0, 5, 0).as_str()));
}

#[test]
fn reset_start_restores_the_sequence_origin() {
    let value = apply("r=200: $ r+10:?? # g+5:", "ab");
    assert_eq!(value.styles().get(0), Some(fg_param(210, 0, 0).as_str()));
    assert_eq!(value.styles().get(1), Some(fg_param(200, 5, 0).as_str()));
}

#[test]
fn random_values_are_deterministic_with_a_seed() {
    let gradient = Multicolor::parse("r=random(10,20):|g=random(100,200): &").unwrap();

    let mut first = AnsiString::new("abcdef");
    let first_len = first.len();
    let mut rng = SmallRng::seed_from_u64(7);
    gradient.apply_with(
        &mut first,
        &slots::per_char(first_len),
        ColorState::default(),
        &mut rng,
    );

    let mut second = AnsiString::new("abcdef");
    let second_len = second.len();
    let mut rng = SmallRng::seed_from_u64(7);
    gradient.apply_with(
        &mut second,
        &slots::per_char(second_len),
        ColorState::default(),
        &mut rng,
    );

    assert_eq!(first.styles(), second.styles());
    assert_eq!(first.styles().len(), 6);
}

#[test]
fn random_values_stay_in_their_range() {
    let gradient = Multicolor::parse("r=random(10,20): &").unwrap();
    let mut value = AnsiString::new("abcdefgh");
    let value_len = value.len();
    let mut rng = SmallRng::seed_from_u64(99);
    gradient.apply_with(
        &mut value,
        &slots::per_char(value_len),
        ColorState::default(),
        &mut rng,
    );
    for (_, codes) in value.styles().iter() {
        let r: u8 = codes
            .trim_start_matches("\x1b[38;2;")
            .split(';')
            .next()
            .unwrap()
            .parse()
            .unwrap();
        assert!((10..=20).contains(&r), "out-of-range channel {r}");
    }
}

#[test]
fn trailing_slots_receive_no_styling_without_cycle() {
    let value = apply("r+10: # g+10:", "abcde");
    assert_eq!(value.styles().len(), 2);
    assert!(value.styles().get(2).is_none());
    assert!(value.styles().get(4).is_none());
}

#[test]
fn zero_repeat_schedule_is_a_no_op() {
    let value = apply("r+10: repeat(0)", "abc");
    assert!(value.styles().is_empty());
}

#[test]
fn background_and_underline_modes_style_independently() {
    let value = apply("r+10:bg # g+20:ul", "ab");
    assert_eq!(value.styles().get(0), Some("\x1b[48;2;10;0;0m"));
    assert_eq!(value.styles().get(1), Some("\x1b[58;2;0;20;0m"));
}

#[test]
fn channel_references_read_the_current_state() {
    let value = apply("r=100: $ r=fg_r:bg", "a");
    assert_eq!(value.styles().get(0), Some("\x1b[48;2;100;0;0m"));
}

#[test]
fn skip_first_without_a_start_command_leaves_the_first_slot_alone() {
    let value = apply("r+10: &*", "abc");
    assert!(value.styles().get(0).is_none());
    assert_eq!(value.styles().get(1), Some(fg_param(10, 0, 0).as_str()));
    assert_eq!(value.styles().get(2), Some(fg_param(20, 0, 0).as_str()));
}

#[test]
fn grouped_ranges_are_styled_together() {
    let mut value = AnsiString::new("abcdef");
    let gradient = Multicolor::parse("r=50:").unwrap();
    let grouped = vec![Slot::new(vec![0..2, 3..5])];
    gradient.apply(&mut value, &grouped);

    let expected = fg_param(50, 0, 0);
    for index in [0, 1, 3, 4] {
        assert_eq!(value.styles().get(index), Some(expected.as_str()));
    }
    assert!(value.styles().get(2).is_none());
    assert!(value.styles().get(5).is_none());
}

#[test]
fn visible_slots_flow_across_whitespace() {
    let sequence = "r=10: $ r+10: &*";

    let mut spaced = AnsiString::new("ab c\nd");
    let visible = slots::visible(&spaced);
    Multicolor::parse(sequence)
        .unwrap()
        .apply(&mut spaced, &visible);

    let condensed = apply(sequence, "abcd");

    let spaced_values: Vec<&str> = spaced.styles().iter().map(|(_, codes)| codes).collect();
    let condensed_values: Vec<&str> =
        condensed.styles().iter().map(|(_, codes)| codes).collect();
    assert_eq!(spaced_values, condensed_values);
    assert!(spaced.styles().get(2).is_none(), "space stays unstyled");
}
