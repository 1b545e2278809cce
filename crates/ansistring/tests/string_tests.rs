//! Integration tests for the styled string model and codec.

use ansistring::{sgr, AnsiString, Mode, Param, StyleMap};

const RESET: &str = "\x1b[0m";

fn styled_chars(text: &str, codes: &str) -> String {
    text.chars().map(|c| format!("{codes}{c}{RESET}")).collect()
}

#[test]
fn encode_decode_round_trip() {
    let mut original = AnsiString::new("Hello, World!");
    original
        .fg_matching(0, 0, 255, &["Hello"], true)
        .fg_matching(255, 255, 0, &["World"], true)
        .attr(sgr::BOLD, &[12..13]);

    let decoded = AnsiString::from_ansi(&original.styled());
    assert_eq!(decoded.plain(), original.plain());
    assert_eq!(decoded.styles(), original.styles());
    assert_eq!(decoded, original);
}

#[test]
fn decode_run_encoded_foreign_text() {
    let blue = "\x1b[38;2;0;0;255m";
    let yellow = "\x1b[38;2;255;255;0m";
    // Cursor movement, per-char blue, then a run of yellow, then stray
    // trailing resets: everything but the text and the colors is noise.
    let input = format!(
        "\x1b[10;10H{}, {yellow}World{RESET}!{RESET}{RESET}{RESET}",
        styled_chars("Hello", blue)
    );

    let decoded = AnsiString::from_ansi(&input);
    assert_eq!(decoded.plain(), "Hello, World!");

    let expected: StyleMap = (0..5)
        .map(|i| (i, blue.to_string()))
        .chain((7..12).map(|i| (i, yellow.to_string())))
        .collect();
    assert_eq!(decoded.styles(), &expected);
}

#[test]
fn decode_matches_encoded_word_styling() {
    let mut styled = AnsiString::new("Hello, World!");
    styled
        .fg_matching(0, 0, 255, &["Hello"], true)
        .fg_matching(255, 255, 0, &["World"], true);

    let decoded = AnsiString::from_ansi(&styled.styled());
    assert_eq!(decoded, styled);
    assert_eq!(decoded.styles(), styled.styles());
}

#[test]
fn indexed_colors_survive_the_round_trip() {
    let mut s = AnsiString::new("Hello, World!");
    s.fg_indexed(135, &[])
        .bg_indexed(17, &[0..5])
        .ul(1, 2, 3, &[7..12]);
    let decoded = AnsiString::from_ansi(&s.styled());
    assert_eq!(decoded.styles(), s.styles());
}

#[test]
fn split_literal_separator_keeps_piece_styles() {
    let mut dots = AnsiString::new(".hello,...world!....");
    dots.fg(0, 0, 255, &[1..2, 5..6])
        .fg(255, 255, 0, &[10..11, 14..15]);

    let blue = "\x1b[38;2;0;0;255m";
    let yellow = "\x1b[38;2;255;255;0m";
    let hello = format!("{blue}h{RESET}ell{blue}o{RESET},");
    let world = format!("{yellow}w{RESET}orl{yellow}d{RESET}!");

    let single: Vec<String> = dots.split(".").iter().map(|p| p.to_string()).collect();
    assert_eq!(
        single,
        vec![
            String::new(),
            hello.clone(),
            String::new(),
            String::new(),
            world.clone(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        ]
    );

    let double: Vec<String> = dots.split("..").iter().map(|p| p.to_string()).collect();
    assert_eq!(
        double,
        vec![
            format!(".{hello}"),
            format!(".{world}"),
            String::new(),
            String::new(),
        ]
    );

    let triple: Vec<String> = dots.split("...").iter().map(|p| p.to_string()).collect();
    assert_eq!(triple, vec![format!(".{hello}"), world.clone(), ".".to_string()]);
}

#[test]
fn split_whitespace_discards_runs() {
    let mut spaces = AnsiString::new(" hello,   world!    ");
    spaces
        .fg(0, 0, 255, &[1..2, 5..6])
        .fg(255, 255, 0, &[10..11, 14..15]);

    let blue = "\x1b[38;2;0;0;255m";
    let yellow = "\x1b[38;2;255;255;0m";
    let pieces: Vec<String> = spaces
        .split_whitespace()
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(
        pieces,
        vec![
            format!("{blue}h{RESET}ell{blue}o{RESET},"),
            format!("{yellow}w{RESET}orl{yellow}d{RESET}!"),
        ]
    );
}

#[test]
fn rsplit_yields_right_to_left() {
    let s = AnsiString::new("a.b.c");
    let split = s.rsplit(".");
    let pieces: Vec<&str> = split.iter().map(|p| p.plain()).collect();
    assert_eq!(pieces, vec!["c", "b", "a"]);
}

#[test]
fn split_join_reconstructs_plain_text() {
    let mut s = AnsiString::new("one,two,,three");
    s.attr(sgr::BOLD, &[0..3]);
    for sep in [",", ",,", "o"] {
        let pieces = s.split(sep);
        let rebuilt = AnsiString::new(sep).join(&pieces);
        assert_eq!(rebuilt.plain(), s.plain(), "separator {sep:?}");
    }
}

#[test]
fn join_interleaves_joiner_styles() {
    let blue = "\x1b[38;2;0;0;255m";
    let yellow = "\x1b[38;2;255;255;0m";
    let bold = "\x1b[1m";

    let mut joiner = AnsiString::new(", ");
    joiner.attr(sgr::BOLD, &[]);
    let mut hello = AnsiString::new("Hello");
    hello.fg(0, 0, 255, &[]);
    let mut world = AnsiString::new("World!");
    world.fg(255, 255, 0, &[]);

    let joined = joiner.join(&[AnsiString::new("Anyway"), hello, world]);
    let expected = format!(
        "Anyway{}{}{}{}",
        styled_chars(", ", bold),
        styled_chars("Hello", blue),
        styled_chars(", ", bold),
        styled_chars("World!", yellow)
    );
    assert_eq!(joined, expected);
}

#[test]
fn style_unstyle_identical_range_is_idempotent() {
    let baseline = AnsiString::new("Hello, World!");
    let mut s = AnsiString::new("Hello, World!");
    s.style(&Param::Rgb(Mode::Fg, 1, 2, 3), &[2..9]);
    assert_ne!(s, baseline);
    s.unstyle(&[2..9]);
    assert_eq!(s, baseline);
}

#[test]
fn equality_goes_through_the_rendered_form() {
    let mut via_calls = AnsiString::new("Hi");
    via_calls.attr(sgr::BOLD, &[]);

    let via_map: StyleMap = (0..2).map(|i| (i, "\x1b[1m".to_string())).collect();
    let via_ctor = AnsiString::with_styles("Hi", via_map);

    assert_eq!(via_calls, via_ctor);
}
