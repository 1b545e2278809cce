//! Prints a few styled strings and gradients to the terminal.
//!
//! Run with `cargo run --example rainbow`.

use ansistring::{sgr, AnsiString};
use multicolor::{presets, slots, Multicolor};

fn main() {
    let mut banner = AnsiString::new("the quick brown fox jumps over the lazy dog");
    let targets = slots::per_char(banner.len());
    let rainbow = Multicolor::parse(presets::RAINBOW).expect("preset parses");
    rainbow.apply(&mut banner, &targets);
    println!("{banner}");

    let mut reversed = AnsiString::new("the quick brown fox jumps over the lazy dog");
    let back = Multicolor::parse(presets::REVERSED_RAINBOW).expect("preset parses");
    back.apply(&mut reversed, &targets);
    println!("{reversed}");

    let mut words = AnsiString::new("Styling individual words is a one-liner.");
    words
        .attr_matching(sgr::BOLD, &["words"], true)
        .fg_matching(255, 165, 0, &["one-liner"], true);
    println!("{words}");

    let mut multiline = AnsiString::new("gradients can flow\nacross visible characters\nonly");
    let visible = slots::visible(&multiline);
    let sky = Multicolor::parse("r=84:|g=161:|b=255: $ r+4:minmax(0,inf)|g+2:minmax(0,inf) &*")
        .expect("sequence parses");
    sky.apply(&mut multiline, &visible);
    println!("{multiline}");

    let decoded = AnsiString::from_ansi(&banner.styled());
    println!("decoded back to {} plain characters", decoded.len());
}
