//! SGR (Select Graphic Rendition) parameter catalog.
//!
//! The catalog is the fixed `name -> code` table consumed by the styling
//! layer; the numbers come from the standard SGR assignments. [`Param`] is
//! the value type for one parameter unit as it appears inside an escape
//! sequence: a bare attribute code, an indexed color, or a true color.

use std::fmt;
use std::str::FromStr;

use phf::phf_map;

use crate::error::ParamParseError;

/// Text attribute codes.
pub const RESET: u8 = 0;
pub const BOLD: u8 = 1;
pub const DIM: u8 = 2;
pub const ITALIC: u8 = 3;
pub const UNDERLINE: u8 = 4;
pub const SLOW_BLINK: u8 = 5;
pub const RAPID_BLINK: u8 = 6;
pub const INVERT: u8 = 7;
pub const CONCEAL: u8 = 8;
pub const STRIKETHROUGH: u8 = 9;
pub const DOUBLE_UNDERLINE: u8 = 21;
pub const NORMAL_INTENSITY: u8 = 22;
pub const NOT_ITALIC: u8 = 23;
pub const NOT_UNDERLINED: u8 = 24;
pub const NOT_BLINKING: u8 = 25;
pub const NOT_REVERSED: u8 = 27;
pub const REVEAL: u8 = 28;
pub const NOT_CROSSED_OUT: u8 = 29;
pub const FRAMED: u8 = 51;
pub const ENCIRCLED: u8 = 52;
pub const OVERLINED: u8 = 53;

/// Basic foreground color codes (30-37, bright 90-97).
pub const FG_BLACK: u8 = 30;
pub const FG_RED: u8 = 31;
pub const FG_GREEN: u8 = 32;
pub const FG_YELLOW: u8 = 33;
pub const FG_BLUE: u8 = 34;
pub const FG_MAGENTA: u8 = 35;
pub const FG_CYAN: u8 = 36;
pub const FG_WHITE: u8 = 37;
pub const FG_DEFAULT: u8 = 39;
pub const FG_BRIGHT_BLACK: u8 = 90;
pub const FG_BRIGHT_RED: u8 = 91;
pub const FG_BRIGHT_GREEN: u8 = 92;
pub const FG_BRIGHT_YELLOW: u8 = 93;
pub const FG_BRIGHT_BLUE: u8 = 94;
pub const FG_BRIGHT_MAGENTA: u8 = 95;
pub const FG_BRIGHT_CYAN: u8 = 96;
pub const FG_BRIGHT_WHITE: u8 = 97;

/// Basic background color codes (40-47, bright 100-107).
pub const BG_BLACK: u8 = 40;
pub const BG_RED: u8 = 41;
pub const BG_GREEN: u8 = 42;
pub const BG_YELLOW: u8 = 43;
pub const BG_BLUE: u8 = 44;
pub const BG_MAGENTA: u8 = 45;
pub const BG_CYAN: u8 = 46;
pub const BG_WHITE: u8 = 47;
pub const BG_DEFAULT: u8 = 49;
pub const BG_BRIGHT_BLACK: u8 = 100;
pub const BG_BRIGHT_RED: u8 = 101;
pub const BG_BRIGHT_GREEN: u8 = 102;
pub const BG_BRIGHT_YELLOW: u8 = 103;
pub const BG_BRIGHT_BLUE: u8 = 104;
pub const BG_BRIGHT_MAGENTA: u8 = 105;
pub const BG_BRIGHT_CYAN: u8 = 106;
pub const BG_BRIGHT_WHITE: u8 = 107;

/// Underline color reset code.
pub const UL_DEFAULT: u8 = 59;

/// Static `name -> code` lookup for every cataloged parameter.
///
/// Background colors use an `on_` prefix, mirroring common terminal
/// styling vocabularies.
pub static ATTRIBUTES: phf::Map<&'static str, u8> = phf_map! {
    "reset" => RESET,
    "bold" => BOLD,
    "dim" => DIM,
    "italic" => ITALIC,
    "underline" => UNDERLINE,
    "slow_blink" => SLOW_BLINK,
    "rapid_blink" => RAPID_BLINK,
    "invert" => INVERT,
    "conceal" => CONCEAL,
    "strikethrough" => STRIKETHROUGH,
    "double_underline" => DOUBLE_UNDERLINE,
    "normal_intensity" => NORMAL_INTENSITY,
    "not_italic" => NOT_ITALIC,
    "not_underlined" => NOT_UNDERLINED,
    "not_blinking" => NOT_BLINKING,
    "not_reversed" => NOT_REVERSED,
    "reveal" => REVEAL,
    "not_crossed_out" => NOT_CROSSED_OUT,
    "framed" => FRAMED,
    "encircled" => ENCIRCLED,
    "overlined" => OVERLINED,
    "black" => FG_BLACK,
    "red" => FG_RED,
    "green" => FG_GREEN,
    "yellow" => FG_YELLOW,
    "blue" => FG_BLUE,
    "magenta" => FG_MAGENTA,
    "cyan" => FG_CYAN,
    "white" => FG_WHITE,
    "default" => FG_DEFAULT,
    "bright_black" => FG_BRIGHT_BLACK,
    "bright_red" => FG_BRIGHT_RED,
    "bright_green" => FG_BRIGHT_GREEN,
    "bright_yellow" => FG_BRIGHT_YELLOW,
    "bright_blue" => FG_BRIGHT_BLUE,
    "bright_magenta" => FG_BRIGHT_MAGENTA,
    "bright_cyan" => FG_BRIGHT_CYAN,
    "bright_white" => FG_BRIGHT_WHITE,
    "on_black" => BG_BLACK,
    "on_red" => BG_RED,
    "on_green" => BG_GREEN,
    "on_yellow" => BG_YELLOW,
    "on_blue" => BG_BLUE,
    "on_magenta" => BG_MAGENTA,
    "on_cyan" => BG_CYAN,
    "on_white" => BG_WHITE,
    "on_default" => BG_DEFAULT,
    "on_bright_black" => BG_BRIGHT_BLACK,
    "on_bright_red" => BG_BRIGHT_RED,
    "on_bright_green" => BG_BRIGHT_GREEN,
    "on_bright_yellow" => BG_BRIGHT_YELLOW,
    "on_bright_blue" => BG_BRIGHT_BLUE,
    "on_bright_magenta" => BG_BRIGHT_MAGENTA,
    "on_bright_cyan" => BG_BRIGHT_CYAN,
    "on_bright_white" => BG_BRIGHT_WHITE,
};

/// Look up a cataloged parameter code by name.
pub fn lookup(name: &str) -> Option<u8> {
    ATTRIBUTES.get(name).copied()
}

/// The three color channel groups an extended color can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Foreground (text) color.
    Fg,
    /// Background color.
    Bg,
    /// Underline color.
    Ul,
}

impl Mode {
    /// The extended-color selector code (`38`, `48` or `58`).
    pub fn set_code(self) -> u8 {
        match self {
            Mode::Fg => 38,
            Mode::Bg => 48,
            Mode::Ul => 58,
        }
    }

    /// The reset-to-default code for this mode (`39`, `49` or `59`).
    pub fn default_code(self) -> u8 {
        match self {
            Mode::Fg => 39,
            Mode::Bg => 49,
            Mode::Ul => 59,
        }
    }

    fn from_set_code(code: &str) -> Option<Mode> {
        match code {
            "38" => Some(Mode::Fg),
            "48" => Some(Mode::Bg),
            "58" => Some(Mode::Ul),
            _ => None,
        }
    }
}

/// One SGR parameter unit.
///
/// `Display` produces the `;`-joined parameter text as it appears between
/// `ESC[` and `m`; `FromStr` parses and validates one unit, which is how
/// the decoder filters parameter lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Param {
    /// A bare attribute or basic color code.
    Attr(u8),
    /// An indexed color: `38;5;<0-255>`.
    Indexed(Mode, u8),
    /// A true color: `38;2;<r>;<g>;<b>`.
    Rgb(Mode, u8, u8, u8),
}

impl Param {
    /// Returns true for the full-reset parameter (`0`).
    pub fn is_reset(&self) -> bool {
        matches!(self, Param::Attr(RESET))
    }

    /// The escape sequence carrying just this parameter.
    pub fn escape(&self) -> String {
        format!("\x1b[{self}m")
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Attr(code) => write!(f, "{code}"),
            Param::Indexed(mode, n) => write!(f, "{};5;{n}", mode.set_code()),
            Param::Rgb(mode, r, g, b) => write!(f, "{};2;{r};{g};{b}", mode.set_code()),
        }
    }
}

/// Returns true if `code` is valid as a bare parameter (the extended-color
/// selectors 38/48/58 require a payload and are excluded).
fn is_bare_attr(code: u8) -> bool {
    code <= 107 && !matches!(code, 38 | 48 | 58)
}

impl FromStr for Param {
    type Err = ParamParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParamParseError::Empty);
        }
        let parts: Vec<&str> = s.split(';').collect();
        let component = |text: &str| -> Result<u8, ParamParseError> {
            text.parse::<u8>()
                .map_err(|_| ParamParseError::OutOfRange(s.to_string()))
        };
        match parts.as_slice() {
            &[code] => {
                let code = component(code)?;
                if is_bare_attr(code) {
                    Ok(Param::Attr(code))
                } else {
                    Err(ParamParseError::Invalid(s.to_string()))
                }
            }
            &[selector, "5", n] => {
                let mode = Mode::from_set_code(selector)
                    .ok_or_else(|| ParamParseError::Invalid(s.to_string()))?;
                Ok(Param::Indexed(mode, component(n)?))
            }
            &[selector, "2", r, g, b] => {
                let mode = Mode::from_set_code(selector)
                    .ok_or_else(|| ParamParseError::Invalid(s.to_string()))?;
                Ok(Param::Rgb(mode, component(r)?, component(g)?, component(b)?))
            }
            _ => Err(ParamParseError::Invalid(s.to_string())),
        }
    }
}
