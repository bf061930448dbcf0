// Copyright 2017 Dmytro Milinevskyi <dmilinevskyi@gmail.com>

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

// http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A small `printf`-like conversion applied to a single value.
//!
//! The syntax is `%[flags][width][.precision]verb` with the flags `-`, `+`,
//! `#`, `0` and space.
//!
//! Strings support the `s`, `v`, `q`, `x` and `X` verbs, unsigned integers
//! support `d`, `v`, `x`, `X`, `o`, `b`, `f`, `e` and `c`.
//! Anything following the verb is copied as is.
//!
//! Width and precision are limited to one million.

use std::io::Write;

use crate::formatters::PatternError;

const MAX_WIDTH: usize = 1_000_000;

/// A value to be formatted.
#[derive(Clone, Copy, Debug)]
pub enum Arg<'a> {
    /// Text.
    Str(&'a str),
    /// Counter.
    Uint(u64),
}

/// Compiled conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verb {
    spec: String,
    minus: bool,
    plus: bool,
    sharp: bool,
    zero: bool,
    space: bool,
    width: Option<usize>,
    precision: Option<usize>,
    verb: Option<char>,
    suffix: String,
}

fn digits(chars: &[char], pos: &mut usize) -> Option<usize> {
    let start = *pos;
    let mut value: usize = 0;
    while *pos < chars.len() {
        match chars[*pos].to_digit(10) {
            Some(digit) => value = value.saturating_mul(10).saturating_add(digit as usize),
            None => break,
        }
        *pos += 1;
    }
    if *pos > start { Some(value) } else { None }
}

impl Verb {
    /// Compiles `%` followed by `format`, or by `default` if `format` is empty.
    pub fn new(format: &str, default: &str) -> Result<Self, PatternError> {
        let format = if format.is_empty() { default } else { format };
        let chars: Vec<char> = format.chars().collect();
        let mut verb = Verb {
            spec: format!("%{}", format),
            minus: false,
            plus: false,
            sharp: false,
            zero: false,
            space: false,
            width: None,
            precision: None,
            verb: None,
            suffix: String::new(),
        };

        let mut pos = 0;
        while pos < chars.len() {
            match chars[pos] {
                '-' => verb.minus = true,
                '+' => verb.plus = true,
                '#' => verb.sharp = true,
                '0' => verb.zero = true,
                ' ' => verb.space = true,
                _ => break,
            }
            pos += 1;
        }
        verb.width = digits(&chars, &mut pos);
        if pos < chars.len() && chars[pos] == '.' {
            pos += 1;
            verb.precision = Some(digits(&chars, &mut pos).unwrap_or(0));
        }
        if pos < chars.len() {
            verb.verb = Some(chars[pos]);
            verb.suffix = chars[pos + 1..].iter().collect();
        }

        let too_large = |value: Option<usize>| value.map_or(false, |value| value > MAX_WIDTH);
        if too_large(verb.width) || too_large(verb.precision) {
            return Err(PatternError::Conversion(verb.spec));
        }

        Ok(verb)
    }

    /// The conversion as it was written, including the leading `%`.
    pub fn as_str(&self) -> &str {
        &self.spec
    }

    /// Appends the formatted value.
    pub fn write(&self, out: &mut Vec<u8>, arg: Arg) {
        let verb = match self.verb {
            Some(verb) => verb,
            None => {
                out.extend_from_slice(b"%!(NOVERB)");
                return;
            },
        };

        match arg {
            Arg::Str(value) => self.write_str(out, verb, value),
            Arg::Uint(value) => self.write_uint(out, verb, value),
        }
        out.extend_from_slice(self.suffix.as_bytes());
    }

    fn write_str(&self, out: &mut Vec<u8>, verb: char, value: &str) {
        let text = match verb {
            'q' => format!("{:?}", self.truncate(value)),
            'x' => hex(self.truncate_bytes(value), false, self.sharp),
            'X' => hex(self.truncate_bytes(value), true, self.sharp),
            _ => self.truncate(value).to_string(),
        };
        self.pad(out, "", &text, self.zero);
    }

    fn write_uint(&self, out: &mut Vec<u8>, verb: char, value: u64) {
        let (prefix, body) = match verb {
            'x' => (if self.sharp { "0x" } else { "" }, format!("{:x}", value)),
            'X' => (if self.sharp { "0X" } else { "" }, format!("{:X}", value)),
            'o' => (if self.sharp { "0" } else { "" }, format!("{:o}", value)),
            'b' => ("", format!("{:b}", value)),
            'c' => ("", std::char::from_u32(value as u32).unwrap_or('\u{fffd}').to_string()),
            'f' | 'F' => ("", format!("{:.*}", self.precision.unwrap_or(6), value as f64)),
            'e' => ("", format!("{:.*e}", self.precision.unwrap_or(6), value as f64)),
            _ => ("", format!("{}", value)),
        };
        let integer = !matches!(verb, 'f' | 'F' | 'e' | 'c');
        let body = match self.precision {
            Some(precision) if integer && body.len() < precision => {
                format!("{}{}", "0".repeat(precision - body.len()), body)
            },
            _ => body,
        };
        let sign = if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        };
        // Precision disables zero padding of integers.
        let zero = self.zero && !(integer && self.precision.is_some());
        self.pad(out, &format!("{}{}", sign, prefix), &body, zero);
    }

    fn truncate<'a>(&self, value: &'a str) -> &'a str {
        match self.precision {
            Some(precision) => match value.char_indices().nth(precision) {
                Some((idx, _)) => &value[..idx],
                None => value,
            },
            None => value,
        }
    }

    fn truncate_bytes<'a>(&self, value: &'a str) -> &'a [u8] {
        let bytes = value.as_bytes();
        match self.precision {
            Some(precision) if precision < bytes.len() => &bytes[..precision],
            _ => bytes,
        }
    }

    fn pad(&self, out: &mut Vec<u8>, prefix: &str, body: &str, zero: bool) {
        let len = prefix.chars().count() + body.chars().count();
        let fill = self.width.map_or(0, |width| width.saturating_sub(len));

        if self.minus {
            out.extend_from_slice(prefix.as_bytes());
            out.extend_from_slice(body.as_bytes());
            out.resize(out.len() + fill, b' ');
        } else if zero {
            out.extend_from_slice(prefix.as_bytes());
            out.resize(out.len() + fill, b'0');
            out.extend_from_slice(body.as_bytes());
        } else {
            out.resize(out.len() + fill, b' ');
            let _ = write!(out, "{}{}", prefix, body);
        }
    }
}

fn hex(bytes: &[u8], upper: bool, sharp: bool) -> String {
    let mut text = String::with_capacity(bytes.len() * 2 + 2);
    if sharp {
        text.push_str(if upper { "0X" } else { "0x" });
    }
    for byte in bytes {
        if upper {
            text.push_str(&format!("{:02X}", byte));
        } else {
            text.push_str(&format!("{:02x}", byte));
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(format: &str, arg: Arg) -> String {
        let mut out = Vec::new();
        Verb::new(format, "v").unwrap().write(&mut out, arg);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_verb_default() {
        assert_eq!(Verb::new("", "s").unwrap().as_str(), "%s");
        assert_eq!(Verb::new(".4s", "s").unwrap().as_str(), "%.4s");
        assert_eq!(Verb::new("", "d"), Verb::new("d", "s"));
    }

    #[test]
    fn test_verb_str() {
        assert_eq!(fmt("s", Arg::Str("DEBUG")), "DEBUG");
        assert_eq!(fmt(".4s", Arg::Str("DEBUG")), "DEBU");
        assert_eq!(fmt(".4s", Arg::Str("INFO")), "INFO");
        assert_eq!(fmt(".4s", Arg::Str("WARN")), "WARN");
        assert_eq!(fmt("6s", Arg::Str("abc")), "   abc");
        assert_eq!(fmt("-6s", Arg::Str("abc")), "abc   ");
        assert_eq!(fmt("06s", Arg::Str("abc")), "000abc");
        assert_eq!(fmt("2s", Arg::Str("abcd")), "abcd");
        assert_eq!(fmt("q", Arg::Str("a\"b")), "\"a\\\"b\"");
        assert_eq!(fmt("x", Arg::Str("hi")), "6869");
        assert_eq!(fmt("s]", Arg::Str("hi")), "hi]");
        assert_eq!(fmt("4", Arg::Str("hi")), "%!(NOVERB)");
        assert_eq!(fmt(".2s", Arg::Str("ünï")), "ün");
    }

    #[test]
    fn test_verb_uint() {
        assert_eq!(fmt("d", Arg::Uint(42)), "42");
        assert_eq!(fmt("03x", Arg::Uint(10)), "00a");
        assert_eq!(fmt("03x", Arg::Uint(4096)), "1000");
        assert_eq!(fmt("#x", Arg::Uint(255)), "0xff");
        assert_eq!(fmt("X", Arg::Uint(255)), "FF");
        assert_eq!(fmt("o", Arg::Uint(8)), "10");
        assert_eq!(fmt("b", Arg::Uint(5)), "101");
        assert_eq!(fmt("+d", Arg::Uint(5)), "+5");
        assert_eq!(fmt("5d", Arg::Uint(42)), "   42");
        assert_eq!(fmt("-5d|", Arg::Uint(42)), "42   |");
        assert_eq!(fmt(".3d", Arg::Uint(7)), "007");
        assert_eq!(fmt(".4f", Arg::Uint(1)), "1.0000");
        assert_eq!(fmt("v", Arg::Uint(1)), "1");
        assert_eq!(fmt("05.3d", Arg::Uint(7)), "  007");
        assert_eq!(fmt("-05.3d|", Arg::Uint(7)), "007  |");
        assert_eq!(fmt("08.2f", Arg::Uint(1)), "00001.00");
        assert_eq!(fmt("05d", Arg::Uint(7)), "00007");
    }

    #[test]
    fn test_verb_limits() {
        assert_eq!(Verb::new("1000001s", "s"), Err(PatternError::Conversion("%1000001s".to_string())));
        assert_eq!(Verb::new(".1000001d", "d"), Err(PatternError::Conversion("%.1000001d".to_string())));
        assert!(Verb::new("99999999999999999999999s", "s").is_err());
        assert!(Verb::new("1000000.1000000s", "s").is_ok());

        let mut out = Vec::new();
        Verb::new("12s", "s").unwrap().write(&mut out, Arg::Str("x"));
        assert_eq!(out.len(), 12);
    }
}
