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

use std::io::Write;

use crate::levels::Severity;

/// ANSI foreground colors.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Color {
    /// Default attributes.
    None = 0,
    /// Black.
    Black = 30,
    /// Red.
    Red,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
    /// Blue.
    Blue,
    /// Magenta.
    Magenta,
    /// Cyan.
    Cyan,
    /// White.
    White,
}

impl Color {
    /// Color of the records of the given level.
    pub fn for_level(level: Severity) -> Self {
        match level {
            Severity::Debug => Color::Cyan,
            Severity::Info => Color::Blue,
            Severity::Warn => Color::Yellow,
            Severity::Error => Color::Red,
            Severity::DPanic | Severity::Panic | Severity::Fatal => Color::Magenta,
            _ => Color::None,
        }
    }

    /// Switches the foreground color.
    ///
    /// The color stays active until reset.
    #[inline]
    pub fn normal(self, out: &mut Vec<u8>) {
        let _ = write!(out, "\x1b[{}m", self as u8);
    }

    /// Switches the foreground color and makes the text bold.
    #[inline]
    pub fn bold(self, out: &mut Vec<u8>) {
        if self == Color::None {
            self.normal(out);
        } else {
            let _ = write!(out, "\x1b[{};1m", self as u8);
        }
    }

    /// Restores the default attributes.
    #[inline]
    pub fn reset(out: &mut Vec<u8>) {
        Color::None.normal(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn out<F: Fn(&mut Vec<u8>)>(f: F) -> String {
        let mut out = Vec::new();
        f(&mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_color_escapes() {
        assert_eq!(out(|o| Color::Red.normal(o)), "\x1b[31m");
        assert_eq!(out(|o| Color::Red.bold(o)), "\x1b[31;1m");
        assert_eq!(out(|o| Color::None.normal(o)), "\x1b[0m");
        assert_eq!(out(|o| Color::None.bold(o)), "\x1b[0m");
        assert_eq!(out(|o| Color::reset(o)), "\x1b[0m");
        assert_eq!(Color::White as u8, 37);
    }

    #[test]
    fn test_color_palette() {
        assert_eq!(Color::for_level(Severity::Payload), Color::None);
        assert_eq!(Color::for_level(Severity::Debug), Color::Cyan);
        assert_eq!(Color::for_level(Severity::Info), Color::Blue);
        assert_eq!(Color::for_level(Severity::Warn), Color::Yellow);
        assert_eq!(Color::for_level(Severity::Error), Color::Red);
        assert_eq!(Color::for_level(Severity::DPanic), Color::Magenta);
        assert_eq!(Color::for_level(Severity::Panic), Color::Magenta);
        assert_eq!(Color::for_level(Severity::Fatal), Color::Magenta);
    }
}
