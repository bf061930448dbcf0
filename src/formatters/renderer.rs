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

use crate::formatters::color::Color;
use crate::formatters::sequence::SequenceCounter;
use crate::formatters::verb::{Arg, Verb};
use crate::formatters::PatternError;
use crate::record::{Field, Record};

/// Default layout of `%{time}`.
pub const DEFAULT_TIME_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// What `%{color}` emits.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ColorMode {
    /// Color of the record level.
    Plain,
    /// Bold color of the record level.
    Bold,
    /// Default attributes.
    Reset,
}

/// One compiled element of a pattern.
#[derive(PartialEq, Clone, Debug)]
pub enum Renderer {
    /// Text copied verbatim.
    Literal(String),
    /// `%{level}`, uppercase level name.
    Level(Verb),
    /// `%{message}`.
    Message(Verb),
    /// `%{shortfunc}`, last segment of the caller path.
    ShortFunc(Verb),
    /// `%{time}` with a strftime layout.
    Time(String),
    /// `%{id}`, next value of the sequence counter.
    Sequence(Verb, SequenceCounter),
    /// `%{module}`, logger name.
    Module(Verb),
    /// `%{color}`.
    Color(ColorMode),
}

fn short_func(caller: &str) -> &str {
    let dot = caller.rfind('.').map(|idx| idx + 1);
    let path = caller.rfind("::").map(|idx| idx + 2);
    &caller[dot.max(path).unwrap_or(0)..]
}

impl Renderer {
    /// Builds the renderer for `%{verb:format}`.
    pub fn new(verb: &str, format: &str, sequence: &SequenceCounter) -> Result<Self, PatternError> {
        let renderer = match verb {
            "color" => Renderer::Color(match format {
                "" => ColorMode::Plain,
                "bold" => ColorMode::Bold,
                "reset" => ColorMode::Reset,
                _ => return Err(PatternError::ColorOption(format.to_string())),
            }),
            "level" => Renderer::Level(Verb::new(format, "s")?),
            "message" => Renderer::Message(Verb::new(format, "s")?),
            "shortfunc" => Renderer::ShortFunc(Verb::new(format, "s")?),
            "time" => {
                let layout = if format.is_empty() { DEFAULT_TIME_LAYOUT } else { format };
                if !super::is_valid_time_layout(layout) {
                    return Err(PatternError::TimeLayout(layout.to_string()));
                }
                Renderer::Time(layout.to_string())
            },
            "id" => Renderer::Sequence(Verb::new(format, "d")?, sequence.clone()),
            "module" => Renderer::Module(Verb::new(format, "s")?),
            _ => return Err(PatternError::Verb(verb.to_string())),
        };
        Ok(renderer)
    }

    /// Appends the rendered element to `out`.
    ///
    /// The fields are left to the field encoder.
    pub fn render(&self, out: &mut Vec<u8>, record: &Record, _fields: &[Field]) {
        match *self {
            Renderer::Literal(ref text) => out.extend_from_slice(text.as_bytes()),
            Renderer::Level(ref verb) => verb.write(out, Arg::Str(record.level.capital())),
            Renderer::Message(ref verb) => {
                let message = record.message.strip_suffix('\n').unwrap_or(record.message);
                verb.write(out, Arg::Str(message))
            },
            Renderer::ShortFunc(ref verb) => match record.caller {
                Some(caller) => verb.write(out, Arg::Str(short_func(caller))),
                None => verb.write(out, Arg::Str("(unknown)")),
            },
            Renderer::Time(ref layout) => {
                let _ = write!(out, "{}", record.time.format(layout));
            },
            Renderer::Sequence(ref verb, ref sequence) => verb.write(out, Arg::Uint(sequence.next())),
            Renderer::Module(ref verb) => verb.write(out, Arg::Str(record.name)),
            Renderer::Color(ColorMode::Plain) => Color::for_level(record.level).normal(out),
            Renderer::Color(ColorMode::Bold) => Color::for_level(record.level).bold(out),
            Renderer::Color(ColorMode::Reset) => Color::reset(out),
        }
    }
}
