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

//! Pattern based log line formatting.
//!
//! A pattern is a text with the verbs `%{verb}` or `%{verb:format}` embedded:
//!
//! * `%{color}`, `%{color:bold}`, `%{color:reset}` - ANSI color of the level;
//! * `%{level}` - level name;
//! * `%{message}` - log message;
//! * `%{module}` - logger name;
//! * `%{shortfunc}` - function the log was emitted from;
//! * `%{time}` - timestamp, the format is a strftime layout;
//! * `%{id}` - sequence number of the record.
//!
//! For every verb but `color` and `time` the format is a `printf`-like
//! conversion without the leading `%`, i.e. `%{level:.4s}` or `%{id:03x}`.
//!
//! The rest of the pattern is copied verbatim.

use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use lazy_static::lazy_static;
use parking_lot::Mutex;
use regex::Regex;

use crate::record::{Field, Record};

/// ANSI colors.
pub mod color;
/// Record sequence counter.
pub mod sequence;
/// `printf`-like conversions.
pub mod verb;
/// Pattern elements.
pub mod renderer;

pub use self::renderer::{ColorMode, Renderer};
pub use self::sequence::SequenceCounter;
pub use self::verb::Verb;

lazy_static! {
    static ref VERB: Regex = Regex::new(r"%\{(color|id|level|message|module|shortfunc|time)(?::(.*?))?\}")
        .expect("pattern regex");
}

/// Pattern compilation failure.
#[derive(PartialEq, Eq, Clone, Debug, thiserror::Error)]
pub enum PatternError {
    /// Unknown verb.
    #[error("unknown verb: {0}")]
    Verb(String),
    /// `%{color}` option other than `bold` or `reset`.
    #[error("invalid color option: {0}")]
    ColorOption(String),
    /// Malformed strftime layout of `%{time}`.
    #[error("invalid time layout: {0}")]
    TimeLayout(String),
    /// Width or precision above one million.
    #[error("invalid conversion: {0}")]
    Conversion(String),
}

fn is_valid_time_layout(layout: &str) -> bool {
    StrftimeItems::new(layout).all(|item| !matches!(item, Item::Error))
}

/// Compiled pattern, shared by all the renders.
pub type Pattern = Arc<[Renderer]>;

/// Compiles the pattern, `%{id}` renderers use the process wide counter.
pub fn compile(pattern: &str) -> Result<Vec<Renderer>, PatternError> {
    compile_with(pattern, &SequenceCounter::global())
}

/// Compiles the pattern with the given sequence counter.
pub fn compile_with(pattern: &str, sequence: &SequenceCounter) -> Result<Vec<Renderer>, PatternError> {
    let mut cursor = 0;
    let mut renderers = Vec::new();

    for caps in VERB.captures_iter(pattern) {
        let (start, end) = match caps.get(0) {
            Some(m) => (m.start(), m.end()),
            None => continue,
        };
        if start > cursor {
            renderers.push(Renderer::Literal(pattern[cursor..start].to_string()));
        }

        let verb = caps.get(1).map_or("", |m| m.as_str());
        let format = caps.get(2).map_or("", |m| m.as_str());
        renderers.push(Renderer::new(verb, format, sequence)?);
        cursor = end;
    }

    if cursor != pattern.len() {
        renderers.push(Renderer::Literal(pattern[cursor..].to_string()));
    }

    Ok(renderers)
}

/// Swappable compiled pattern.
///
/// Renders in progress keep using the pattern they started with.
pub struct Formatters {
    pattern: Mutex<Pattern>,
}

impl Default for Formatters {
    fn default() -> Self {
        Formatters::new(Vec::new())
    }
}

impl Formatters {
    /// Wraps compiled renderers.
    pub fn new(renderers: Vec<Renderer>) -> Self {
        Formatters {
            pattern: Mutex::new(renderers.into()),
        }
    }

    /// Replaces the pattern.
    pub fn set(&self, renderers: Vec<Renderer>) {
        *self.pattern.lock() = renderers.into();
    }

    /// The current pattern.
    #[inline]
    pub fn pattern(&self) -> Pattern {
        self.pattern.lock().clone()
    }

    /// Renders the record with the current pattern.
    pub fn render(&self, out: &mut Vec<u8>, record: &Record, fields: &[Field]) {
        let pattern = self.pattern();
        for renderer in pattern.iter() {
            renderer.render(out, record, fields);
        }
    }
}
