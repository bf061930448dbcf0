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

//! The level spec defines the default log level and the levels of the
//! individual loggers.
//!
//! # Plain spec
//!
//! The spec string has a form of:
//!
//! ```ignore
//! segment[:segment]...
//! ```
//!
//! where each `segment` is either a bare level which sets the default level,
//! or `logger[,logger]...=level` which sets the level of the listed loggers
//! and of all their descendants.
//!
//! For example `xx.yy.zz=panic:debug:aa.bb=error` sets the default level to
//! `debug`, `xx.yy.zz` and everything below it to `panic` and `aa.bb` and
//! everything below it to `error`.
//!
//! The level must be one of `payload`, `debug`, `info`, `warn` (or `warning`),
//! `error`, `dpanic`, `panic` or `fatal`, case doesn't matter.
//!
//! A logger name followed by a dot (`aa.bb.`) matches exactly that logger and
//! not its descendants.
//!
//! If the default level is not specified it is `info`.
//!
//! # JSON spec
//!
//! The same settings might be given as a JSON object:
//!
//! ```json
//! {
//!     "level": "<default level>",
//!     "loggers": {
//!         "<logger name>": "<logger level>",
//!         ...
//!     }
//! }
//! ```
//!
//! Both fields are optional.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::levels::Severity;

lazy_static! {
    static ref LOGGER_NAME: Regex = Regex::new(r"^[[:alnum:]_#:-]+(\.[[:alnum:]_#:-]+)*$")
        .expect("logger name regex");
}

/// Checks that the name is made of dot separated segments of alphanumerics,
/// `_`, `#`, `:` and `-`.
#[inline]
pub fn is_valid_logger_name(name: &str) -> bool {
    LOGGER_NAME.is_match(name)
}

/// Log spec parse failure.
///
/// The whole spec is rejected on the first invalid segment.
#[derive(PartialEq, Eq, Clone, Debug, thiserror::Error)]
pub enum ParseError {
    /// A `=` segment without the logger name.
    #[error("invalid logging specification '{spec}': no logger specified in segment '{segment}'")]
    NoLogger {
        /// The whole spec.
        spec: String,
        /// The offending segment.
        segment: String,
    },
    /// Unknown level or more than one `=`.
    #[error("invalid logging specification '{spec}': bad segment '{segment}'")]
    Segment {
        /// The whole spec.
        spec: String,
        /// The offending segment.
        segment: String,
    },
    /// Logger name with forbidden characters or empty segments.
    #[error("invalid logging specification '{spec}': bad logger name '{name}'")]
    LoggerName {
        /// The whole spec.
        spec: String,
        /// The offending logger name.
        name: String,
    },
    /// Malformed JSON spec.
    #[error("invalid logging specification '{spec}': bad json spec ({reason})")]
    Json {
        /// The whole spec.
        spec: String,
        /// What is wrong with the JSON.
        reason: String,
    },
}

/// Parsed level spec.
///
/// The default level is applied to every logger without a matching entry.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct LevelSpec {
    default: Severity,
    loggers: HashMap<String, Severity>,
}

impl Default for LevelSpec {
    fn default() -> Self {
        LevelSpec::with_default(Severity::Info)
    }
}

impl LevelSpec {
    /// Spec without per-logger entries.
    pub fn with_default(level: Severity) -> Self {
        LevelSpec {
            default: level,
            loggers: HashMap::new(),
        }
    }

    /// Adds (or replaces) the level of a logger.
    pub fn logger(mut self, name: &str, level: Severity) -> Self {
        self.loggers.insert(name.to_string(), level);
        self
    }

    /// Level for the loggers without a matching entry.
    #[inline]
    pub fn default_level(&self) -> Severity {
        self.default
    }

    /// Level explicitly assigned to the logger, without any inheritance.
    #[inline]
    pub fn get(&self, name: &str) -> Option<Severity> {
        self.loggers.get(name).cloned()
    }

    /// Per-logger entries.
    pub fn loggers(&self) -> &HashMap<String, Severity> {
        &self.loggers
    }

    /// The lowest level mentioned anywhere in the spec.
    pub fn min(&self) -> Severity {
        self.loggers.values()
            .fold(self.default, |min, level| if *level < min { *level } else { min })
    }

    /// Parses either a plain or a JSON spec.
    pub fn parse(spec: &str) -> Result<Self, ParseError> {
        if spec.trim_start().starts_with('{') {
            return parse_json(spec);
        }

        let mut root = LevelSpec::default();
        for segment in spec.split(':') {
            parse_segment(&mut root, spec, segment)?;
        }

        Ok(root)
    }
}

impl FromStr for LevelSpec {
    type Err = ParseError;

    fn from_str(spec: &str) -> Result<Self, ParseError> {
        LevelSpec::parse(spec)
    }
}

/// Canonical form: `name=level` pairs sorted by name followed by the default level.
impl fmt::Display for LevelSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut names: Vec<_> = self.loggers.keys().collect();
        names.sort();
        for name in names {
            write!(f, "{}={}:", name, self.loggers[name])?;
        }
        write!(f, "{}", self.default)
    }
}

fn bad_segment(spec: &str, segment: &str) -> ParseError {
    ParseError::Segment {
        spec: spec.to_string(),
        segment: segment.to_string(),
    }
}

fn check_name(spec: &str, name: &str) -> Result<(), ParseError> {
    // A trailing dot pins the level to the logger itself.
    let bare = name.strip_suffix('.').unwrap_or(name);
    if is_valid_logger_name(bare) {
        Ok(())
    } else {
        Err(ParseError::LoggerName {
            spec: spec.to_string(),
            name: name.to_string(),
        })
    }
}

fn parse_segment(root: &mut LevelSpec, spec: &str, segment: &str) -> Result<(), ParseError> {
    let mut kv = segment.split('=');
    let (names, level) = (kv.next().unwrap_or(""), kv.next());

    if kv.next().is_some() {
        return Err(bad_segment(spec, segment));
    }

    match level {
        None => {
            if segment.is_empty() {
                return Ok(());
            }
            root.default = segment.parse()
                .map_err(|_| bad_segment(spec, segment))?;
        },
        Some(level) => {
            if names.is_empty() {
                return Err(ParseError::NoLogger {
                    spec: spec.to_string(),
                    segment: segment.to_string(),
                });
            }
            let level: Severity = level.parse()
                .map_err(|_| bad_segment(spec, segment))?;
            for name in names.split(',') {
                check_name(spec, name)?;
                root.loggers.insert(name.to_string(), level);
            }
        },
    }

    Ok(())
}

fn parse_json(spec: &str) -> Result<LevelSpec, ParseError> {
    let json_err = |reason: &str| ParseError::Json {
        spec: spec.to_string(),
        reason: reason.to_string(),
    };
    let parse_level = |level: &Value| -> Result<Severity, ParseError> {
        level.as_str()
            .ok_or_else(|| json_err("level must be a string"))?
            .parse()
            .map_err(|err: crate::levels::UnknownSeverity| json_err(&err.to_string()))
    };

    let value: Value = serde_json::from_str(spec)
        .map_err(|err| json_err(&err.to_string()))?;
    let object = value.as_object()
        .ok_or_else(|| json_err("root must be an object"))?;

    let mut root = LevelSpec::default();
    for (key, value) in object {
        match key.as_str() {
            "level" => root.default = parse_level(value)?,
            "loggers" => {
                let loggers = value.as_object()
                    .ok_or_else(|| json_err("loggers must be an object"))?;
                for (name, level) in loggers {
                    check_name(spec, name)?;
                    root.loggers.insert(name.clone(), parse_level(level)?);
                }
            },
            other => return Err(json_err(&format!("unknown field '{}'", other))),
        }
    }

    Ok(root)
}
