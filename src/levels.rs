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

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// Severity of a log record.
///
/// The levels are totally ordered, a record is emitted when its severity is
/// greater or equal to the threshold resolved for its logger.
///
/// `Disabled` sits below everything else and is only used as a threshold
/// sentinel.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub enum Severity {
    /// Threshold that lets nothing through.
    Disabled,
    /// Full message payloads, the most verbose level.
    Payload,
    /// Debugging details.
    Debug,
    /// Regular operation.
    Info,
    /// Something unexpected but recoverable.
    Warn,
    /// Failed operation.
    Error,
    /// Error that panics in development builds.
    DPanic,
    /// Error followed by a panic.
    Panic,
    /// Error followed by process exit.
    Fatal,
}

impl From<Severity> for i8 {
    #[inline(always)]
    fn from(orig: Severity) -> i8 {
        match orig {
            Severity::Disabled => i8::MIN,
            Severity::Payload => -2,
            Severity::Debug => -1,
            Severity::Info => 0,
            Severity::Warn => 1,
            Severity::Error => 2,
            Severity::DPanic => 3,
            Severity::Panic => 4,
            Severity::Fatal => 5,
        }
    }
}

/// Unknown numeric severity.
#[derive(PartialEq, Eq, Clone, Copy, Debug, thiserror::Error)]
#[error("unsupported log level {0}")]
pub struct InvalidSeverity(pub i8);

impl TryFrom<i8> for Severity {
    type Error = InvalidSeverity;

    #[inline(always)]
    fn try_from(orig: i8) -> Result<Severity, InvalidSeverity> {
        match orig {
            i8::MIN => Ok(Severity::Disabled),
            -2 => Ok(Severity::Payload),
            -1 => Ok(Severity::Debug),
            0 => Ok(Severity::Info),
            1 => Ok(Severity::Warn),
            2 => Ok(Severity::Error),
            3 => Ok(Severity::DPanic),
            4 => Ok(Severity::Panic),
            5 => Ok(Severity::Fatal),
            _ => Err(InvalidSeverity(orig)),
        }
    }
}

/// All the severities a record may carry, from the most verbose one.
pub const LEVELS: [Severity; 8] = [
    Severity::Payload,
    Severity::Debug,
    Severity::Info,
    Severity::Warn,
    Severity::Error,
    Severity::DPanic,
    Severity::Panic,
    Severity::Fatal,
];

impl Severity {
    /// Checks whether a record of this severity passes the `threshold`.
    #[inline(always)]
    pub fn enabled(self, threshold: Severity) -> bool {
        self != Severity::Disabled && self >= threshold
    }

    /// Lowercase name, the one used in the level spec.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Disabled => "disabled",
            Severity::Payload => "payload",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::DPanic => "dpanic",
            Severity::Panic => "panic",
            Severity::Fatal => "fatal",
        }
    }

    /// Uppercase name, the one rendered into the log line.
    pub fn capital(self) -> &'static str {
        match self {
            Severity::Disabled => "DISABLED",
            Severity::Payload => "PAYLOAD",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::DPanic => "DPANIC",
            Severity::Panic => "PANIC",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity name that doesn't match any known level.
#[derive(PartialEq, Eq, Clone, Debug, thiserror::Error)]
#[error("invalid log level: {0}")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(level: &str) -> Result<Severity, UnknownSeverity> {
        const NAMES: [(&str, Severity); 9] = [
            ("payload", Severity::Payload),
            ("debug", Severity::Debug),
            ("info", Severity::Info),
            ("warning", Severity::Warn),
            ("warn", Severity::Warn),
            ("error", Severity::Error),
            ("dpanic", Severity::DPanic),
            ("panic", Severity::Panic),
            ("fatal", Severity::Fatal),
        ];
        NAMES.iter()
            .find(|&&(name, _)| name.eq_ignore_ascii_case(level))
            .map(|&(_, severity)| severity)
            .ok_or_else(|| UnknownSeverity(level.to_string()))
    }
}
