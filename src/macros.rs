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

/// The main log entry.
///
/// Formats and emits the message if the logger is enabled for the
/// [level](levels/enum.Severity.html), the current module path is used as the
/// caller.
///
/// Structured fields might be given in brackets before the message.
///
/// # Example
///
/// ```rust
/// #[macro_use]
/// extern crate plumage;
/// use plumage::{Config, Field, Logging, Severity};
///
/// fn main() {
///     let logging = Logging::new(Config {
///         format: "%{module} %{level} %{message}".to_string(),
///         spec: "chain=debug:warn".to_string(),
///     }).unwrap();
///     let logger = logging.logger("chain").unwrap();
///
///     emit!(logger, Severity::Info, "block {} committed", 42);
///     emit!(logger, Severity::Debug, [Field::new("txs", 3)]; "block {} validated", 43);
/// }
/// ```
#[macro_export]
macro_rules! emit {
    ($logger:expr, $level:expr, [$($field:expr),* $(,)*]; $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.is_enabled_for(level) {
            let message = format!($($arg)+);
            let _ = logger.log_at(level, module_path!(), &message, &[$($field),*]);
        }
    }};

    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        $crate::emit!($logger, $level, []; $($arg)+)
    }};
}

/// Produces log record for the `payload` log level.
///
/// See the [emit](macro.emit.html) macro for the details.
#[macro_export]
macro_rules! payload {
    ($logger:expr, $($arg:tt)+) => {
        $crate::emit!($logger, $crate::Severity::Payload, $($arg)+)
    };
}

/// Produces log record for the `debug` log level.
///
/// See the [emit](macro.emit.html) macro for the details.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::emit!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

/// Produces log record for the `info` log level.
///
/// See the [emit](macro.emit.html) macro for the details.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::emit!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Produces log record for the `warn` log level.
///
/// See the [emit](macro.emit.html) macro for the details.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::emit!($logger, $crate::Severity::Warn, $($arg)+)
    };
}

/// Produces log record for the `error` log level.
///
/// See the [emit](macro.emit.html) macro for the details.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::emit!($logger, $crate::Severity::Error, $($arg)+)
    };
}
