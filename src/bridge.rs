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

//! Bridge from the [log](https://docs.rs/log) facade.
//!
//! The target of a `log` record becomes the logger name with `::`
//! replaced by `.`, the module path becomes the caller.
//!
//! # Example
//!
//! ```rust
//! use plumage::{bridge, Config, Logging};
//!
//! let logging = Logging::new(Config {
//!     spec: "my_app.db=debug:warn".to_string(),
//!     ..Default::default()
//! }).unwrap();
//! bridge::install(logging).unwrap();
//!
//! log::warn!("It's alive!");
//! ```

use std::sync::Arc;

use crate::levels::Severity;
use crate::logging::Logging;
use crate::record::Record;

/// [log::Log](https://docs.rs/log/*/log/trait.Log.html) backed by [Logging](../struct.Logging.html).
pub struct LogBridge {
    logging: Arc<Logging>,
}

/// Maps the facade level.
pub fn severity(level: log::Level) -> Severity {
    match level {
        log::Level::Trace => Severity::Payload,
        log::Level::Debug => Severity::Debug,
        log::Level::Info => Severity::Info,
        log::Level::Warn => Severity::Warn,
        log::Level::Error => Severity::Error,
    }
}

/// The most verbose facade level any logger may emit.
pub fn max_level(logging: &Logging) -> log::LevelFilter {
    match logging.levels().min_level() {
        Severity::Disabled | Severity::Payload => log::LevelFilter::Trace,
        Severity::Debug => log::LevelFilter::Debug,
        Severity::Info => log::LevelFilter::Info,
        Severity::Warn => log::LevelFilter::Warn,
        Severity::Error => log::LevelFilter::Error,
        _ => log::LevelFilter::Off,
    }
}

/// Logger name of the facade target.
pub fn logger_name(target: &str) -> String {
    target.replace("::", ".")
}

impl LogBridge {
    /// Wraps the logging.
    pub fn new(logging: Arc<Logging>) -> Self {
        LogBridge { logging: logging }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.logging.check(&logger_name(metadata.target()), severity(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        let level = severity(record.level());
        if !self.logging.levels().enabled(level) {
            return;
        }

        let name = logger_name(record.target());
        let message = record.args().to_string();
        let mut entry = Record::new(level, &name, &message);
        if let Some(module) = record.module_path() {
            entry = entry.caller(module);
        }
        let _ = self.logging.write_record(&entry, &[]);
    }

    fn flush(&self) {
        let _ = self.logging.flush();
    }
}

/// Registers the bridge as the global `log` logger.
///
/// The maximum facade level follows the active spec, call
/// [sync_max_level](fn.sync_max_level.html) after activating another one.
pub fn install(logging: Arc<Logging>) -> Result<(), log::SetLoggerError> {
    sync_max_level(&logging);
    log::set_boxed_logger(Box::new(LogBridge::new(logging)))
}

/// Aligns the facade maximum level with the active spec.
pub fn sync_max_level(logging: &Logging) {
    log::set_max_level(max_level(logging));
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::{self, Write};

    use log::Log;
    use parking_lot::Mutex;

    use crate::formatters::SequenceCounter;
    use crate::logging::Config;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn bridge(spec: &str) -> (LogBridge, Capture) {
        let config = Config {
            format: "%{module} %{shortfunc} %{level} %{message}".to_string(),
            spec: spec.to_string(),
        };
        let logging = Logging::with_sequence(config, SequenceCounter::new()).unwrap();
        let capture = Capture::default();
        logging.set_writer(Box::new(capture.clone()));
        (LogBridge::new(logging), capture)
    }

    #[test]
    fn test_bridge_levels() {
        assert_eq!(severity(log::Level::Trace), Severity::Payload);
        assert_eq!(severity(log::Level::Error), Severity::Error);
        assert_eq!(logger_name("my_app::db::pool"), "my_app.db.pool");

        let (levels, _) = bridge("warn:a=debug");
        assert_eq!(max_level(&levels.logging), log::LevelFilter::Debug);
        let (levels, _) = bridge("fatal");
        assert_eq!(max_level(&levels.logging), log::LevelFilter::Off);
        let (levels, _) = bridge("payload");
        assert_eq!(max_level(&levels.logging), log::LevelFilter::Trace);
    }

    #[test]
    fn test_bridge_log() {
        let (db, out) = bridge("my_app.db=debug:warn");
        let metadata = log::Metadata::builder()
            .level(log::Level::Debug)
            .target("my_app::db")
            .build();
        assert!(db.enabled(&metadata));

        db.log(&log::Record::builder()
                .args(format_args!("connected to {}", "pg"))
                .level(log::Level::Debug)
                .target("my_app::db")
                .module_path(Some("my_app::db::connect"))
                .build());
        db.log(&log::Record::builder()
                .args(format_args!("hidden"))
                .level(log::Level::Info)
                .target("my_app::http")
                .build());
        db.flush();

        let out = String::from_utf8(out.0.lock().clone()).unwrap();
        assert_eq!(out, "my_app.db connect DEBUG connected to pg\n");
    }
}
