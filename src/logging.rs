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

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::buffer::{Buffer, BufferPool};
use crate::encoders::{FieldEncoder, FormatEncoder, JsonEncoder, LogfmtEncoder};
use crate::formatters::{compile_with, Formatters, PatternError, SequenceCounter};
use crate::levels::Severity;
use crate::logger::LoggerLevels;
use crate::record::{Field, Record};
use crate::spec::{is_valid_logger_name, LevelSpec, ParseError};

/// Pattern used when the configuration doesn't define one.
pub const DEFAULT_FORMAT: &str = "%{color}%{time:%Y-%m-%d %H:%M:%S%.3f %Z} [%{module}] %{shortfunc} -> %{level:.4s} %{id:03x}%{color:reset} %{message}";

/// Spec used when the configuration doesn't define one.
pub const DEFAULT_SPEC: &str = "info";

/// How the records are serialized.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Pattern followed by `key=value` fields.
    Console,
    /// One JSON object per record.
    Json,
    /// `key=value` pairs only.
    Logfmt,
}

/// Logging configuration.
///
/// The `format` is either a [pattern](formatters/index.html), `json` or `logfmt`.
/// The `spec` is a level [spec](spec/index.html).
#[derive(PartialEq, Eq, Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Line format, [DEFAULT_FORMAT](constant.DEFAULT_FORMAT.html) if empty.
    pub format: String,
    /// Level spec, [DEFAULT_SPEC](constant.DEFAULT_SPEC.html) if empty.
    pub spec: String,
}

impl Config {
    /// Reads the configuration from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, LoggingError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Logging setup failure.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Malformed level spec.
    #[error(transparent)]
    Spec(#[from] ParseError),
    /// Malformed pattern.
    #[error(transparent)]
    Pattern(#[from] PatternError),
    /// Logger name with forbidden characters or empty segments.
    #[error("invalid logger name: {0}")]
    LoggerName(String),
    /// Unreadable configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// Sink failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Sink of the formatted records.
pub type Writer = Box<dyn Write + Send>;

enum Format {
    Pattern(Vec<crate::formatters::Renderer>),
    Json,
    Logfmt,
}

/// Levels, format and sink tied together.
pub struct Logging {
    levels: LoggerLevels,
    formatters: Arc<Formatters>,
    sequence: SequenceCounter,
    console: FormatEncoder,
    json: JsonEncoder,
    logfmt: LogfmtEncoder,
    pool: BufferPool,
    encoding: RwLock<Encoding>,
    writer: Mutex<Writer>,
}

impl Logging {
    /// Applies the configuration to a fresh instance writing into `stderr`.
    pub fn new(config: Config) -> Result<Arc<Self>, LoggingError> {
        Logging::with_sequence(config, SequenceCounter::global())
    }

    /// Like [new](#method.new) but `%{id}` is taken from the given counter.
    pub fn with_sequence(config: Config, sequence: SequenceCounter) -> Result<Arc<Self>, LoggingError> {
        let formatters = Arc::new(Formatters::default());
        let pool = BufferPool::new();
        let logging = Logging {
            levels: LoggerLevels::default(),
            console: FormatEncoder::new(formatters.clone(), pool.clone()),
            formatters: formatters,
            sequence: sequence,
            json: JsonEncoder::new(),
            logfmt: LogfmtEncoder::new(),
            pool: pool,
            encoding: RwLock::new(Encoding::Console),
            writer: Mutex::new(Box::new(io::stderr())),
        };
        logging.apply(config)?;
        Ok(Arc::new(logging))
    }

    /// Replaces format and levels.
    ///
    /// Nothing changes if any of them is malformed.
    pub fn apply(&self, config: Config) -> Result<(), LoggingError> {
        let format = self.prepare_format(&config.format)?;
        let spec = if config.spec.is_empty() { DEFAULT_SPEC } else { &config.spec };
        let spec = LevelSpec::parse(spec)?;

        self.install_format(format);
        self.levels.activate_spec(spec);
        Ok(())
    }

    fn prepare_format(&self, format: &str) -> Result<Format, PatternError> {
        match format {
            "" => Ok(Format::Pattern(compile_with(DEFAULT_FORMAT, &self.sequence)?)),
            "json" => Ok(Format::Json),
            "logfmt" => Ok(Format::Logfmt),
            pattern => Ok(Format::Pattern(compile_with(pattern, &self.sequence)?)),
        }
    }

    fn install_format(&self, format: Format) {
        let mut encoding = self.encoding.write();
        *encoding = match format {
            Format::Pattern(renderers) => {
                self.formatters.set(renderers);
                Encoding::Console
            },
            Format::Json => Encoding::Json,
            Format::Logfmt => Encoding::Logfmt,
        };
    }

    /// Sets the line format, see [Config](struct.Config.html).
    pub fn set_format(&self, format: &str) -> Result<(), PatternError> {
        let format = self.prepare_format(format)?;
        self.install_format(format);
        Ok(())
    }

    /// Activates the level spec.
    pub fn activate_spec(&self, spec: &str) -> Result<(), ParseError> {
        self.levels.activate(spec)
    }

    /// The logger levels.
    #[inline]
    pub fn levels(&self) -> &LoggerLevels {
        &self.levels
    }

    /// Current encoding.
    pub fn encoding(&self) -> Encoding {
        *self.encoding.read()
    }

    /// Replaces the sink returning the previous one.
    pub fn set_writer(&self, writer: Writer) -> Writer {
        std::mem::replace(&mut *self.writer.lock(), writer)
    }

    /// Writes raw bytes into the sink.
    pub fn write(&self, buf: &[u8]) -> io::Result<()> {
        self.writer.lock().write_all(buf)
    }

    /// Flushes the sink.
    pub fn flush(&self) -> io::Result<()> {
        self.writer.lock().flush()
    }

    /// Checks whether the logger emits records of the given level.
    #[inline]
    pub fn check(&self, name: &str, level: Severity) -> bool {
        self.levels.is_enabled(name, level)
    }

    /// Serializes the record with the current encoding.
    pub fn encode(&self, record: &Record, fields: &[Field]) -> Buffer {
        match self.encoding() {
            Encoding::Console => self.console.encode(record, fields),
            Encoding::Json => self.encode_with(&self.json, record, fields),
            Encoding::Logfmt => self.encode_with(&self.logfmt, record, fields),
        }
    }

    fn encode_with(&self, encoder: &dyn FieldEncoder, record: &Record, fields: &[Field]) -> Buffer {
        let mut buf = self.pool.get();
        encoder.encode(&mut buf, record, fields);
        buf
    }

    /// Emits the record if its logger is enabled for its level.
    ///
    /// The sink is flushed after `panic` and `fatal` records.
    pub fn write_record(&self, record: &Record, fields: &[Field]) -> io::Result<()> {
        if !self.check(record.name, record.level) {
            return Ok(());
        }

        let buf = self.encode(record, fields);
        let mut writer = self.writer.lock();
        writer.write_all(&buf)?;
        if record.level >= Severity::Panic {
            writer.flush()?;
        }
        Ok(())
    }

    /// Logger with the given name.
    pub fn logger(self: &Arc<Self>, name: &str) -> Result<Logger, LoggingError> {
        if !is_valid_logger_name(name) {
            return Err(LoggingError::LoggerName(name.to_string()));
        }
        Ok(Logger {
            name: name.to_string(),
            logging: self.clone(),
        })
    }
}

/// Named handle to the [Logging](struct.Logging.html).
#[derive(Clone)]
pub struct Logger {
    name: String,
    logging: Arc<Logging>,
}

impl Logger {
    /// Name of the logger.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Child logger, the names are joined with a dot.
    pub fn named(&self, name: &str) -> Result<Logger, LoggingError> {
        self.logging.logger(&format!("{}.{}", self.name, name))
    }

    /// Checks whether the records of the level are emitted.
    #[inline]
    pub fn is_enabled_for(&self, level: Severity) -> bool {
        self.logging.check(&self.name, level)
    }

    /// Emits the message with the fields.
    pub fn log(&self, level: Severity, message: &str, fields: &[Field]) -> io::Result<()> {
        let record = Record::new(level, &self.name, message);
        self.logging.write_record(&record, fields)
    }

    /// Emits the message on behalf of the `caller` function.
    pub fn log_at(&self, level: Severity, caller: &str, message: &str, fields: &[Field]) -> io::Result<()> {
        let record = Record::new(level, &self.name, message).caller(caller);
        self.logging.write_record(&record, fields)
    }

    /// Emits the message at the `debug` level, sink errors are ignored.
    pub fn debug(&self, message: &str) {
        let _ = self.log(Severity::Debug, message, &[]);
    }

    /// Emits the message at the `info` level, sink errors are ignored.
    pub fn info(&self, message: &str) {
        let _ = self.log(Severity::Info, message, &[]);
    }

    /// Emits the message at the `warn` level, sink errors are ignored.
    pub fn warn(&self, message: &str) {
        let _ = self.log(Severity::Warn, message, &[]);
    }

    /// Emits the message at the `error` level, sink errors are ignored.
    pub fn error(&self, message: &str) {
        let _ = self.log(Severity::Error, message, &[]);
    }
}
