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

#![warn(missing_docs)]

//! # Plumage - hierarchical log levels and pattern based log lines
//!
//! The log levels are assigned in a hierarchical manner.
//!
//! The loggers are named with dot separated segments, and if there's no exact
//! match for a requested logger then the closest configured ancestor is used.
//!
//! That means that the log level for `foo.bar.qux` is deduced from the log level
//! for `foo.bar` unless the log level for `foo.bar.qux` is explicitly set.
//!
//! See the [spec](spec/index.html) module for the syntax of the level spec and
//! the [formatters](formatters/index.html) module for the syntax of the line pattern.
//!
//! # Example
//!
//! ```rust
//! #[macro_use]
//! extern crate plumage;
//! use plumage::{Config, Logging, Severity};
//!
//! fn main() {
//!     let logging = Logging::new(Config {
//!         format: "%{color}%{time:%H:%M:%S} %{level:.4s}%{color:reset} [%{module}] %{message}".to_string(),
//!         spec: "gossip=debug:gossip.state=error:info".to_string(),
//!     }).unwrap();
//!
//!     let gossip = logging.logger("gossip").unwrap();
//!     let state = gossip.named("state").unwrap();
//!
//!     assert!(gossip.is_enabled_for(Severity::Debug));
//!     assert!(!state.is_enabled_for(Severity::Warn));
//!
//!     info!(gossip, "{} is saying hello", "plumage");
//!     debug!(state, "I'm invisible");
//! }
//! ```

/// Definition of the log levels.
pub mod levels;
#[doc(inline)]
pub use crate::levels::Severity;

/// Level spec parsing.
pub mod spec;
#[doc(inline)]
pub use crate::spec::{LevelSpec, ParseError};

/// The logger hierarchy.
pub mod logger;
#[doc(inline)]
pub use crate::logger::LoggerLevels;

/// Definition of the log record entry.
pub mod record;
#[doc(inline)]
pub use crate::record::{Field, Record};

/// Pattern compiler and renderers.
pub mod formatters;
#[doc(inline)]
pub use crate::formatters::{compile, compile_with, Formatters, PatternError, Renderer, SequenceCounter};

/// Reusable line buffers.
pub mod buffer;

/// Record serialization.
pub mod encoders;

/// Logging setup.
pub mod logging;
#[doc(inline)]
pub use crate::logging::{Config, Encoding, Logger, Logging, LoggingError};

pub mod bridge;

mod macros;
