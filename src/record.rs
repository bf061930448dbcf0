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

use chrono::prelude::*;
use serde_json::Value;

use crate::levels::Severity;

/// Log record that holds information where log was recorded
/// and the message details.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    /// Log level of the record.
    pub level: Severity,
    /// Name of the logger, dot separated.
    pub name: &'a str,
    /// User log message.
    pub message: &'a str,
    /// Timestamp.
    pub time: DateTime<FixedOffset>,
    /// Path of the function the record was emitted from, if known.
    pub caller: Option<&'a str>,
}

impl<'a> Record<'a> {
    /// Record stamped with the current local time.
    #[inline]
    pub fn new(level: Severity, name: &'a str, message: &'a str) -> Self {
        Record {
            level: level,
            name: name,
            message: message,
            time: Local::now().into(),
            caller: None,
        }
    }

    /// Overrides the timestamp.
    pub fn at<Tz: TimeZone>(mut self, time: DateTime<Tz>) -> Self {
        self.time = time.fixed_offset();
        self
    }

    /// Sets the call-site.
    pub fn caller(mut self, caller: &'a str) -> Self {
        self.caller = Some(caller);
        self
    }
}

/// Structured key/value attached to a record.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    /// Key.
    pub key: String,
    /// Value.
    pub value: Value,
}

impl Field {
    /// Creates a field out of anything convertible into a JSON value.
    pub fn new<K: Into<String>, V: Into<Value>>(key: K, value: V) -> Self {
        Field {
            key: key.into(),
            value: value.into(),
        }
    }
}
