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

use serde_json::Value;

use crate::encoders::{FieldEncoder, TIME_LAYOUT};
use crate::record::{Field, Record};

/// Encodes records as `key=value` pairs.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogfmtEncoder {
    fields_only: bool,
}

impl LogfmtEncoder {
    /// Emits `ts`, `level`, `name`, `caller` and `msg` before the fields.
    pub fn new() -> Self {
        LogfmtEncoder { fields_only: false }
    }

    /// Emits only the fields.
    pub fn fields_only() -> Self {
        LogfmtEncoder { fields_only: true }
    }
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty() || value.chars().any(|c| c <= ' ' || c == '=' || c == '"' || c.is_control())
}

fn write_str(out: &mut Vec<u8>, value: &str) {
    if needs_quotes(value) {
        let _ = serde_json::to_writer(&mut *out, value);
    } else {
        out.extend_from_slice(value.as_bytes());
    }
}

fn write_pair(out: &mut Vec<u8>, start: usize, key: &str, value: &Value) {
    if out.len() > start {
        out.push(b' ');
    }
    write_str(out, key);
    out.push(b'=');
    match *value {
        Value::String(ref value) => write_str(out, value),
        Value::Array(_) | Value::Object(_) => write_str(out, &value.to_string()),
        ref value => {
            let _ = write!(out, "{}", value);
        },
    }
}

impl FieldEncoder for LogfmtEncoder {
    fn encode(&self, out: &mut Vec<u8>, record: &Record, fields: &[Field]) {
        let start = out.len();
        if !self.fields_only {
            write_pair(out, start, "ts", &Value::String(record.time.format(TIME_LAYOUT).to_string()));
            write_pair(out, start, "level", &Value::String(record.level.to_string()));
            write_pair(out, start, "name", &Value::String(record.name.to_string()));
            if let Some(caller) = record.caller {
                write_pair(out, start, "caller", &Value::String(caller.to_string()));
            }
            write_pair(out, start, "msg", &Value::String(record.message.to_string()));
        }
        for field in fields {
            write_pair(out, start, &field.key, &field.value);
        }
        out.push(b'\n');
    }
}
