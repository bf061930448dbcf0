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

use serde::Serialize;

use crate::encoders::{FieldEncoder, TIME_LAYOUT};
use crate::record::{Field, Record};

/// Encodes each record as a single line JSON object.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonEncoder {
    fields_only: bool,
}

impl JsonEncoder {
    /// Emits `level`, `ts`, `name`, `caller` and `msg` before the fields.
    pub fn new() -> Self {
        JsonEncoder { fields_only: false }
    }

    /// Emits only the fields.
    pub fn fields_only() -> Self {
        JsonEncoder { fields_only: true }
    }
}

fn write_entry<V: Serialize + ?Sized>(out: &mut Vec<u8>, start: usize, key: &str, value: &V) {
    if out.len() > start {
        out.push(b',');
    }
    let _ = serde_json::to_writer(&mut *out, key);
    out.push(b':');
    let _ = serde_json::to_writer(&mut *out, value);
}

impl FieldEncoder for JsonEncoder {
    fn encode(&self, out: &mut Vec<u8>, record: &Record, fields: &[Field]) {
        out.push(b'{');
        let start = out.len();
        if !self.fields_only {
            write_entry(out, start, "level", record.level.as_str());
            write_entry(out, start, "ts", &record.time.format(TIME_LAYOUT).to_string());
            write_entry(out, start, "name", record.name);
            if let Some(caller) = record.caller {
                write_entry(out, start, "caller", caller);
            }
            write_entry(out, start, "msg", record.message);
        }
        for field in fields {
            write_entry(out, start, &field.key, &field.value);
        }
        out.extend_from_slice(b"}\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::prelude::*;
    use serde_json::{json, Value};

    use crate::levels::Severity;

    #[test]
    fn test_json_entry() {
        let record = Record::new(Severity::Error, "peer", "boom \"x\"")
            .at(Utc.with_ymd_and_hms(2017, 5, 14, 10, 20, 30).unwrap());
        let mut out = Vec::new();
        JsonEncoder::new().encode(&mut out, &record, &[Field::new("n", 1), Field::new("o", json!({"a": [true]}))]);

        assert_eq!(out.last(), Some(&b'\n'));
        assert_eq!(String::from_utf8(out.clone()).unwrap(),
                   "{\"level\":\"error\",\"ts\":\"2017-05-14T10:20:30.000+00:00\",\"name\":\"peer\",\
                    \"msg\":\"boom \\\"x\\\"\",\"n\":1,\"o\":{\"a\":[true]}}\n");
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["msg"], "boom \"x\"");
    }

    #[test]
    fn test_json_fields_only() {
        let record = Record::new(Severity::Info, "peer", "msg").caller("a::b");
        let mut out = Vec::new();
        JsonEncoder::fields_only().encode(&mut out, &record, &[]);
        assert_eq!(out.as_slice(), b"{}\n");
    }
}
