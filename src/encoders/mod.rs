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

use std::sync::Arc;

use crate::buffer::{Buffer, BufferPool};
use crate::formatters::Formatters;
use crate::record::{Field, Record};

/// `key=value` encoding.
pub mod logfmt;
/// JSON object per record.
pub mod json;

pub use self::json::JsonEncoder;
pub use self::logfmt::LogfmtEncoder;

/// Timestamp layout used by the structured encoders.
pub const TIME_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// Serializes a record and its fields, terminating the output with a newline.
pub trait FieldEncoder: Send + Sync {
    /// Appends the encoded record to `out`.
    fn encode(&self, out: &mut Vec<u8>, record: &Record, fields: &[Field]);
}

/// Renders the pattern and appends the encoded fields.
pub struct FormatEncoder {
    formatters: Arc<Formatters>,
    fields: Box<dyn FieldEncoder>,
    pool: BufferPool,
}

impl FormatEncoder {
    /// The fields are encoded as `key=value` pairs.
    pub fn new(formatters: Arc<Formatters>, pool: BufferPool) -> Self {
        FormatEncoder::with_fields(formatters, Box::new(LogfmtEncoder::fields_only()), pool)
    }

    /// Custom field encoder.
    pub fn with_fields(formatters: Arc<Formatters>, fields: Box<dyn FieldEncoder>, pool: BufferPool) -> Self {
        FormatEncoder {
            formatters: formatters,
            fields: fields,
            pool: pool,
        }
    }

    /// Produces the full line.
    ///
    /// The buffer goes back to the pool once dropped.
    pub fn encode(&self, record: &Record, fields: &[Field]) -> Buffer {
        let mut line = self.pool.get();
        self.formatters.render(&mut line, record, fields);

        let mut encoded = self.pool.get();
        self.fields.encode(&mut encoded, record, fields);
        if !line.is_empty() && encoded.as_slice() != b"\n" {
            line.push(b' ');
        }
        line.extend_from_slice(&encoded);

        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::prelude::*;

    use crate::formatters::{compile_with, SequenceCounter};
    use crate::levels::Severity;

    fn encoder(pattern: &str) -> (FormatEncoder, BufferPool) {
        let formatters = Formatters::new(compile_with(pattern, &SequenceCounter::new()).unwrap());
        let pool = BufferPool::new();
        (FormatEncoder::new(Arc::new(formatters), pool.clone()), pool)
    }

    fn record() -> Record<'static> {
        Record::new(Severity::Info, "peer", "hello\n")
            .at(Utc.with_ymd_and_hms(2017, 5, 14, 10, 20, 30).unwrap())
    }

    #[test]
    fn test_encode_no_fields() {
        let (encoder, _) = encoder("%{level} %{message}");
        let line = encoder.encode(&record(), &[]);
        assert_eq!(line.as_slice(), b"INFO hello\n");
    }

    #[test]
    fn test_encode_fields() {
        let (encoder, pool) = encoder("%{level} %{message}");
        let fields = [Field::new("peer", "p0"), Field::new("height", 42)];
        {
            let line = encoder.encode(&record(), &fields);
            assert_eq!(line.as_slice(), b"INFO hello peer=p0 height=42\n");
            assert_eq!(pool.idle(), 1);
        }
        assert_eq!(pool.idle(), 2);
    }

    #[test]
    fn test_encode_empty_pattern() {
        let (encoder, _) = encoder("");
        let line = encoder.encode(&record(), &[Field::new("a", true)]);
        assert_eq!(line.as_slice(), b"a=true\n");
        let line = encoder.encode(&record(), &[]);
        assert_eq!(line.as_slice(), b"\n");
    }

    #[test]
    fn test_encode_custom_fields() {
        let formatters = Arc::new(Formatters::new(compile_with("%{message}", &SequenceCounter::new()).unwrap()));
        let encoder = FormatEncoder::with_fields(formatters, Box::new(JsonEncoder::fields_only()), BufferPool::new());
        let line = encoder.encode(&record(), &[Field::new("k", "v")]);
        assert_eq!(line.as_slice(), &b"hello {\"k\":\"v\"}\n"[..]);
    }
}
