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

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lazy_static::lazy_static;

lazy_static! {
    static ref SEQUENCE: SequenceCounter = SequenceCounter::new();
}

/// Monotonic record counter shared by the `%{id}` renderers.
///
/// Clones share the same counter.
#[derive(Clone, Default)]
pub struct SequenceCounter {
    value: Arc<AtomicU64>,
}

impl SequenceCounter {
    /// Independent counter starting from zero.
    pub fn new() -> Self {
        SequenceCounter {
            value: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The process wide counter.
    pub fn global() -> Self {
        SEQUENCE.clone()
    }

    /// Increments the counter and returns the new value.
    #[inline(always)]
    pub fn next(&self) -> u64 {
        self.value.fetch_add(1, Ordering::SeqCst).wrapping_add(1)
    }

    /// Current value.
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::SeqCst)
    }

    /// Restarts the counter, the next id is `value + 1`.
    pub fn set(&self, value: u64) {
        self.value.store(value, Ordering::SeqCst);
    }
}

impl PartialEq for SequenceCounter {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for SequenceCounter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SequenceCounter({})", self.get())
    }
}
