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

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::levels::Severity;
use crate::spec::{LevelSpec, ParseError};

struct State {
    spec: LevelSpec,
    min: Severity,
    cache: HashMap<String, Severity>,
}

impl State {
    fn new(spec: LevelSpec) -> Self {
        State {
            min: spec.min(),
            spec: spec,
            cache: HashMap::new(),
        }
    }

    // Longest matching prefix: `a.b.c.`, `a.b.c`, `a.b`, `a`, then the default.
    fn calculate(&self, name: &str) -> Severity {
        let mut candidate = String::with_capacity(name.len() + 1);
        candidate.push_str(name);
        candidate.push('.');

        loop {
            if let Some(level) = self.spec.get(&candidate) {
                return level;
            }
            match candidate.rfind('.') {
                Some(idx) if idx > 0 => candidate.truncate(idx),
                _ => return self.spec.default_level(),
            }
        }
    }
}

/// Log levels of the logger hierarchy.
///
/// The level of a logger is deduced from the most specific entry of the
/// active [spec](../spec/index.html), i.e. the level of `foo.bar.qux` is the
/// level of `foo.bar` unless `foo.bar.qux` is set explicitly.
///
/// Resolved levels are cached per logger name, the cache is dropped together
/// with the spec it was computed from.
pub struct LoggerLevels {
    state: RwLock<State>,
}

impl Default for LoggerLevels {
    fn default() -> Self {
        LoggerLevels::new(LevelSpec::default())
    }
}

impl LoggerLevels {
    /// Creates the hierarchy with the given spec.
    pub fn new(spec: LevelSpec) -> Self {
        LoggerLevels {
            state: RwLock::new(State::new(spec)),
        }
    }

    /// Parses and activates the spec.
    ///
    /// The active spec is left untouched if the spec is malformed.
    pub fn activate(&self, spec: &str) -> Result<(), ParseError> {
        let spec = LevelSpec::parse(spec)?;
        self.activate_spec(spec);
        Ok(())
    }

    /// Replaces the active spec and drops all resolved levels.
    pub fn activate_spec(&self, spec: LevelSpec) {
        let mut state = self.state.write();
        *state = State::new(spec);
    }

    /// Level of the logger.
    pub fn level(&self, name: &str) -> Severity {
        if let Some(level) = self.state.read().cache.get(name) {
            return *level;
        }

        let mut state = self.state.write();
        let level = state.calculate(name);
        state.cache.insert(name.to_string(), level);
        level
    }

    /// Checks whether the level might be emitted by any logger.
    #[inline]
    pub fn enabled(&self, level: Severity) -> bool {
        level.enabled(self.state.read().min)
    }

    /// Checks whether the logger emits records of the given level.
    pub fn is_enabled(&self, name: &str, level: Severity) -> bool {
        self.enabled(level) && level.enabled(self.level(name))
    }

    /// The lowest level any logger may emit.
    pub fn min_level(&self) -> Severity {
        self.state.read().min
    }

    /// Level of the loggers not covered by the spec.
    pub fn default_level(&self) -> Severity {
        self.state.read().spec.default_level()
    }

    /// Canonical string form of the active spec.
    pub fn spec(&self) -> String {
        self.state.read().spec.to_string()
    }

    #[cfg(test)]
    fn cached(&self) -> usize {
        self.state.read().cache.len()
    }
}
