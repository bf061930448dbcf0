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

use std::mem;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crossbeam::queue::SegQueue;

const PREALLOC: usize = 256;
// Buffers grown beyond this are not recycled.
const MAX_RETAINED: usize = 64 * 1024;

/// Free list of line buffers.
///
/// Clones share the same list.
#[derive(Clone, Default)]
pub struct BufferPool {
    free: Arc<SegQueue<Vec<u8>>>,
}

impl BufferPool {
    /// Empty pool.
    pub fn new() -> Self {
        BufferPool {
            free: Arc::new(SegQueue::new()),
        }
    }

    /// Takes a cleared buffer out of the pool, allocating one if it's empty.
    #[inline]
    pub fn get(&self) -> Buffer {
        let buf = self.free.pop()
            .unwrap_or_else(|| Vec::with_capacity(PREALLOC));
        Buffer {
            buf: buf,
            pool: self.clone(),
        }
    }

    /// Number of idle buffers.
    pub fn idle(&self) -> usize {
        self.free.len()
    }

    fn put(&self, mut buf: Vec<u8>) {
        if buf.capacity() == 0 || buf.capacity() > MAX_RETAINED {
            return;
        }
        buf.clear();
        self.free.push(buf);
    }
}

/// Buffer borrowed from a [`BufferPool`], given back on drop.
pub struct Buffer {
    buf: Vec<u8>,
    pool: BufferPool,
}

impl Buffer {
    /// Detaches the bytes from the pool.
    pub fn into_vec(mut self) -> Vec<u8> {
        mem::take(&mut self.buf)
    }
}

impl Deref for Buffer {
    type Target = Vec<u8>;

    #[inline(always)]
    fn deref(&self) -> &Vec<u8> {
        &self.buf
    }
}

impl DerefMut for Buffer {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        self.pool.put(mem::take(&mut self.buf));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;

    #[test]
    fn test_pool_reuse() {
        let pool = BufferPool::new();
        assert_eq!(pool.idle(), 0);
        {
            let mut buf = pool.get();
            buf.extend_from_slice(b"hello");
            assert_eq!(pool.idle(), 0);
        }
        assert_eq!(pool.idle(), 1);

        let buf = pool.get();
        assert!(buf.is_empty());
        assert!(buf.capacity() >= 5);
        assert_eq!(pool.idle(), 0);

        assert_eq!(buf.into_vec().capacity() >= 5, true);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_pool_oversized() {
        let pool = BufferPool::new();
        {
            let mut buf = pool.get();
            buf.resize(MAX_RETAINED + 1, b'x');
        }
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_pool_threads() {
        let pool = BufferPool::new();
        let mut threads = Vec::new();
        for idx in 0..16u8 {
            let pool = pool.clone();
            threads.push(thread::spawn(move || {
                for _ in 0..100 {
                    let mut buf = pool.get();
                    assert!(buf.is_empty());
                    buf.push(idx);
                    thread::yield_now();
                    assert_eq!(buf.as_slice(), &[idx]);
                }
            }));
        }
        for th in threads {
            th.join().unwrap();
        }
        assert!(pool.idle() <= 16);
    }
}
