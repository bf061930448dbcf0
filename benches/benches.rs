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


#[macro_use]
extern crate bencher;

#[macro_use]
extern crate plumage;

mod pb {
    use bencher::Bencher;

    use plumage::{Config, Logging, LoggerLevels, Record, Severity};
    use plumage::buffer::BufferPool;
    use plumage::encoders::FormatEncoder;
    use plumage::formatters::{compile_with, Formatters, SequenceCounter};

    use std::io;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    const THREADS_QTY: usize = 4;
    const FOO_LOGGERS_QTY: usize = 10;
    const PATTERN: &str = "%{color}%{time:%H:%M:%S%.3f} [%{module}] %{shortfunc} -> %{level:.4s} %{id:03x}%{color:reset} %{message}";

    struct LThreads {
        threads: Vec<thread::JoinHandle<()>>,
        stop: Arc<AtomicBool>,
    }

    impl LThreads {
        fn new(f: Arc<dyn Fn() + Sync + Send>) -> Self {
            let mut threads = Vec::new();
            let stop = Arc::new(AtomicBool::new(false));
            for _ in 0..THREADS_QTY {
                let stop = stop.clone();
                let f = f.clone();
                threads.push(thread::spawn(move || {
                    while !stop.load(Ordering::Acquire) {
                        thread::yield_now();
                        f();
                    }
                }));
            }
            LThreads { threads, stop }
        }

        fn join(&mut self) {
            self.stop.store(true, Ordering::Release);
            for t in self.threads.drain(..) {
                t.join().unwrap();
            }
        }
    }

    impl Drop for LThreads {
        fn drop(&mut self) {
            self.join();
        }
    }

    fn foo_spec() -> String {
        let mut spec = String::new();
        for idx in 0..FOO_LOGGERS_QTY {
            spec.push_str(&format!("foo.bar.qux.{}=debug:", idx));
        }
        spec.push_str("error");
        spec
    }

    fn levels() -> Arc<LoggerLevels> {
        let levels = LoggerLevels::default();
        levels.activate(&foo_spec()).unwrap();
        Arc::new(levels)
    }

    fn logging() -> Arc<Logging> {
        let logging = Logging::new(Config {
            format: PATTERN.to_string(),
            spec: foo_spec(),
        }).unwrap();
        logging.set_writer(Box::new(io::sink()));
        logging
    }

    // Level resolution
    fn bench_resolve_cached_single_thread(b: &mut Bencher) {
        let levels = levels();
        levels.level("foo.bar.qux.5.baz");
        b.iter(|| levels.level("foo.bar.qux.5.baz"));
    }

    fn bench_resolve_uncached_single_thread(b: &mut Bencher) {
        let levels = levels();
        let spec = foo_spec();
        b.iter(|| {
            levels.activate(&spec).unwrap();
            levels.level("foo.bar.qux.5.baz")
        });
    }

    fn bench_resolve_cached_multi_thread(b: &mut Bencher) {
        let levels = levels();
        let tlevels = levels.clone();
        let t = LThreads::new(Arc::new(move || { tlevels.level("foo.bar.qux.7"); }));
        b.iter(|| levels.level("foo.bar.qux.5.baz"));
        drop(t);
    }

    // Rendering
    fn bench_render_pattern(b: &mut Bencher) {
        let formatters = Formatters::new(compile_with(PATTERN, &SequenceCounter::new()).unwrap());
        let mut out = Vec::with_capacity(256);
        b.iter(|| {
            out.clear();
            let record = Record::new(Severity::Warn, "foo.bar", "the quick brown fox").caller("pb::bench_render_pattern");
            formatters.render(&mut out, &record, &[]);
        });
    }

    fn bench_encode_pooled(b: &mut Bencher) {
        let formatters = Arc::new(Formatters::new(compile_with(PATTERN, &SequenceCounter::new()).unwrap()));
        let encoder = FormatEncoder::new(formatters, BufferPool::new());
        b.iter(|| {
            let record = Record::new(Severity::Warn, "foo.bar", "the quick brown fox");
            encoder.encode(&record, &[]).len()
        });
    }

    // Drop output
    fn bench_output_drop_disabled_single_thread(b: &mut Bencher) {
        let logging = logging();
        let logger = logging.logger("foo.bar.qux.5").unwrap();
        b.iter(|| payload!(logger, "{:?} -> {}", thread::current(), "test"));
    }

    fn bench_output_drop_single_thread(b: &mut Bencher) {
        let logging = logging();
        let logger = logging.logger("foo.bar.qux.5").unwrap();
        b.iter(|| error!(logger, "{:?} -> {}", thread::current(), "test"));
    }

    fn bench_output_drop_multi_thread(b: &mut Bencher) {
        let logging = logging();
        let logger = logging.logger("foo.bar.qux.5").unwrap();
        let tlogger = logger.clone();
        let t = LThreads::new(Arc::new(move || { error!(tlogger, "{:?} -> {}", thread::current(), "test"); }));
        b.iter(|| error!(logger, "{:?} -> {}", thread::current(), "test"));
        drop(t);
    }

    benchmark_group!(
        benches,

        bench_resolve_cached_single_thread,
        bench_resolve_uncached_single_thread,
        bench_resolve_cached_multi_thread,

        bench_render_pattern,
        bench_encode_pooled,

        bench_output_drop_disabled_single_thread,
        bench_output_drop_single_thread,
        bench_output_drop_multi_thread
    );
}
benchmark_main!(pb::benches);
