use crate::counters::CounterArray;
use crate::sync::{thread, Arc};
use std::io;

/// One benchmark thread hammering a single counter.
pub(crate) struct Worker {
    name: String,
    counters: Arc<CounterArray>,
    index: usize,
    iterations: u64,
}

impl Worker {
    pub fn new(name: String, counters: Arc<CounterArray>, index: usize, iterations: u64) -> Self {
        Self { name, counters, index, iterations }
    }

    /// Spawn the worker thread. The handle yields the number of increments performed.
    ///
    /// The caller must not start two workers on the same index at the same time.
    pub fn start(self) -> io::Result<thread::JoinHandle<u64>> {
        let Worker { name, counters, index, iterations } = self;

        let closure = move || {
            for _ in 0..iterations {
                // SAFETY: every worker of a scenario owns a distinct index.
                unsafe { counters.increment(index) };
            }
            iterations
        };

        Self::build_thread(name, closure)
    }

    fn build_thread<C: FnOnce() -> u64 + Send + 'static>(name: String, closure: C) -> io::Result<thread::JoinHandle<u64>> {
        thread::Builder::new()
            .name(name)
            .spawn(closure)
    }
}
