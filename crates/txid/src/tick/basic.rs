use crate::{TickSource, TimeSource};
use core::cell::Cell;

/// A single-threaded [`TickSource`].
///
/// Holds the last tick in a [`Cell`], so it is `Send` but not `Sync`. Use it
/// when each worker owns its generator outright, e.g. one generator per
/// worker process or per thread. For a generator shared between threads use
/// [`crate::AtomicTicker`].
#[derive(Debug)]
pub struct BasicTicker<T> {
    last: Cell<u64>,
    time: T,
}

impl<T: TimeSource> BasicTicker<T> {
    /// Creates a ticker starting at zero.
    pub fn new(time: T) -> Self {
        Self::from_tick(0, time)
    }

    /// Creates a ticker that will never report less than `tick`.
    pub fn from_tick(tick: u64, time: T) -> Self {
        Self {
            last: Cell::new(tick),
            time,
        }
    }

    /// The underlying time source.
    pub fn time(&self) -> &T {
        &self.time
    }
}

impl<T: TimeSource> TickSource for BasicTicker<T> {
    fn next_tick(&self) -> u64 {
        let now = self.time.current_millis();
        if now > self.last.get() {
            self.last.set(now);
        }
        self.last.get()
    }

    fn last_tick(&self) -> u64 {
        self.last.get()
    }
}
