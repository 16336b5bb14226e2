use crate::{TickSource, TimeSource};
use portable_atomic::{AtomicU64, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// A lock-free, thread-safe [`TickSource`].
///
/// The last tick lives in an [`AtomicU64`] and is advanced with `fetch_max`,
/// so concurrent callers racing with different clock samples can only ever
/// raise it. A caller that loses the race returns the winner's (larger)
/// value.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Monotonic non-decreasing across all threads sharing the ticker
/// - ✅ Lock-free (one atomic RMW per call)
///
/// ## See Also
/// - [`crate::BasicTicker`]
#[derive(Debug)]
pub struct AtomicTicker<T> {
    #[cfg(feature = "cache-padded")]
    last: crossbeam_utils::CachePadded<AtomicU64>,
    #[cfg(not(feature = "cache-padded"))]
    last: AtomicU64,
    time: T,
}

impl<T: TimeSource> AtomicTicker<T> {
    /// Creates a ticker starting at zero.
    ///
    /// # Example
    /// ```
    /// use txid::{AtomicTicker, MonotonicClock, TickSource};
    ///
    /// let ticker = AtomicTicker::new(MonotonicClock::default());
    /// let a = ticker.next_tick();
    /// let b = ticker.next_tick();
    /// assert!(b >= a);
    /// ```
    pub fn new(time: T) -> Self {
        Self::from_tick(0, time)
    }

    /// Creates a ticker that will never report less than `tick`.
    pub fn from_tick(tick: u64, time: T) -> Self {
        Self {
            #[cfg(feature = "cache-padded")]
            last: crossbeam_utils::CachePadded::new(AtomicU64::new(tick)),
            #[cfg(not(feature = "cache-padded"))]
            last: AtomicU64::new(tick),
            time,
        }
    }

    /// The underlying time source.
    pub fn time(&self) -> &T {
        &self.time
    }
}

impl<T: TimeSource> TickSource for AtomicTicker<T> {
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    fn next_tick(&self) -> u64 {
        let now = self.time.current_millis();
        let prev = self.last.fetch_max(now, Ordering::Relaxed);
        prev.max(now)
    }

    fn last_tick(&self) -> u64 {
        self.last.load(Ordering::Relaxed)
    }
}
