use crate::{TXID_EPOCH, TimeSource};
use core::time::Duration;
use portable_atomic::{AtomicU64, Ordering};
use std::{
    sync::{Arc, OnceLock},
    thread::{self, JoinHandle},
    time::{Instant, SystemTime},
};

/// Shared ticker thread that updates every millisecond.
#[derive(Debug)]
struct SharedTickerInner {
    current: AtomicU64,
    _handle: OnceLock<JoinHandle<()>>,
}

/// A coarse monotonic time source: milliseconds elapsed since construction,
/// offset so that readings line up with a fixed epoch.
///
/// The wall clock is read exactly once, at construction, to compute the
/// offset. After that, a background thread publishes the elapsed monotonic
/// time (`Instant`) into a shared atomic once per millisecond, so readings are
/// a single atomic load and never follow NTP steps or manual clock changes.
///
/// Clones share the same ticker thread. The thread exits once the last clone
/// is dropped.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    inner: Arc<SharedTickerInner>,
    epoch_offset: u64, // in milliseconds
}

impl Default for MonotonicClock {
    /// Constructs a monotonic clock aligned to [`TXID_EPOCH`].
    fn default() -> Self {
        Self::with_epoch(TXID_EPOCH)
    }
}

impl MonotonicClock {
    /// Constructs a monotonic clock whose zero point is `epoch`, given as a
    /// [`Duration`] since 1970-01-01 UTC.
    ///
    /// If the system clock reads earlier than `epoch` the offset saturates to
    /// zero and readings count from construction instead.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use txid::{MonotonicClock, TimeSource};
    ///
    /// let now = std::time::SystemTime::now()
    ///     .duration_since(std::time::UNIX_EPOCH)
    ///     .unwrap();
    /// let clock = MonotonicClock::with_epoch(now);
    ///
    /// std::thread::sleep(Duration::from_millis(5));
    ///
    /// // Typically close to 5, possibly a tick behind. Never backwards.
    /// let ts = clock.current_millis();
    /// assert!(ts < 60_000);
    /// ```
    pub fn with_epoch(epoch: Duration) -> Self {
        let start = Instant::now();
        let offset = SystemTime::UNIX_EPOCH
            .elapsed()
            .ok()
            .and_then(|now| now.checked_sub(epoch))
            .map_or(0, |since| since.as_millis() as u64);

        let inner = Arc::new(SharedTickerInner {
            current: AtomicU64::new(0),
            _handle: OnceLock::new(),
        });

        let weak_inner = Arc::downgrade(&inner);
        let handle = thread::Builder::new()
            .name("txid-clock".into())
            .spawn(move || {
                let mut tick = 0;

                loop {
                    let Some(inner_ref) = weak_inner.upgrade() else {
                        break;
                    };

                    // Absolute target time of the next tick
                    let target = start + Duration::from_millis(tick);

                    let now = Instant::now();
                    if now < target {
                        thread::sleep(target - now);
                    }

                    let now_ms = start.elapsed().as_millis() as u64;
                    inner_ref.current.store(now_ms, Ordering::Relaxed);

                    tick = now_ms + 1;
                }
            });

        match handle {
            Ok(handle) => {
                let _ = inner._handle.set(handle);
            }
            Err(_e) => {
                // Without a ticker the clock stays pinned at the offset, and
                // txids still carry full entropy.
                #[cfg(feature = "tracing")]
                tracing::error!("failed to spawn txid clock thread: {_e}");
            }
        }

        Self {
            inner,
            epoch_offset: offset,
        }
    }

    /// Milliseconds between the epoch and the moment this clock was built.
    pub fn epoch_offset(&self) -> u64 {
        self.epoch_offset
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> u64 {
        self.epoch_offset + self.inner.current.load(Ordering::Relaxed)
    }
}
