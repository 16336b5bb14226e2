/// A process-scoped, monotonically non-decreasing millisecond counter.
///
/// Each call to [`TickSource::next_tick`] samples the underlying
/// [`crate::TimeSource`]. If the sample is strictly greater than the last
/// tick it becomes the new tick, otherwise the last tick is returned
/// unchanged. A stale, coarse or regressing clock therefore stalls the tick
/// but never moves it backwards.
pub trait TickSource {
    /// Samples the clock and returns the current tick.
    fn next_tick(&self) -> u64;

    /// Returns the most recent tick without sampling the clock.
    fn last_tick(&self) -> u64;
}

impl<K: TickSource + ?Sized> TickSource for &K {
    fn next_tick(&self) -> u64 {
        (**self).next_tick()
    }

    fn last_tick(&self) -> u64 {
        (**self).last_tick()
    }
}

impl<K: TickSource + ?Sized> TickSource for std::sync::Arc<K> {
    fn next_tick(&self) -> u64 {
        (**self).next_tick()
    }

    fn last_tick(&self) -> u64 {
        (**self).last_tick()
    }
}
