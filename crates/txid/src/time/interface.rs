use core::time::Duration;

/// Default origin for txid ticks: the Unix epoch, Thursday, January 1, 1970
/// 00:00:00 UTC.
pub const TXID_EPOCH: Duration = Duration::from_millis(0);

/// A trait for time sources that return a coarse millisecond timestamp.
///
/// This abstraction allows you to plug in a real system clock, a monotonic
/// timer, or a mocked time source in tests. Implementations are free to be
/// coarse, to return cached values, or even to step backwards; the
/// [`crate::TickSource`] layered on top smooths that out.
///
/// # Example
///
/// ```
/// use txid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the source's epoch.
    fn current_millis(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}
