use crate::{TXID_EPOCH, TimeSource};
use core::time::Duration;
use std::time::SystemTime;

/// Reads the wall clock on every call.
///
/// Unlike [`crate::MonotonicClock`] this follows NTP steps and manual clock
/// changes, so consecutive readings may go backwards. Readings before the
/// configured epoch saturate to zero.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    epoch: Duration,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::with_epoch(TXID_EPOCH)
    }
}

impl SystemClock {
    /// Creates a wall clock measuring milliseconds since `epoch`, given as a
    /// [`Duration`] since 1970-01-01 UTC.
    pub const fn with_epoch(epoch: Duration) -> Self {
        Self { epoch }
    }
}

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        SystemTime::UNIX_EPOCH
            .elapsed()
            .ok()
            .and_then(|now| now.checked_sub(self.epoch))
            .map_or(0, |since| since.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_millis_since_unix_epoch() {
        let before = SystemTime::UNIX_EPOCH.elapsed().unwrap().as_millis() as u64;
        let now = SystemClock::default().current_millis();
        let after = SystemTime::UNIX_EPOCH.elapsed().unwrap().as_millis() as u64;
        assert!(before <= now && now <= after);
    }

    #[test]
    fn future_epoch_saturates_to_zero() {
        let far_future = Duration::from_secs(u64::MAX / 2);
        assert_eq!(SystemClock::with_epoch(far_future).current_millis(), 0);
    }
}
