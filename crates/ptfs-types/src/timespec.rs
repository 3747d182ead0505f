use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// A point in time as seconds and nanoseconds since the Unix epoch.
///
/// `nsec` is passed through untouched in both directions, so values outside
/// `0..1_000_000_000` (the native "now"/"omit" markers) survive the trip to
/// `utimens`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timespec {
    pub sec: i64,
    pub nsec: i64,
}

impl Timespec {
    pub const fn new(sec: i64, nsec: i64) -> Self {
        Self { sec, nsec }
    }
}

impl From<SystemTime> for Timespec {
    fn from(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(d) => Self::new(d.as_secs() as i64, i64::from(d.subsec_nanos())),
            Err(e) => {
                // Before the epoch: keep nsec non-negative by borrowing a second.
                let d = e.duration();
                let sec = -(d.as_secs() as i64);
                match d.subsec_nanos() {
                    0 => Self::new(sec, 0),
                    n => Self::new(sec - 1, 1_000_000_000 - i64::from(n)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_from_system_time() {
        let time = UNIX_EPOCH + Duration::new(2000, 500);
        assert_eq!(Timespec::from(time), Timespec::new(2000, 500));
    }

    #[test]
    fn test_before_epoch() {
        let time = UNIX_EPOCH - Duration::new(1, 250);
        assert_eq!(Timespec::from(time), Timespec::new(-2, 999_999_750));

        let time = UNIX_EPOCH - Duration::from_secs(3);
        assert_eq!(Timespec::from(time), Timespec::new(-3, 0));
    }
}
