//! # Clock
//!
//! Source of "now" for the lot.
//!
//! Elapsed parking time is always `now - check_in`, computed at the moment it
//! is needed. The lot never reads the wall clock directly: it asks a `Clock`,
//! which lets tests and scenario replays move time forward explicitly.

use crate::types::ParkingError;
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// A source of the current instant.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Millisecond resolution; the instant is stored atomically so the clock can
/// be shared with a lot that lives behind a lock elsewhere. The stored value
/// is always a representable `DateTime<Utc>`.
#[derive(Debug)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(start.timestamp_millis()),
        }
    }

    /// Create a clock frozen at the Unix epoch.
    #[must_use]
    pub fn at_epoch() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Jump to an absolute instant (forwards or backwards).
    pub fn set(&self, at: DateTime<Utc>) {
        self.millis.store(at.timestamp_millis(), Ordering::SeqCst);
    }

    /// Move forward by whole minutes.
    ///
    /// Fails, leaving the clock where it was, if the result would fall
    /// outside the range `DateTime<Utc>` can represent.
    pub fn advance_minutes(&self, minutes: u64) -> Result<(), ParkingError> {
        let out_of_range =
            || ParkingError::ClockOutOfRange(format!("cannot advance by {} minutes", minutes));
        let delta = i64::try_from(minutes)
            .ok()
            .and_then(TimeDelta::try_minutes)
            .ok_or_else(out_of_range)?;

        self.millis
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                DateTime::from_timestamp_millis(current)?
                    .checked_add_signed(delta)
                    .map(|next| next.timestamp_millis())
            })
            .map(|_| ())
            .map_err(|_| out_of_range())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis.load(Ordering::SeqCst)).unwrap_or_default()
    }
}

/// Whole minutes from `from` to `to`, truncated; zero if `to` precedes `from`.
#[must_use]
pub fn elapsed_minutes(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    u64::try_from(to.signed_duration_since(from).num_minutes()).unwrap_or(0)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0)
            .single()
            .expect("valid date")
    }

    #[test]
    fn manual_clock_is_frozen() {
        let clock = ManualClock::new(start());
        assert_eq!(clock.now(), start());
        assert_eq!(clock.now(), start());
    }

    #[test]
    fn manual_clock_advances_by_minutes() {
        let clock = ManualClock::new(start());
        clock.advance_minutes(135).expect("in range");
        assert_eq!(elapsed_minutes(start(), clock.now()), 135);
    }

    #[test]
    fn manual_clock_refuses_to_leave_representable_range() {
        let clock = ManualClock::new(start());

        let result = clock.advance_minutes(200_000_000_000);

        assert!(matches!(result, Err(ParkingError::ClockOutOfRange(_))));
        assert_eq!(clock.now(), start());
    }

    #[test]
    fn manual_clock_refuses_minutes_beyond_i64() {
        let clock = ManualClock::new(start());
        assert!(clock.advance_minutes(u64::MAX).is_err());
        assert_eq!(clock.now(), start());
    }

    #[test]
    fn manual_clock_set_jumps() {
        let clock = ManualClock::at_epoch();
        clock.set(start());
        assert_eq!(clock.now(), start());
    }

    #[test]
    fn elapsed_minutes_truncates_seconds() {
        let later = start() + chrono::TimeDelta::seconds(119 * 60 + 59);
        assert_eq!(elapsed_minutes(start(), later), 119);
    }

    #[test]
    fn elapsed_minutes_clamps_negative_to_zero() {
        let earlier = start() - chrono::TimeDelta::minutes(10);
        assert_eq!(elapsed_minutes(start(), earlier), 0);
    }

    #[test]
    fn system_clock_moves_forward() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
