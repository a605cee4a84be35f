//! Time keeping for the watchface
//!
//! The watch counts local wall time as seconds since the epoch, so the
//! hour of day is read from a [`Timestamp`] as if it were UTC. The phone
//! reports real UTC epochs, which [`TzOffset`] converts.

use core::ops::{Add, Sub};

use chrono::{NaiveTime, Timelike};

pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Seconds on the watch's local clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    pub const fn as_secs(self) -> i64 {
        self.0
    }

    /// Wall-clock time of day
    pub fn time_of_day(self) -> NaiveTime {
        NaiveTime::from_num_seconds_from_midnight_opt(
            self.0.rem_euclid(SECONDS_PER_DAY) as u32,
            0,
        )
        .unwrap_or_default()
    }

    pub fn hour(self) -> u32 {
        self.time_of_day().hour()
    }

    pub fn minute(self) -> u32 {
        self.time_of_day().minute()
    }
}

impl Add<i64> for Timestamp {
    type Output = Timestamp;

    fn add(self, secs: i64) -> Timestamp {
        Timestamp(self.0 + secs)
    }
}

impl Sub<i64> for Timestamp {
    type Output = Timestamp;

    fn sub(self, secs: i64) -> Timestamp {
        Timestamp(self.0 - secs)
    }
}

impl Sub for Timestamp {
    type Output = i64;

    fn sub(self, earlier: Timestamp) -> i64 {
        self.0 - earlier.0
    }
}

/// Difference between the real UTC epoch and the watch clock, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TzOffset(i32);

impl TzOffset {
    pub const fn from_secs(secs: i32) -> Self {
        Self(secs)
    }

    pub const fn as_secs(self) -> i32 {
        self.0
    }

    /// Convert a UTC epoch reported by the phone to watch time
    pub fn to_local(self, utc_secs: i64) -> Timestamp {
        Timestamp(utc_secs - self.0 as i64)
    }

    /// Convert watch time to a UTC epoch
    pub fn to_utc(self, local: Timestamp) -> i64 {
        local.0 + self.0 as i64
    }
}

/// Source of the current watch time
pub trait Clock {
    fn now(&mut self) -> Timestamp;
}

/// Reference point pairing a wall-clock time with the uptime it was taken at
#[derive(Debug, Clone, Copy)]
pub struct TimeReference {
    /// Clock time
    time: Timestamp,
    /// Related uptime in seconds
    uptime: u64,
}

impl Default for TimeReference {
    fn default() -> Self {
        Self {
            time: Timestamp::from_secs(0),
            uptime: 0,
        }
    }
}

impl TimeReference {
    pub fn new(time: Timestamp, uptime: u64) -> Self {
        Self { time, uptime }
    }
}

/// Wall clock derived from a [`TimeReference`] and a monotonic uptime counter
pub struct WallClock<U> {
    reference: TimeReference,
    uptime: U,
}

impl<U> WallClock<U>
where
    U: FnMut() -> u64,
{
    /// Start counting from the epoch until a reference is set
    pub fn init(uptime: U) -> Self {
        Self {
            reference: TimeReference::default(),
            uptime,
        }
    }

    /// Update time reference
    pub fn set_time(&mut self, reference: TimeReference) {
        self.reference = reference;
    }
}

impl<U> Clock for WallClock<U>
where
    U: FnMut() -> u64,
{
    fn now(&mut self) -> Timestamp {
        let elapsed = (self.uptime)().saturating_sub(self.reference.uptime);
        self.reference.time + elapsed as i64
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;

    #[test]
    fn time_of_day_wraps_days() {
        let t = Timestamp::from_secs(3 * SECONDS_PER_DAY + 6 * SECONDS_PER_HOUR + 30 * 60);
        assert_eq!(t.hour(), 6);
        assert_eq!(t.minute(), 30);
    }

    #[test]
    fn time_of_day_before_epoch() {
        let t = Timestamp::from_secs(-60);
        assert_eq!(t.hour(), 23);
        assert_eq!(t.minute(), 59);
    }

    #[test]
    fn offset_round_trip() {
        let tz = TzOffset::from_secs(-5 * 3600);
        let local = tz.to_local(1_400_000_000);
        assert_eq!(local.as_secs(), 1_400_000_000 + 5 * 3600);
        assert_eq!(tz.to_utc(local), 1_400_000_000);
    }

    #[test]
    fn wall_clock_follows_uptime() {
        let uptime = Cell::new(100u64);
        let mut clock = WallClock::init(|| uptime.get());
        clock.set_time(TimeReference::new(Timestamp::from_secs(1_000), 100));
        assert_eq!(clock.now(), Timestamp::from_secs(1_000));

        uptime.set(160);
        assert_eq!(clock.now(), Timestamp::from_secs(1_060));
    }
}
