//! Moon phase, sprite selection and dial position

use libm::floor;

use crate::system::time::{Timestamp, TzOffset, SECONDS_PER_DAY};

/// A new moon at 2014-03-01 13:00 UT
pub const NEW_MOON_EPOCH: i64 = 1_393_678_800;
/// Mean synodic month
pub const SYNODIC_MONTH_SECONDS: f64 = 2_551_442.98;

const BUCKETS: f64 = 8.0;

/// The eight pre-rendered phase shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoonShape {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    ThirdQuarter,
    WaningCrescent,
}

impl MoonShape {
    pub const ALL: [MoonShape; 8] = [
        MoonShape::New,
        MoonShape::WaxingCrescent,
        MoonShape::FirstQuarter,
        MoonShape::WaxingGibbous,
        MoonShape::Full,
        MoonShape::WaningGibbous,
        MoonShape::ThirdQuarter,
        MoonShape::WaningCrescent,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Sprite to show for the moon: its shape and the 3-hour rotation bucket
/// matching where the sun currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoonSprite {
    pub shape: MoonShape,
    /// 0 for the sun at 00:00, 1 for 03:00, up to 7 for 21:00
    pub rotation: u8,
}

/// Moon phase in `[0, 1)`: 0 new, 0.25 first quarter, 0.5 full
pub fn moon_phase(now: Timestamp, tz_offset: TzOffset) -> f64 {
    let elapsed = (tz_offset.to_utc(now) - NEW_MOON_EPOCH) as f64;
    let cycles = elapsed / SYNODIC_MONTH_SECONDS;
    let phase = cycles - floor(cycles);
    // Guard the rounding case where a tiny negative fraction lands on 1.0.
    if phase >= 1.0 {
        0.0
    } else {
        phase
    }
}

/// Nearest of eight equal buckets, with the last half bucket wrapping to 0
fn bucket(fraction: f64) -> u8 {
    (floor((fraction + 0.5 / BUCKETS) * BUCKETS) as i64).rem_euclid(8) as u8
}

pub fn moon_sprite(phase: f64, now: Timestamp) -> MoonSprite {
    let hour = now.hour() as f64 + now.minute() as f64 / 60.0;
    MoonSprite {
        shape: MoonShape::ALL[bucket(phase) as usize],
        rotation: bucket(hour / 24.0),
    }
}

/// Time whose dial position is the moon's: the moon trails the sun by
/// `phase` of a day, so a full moon sits opposite it
pub fn moon_dial_time(now: Timestamp, phase: f64) -> Timestamp {
    now - (phase * SECONDS_PER_DAY as f64) as i64
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::system::time::SECONDS_PER_HOUR;

    const UTC: TzOffset = TzOffset::from_secs(0);

    #[test]
    fn reference_new_moon() {
        let phase = moon_phase(Timestamp::from_secs(NEW_MOON_EPOCH), UTC);
        assert_eq!(phase, 0.0);
    }

    #[test]
    fn half_cycle_is_full() {
        let half = (SYNODIC_MONTH_SECONDS / 2.0) as i64;
        let phase = moon_phase(Timestamp::from_secs(NEW_MOON_EPOCH + half), UTC);
        assert!((phase - 0.5).abs() < 1e-6);
    }

    #[test]
    fn offset_shifts_to_utc() {
        let tz = TzOffset::from_secs(3 * 3600);
        let local = Timestamp::from_secs(NEW_MOON_EPOCH - 3 * 3600);
        assert_eq!(moon_phase(local, tz), 0.0);
    }

    #[test]
    fn before_reference_stays_in_range() {
        let phase = moon_phase(Timestamp::from_secs(NEW_MOON_EPOCH - 86_400), UTC);
        assert!((0.0..1.0).contains(&phase));
        assert!(phase > 0.9);
    }

    #[test]
    fn shape_buckets() {
        let midnight = Timestamp::from_secs(0);
        let shape = |phase| moon_sprite(phase, midnight).shape;
        assert_eq!(shape(0.0), MoonShape::New);
        assert_eq!(shape(0.06), MoonShape::New);
        assert_eq!(shape(0.0625), MoonShape::WaxingCrescent);
        assert_eq!(shape(0.25), MoonShape::FirstQuarter);
        assert_eq!(shape(0.5), MoonShape::Full);
        assert_eq!(shape(0.75), MoonShape::ThirdQuarter);
        assert_eq!(shape(0.9), MoonShape::WaningCrescent);
        assert_eq!(shape(0.95), MoonShape::New);
    }

    #[test]
    fn rotation_buckets() {
        let rotation = |hour: i64, minute: i64| {
            moon_sprite(0.0, Timestamp::from_secs(hour * SECONDS_PER_HOUR + minute * 60)).rotation
        };
        assert_eq!(rotation(0, 0), 0);
        assert_eq!(rotation(1, 29), 0);
        assert_eq!(rotation(1, 30), 1);
        assert_eq!(rotation(6, 0), 2);
        assert_eq!(rotation(21, 0), 7);
        assert_eq!(rotation(22, 30), 0);
    }

    #[test]
    fn full_moon_trails_by_half_a_day() {
        let now = Timestamp::from_secs(1_400_000_000);
        assert_eq!(moon_dial_time(now, 0.5), now - 12 * SECONDS_PER_HOUR);
        assert_eq!(moon_dial_time(now, 0.0), now);
    }

    proptest! {
        #[test]
        fn phase_in_range(secs in -2_000_000_000i64..2_000_000_000, tz in -50_000i32..50_000) {
            let phase = moon_phase(Timestamp::from_secs(secs), TzOffset::from_secs(tz));
            prop_assert!((0.0..1.0).contains(&phase));
        }

        #[test]
        fn phase_repeats_each_synodic_month(secs in 1_393_000_000i64..1_800_000_000) {
            let t = Timestamp::from_secs(secs);
            let a = moon_phase(t, UTC);
            let b = moon_phase(t + SYNODIC_MONTH_SECONDS.round() as i64, UTC);
            // Distance on the unit circle, so a wrap from 0.99999 to 0.0 still counts as close.
            let diff = (a - b).abs();
            prop_assert!(diff.min(1.0 - diff) < 1e-6);
        }
    }
}
