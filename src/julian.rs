//! Civil time to astronomical time conversion
//!
//! The ephemeris collaborator works in Julian day numbers, a continuous
//! fractional-day count. This module turns a local calendar date, a local
//! clock time, and the timezone's total offset into that scalar.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

/// Julian day number for a Gregorian calendar date and fractional UT hour.
///
/// Standard astronomical formula; the fractional hour may fall outside
/// [0, 24) after the offset shift, the day count stays continuous.
#[must_use]
pub fn julian_day(year: i32, month: u32, day: u32, ut_hour: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (f64::from(year) - 1.0, f64::from(month) + 12.0)
    } else {
        (f64::from(year), f64::from(month))
    };

    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + f64::from(day)
        + ut_hour / 24.0
        + b
        - 1524.5
}

/// Julian day of the birth instant.
///
/// The local clock hour is shifted to UT by adding `total_offset_seconds`
/// as fractional hours; the offset's sign follows the timezone
/// collaborator's convention for this ephemeris.
#[must_use]
pub fn to_julian_day(date: NaiveDate, time: NaiveTime, total_offset_seconds: i64) -> f64 {
    let local_hour = f64::from(time.hour())
        + f64::from(time.minute()) / 60.0
        + f64::from(time.second()) / 3600.0;
    let ut_hour = local_hour + total_offset_seconds as f64 / 3600.0;

    julian_day(date.year(), date.month(), date.day(), ut_hour)
}

/// Unix timestamp used to ask the timezone collaborator which seasonal
/// adjustment was in effect at birth.
///
/// The local wall time is read as if it were UTC; the resulting instant is
/// at most a few hours off, which is close enough to pick the right side of
/// a seasonal transition for the lookup.
#[must_use]
pub fn birth_instant_unix(date: NaiveDate, time: NaiveTime) -> i64 {
    date.and_time(time).and_utc().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, min, 0).unwrap()
    }

    #[rstest]
    #[case(2000, 1, 1, 12.0, 2_451_545.0)]
    #[case(1990, 3, 21, 12.0, 2_447_972.0)]
    #[case(1999, 12, 31, 12.0, 2_451_544.0)]
    #[case(1987, 1, 27, 0.0, 2_446_822.5)]
    fn test_julian_day_known_epochs(
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
        #[case] hour: f64,
        #[case] expected: f64,
    ) {
        let jd = julian_day(year, month, day, hour);
        assert!((jd - expected).abs() < 1e-9, "got {jd}, expected {expected}");
    }

    #[test]
    fn test_julian_day_is_continuous_across_midnight() {
        let before = julian_day(1990, 3, 21, 23.5);
        let after = julian_day(1990, 3, 22, 0.5);
        assert!((after - before - 1.0 / 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_offset_shifts_fractional_hour() {
        let base = to_julian_day(date(1990, 3, 21), time(12, 0), 0);
        let shifted = to_julian_day(date(1990, 3, 21), time(12, 0), 3600);
        assert!((shifted - base - 1.0 / 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_offset_shifts_backwards() {
        let base = to_julian_day(date(1990, 3, 21), time(0, 30), 0);
        let shifted = to_julian_day(date(1990, 3, 21), time(0, 30), -7200);
        assert!((base - shifted - 2.0 / 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_birth_instant_unix() {
        // 1990-03-21 12:00 read as UTC
        let instant = birth_instant_unix(date(1990, 3, 21), time(12, 0));
        assert_eq!(instant, 638_020_800);
    }
}
