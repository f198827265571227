use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DAYS_IN_WEEK, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR,
};
use crate::error::CalendarError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A year in `1..=MAX_YEAR`.
///
/// The same type carries Gregorian and Bikram Sambat years; which calendar a
/// year belongs to is decided by the date type that holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    pub(crate) const MIN: Self = Self(NonZeroU16::MIN);

    /// # Errors
    /// Returns `CalendarError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, CalendarError> {
        let non_zero = NonZeroU16::new(value).ok_or(CalendarError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(CalendarError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

/// A month number in `1..=12`, for either calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    pub(crate) const MIN: Self = Self(NonZeroU8::MIN);

    /// # Errors
    /// Returns `CalendarError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, CalendarError> {
        let non_zero = NonZeroU8::new(value).ok_or(CalendarError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(CalendarError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Zero-based index into per-month tables
    #[inline]
    pub const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

/// A day-of-month value, non-zero and no larger than the month it was
/// validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    pub(crate) const MIN: Self = Self(NonZeroU8::MIN);

    /// Creates a new Day, validating it against the length of its month.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDay` if the value is 0 or exceeds `max_day`.
    pub fn new(value: u8, year: u16, month: u8, max_day: u8) -> Result<Self, CalendarError> {
        let invalid = CalendarError::InvalidDay {
            year,
            month,
            day: value,
        };
        let non_zero = NonZeroU8::new(value).ok_or(invalid)?;
        if value > max_day {
            return Err(invalid);
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Can't validate the upper end without year/month context
        NonZeroU8::new(value).map(Self).ok_or(CalendarError::InvalidDay {
            year: 0,
            month: 0,
            day: value,
        })
    }
}

/// Integer conversions and `Display` shared by the component newtypes.
macro_rules! component {
    ($ty:ident, $int:ty) => {
        impl From<$ty> for $int {
            fn from(value: $ty) -> Self {
                value.get()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.get())
            }
        }
    };
    ($ty:ident, $int:ty, checked) => {
        component!($ty, $int);

        impl TryFrom<$int> for $ty {
            type Error = CalendarError;

            fn try_from(value: $int) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

component!(Year, u16, checked);
component!(Month, u8, checked);
component!(Day, u8);

// Gregorian helpers

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
pub const fn days_from_civil(year: u16, month: u8, day: u8) -> i64 {
    let y = year as i64 - if month <= 2 { 1 } else { 0 };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let m = month as i64;
    let shifted = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * shifted + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`]: `(year, month, day)` for a day count
/// since 1970-01-01. The year may fall outside `1..=MAX_YEAR`. `days` must
/// sit well inside the `i64` range; `AdDate::from_ordinal` bounds it first.
pub const fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month as u8, day as u8)
}

/// Weekday for a day count since 1970-01-01, `0` = Sunday.
pub const fn weekday_from_days(days: i64) -> u8 {
    // 1970-01-01 was a Thursday
    (days + 4).rem_euclid(DAYS_IN_WEEK as i64) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_new_valid() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(2081).is_ok());
        assert!(Year::new(9999).is_ok());
    }

    #[test]
    fn test_year_new_invalid() {
        assert!(matches!(Year::new(0), Err(CalendarError::InvalidYear(0))));
        assert!(matches!(
            Year::new(10000),
            Err(CalendarError::InvalidYear(10000))
        ));
    }

    #[test]
    fn test_year_try_from_and_into() {
        let year: Year = 2081.try_into().unwrap();
        assert_eq!(year.get(), 2081);
        let value: u16 = year.into();
        assert_eq!(value, 2081);
        assert_eq!(year.to_string(), "2081");
    }

    #[test]
    fn test_year_serde() {
        let year = Year::new(2081).unwrap();
        let json = serde_json::to_string(&year).unwrap();
        assert_eq!(json, "2081");

        let parsed: Year = serde_json::from_str(&json).unwrap();
        assert_eq!(year, parsed);

        let result: Result<Year, _> = serde_json::from_str("0");
        assert!(result.is_err());
    }

    #[test]
    fn test_month_new() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
        assert!(matches!(Month::new(0), Err(CalendarError::InvalidMonth(0))));
        assert!(matches!(
            Month::new(13),
            Err(CalendarError::InvalidMonth(13))
        ));
    }

    #[test]
    fn test_month_index() {
        assert_eq!(Month::new(1).unwrap().index(), 0);
        assert_eq!(Month::new(12).unwrap().index(), 11);
    }

    #[test]
    fn test_month_serde() {
        let month = Month::new(8).unwrap();
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "8");
        let result: Result<Month, _> = serde_json::from_str("13");
        assert!(result.is_err());
    }

    #[test]
    fn test_day_new() {
        assert!(Day::new(1, 2081, 1, 31).is_ok());
        assert!(Day::new(32, 2081, 3, 32).is_ok());
        assert!(matches!(
            Day::new(32, 2081, 1, 31),
            Err(CalendarError::InvalidDay {
                year: 2081,
                month: 1,
                day: 32
            })
        ));
        assert!(Day::new(0, 2081, 1, 31).is_err());
    }

    #[test]
    fn test_day_try_from_u8() {
        let day: Day = 15.try_into().unwrap();
        assert_eq!(day.get(), 15);

        let result: Result<Day, _> = 0.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year: u16,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 2024,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2023,
                is_leap: false,
                description: "not divisible by 4",
            },
            TestCase {
                year: 1900,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2000,
                is_leap: true,
                description: "divisible by 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description,
            );
        }
    }

    #[test]
    fn test_days_in_month() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(
                days_in_month(2023, month),
                expected[month as usize],
                "Month {month} has incorrect day count"
            );
        }
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
    }

    #[test]
    fn test_days_from_civil_known_points() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(1969, 12, 31), -1);
        assert_eq!(days_from_civil(2000, 3, 1), 11_017);
        assert_eq!(days_from_civil(2024, 4, 13), 19_826);
    }

    #[test]
    fn test_civil_round_trip() {
        for days in (-60_000..60_000).step_by(37) {
            let (y, m, d) = civil_from_days(days);
            let year = u16::try_from(y).unwrap();
            assert_eq!(days_from_civil(year, m, d), days, "day {days}");
        }
    }

    #[test]
    fn test_weekday_from_days() {
        // 1970-01-01 Thursday, 2024-04-13 Saturday
        assert_eq!(weekday_from_days(0), 4);
        assert_eq!(weekday_from_days(days_from_civil(2024, 4, 13)), 6);
        assert_eq!(weekday_from_days(-4), 0);
    }
}
