use crate::consts::{DECEMBER, MAX_YEAR};
use crate::convert;
use crate::format::{self, DatePattern};
use crate::prelude::*;
use crate::table::table;
use crate::types::{self, Day, Month, Year};
use crate::{Calendar, CalendarDate, CalendarError, ConversionError, ParseError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Day counts of 0001-01-01 and 9999-12-31, the representable Gregorian span.
const MIN_ORDINAL: i64 = types::days_from_civil(1, 1, 1);
const MAX_ORDINAL: i64 = types::days_from_civil(MAX_YEAR, DECEMBER, 31);

/// A validated Gregorian date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct AdDate {
    year: Year,
    month: Month,
    day: Day,
}

/// A validated Bikram Sambat date. Only years with a row in the month table
/// can be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct BsDate {
    year: Year,
    month: Month,
    day: Day,
}

impl AdDate {
    /// Creates a Gregorian date, checking month length and leap years.
    ///
    /// # Errors
    /// Returns `InvalidYear`, `InvalidMonth` or `InvalidDay`.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, CalendarError> {
        let year_nz = Year::new(year)?;
        let month_nz = Month::new(month)?;
        let day_nz = Day::new(day, year, month, types::days_in_month(year, month))?;
        Ok(Self {
            year: year_nz,
            month: month_nz,
            day: day_nz,
        })
    }

    /// 0001-01-01, the earliest representable date.
    pub const MIN: Self = Self {
        year: Year::MIN,
        month: Month::MIN,
        day: Day::MIN,
    };

    /// The current UTC date from the system clock.
    pub fn today() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        let days = i64::try_from(secs / 86_400)
            .unwrap_or(i64::MAX)
            .min(MAX_ORDINAL);
        Self::from_ordinal(days).unwrap_or(Self::MIN)
    }

    /// Builds the date `days` after 1970-01-01 (negative counts go backwards).
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` if the result leaves `1..=MAX_YEAR`.
    pub fn from_ordinal(days: i64) -> Result<Self, CalendarError> {
        if days < MIN_ORDINAL {
            return Err(CalendarError::InvalidYear(0));
        }
        if days > MAX_ORDINAL {
            return Err(CalendarError::InvalidYear(u16::MAX));
        }
        let (year, month, day) = types::civil_from_days(days);
        let year = u16::try_from(year).unwrap_or(if year < 0 { 0 } else { u16::MAX });
        Self::new(year, month, day)
    }

    /// Days since 1970-01-01.
    pub const fn ordinal(&self) -> i64 {
        types::days_from_civil(self.year.get(), self.month.get(), self.day.get())
    }

    /// # Errors
    /// Returns `CalendarError::InvalidYear` if the result leaves `1..=MAX_YEAR`.
    pub fn add_days(&self, days: i64) -> Result<Self, CalendarError> {
        let target = self.ordinal().checked_add(days).ok_or(CalendarError::InvalidYear(
            if days < 0 { 0 } else { u16::MAX },
        ))?;
        Self::from_ordinal(target)
    }

    /// Weekday, `0` = Sunday.
    pub const fn weekday(&self) -> u8 {
        types::weekday_from_days(self.ordinal())
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn fields(&self) -> CalendarDate {
        CalendarDate::new(self.year.get(), self.month.get(), self.day.get())
    }

    /// # Errors
    /// Returns `OutOfRange` when the date has no BS equivalent in the table.
    pub fn to_bs(&self) -> Result<BsDate, ConversionError> {
        convert::ad_to_bs(*self)
    }
}

impl BsDate {
    /// Creates a BS date, checking it against the month table.
    ///
    /// # Errors
    /// Returns `OutOfRange` for years outside the table, `InvalidMonth`, or
    /// `InvalidDay` when the day exceeds that month's length in that year.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, CalendarError> {
        table().validate(CalendarDate::new(year, month, day))?;
        Ok(Self {
            year: Year::new(year)?,
            month: Month::new(month)?,
            day: Day::try_from(day)?,
        })
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn fields(&self) -> CalendarDate {
        CalendarDate::new(self.year.get(), self.month.get(), self.day.get())
    }

    /// Length of this date's month.
    pub fn month_length(&self) -> u8 {
        // The date was validated against the table on construction
        table()
            .month_length(self.year.get(), self.month.get())
            .unwrap_or(self.day.get())
    }

    /// # Errors
    /// Never fails for a date built from the table; the `Result` mirrors
    /// [`convert::bs_to_ad`].
    pub fn to_ad(&self) -> Result<AdDate, ConversionError> {
        convert::bs_to_ad(*self)
    }

    /// Weekday via the Gregorian equivalent, `0` = Sunday.
    ///
    /// # Errors
    /// See [`BsDate::to_ad`].
    pub fn weekday(&self) -> Result<u8, ConversionError> {
        convert::day_of_week(DateValue::Bs(*self))
    }

    /// # Errors
    /// Returns `OutOfRange` if the result leaves the table.
    pub fn add_days(&self, days: i64) -> Result<Self, ConversionError> {
        let ad = self.to_ad()?.add_days(days)?;
        convert::ad_to_bs(ad)
    }
}

impl FromStr for AdDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = format::parse(s, &DatePattern::canonical())?;
        Ok(Self::new(fields.year, fields.month, fields.day)?)
    }
}

impl FromStr for BsDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = format::parse(s, &DatePattern::canonical())?;
        Ok(Self::new(fields.year, fields.month, fields.day)?)
    }
}

macro_rules! string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

string_serde!(AdDate);
string_serde!(BsDate);

/// A date tagged with the calendar it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Serialize, Deserialize)]
#[serde(tag = "calendar", content = "date", rename_all = "lowercase")]
pub enum DateValue {
    #[display(fmt = "{_0} AD")]
    Ad(AdDate),
    #[display(fmt = "{_0} BS")]
    Bs(BsDate),
}

impl DateValue {
    pub const fn calendar(&self) -> Calendar {
        match self {
            Self::Ad(_) => Calendar::Ad,
            Self::Bs(_) => Calendar::Bs,
        }
    }

    pub const fn fields(&self) -> CalendarDate {
        match self {
            Self::Ad(d) => d.fields(),
            Self::Bs(d) => d.fields(),
        }
    }

    /// # Errors
    /// Only fails if a BS date somehow has no Gregorian equivalent.
    pub fn to_ad(&self) -> Result<AdDate, ConversionError> {
        match self {
            Self::Ad(d) => Ok(*d),
            Self::Bs(d) => d.to_ad(),
        }
    }

    /// # Errors
    /// Returns `OutOfRange` for AD dates outside the table's span.
    pub fn to_bs(&self) -> Result<BsDate, ConversionError> {
        match self {
            Self::Ad(d) => d.to_bs(),
            Self::Bs(d) => Ok(*d),
        }
    }

    /// Re-expresses the date in `calendar`.
    ///
    /// # Errors
    /// See [`DateValue::to_bs`].
    pub fn to_calendar(&self, calendar: Calendar) -> Result<Self, ConversionError> {
        match calendar {
            Calendar::Ad => self.to_ad().map(Self::Ad),
            Calendar::Bs => self.to_bs().map(Self::Bs),
        }
    }

    /// The date in the canonical `YYYY-MM-DD` form with ASCII digits.
    pub fn canonical(&self) -> String {
        format::format_canonical(self.fields())
    }
}
