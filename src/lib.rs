//! Bikram Sambat (BS) and Gregorian (AD) dates.
//!
//! The crate has three layers:
//!
//! - a read-only month-length table for BS years 1970-2100 and an exact,
//!   table-driven converter between the two calendars;
//! - a locale-aware formatter/parser and the validators used by form rules;
//! - [`PickerController`], a headless date-picker state machine that keeps
//!   free text, a calendar grid, and a host-controlled value in sync.
//!
//! ```
//! use sambat::{AdDate, BsDate};
//!
//! let new_year = AdDate::new(2024, 4, 13)?.to_bs()?;
//! assert_eq!(new_year, BsDate::new(2081, 1, 1)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod bounds;
mod bs_data;
mod config;
mod consts;
mod convert;
mod date;
mod error;
mod format;
mod grid;
mod picker;
mod prelude;
mod table;
mod types;
mod validate;

pub use bounds::{BoundsError, DateBounds};
pub use bs_data::TABLE_VERSION;
pub use config::{ConfigError, PickerConfig, TypedCalendar};
pub use consts::*;
pub use convert::{
    ad_to_bs, ad_to_bs_or_approximate, bs_to_ad, bs_to_ad_or_approximate, day_of_week,
    supported_ad_range,
};
pub use date::{AdDate, BsDate, DateValue};
pub use error::{CalendarError, ConversionError};
pub use format::{
    DatePattern, Locale, format, format_canonical, looks_like_bs, parse, to_devanagari_digits,
    to_latin_digits,
};
pub use grid::{DayCell, DayGrid, MonthCell, YearCell};
pub use picker::{Emission, ExternalSync, PickerController, PickerError, PickerState, ViewMode};
pub use table::{CalendarTable, month_name, table, weekday_name};
pub use types::{Day, Month, Year};
pub use validate::{
    age_in_years, is_valid_calendar_date, is_within_bounds, meets_minimum_age,
    meets_minimum_age_today,
};

use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// The two calendars the crate converts between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Calendar {
    /// Gregorian
    #[display(fmt = "AD")]
    Ad,
    /// Bikram Sambat
    #[display(fmt = "BS")]
    Bs,
}

/// Raw year/month/day fields with no calendar attached and no validation.
///
/// This is what the parser produces: it does not know whether the text was a
/// BS or an AD date. Turn it into an [`AdDate`] or [`BsDate`] to validate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", year, month, day)]
pub struct CalendarDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl CalendarDate {
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Validates the fields as a date in `calendar`.
    ///
    /// # Errors
    /// Returns the `CalendarError` describing the first invalid field.
    pub fn in_calendar(self, calendar: Calendar) -> Result<DateValue, CalendarError> {
        match calendar {
            Calendar::Ad => AdDate::new(self.year, self.month, self.day).map(DateValue::Ad),
            Calendar::Bs => BsDate::new(self.year, self.month, self.day).map(DateValue::Bs),
        }
    }
}

impl From<(u16, u8, u8)> for CalendarDate {
    fn from((year, month, day): (u16, u8, u8)) -> Self {
        Self::new(year, month, day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    /// Wrong number of fields, or a field that is not a number.
    #[display(fmt = "Malformed date text: {_0}")]
    Malformed(String),
    #[display(fmt = "Invalid date pattern: {_0}")]
    InvalidPattern(String),
    #[display(fmt = "{_0}")]
    Calendar(CalendarError),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl From<CalendarError> for ParseError {
    fn from(err: CalendarError) -> Self {
        Self::Calendar(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_display() {
        assert_eq!(Calendar::Ad.to_string(), "AD");
        assert_eq!(Calendar::Bs.to_string(), "BS");
    }

    #[test]
    fn test_calendar_serde() {
        assert_eq!(serde_json::to_string(&Calendar::Bs).unwrap(), r#""bs""#);
        let parsed: Calendar = serde_json::from_str(r#""ad""#).unwrap();
        assert_eq!(parsed, Calendar::Ad);
    }

    #[test]
    fn test_calendar_date_display_pads() {
        assert_eq!(CalendarDate::new(2081, 1, 5).to_string(), "2081-01-05");
        assert_eq!(CalendarDate::from((999, 12, 31)).to_string(), "0999-12-31");
    }

    #[test]
    fn test_calendar_date_in_calendar() {
        // Jestha 2081 has 31 days, May has 31 days too
        let fields = CalendarDate::new(2081, 2, 31);
        assert!(fields.in_calendar(Calendar::Bs).is_ok());

        // Asar 2081 has 32 days; no Gregorian month does
        let fields = CalendarDate::new(2081, 3, 32);
        assert!(matches!(
            fields.in_calendar(Calendar::Bs),
            Ok(DateValue::Bs(_))
        ));
        assert!(matches!(
            CalendarDate::new(2024, 3, 32).in_calendar(Calendar::Ad),
            Err(CalendarError::InvalidDay { .. })
        ));
    }

    #[test]
    fn test_parse_error_display() {
        assert_eq!(
            ParseError::Malformed("2081-0".to_owned()).to_string(),
            "Malformed date text: 2081-0"
        );
        assert_eq!(ParseError::EmptyInput.to_string(), "Empty date string");
        let err: ParseError = CalendarError::InvalidMonth(13).into();
        assert_eq!(err.to_string(), "Invalid month: 13 (must be 1-12)");
    }
}
