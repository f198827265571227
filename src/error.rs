use crate::consts::{MAX_BS_YEAR, MAX_MONTH, MAX_YEAR, MIN_BS_YEAR};
use crate::{Calendar, CalendarDate};

/// Errors produced while validating a date against its calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// The year has no entry in the month table (BS), or its Gregorian
    /// equivalent falls outside the span the table covers (AD).
    #[error(
        "{calendar} year {year} is outside the supported range (BS {min}-{max})",
        min = MIN_BS_YEAR,
        max = MAX_BS_YEAR
    )]
    OutOfRange { calendar: Calendar, year: u16 },

    #[error("Invalid year: {0} (must be 1-{max})", max = MAX_YEAR)]
    InvalidYear(u16),

    #[error("Invalid month: {0} (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(u8),

    /// Day exceeds the length of that specific month.
    #[error("Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
}

/// Errors returned by the converter's public functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// The exact table walk failed and the flat-offset estimate was computed
    /// instead. The estimate is carried here so it is never mistaken for an
    /// exact result.
    #[error("Exact conversion unavailable; approximate {calendar} date is {approximate}")]
    ApproximateFallbackUsed {
        approximate: CalendarDate,
        calendar: Calendar,
    },
}

impl ConversionError {
    /// True for `OutOfRange`, the only failure a valid input can produce.
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self, Self::Calendar(CalendarError::OutOfRange { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = CalendarError::OutOfRange {
            calendar: Calendar::Bs,
            year: 2101,
        };
        assert_eq!(
            err.to_string(),
            "BS year 2101 is outside the supported range (BS 1970-2100)"
        );
    }

    #[test]
    fn test_conversion_error_wraps_calendar_error() {
        let err: ConversionError = CalendarError::InvalidDay {
            year: 2081,
            month: 1,
            day: 32,
        }
        .into();
        assert_eq!(err.to_string(), "Invalid day 32 for month 2081-01");
        assert!(!err.is_out_of_range());

        let err: ConversionError = CalendarError::OutOfRange {
            calendar: Calendar::Ad,
            year: 1900,
        }
        .into();
        assert!(err.is_out_of_range());
    }

    #[test]
    fn test_approximate_message() {
        let err = ConversionError::ApproximateFallbackUsed {
            approximate: CalendarDate::new(2110, 1, 3),
            calendar: Calendar::Bs,
        };
        assert_eq!(
            err.to_string(),
            "Exact conversion unavailable; approximate BS date is 2110-01-03"
        );
    }
}
