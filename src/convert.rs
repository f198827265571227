//! Exact conversion between the Gregorian and Bikram Sambat calendars.
//!
//! Every conversion is a day offset from the table's anchor pair: the AD side
//! counts days with proleptic Gregorian arithmetic, the BS side walks whole
//! years and then months of the month table. Nothing is extrapolated; dates
//! the table cannot reach are reported as `OutOfRange`. The flat-offset
//! estimate is only available through the `*_or_approximate` functions,
//! which label it as such.

use crate::consts::{APPROX_MONTH_START_DAY, APPROX_YEAR_OFFSET, MAX_MONTH};
use crate::prelude::*;
use crate::table::{CalendarTable, table};
use crate::{AdDate, BsDate, Calendar, CalendarDate, CalendarError, ConversionError, DateValue};

impl CalendarTable {
    /// Converts a Gregorian date to Bikram Sambat.
    ///
    /// # Errors
    /// Returns `OutOfRange` when the date falls before BS `first_year` or
    /// after the last day of BS `last_year`.
    pub fn ad_to_bs(&self, ad: AdDate) -> Result<BsDate, ConversionError> {
        let out_of_range = CalendarError::OutOfRange {
            calendar: Calendar::Ad,
            year: ad.year(),
        };
        let (_, anchor_bs) = self.anchor();
        let anchor_doy = self
            .day_of_year(anchor_bs)
            .ok_or(CalendarError::OutOfRange {
                calendar: Calendar::Bs,
                year: anchor_bs.year,
            })?;

        let mut year = anchor_bs.year;
        // Day within `year`, possibly negative or past its end until normalised
        let mut remaining = i64::from(anchor_doy) + ad.ordinal() - self.anchor_days();

        while remaining < 0 {
            year -= 1;
            let len = self.year_length(year).map_err(|_| out_of_range)?;
            remaining += i64::from(len);
        }
        loop {
            let len = i64::from(self.year_length(year).map_err(|_| out_of_range)?);
            if remaining < len {
                break;
            }
            remaining -= len;
            year += 1;
        }

        let months = self.months_of(year)?;
        let mut month = 1;
        for &len in months {
            let len = i64::from(len);
            if remaining < len {
                break;
            }
            remaining -= len;
            month += 1;
        }
        debug_assert!(month <= MAX_MONTH);

        // remaining < month length <= 32 here
        let day = u8::try_from(remaining + 1).map_err(|_| out_of_range)?;
        Ok(BsDate::new(year, month, day)?)
    }

    /// Converts a Bikram Sambat date to Gregorian.
    ///
    /// # Errors
    /// Returns `OutOfRange` or `InvalidDay` if `bs` does not fit this table.
    pub fn bs_to_ad(&self, bs: BsDate) -> Result<AdDate, ConversionError> {
        let (_, anchor_bs) = self.anchor();
        let target_doy = self
            .day_of_year(bs.fields())
            .ok_or(CalendarError::OutOfRange {
                calendar: Calendar::Bs,
                year: bs.year(),
            })?;
        let anchor_doy = self
            .day_of_year(anchor_bs)
            .ok_or(CalendarError::OutOfRange {
                calendar: Calendar::Bs,
                year: anchor_bs.year,
            })?;

        let mut offset = i64::from(target_doy) - i64::from(anchor_doy);
        if bs.year() >= anchor_bs.year {
            for year in anchor_bs.year..bs.year() {
                offset += i64::from(self.year_length(year)?);
            }
        } else {
            for year in bs.year()..anchor_bs.year {
                offset -= i64::from(self.year_length(year)?);
            }
        }

        Ok(AdDate::from_ordinal(self.anchor_days() + offset)?)
    }

    /// First and last Gregorian dates the table can convert.
    ///
    /// # Errors
    /// Only fails if the table itself is inconsistent.
    pub fn ad_range(&self) -> Result<(AdDate, AdDate), ConversionError> {
        let first = BsDate::new(self.first_year(), 1, 1)?;
        let last_year = self.last_year();
        let last_day = self.month_length(last_year, MAX_MONTH)?;
        let last = BsDate::new(last_year, MAX_MONTH, last_day)?;
        Ok((self.bs_to_ad(first)?, self.bs_to_ad(last)?))
    }
}

/// Converts a Gregorian date to Bikram Sambat using the built-in table.
///
/// # Errors
/// Returns `ConversionError::Calendar(OutOfRange)` outside the table's span.
pub fn ad_to_bs(ad: AdDate) -> Result<BsDate, ConversionError> {
    table().ad_to_bs(ad)
}

/// Converts a Bikram Sambat date to Gregorian using the built-in table.
///
/// # Errors
/// Returns `ConversionError::Calendar(OutOfRange)` outside the table's span.
pub fn bs_to_ad(bs: BsDate) -> Result<AdDate, ConversionError> {
    table().bs_to_ad(bs)
}

/// First and last Gregorian dates the built-in table covers.
///
/// # Errors
/// See [`CalendarTable::ad_range`].
pub fn supported_ad_range() -> Result<(AdDate, AdDate), ConversionError> {
    table().ad_range()
}

/// Weekday of any date, `0` = Sunday. BS dates go through their Gregorian
/// equivalent so there is one source of truth for weekdays.
///
/// # Errors
/// Propagates the BS to AD conversion error.
pub fn day_of_week(date: DateValue) -> Result<u8, ConversionError> {
    Ok(date.to_ad()?.weekday())
}

/// Exact AD to BS conversion, degrading to the flat-offset estimate when the
/// date is outside the table.
///
/// # Errors
/// `ApproximateFallbackUsed` carries the estimate; other errors pass through.
pub fn ad_to_bs_or_approximate(ad: AdDate) -> Result<BsDate, ConversionError> {
    match ad_to_bs(ad) {
        Err(err) if err.is_out_of_range() => {
            let approximate = approximate_ad_to_bs(ad.fields());
            warn!("AD {ad} is outside the BS table; approximating as BS {approximate}");
            Err(ConversionError::ApproximateFallbackUsed {
                approximate,
                calendar: Calendar::Bs,
            })
        }
        other => other,
    }
}

/// Exact BS to AD conversion of raw fields, degrading to the flat-offset
/// estimate for years outside the table.
///
/// # Errors
/// `ApproximateFallbackUsed` carries the estimate; `InvalidMonth` and
/// `InvalidDay` for in-range years pass through.
pub fn bs_to_ad_or_approximate(bs: CalendarDate) -> Result<AdDate, ConversionError> {
    match BsDate::new(bs.year, bs.month, bs.day) {
        Ok(date) => bs_to_ad(date),
        Err(CalendarError::OutOfRange { .. }) => {
            let approximate = approximate_bs_to_ad(bs);
            warn!("BS {bs} is outside the BS table; approximating as AD {approximate}");
            Err(ConversionError::ApproximateFallbackUsed {
                approximate,
                calendar: Calendar::Ad,
            })
        }
        Err(err) => Err(err.into()),
    }
}

/// Treats every BS month as starting on the 14th of a Gregorian month,
/// Baisakh on 14 April, and a BS year as running 56 (Jan-mid Apr) or 57
/// years ahead.
fn approximate_ad_to_bs(ad: CalendarDate) -> CalendarDate {
    let before_start = ad.day < APPROX_MONTH_START_DAY;
    // Months since year 0, shifted back when the BS month began last month
    let months = i64::from(ad.year) * 12 + i64::from(ad.month) - 1 - i64::from(before_start);
    let ad_year = months.div_euclid(12);
    let ad_month0 = months.rem_euclid(12);
    let bs_month0 = (ad_month0 + 9) % 12;
    let bs_year = ad_year + i64::from(APPROX_YEAR_OFFSET) + i64::from(ad_month0 >= 3);
    let day = if before_start {
        ad.day + (30 - APPROX_MONTH_START_DAY + 1)
    } else {
        ad.day - APPROX_MONTH_START_DAY + 1
    };
    CalendarDate::new(
        u16::try_from(bs_year).unwrap_or(u16::MAX),
        (bs_month0 + 1) as u8,
        day,
    )
}

/// Inverse of [`approximate_ad_to_bs`].
fn approximate_bs_to_ad(bs: CalendarDate) -> CalendarDate {
    let bs_month0 = i64::from(bs.month.clamp(1, MAX_MONTH)) - 1;
    let ad_month0 = (bs_month0 + 3) % 12;
    let ad_year =
        i64::from(bs.year) - i64::from(APPROX_YEAR_OFFSET) - i64::from(ad_month0 >= 3);
    let offset = i64::from(bs.day) + i64::from(APPROX_MONTH_START_DAY) - 1;
    // Days past the 30th roll into the following Gregorian month
    let (months, day) = if offset > 30 {
        (ad_year * 12 + ad_month0 + 1, offset - 30)
    } else {
        (ad_year * 12 + ad_month0, offset)
    };
    CalendarDate::new(
        u16::try_from(months.div_euclid(12)).unwrap_or(0),
        (months.rem_euclid(12) + 1) as u8,
        day as u8,
    )
}
