//! Read-only lookup of Bikram Sambat month lengths plus the month and
//! weekday name tables used when rendering either calendar.

use crate::bs_data::{ANCHOR_AD, ANCHOR_BS, MONTH_LENGTHS, TABLE_VERSION};
use crate::consts::{DAYS_IN_WEEK, MIN_BS_YEAR, MIN_DAY};
use crate::format::Locale;
use crate::types::{Month, days_from_civil};
use crate::{Calendar, CalendarDate, CalendarError};

/// Month lengths for the supported BS years together with the anchor pair
/// that ties them to real Gregorian days.
///
/// There is exactly one instance, built at compile time; see [`table`].
#[derive(Debug)]
pub struct CalendarTable {
    first_year: u16,
    months: &'static [[u8; 12]],
    anchor_ad: CalendarDate,
    anchor_bs: CalendarDate,
    /// Days since 1970-01-01 of `anchor_ad`
    anchor_days: i64,
    version: u32,
}

static BUILTIN: CalendarTable = CalendarTable {
    first_year: MIN_BS_YEAR,
    months: &MONTH_LENGTHS,
    anchor_ad: CalendarDate::new(ANCHOR_AD.0, ANCHOR_AD.1, ANCHOR_AD.2),
    anchor_bs: CalendarDate::new(ANCHOR_BS.0, ANCHOR_BS.1, ANCHOR_BS.2),
    anchor_days: days_from_civil(ANCHOR_AD.0, ANCHOR_AD.1, ANCHOR_AD.2),
    version: TABLE_VERSION,
};

/// The built-in month table.
pub fn table() -> &'static CalendarTable {
    &BUILTIN
}

impl CalendarTable {
    /// First supported BS year
    pub const fn first_year(&self) -> u16 {
        self.first_year
    }

    /// Last supported BS year (inclusive)
    pub const fn last_year(&self) -> u16 {
        self.first_year + self.months.len() as u16 - 1
    }

    pub const fn version(&self) -> u32 {
        self.version
    }

    pub const fn contains_year(&self, year: u16) -> bool {
        year >= self.first_year && year <= self.last_year()
    }

    /// The `(AD, BS)` pair every conversion is measured from.
    pub const fn anchor(&self) -> (CalendarDate, CalendarDate) {
        (self.anchor_ad, self.anchor_bs)
    }

    pub(crate) const fn anchor_days(&self) -> i64 {
        self.anchor_days
    }

    /// All twelve month lengths of `year`, Baisakh first.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` for years without a table row.
    pub fn months_of(&self, year: u16) -> Result<&'static [u8; 12], CalendarError> {
        if !self.contains_year(year) {
            return Err(CalendarError::OutOfRange {
                calendar: Calendar::Bs,
                year,
            });
        }
        Ok(&self.months[usize::from(year - self.first_year)])
    }

    /// Number of days in `month` of BS `year`.
    ///
    /// # Errors
    /// Returns `OutOfRange` for unsupported years and `InvalidMonth` for
    /// months outside `1..=12`.
    pub fn month_length(&self, year: u16, month: u8) -> Result<u8, CalendarError> {
        let months = self.months_of(year)?;
        let month = Month::new(month)?;
        Ok(months[month.index()])
    }

    /// Number of days in BS `year`.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` for unsupported years.
    pub fn year_length(&self, year: u16) -> Result<u16, CalendarError> {
        Ok(self.months_of(year)?.iter().map(|&d| u16::from(d)).sum())
    }

    /// Checks the fields against the table without building a date.
    ///
    /// # Errors
    /// Returns the first problem found: year, then month, then day.
    pub fn validate(&self, date: CalendarDate) -> Result<(), CalendarError> {
        let max = self.month_length(date.year, date.month)?;
        if date.day < MIN_DAY || date.day > max {
            return Err(CalendarError::InvalidDay {
                year: date.year,
                month: date.month,
                day: date.day,
            });
        }
        Ok(())
    }

    pub fn is_valid(&self, date: CalendarDate) -> bool {
        self.validate(date).is_ok()
    }

    /// Zero-based day of the BS year, or `None` if the date is not in the
    /// table.
    pub(crate) fn day_of_year(&self, date: CalendarDate) -> Option<u16> {
        self.validate(date).ok()?;
        let before: u16 = self.months[usize::from(date.year - self.first_year)]
            .iter()
            .take(usize::from(date.month - 1))
            .map(|&d| u16::from(d))
            .sum();
        Some(before + u16::from(date.day) - 1)
    }
}

const BS_MONTHS_EN: [&str; 12] = [
    "Baisakh", "Jestha", "Asar", "Shrawan", "Bhadra", "Aswin", "Kartik", "Mangsir", "Poush",
    "Magh", "Falgun", "Chaitra",
];

const BS_MONTHS_NE: [&str; 12] = [
    "बैशाख",
    "जेठ",
    "असार",
    "श्रावण",
    "भदौ",
    "आश्विन",
    "कार्तिक",
    "मंसिर",
    "पुष",
    "माघ",
    "फाल्गुन",
    "चैत्र",
];

const AD_MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const AD_MONTHS_NE: [&str; 12] = [
    "जनवरी",
    "फेब्रुअरी",
    "मार्च",
    "अप्रिल",
    "मे",
    "जुन",
    "जुलाई",
    "अगस्ट",
    "सेप्टेम्बर",
    "अक्टोबर",
    "नोभेम्बर",
    "डिसेम्बर",
];

const WEEKDAYS_EN: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const WEEKDAYS_EN_SHORT: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

const WEEKDAYS_NE: [&str; 7] = [
    "आइतबार",
    "सोमबार",
    "मंगलबार",
    "बुधबार",
    "बिहीबार",
    "शुक्रबार",
    "शनिबार",
];

const WEEKDAYS_NE_SHORT: [&str; 7] = ["आ", "सो", "मं", "बु", "बि", "शु", "श"];

/// Name of `month` in the given calendar and locale.
pub fn month_name(calendar: Calendar, month: Month, locale: Locale) -> &'static str {
    let names = match (calendar, locale) {
        (Calendar::Bs, Locale::En) => &BS_MONTHS_EN,
        (Calendar::Bs, Locale::Ne) => &BS_MONTHS_NE,
        (Calendar::Ad, Locale::En) => &AD_MONTHS_EN,
        (Calendar::Ad, Locale::Ne) => &AD_MONTHS_NE,
    };
    names[month.index()]
}

/// Name of a weekday, `0` = Sunday. Out-of-range numbers wrap.
pub fn weekday_name(weekday: u8, locale: Locale, short: bool) -> &'static str {
    let names = match (locale, short) {
        (Locale::En, false) => &WEEKDAYS_EN,
        (Locale::En, true) => &WEEKDAYS_EN_SHORT,
        (Locale::Ne, false) => &WEEKDAYS_NE,
        (Locale::Ne, true) => &WEEKDAYS_NE_SHORT,
    };
    names[usize::from(weekday % DAYS_IN_WEEK)]
}
