/// Maximum valid year for either calendar (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December / Chaitra)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December / Chaitra
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each Gregorian month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// First Bikram Sambat year covered by the built-in month table
pub const MIN_BS_YEAR: u16 = 1970;
/// Last Bikram Sambat year covered by the built-in month table
pub const MAX_BS_YEAR: u16 = 2100;

/// Shortest and longest month a Bikram Sambat year may contain
pub const MIN_BS_MONTH_DAYS: u8 = 29;
pub const MAX_BS_MONTH_DAYS: u8 = 32;

/// Number of days in a week; weekday numbers run `0..DAYS_IN_WEEK` from Sunday
pub const DAYS_IN_WEEK: u8 = 7;

/// Number of years shown at once by the picker's year list
pub const YEAR_WINDOW: u16 = 20;

/// Date component separator
pub const DATE_SEPARATOR: char = '-';

/// Canonical value pattern exchanged with hosts
pub const CANONICAL_PATTERN: &str = "YYYY-MM-DD";

/// Whole-year shift used by the approximate fallback conversion
pub(crate) const APPROX_YEAR_OFFSET: u16 = 56;
/// Gregorian day of month on which the approximate fallback starts a Bikram Sambat month
pub(crate) const APPROX_MONTH_START_DAY: u8 = 14;
