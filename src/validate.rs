//! Predicates used by form rules: calendar validity, minimum age, and
//! inclusive bounds.

use std::cmp::Ordering;

use crate::date::{AdDate, DateValue};
use crate::{Calendar, CalendarDate};

/// Whether the fields form a real date in `calendar`. BS dates are checked
/// against the month table, AD dates against the Gregorian rules.
pub fn is_valid_calendar_date(date: CalendarDate, calendar: Calendar) -> bool {
    date.in_calendar(calendar).is_ok()
}

/// Completed years between `birth` and `today`.
///
/// A birthday counts only once its month and day have been reached, so a
/// 29 February birth turns a year older on 1 March in common years.
/// Returns `0` when `birth` is after `today`.
pub fn age_in_years(birth: AdDate, today: AdDate) -> u16 {
    if birth > today {
        return 0;
    }
    let years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years - 1
    } else {
        years
    }
}

/// Whether someone born on `date` (given in `calendar`) is at least
/// `min_years` old on `today`.
///
/// Fields that are not a valid date, or that cannot be expressed in AD,
/// never satisfy the rule.
pub fn meets_minimum_age(
    date: CalendarDate,
    calendar: Calendar,
    min_years: u16,
    today: AdDate,
) -> bool {
    date.in_calendar(calendar)
        .ok()
        .and_then(|value| value.to_ad().ok())
        .is_some_and(|birth| age_in_years(birth, today) >= min_years)
}

/// [`meets_minimum_age`] against the system clock.
pub fn meets_minimum_age_today(date: CalendarDate, calendar: Calendar, min_years: u16) -> bool {
    meets_minimum_age(date, calendar, min_years, AdDate::today())
}

/// Orders `date` against `other` in `date`'s own calendar.
///
/// When `other` has no equivalent there (an AD bound outside the BS table)
/// both sides are compared as AD instead; conversion preserves order.
pub(crate) fn compare(date: DateValue, other: DateValue) -> Option<Ordering> {
    if let Ok(other) = other.to_calendar(date.calendar()) {
        return Some(date.fields().cmp(&other.fields()));
    }
    let lhs = date.to_ad().ok()?;
    let rhs = other.to_ad().ok()?;
    Some(lhs.cmp(&rhs))
}

/// Inclusive range check. Missing bounds are open.
pub fn is_within_bounds(date: DateValue, min: Option<DateValue>, max: Option<DateValue>) -> bool {
    let above_min = min.is_none_or(|min| compare(date, min).is_some_and(Ordering::is_ge));
    let below_max = max.is_none_or(|max| compare(date, max).is_some_and(Ordering::is_le));
    above_min && below_max
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::BsDate;

    fn ad(year: u16, month: u8, day: u8) -> AdDate {
        AdDate::new(year, month, day).unwrap()
    }

    fn bs(year: u16, month: u8, day: u8) -> BsDate {
        BsDate::new(year, month, day).unwrap()
    }

    #[test]
    fn test_is_valid_calendar_date() {
        struct TestCase {
            date:     (u16, u8, u8),
            calendar: Calendar,
            valid:    bool,
        }

        let cases = [
            TestCase { date: (2081, 3, 32), calendar: Calendar::Bs, valid: true },
            TestCase { date: (2081, 1, 32), calendar: Calendar::Bs, valid: false },
            TestCase { date: (1969, 1, 1), calendar: Calendar::Bs, valid: false },
            TestCase { date: (2024, 2, 29), calendar: Calendar::Ad, valid: true },
            TestCase { date: (2023, 2, 29), calendar: Calendar::Ad, valid: false },
            TestCase { date: (2081, 3, 32), calendar: Calendar::Ad, valid: false },
        ];

        for case in &cases {
            assert_eq!(
                is_valid_calendar_date(case.date.into(), case.calendar),
                case.valid,
                "{:?} in {}",
                case.date,
                case.calendar
            );
        }
    }

    #[test]
    fn test_age_in_years() {
        let today = ad(2024, 4, 13);
        assert_eq!(age_in_years(ad(2006, 4, 13), today), 18);
        assert_eq!(age_in_years(ad(2006, 4, 14), today), 17);
        assert_eq!(age_in_years(ad(2006, 5, 1), today), 17);
        assert_eq!(age_in_years(ad(2024, 4, 13), today), 0);
        assert_eq!(age_in_years(ad(2030, 1, 1), today), 0);

        // Leap-day birthdays
        let birth = ad(2004, 2, 29);
        assert_eq!(age_in_years(birth, ad(2022, 2, 28)), 17);
        assert_eq!(age_in_years(birth, ad(2022, 3, 1)), 18);
    }

    #[test]
    fn test_minimum_age_boundary_ad() {
        let today = ad(2024, 4, 13);
        let exactly = CalendarDate::new(2006, 4, 13);
        let one_day_short = CalendarDate::new(2006, 4, 14);
        assert!(meets_minimum_age(exactly, Calendar::Ad, 18, today));
        assert!(!meets_minimum_age(one_day_short, Calendar::Ad, 18, today));
    }

    #[test]
    fn test_minimum_age_boundary_bs() {
        let today = ad(2024, 4, 13);
        let exactly = ad(2006, 4, 13).to_bs().unwrap().fields();
        let one_day_short = ad(2006, 4, 14).to_bs().unwrap().fields();
        assert!(meets_minimum_age(exactly, Calendar::Bs, 18, today));
        assert!(!meets_minimum_age(one_day_short, Calendar::Bs, 18, today));
    }

    #[test]
    fn test_minimum_age_rejects_invalid_dates() {
        let today = ad(2024, 4, 13);
        assert!(!meets_minimum_age(CalendarDate::new(2060, 1, 32), Calendar::Bs, 0, today));
        assert!(!meets_minimum_age(CalendarDate::new(1900, 1, 1), Calendar::Bs, 0, today));
        assert!(meets_minimum_age(CalendarDate::new(1900, 1, 1), Calendar::Ad, 18, today));
    }

    #[test]
    fn test_minimum_age_today() {
        assert!(meets_minimum_age_today(CalendarDate::new(1990, 1, 1), Calendar::Ad, 18));
        assert!(!meets_minimum_age_today(CalendarDate::new(2100, 1, 1), Calendar::Bs, 1));
    }

    #[test]
    fn test_within_bounds_same_calendar() {
        let min = Some(DateValue::Bs(bs(2081, 1, 1)));
        let max = Some(DateValue::Bs(bs(2081, 12, 30)));
        assert!(is_within_bounds(DateValue::Bs(bs(2081, 1, 1)), min, max));
        assert!(is_within_bounds(DateValue::Bs(bs(2081, 12, 30)), min, max));
        assert!(!is_within_bounds(DateValue::Bs(bs(2080, 12, 30)), min, max));
        assert!(!is_within_bounds(DateValue::Bs(bs(2082, 1, 1)), min, max));
        assert!(is_within_bounds(DateValue::Bs(bs(1970, 1, 1)), None, max));
        assert!(is_within_bounds(DateValue::Bs(bs(2100, 1, 1)), min, None));
    }

    #[test]
    fn test_within_bounds_mixed_calendars() {
        // 2024-04-13 AD is 2081-01-01 BS
        let min = Some(DateValue::Ad(ad(2024, 4, 13)));
        assert!(is_within_bounds(DateValue::Bs(bs(2081, 1, 1)), min, None));
        assert!(!is_within_bounds(DateValue::Bs(bs(2080, 12, 30)), min, None));

        // An AD bound with no BS equivalent is compared in AD
        let max = Some(DateValue::Ad(ad(2200, 1, 1)));
        assert!(is_within_bounds(DateValue::Bs(bs(2100, 12, 30)), None, max));
        let min = Some(DateValue::Ad(ad(1800, 1, 1)));
        assert!(is_within_bounds(DateValue::Bs(bs(1970, 1, 1)), min, None));
    }
}
