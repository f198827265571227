//! Render models for the three picker views. The host draws these; the
//! controller builds them.

use crate::consts::DAYS_IN_WEEK;

const WEEKS: usize = 6;
const WEEK_LEN: usize = DAYS_IN_WEEK as usize;

/// One day in the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayCell {
    pub day: u8,
    /// `0` = Sunday
    pub weekday: u8,
    pub selected: bool,
    pub today: bool,
    /// Clicking a disabled cell does nothing.
    pub disabled: bool,
}

/// A BS month laid out as six Sunday-first weeks. Cells before the first
/// and after the last day are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGrid {
    pub year: u16,
    pub month: u8,
    pub cells: [[Option<DayCell>; WEEK_LEN]; WEEKS],
}

impl DayGrid {
    /// Lays out `length` days starting on `first_weekday`; `flags` gives
    /// `(selected, today, disabled)` for each day.
    pub(crate) fn new(
        year: u16,
        month: u8,
        first_weekday: u8,
        length: u8,
        mut flags: impl FnMut(u8) -> (bool, bool, bool),
    ) -> Self {
        let first = usize::from(first_weekday % DAYS_IN_WEEK);
        let mut cells = [[None; WEEK_LEN]; WEEKS];
        for day in 1..=length {
            let pos = first + usize::from(day) - 1;
            if pos >= WEEKS * WEEK_LEN {
                break;
            }
            let (selected, today, disabled) = flags(day);
            cells[pos / WEEK_LEN][pos % WEEK_LEN] = Some(DayCell {
                day,
                weekday: (pos % WEEK_LEN) as u8,
                selected,
                today,
                disabled,
            });
        }
        Self { year, month, cells }
    }

    /// Days in grid order.
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().flatten().flatten()
    }

    pub fn day(&self, day: u8) -> Option<&DayCell> {
        self.days().find(|cell| cell.day == day)
    }

    /// `(week, weekday)` position of `day`.
    pub fn position(&self, day: u8) -> Option<(usize, usize)> {
        self.cells.iter().enumerate().find_map(|(week, row)| {
            row.iter()
                .position(|cell| cell.is_some_and(|c| c.day == day))
                .map(|col| (week, col))
        })
    }
}

/// One entry of the month list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthCell {
    pub month: u8,
    pub name: &'static str,
    /// The month currently shown in the day grid.
    pub current: bool,
    /// Holds the selected date.
    pub selected: bool,
}

/// One entry of the year list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct YearCell {
    pub year: u16,
    /// Year in the configured digits.
    pub label: String,
    pub current: bool,
    pub selected: bool,
    /// Outside the month table.
    pub disabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_flags(_: u8) -> (bool, bool, bool) {
        (false, false, false)
    }

    #[test]
    fn test_layout() {
        // Baisakh 2081 starts on a Saturday and has 31 days
        let grid = DayGrid::new(2081, 1, 6, 31, no_flags);
        assert_eq!(grid.cells[0][..6], [None; 6]);
        assert_eq!(grid.cells[0][6].map(|c| c.day), Some(1));
        assert_eq!(grid.position(1), Some((0, 6)));
        assert_eq!(grid.position(2), Some((1, 0)));
        assert_eq!(grid.position(31), Some((5, 1)));
        assert_eq!(grid.days().count(), 31);
        assert_eq!(grid.day(31).map(|c| c.weekday), Some(1));
        assert!(grid.day(32).is_none());
    }

    #[test]
    fn test_longest_month_fits() {
        let grid = DayGrid::new(2081, 3, 6, 32, no_flags);
        assert_eq!(grid.days().count(), 32);
        assert_eq!(grid.position(32), Some((5, 2)));
    }

    #[test]
    fn test_flags() {
        let grid = DayGrid::new(2081, 1, 0, 31, |day| (day == 15, day == 3, day > 20));
        let cell = grid.day(15).expect("day 15 is in the grid");
        assert!(cell.selected && !cell.today && !cell.disabled);
        assert!(grid.day(3).is_some_and(|c| c.today));
        assert_eq!(grid.days().filter(|c| c.disabled).count(), 11);
        assert_eq!(grid.days().map(|c| c.day).collect::<Vec<_>>(), (1..=31).collect::<Vec<_>>());
    }
}
