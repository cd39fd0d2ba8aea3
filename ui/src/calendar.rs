//! Month grids for the holiday calendar.

use jiff::{ToSpan, civil::Date};

/// Six weeks of seven days.
pub const GRID_CELLS: usize = 42;

pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCell {
    Blank,
    Day(Date),
}

impl DayCell {
    pub fn date(self) -> Option<Date> {
        match self {
            DayCell::Blank => None,
            DayCell::Day(day) => Some(day),
        }
    }
}

/// Lay out the month containing `reference` on a Sunday-first grid.
///
/// The grid always has [`GRID_CELLS`] cells: blanks up to the weekday of the
/// first, one cell per day, then blanks to fill the sixth week.
pub fn month_grid(reference: Date) -> [DayCell; GRID_CELLS] {
    let first = reference.first_of_month();
    let lead = first.weekday().to_sunday_zero_offset() as usize;
    let days = first.days_in_month() as usize;

    let mut cells = [DayCell::Blank; GRID_CELLS];
    for (cell, day) in cells[lead..].iter_mut().zip(first.series(1.day()).take(days)) {
        *cell = DayCell::Day(day);
    }
    cells
}

/// The displayed month and the chosen day. They move independently: paging
/// through months never changes the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    pub reference: Date,
    pub selected: Date,
}

impl CalendarState {
    pub fn new(today: Date) -> Self {
        Self {
            reference: today,
            selected: today,
        }
    }

    pub fn grid(&self) -> [DayCell; GRID_CELLS] {
        month_grid(self.reference)
    }

    pub fn previous_month(&mut self) {
        let first = self.reference.first_of_month();
        self.reference = first.checked_sub(1.month()).unwrap_or(first);
    }

    pub fn next_month(&mut self) {
        let first = self.reference.first_of_month();
        self.reference = first.checked_add(1.month()).unwrap_or(first);
    }

    pub fn today(&mut self, today: Date) {
        *self = Self::new(today);
    }

    pub fn select(&mut self, day: Date) {
        self.selected = day;
    }

    pub fn selected_label(&self) -> String {
        day_label(self.selected)
    }

    pub fn month_label(&self) -> String {
        self.reference.strftime("%B %Y").to_string()
    }
}

/// `DD/MM/YYYY`, the format used across the portal.
pub fn day_label(day: Date) -> String {
    day.strftime("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use pretty_assertions::assert_eq;

    fn counts(cells: &[DayCell]) -> (usize, usize, usize) {
        let lead = cells.iter().take_while(|c| **c == DayCell::Blank).count();
        let days = cells.iter().filter(|c| c.date().is_some()).count();
        (lead, days, cells.len() - lead - days)
    }

    #[test]
    fn february_2026_starts_on_sunday() {
        assert_eq!(counts(&month_grid(date(2026, 2, 17))), (0, 28, 14));
    }

    #[test]
    fn january_2026_starts_on_thursday() {
        let grid = month_grid(date(2026, 1, 1));
        assert_eq!(counts(&grid), (4, 31, 7));
        assert_eq!(grid[4], DayCell::Day(date(2026, 1, 1)));
        assert_eq!(grid[34], DayCell::Day(date(2026, 1, 31)));
    }

    #[test]
    fn six_lead_blanks_and_31_days_still_fit() {
        // 2026-08-01 is a Saturday.
        assert_eq!(counts(&month_grid(date(2026, 8, 1))), (6, 31, 5));
    }

    #[test]
    fn every_month_fills_the_grid() {
        for year in 1900..=2100 {
            for month in 1..=12 {
                let first = date(year, month, 1);
                let grid = month_grid(first);
                let (lead, days, _) = counts(&grid);

                assert_eq!(lead, first.weekday().to_sunday_zero_offset() as usize);
                assert_eq!(days, first.days_in_month() as usize);
                assert!(grid[lead..lead + days].iter().all(|c| c.date().is_some()));
            }
        }
    }

    #[test]
    fn paging_back_and_forth_lands_on_the_first() {
        let mut state = CalendarState::new(date(2026, 3, 31));
        state.previous_month();
        assert_eq!(state.reference, date(2026, 2, 1));
        state.next_month();
        assert_eq!(state.reference, date(2026, 3, 1));

        let mut state = CalendarState::new(date(2026, 1, 15));
        state.previous_month();
        assert_eq!(state.reference, date(2025, 12, 1));
    }

    #[test]
    fn paging_keeps_the_selection() {
        let mut state = CalendarState::new(date(2026, 1, 15));
        state.select(date(2026, 1, 20));
        state.next_month();
        state.next_month();
        assert_eq!(state.selected, date(2026, 1, 20));

        state.today(date(2026, 1, 16));
        assert_eq!(state, CalendarState::new(date(2026, 1, 16)));
    }

    #[test]
    fn today_follows_the_clock_not_the_first_render() {
        let mut state = CalendarState::new(date(2026, 1, 31));
        state.next_month();
        state.select(date(2026, 2, 14));

        state.today(date(2026, 2, 1));
        assert_eq!(state.reference, date(2026, 2, 1));
        assert_eq!(state.selected, date(2026, 2, 1));
        assert_eq!(state.month_label(), "February 2026");
    }

    #[test]
    fn labels() {
        let state = CalendarState::new(date(2026, 1, 5));
        assert_eq!(state.selected_label(), "05/01/2026");
        assert_eq!(state.month_label(), "January 2026");
    }
}
