//! Shared aliases and small value types used across the tnotes application.
use chrono::{Duration, NaiveDate};

use crate::NotesError;

/// A specialized Result type for tnotes operations.
pub type Result<T> = std::result::Result<T, NotesError>;

/// Which notes the list screen is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteScope {
    /// Every stored note, in storage order
    #[default]
    All,
    /// Notes created on the given UTC calendar day
    Day(NaiveDate),
}

impl NoteScope {
    /// The scope one day after the current one. `All` is anchored on `today`.
    pub fn next_day(self, today: NaiveDate) -> Self {
        NoteScope::Day(self.anchor(today) + Duration::days(1))
    }

    /// The scope one day before the current one. `All` is anchored on `today`.
    pub fn previous_day(self, today: NaiveDate) -> Self {
        NoteScope::Day(self.anchor(today) - Duration::days(1))
    }

    fn anchor(self, today: NaiveDate) -> NaiveDate {
        match self {
            NoteScope::All => today,
            NoteScope::Day(day) => day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn stepping_from_all_is_anchored_on_today() {
        let today = day(2024, 3, 1);
        assert_eq!(NoteScope::All.next_day(today), NoteScope::Day(day(2024, 3, 2)));
        assert_eq!(
            NoteScope::All.previous_day(today),
            NoteScope::Day(day(2024, 2, 29))
        );
    }

    #[test]
    fn stepping_from_a_day_ignores_today() {
        let scope = NoteScope::Day(day(2023, 12, 31));
        assert_eq!(scope.next_day(day(2030, 1, 1)), NoteScope::Day(day(2024, 1, 1)));
    }
}
