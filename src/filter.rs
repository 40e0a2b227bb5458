//! Month and day-of-week filtering over a loaded [`TripSet`].

use chrono::Weekday;
use clap::ValueEnum;

use crate::records::TripSet;

/// Months accepted as filter values. The trip sources only cover the
/// first half of the year, so July through December are not selectable
/// even though derived months always report the full 1-12 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// Calendar month number: position in the supported list plus one.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
        }
    }

    /// Parses free-form user input, case-insensitively.
    pub fn from_input(input: &str) -> Option<Month> {
        let normalized = input.trim().to_lowercase();
        Self::ALL.into_iter().find(|month| month.name() == normalized)
    }
}

/// Parses a weekday name ("monday" through "sunday"), case-insensitively.
pub fn parse_day(input: &str) -> Option<Weekday> {
    input.trim().parse::<Weekday>().ok()
}

/// Full English name of a weekday, as shown in reports.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Full English name of a calendar month. Derived months span the whole
/// year even though only January through June are accepted as filters.
pub fn month_name(month: u32) -> &'static str {
    chrono::Month::try_from(month as u8)
        .map(|m| m.name())
        .unwrap_or("unknown")
}

/// The pair of optional filter criteria; `None` on either axis means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Filters {
    pub month: Option<Month>,
    pub day: Option<Weekday>,
}

impl Filters {
    pub fn month_label(self) -> &'static str {
        self.month.map(Month::name).unwrap_or("all")
    }

    pub fn day_label(self) -> &'static str {
        self.day.map(day_name).unwrap_or("all")
    }
}

/// Returns the subset of `set` matching both criteria.
///
/// The input is never mutated; the filtered set preserves insertion order
/// and carries the source's availability flags.
pub fn apply(set: &TripSet, filters: Filters) -> TripSet {
    let trips = set
        .trips
        .iter()
        .filter(|trip| filters.month.map_or(true, |m| trip.month == m.number()))
        .filter(|trip| filters.day.map_or(true, |d| trip.day == d))
        .cloned()
        .collect();

    TripSet {
        trips,
        has_gender: set.has_gender,
        has_birth_year: set.has_birth_year,
    }
}
