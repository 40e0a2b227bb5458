use serde::Serialize;

use crate::errors::StatsError;
use crate::records::{Trip, TripSet};
use crate::stats::Availability;
use crate::stats::utility::{mode, value_counts};

/// Birth years at or below this bound are treated as data-entry errors
/// and excluded from the statistics.
pub const BIRTH_YEAR_FLOOR: u16 = 1916;

/// One category of a frequency breakdown.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CategoryCount {
    pub value: String,
    pub count: u64,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: u16,
    pub latest: u16,
    pub most_common: u16,
}

/// User demographics over a filtered trip set.
///
/// Gender and birth-year results degrade to
/// [`Availability::Unavailable`] when the source lacks those columns or
/// no usable values survive; a user-type breakdown is always present.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UserStats {
    pub user_types: Vec<CategoryCount>,
    pub genders: Availability<Vec<CategoryCount>>,
    pub birth_years: Availability<BirthYearStats>,
}

impl UserStats {
    /// # Errors
    ///
    /// Returns [`StatsError::EmptyResult`] for an empty set. Absent
    /// demographic columns are not an error.
    pub fn from_set(set: &TripSet) -> Result<Self, StatsError> {
        if set.trips.is_empty() {
            return Err(StatsError::EmptyResult);
        }

        let user_types = breakdown(set.trips.iter().map(|t| t.user_type.as_str()));

        let genders = if set.has_gender {
            let counts = breakdown(set.trips.iter().filter_map(|t| t.gender.as_deref()));
            if counts.is_empty() {
                Availability::Unavailable
            } else {
                Availability::Available(counts)
            }
        } else {
            Availability::Unavailable
        };

        let birth_years = if set.has_birth_year {
            birth_year_stats(&set.trips)
        } else {
            Availability::Unavailable
        };

        Ok(UserStats {
            user_types,
            genders,
            birth_years,
        })
    }
}

fn breakdown<'a, I>(values: I) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a str>,
{
    value_counts(values)
        .into_iter()
        .map(|(value, count)| CategoryCount {
            value: value.to_string(),
            count,
        })
        .collect()
}

fn birth_year_stats(trips: &[Trip]) -> Availability<BirthYearStats> {
    let years: Vec<u16> = trips
        .iter()
        .filter_map(|t| t.birth_year)
        .filter(|&year| year > BIRTH_YEAR_FLOOR)
        .collect();

    match (
        years.iter().min(),
        years.iter().max(),
        mode(years.iter().copied()),
    ) {
        (Some(&earliest), Some(&latest), Some((most_common, _))) => {
            Availability::Available(BirthYearStats {
                earliest,
                latest,
                most_common,
            })
        }
        _ => Availability::Unavailable,
    }
}
