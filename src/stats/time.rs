use serde::Serialize;

use crate::errors::StatsError;
use crate::filter::day_name;
use crate::records::Trip;
use crate::stats::utility::mode;

/// Most frequent travel times over a filtered trip set.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TimeStats {
    pub popular_month: u32,
    pub popular_month_trips: u64,
    pub popular_day: String,
    pub popular_day_trips: u64,
    pub popular_hour: u32,
    pub popular_hour_trips: u64,
}

impl TimeStats {
    /// # Errors
    ///
    /// Returns [`StatsError::EmptyResult`] for an empty set; a mode over
    /// zero trips has no defined value.
    pub fn from_trips(trips: &[Trip]) -> Result<Self, StatsError> {
        let (popular_month, month_trips) =
            mode(trips.iter().map(|t| t.month)).ok_or(StatsError::EmptyResult)?;
        let (popular_day, day_trips) =
            mode(trips.iter().map(|t| t.day)).ok_or(StatsError::EmptyResult)?;
        let (popular_hour, hour_trips) =
            mode(trips.iter().map(|t| t.hour)).ok_or(StatsError::EmptyResult)?;

        Ok(TimeStats {
            popular_month,
            popular_month_trips: month_trips,
            popular_day: day_name(popular_day).to_string(),
            popular_day_trips: day_trips,
            popular_hour,
            popular_hour_trips: hour_trips,
        })
    }
}
