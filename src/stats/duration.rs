use serde::Serialize;

use crate::errors::StatsError;
use crate::records::Trip;
use crate::stats::utility::mean;

/// Aggregate travel time over a filtered trip set, in whole seconds.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DurationStats {
    pub total_secs: i64,
    pub mean_secs: i64,
}

/// Total travel time in seconds. Zero for an empty set; unlike the mean,
/// a sum is defined everywhere.
pub fn total_duration_secs(trips: &[Trip]) -> f64 {
    trips.iter().map(|t| t.duration_secs).sum()
}

impl DurationStats {
    /// # Errors
    ///
    /// Returns [`StatsError::EmptyResult`] for an empty set; the mean is
    /// undefined there.
    pub fn from_trips(trips: &[Trip]) -> Result<Self, StatsError> {
        if trips.is_empty() {
            return Err(StatsError::EmptyResult);
        }

        let durations: Vec<f64> = trips.iter().map(|t| t.duration_secs).collect();
        let total: f64 = durations.iter().sum();

        Ok(DurationStats {
            total_secs: total.round() as i64,
            mean_secs: mean(&durations).round() as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};

    fn trip(duration_secs: f64) -> Trip {
        Trip {
            start_time: NaiveDate::from_ymd_opt(2017, 1, 2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            end_time: None,
            start_station: "A".to_string(),
            end_station: "B".to_string(),
            duration_secs,
            user_type: "Subscriber".to_string(),
            gender: None,
            birth_year: None,
            month: 1,
            day: Weekday::Mon,
            hour: 0,
        }
    }

    #[test]
    fn test_sum_and_mean() {
        let trips = vec![trip(100.0), trip(200.0), trip(300.0)];

        let stats = DurationStats::from_trips(&trips).unwrap();
        assert_eq!(stats.total_secs, 600);
        assert_eq!(stats.mean_secs, 200);
    }

    #[test]
    fn test_reported_values_are_rounded() {
        let trips = vec![trip(100.4), trip(100.4)];

        let stats = DurationStats::from_trips(&trips).unwrap();
        assert_eq!(stats.total_secs, 201);
        assert_eq!(stats.mean_secs, 100);
    }

    #[test]
    fn test_total_is_zero_for_empty_set() {
        assert_eq!(total_duration_secs(&[]), 0.0);
    }

    #[test]
    fn test_mean_over_empty_set_is_empty_result() {
        assert_eq!(DurationStats::from_trips(&[]), Err(StatsError::EmptyResult));
    }
}
