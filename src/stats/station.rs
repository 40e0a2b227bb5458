use serde::Serialize;

use crate::errors::StatsError;
use crate::records::Trip;
use crate::stats::utility::mode;

/// Separator used to derive the combined route key.
pub const ROUTE_SEPARATOR: &str = " to ";

/// Most frequent stations and route over a filtered trip set.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StationStats {
    pub popular_start_station: String,
    pub popular_start_station_trips: u64,
    pub popular_end_station: String,
    pub popular_end_station_trips: u64,
    pub popular_route: String,
    pub popular_route_trips: u64,
}

impl StationStats {
    /// # Errors
    ///
    /// Returns [`StatsError::EmptyResult`] for an empty set.
    pub fn from_trips(trips: &[Trip]) -> Result<Self, StatsError> {
        let (start, start_trips) =
            mode(trips.iter().map(|t| t.start_station.as_str())).ok_or(StatsError::EmptyResult)?;
        let (end, end_trips) =
            mode(trips.iter().map(|t| t.end_station.as_str())).ok_or(StatsError::EmptyResult)?;

        // Route keys are derived into this pass's own working set; the
        // shared trips are never written to.
        let routes = trips
            .iter()
            .map(|t| format!("{}{}{}", t.start_station, ROUTE_SEPARATOR, t.end_station));
        let (route, route_trips) = mode(routes).ok_or(StatsError::EmptyResult)?;

        Ok(StationStats {
            popular_start_station: start.to_string(),
            popular_start_station_trips: start_trips,
            popular_end_station: end.to_string(),
            popular_end_station_trips: end_trips,
            popular_route: route,
            popular_route_trips: route_trips,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};

    fn trip(start: &str, end: &str) -> Trip {
        Trip {
            start_time: NaiveDate::from_ymd_opt(2017, 1, 2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            end_time: None,
            start_station: start.to_string(),
            end_station: end.to_string(),
            duration_secs: 60.0,
            user_type: "Subscriber".to_string(),
            gender: None,
            birth_year: None,
            month: 1,
            day: Weekday::Mon,
            hour: 0,
        }
    }

    #[test]
    fn test_route_mode() {
        let trips = vec![trip("A", "B"), trip("A", "B"), trip("C", "D")];

        let stats = StationStats::from_trips(&trips).unwrap();
        assert_eq!(stats.popular_route, "A to B");
        assert_eq!(stats.popular_route_trips, 2);
    }

    #[test]
    fn test_start_and_end_modes_are_independent() {
        let trips = vec![trip("A", "X"), trip("A", "Y"), trip("B", "Y")];

        let stats = StationStats::from_trips(&trips).unwrap();
        assert_eq!(stats.popular_start_station, "A");
        assert_eq!(stats.popular_start_station_trips, 2);
        assert_eq!(stats.popular_end_station, "Y");
        assert_eq!(stats.popular_end_station_trips, 2);
        // every route is unique, so the first one wins
        assert_eq!(stats.popular_route, "A to X");
        assert_eq!(stats.popular_route_trips, 1);
    }

    #[test]
    fn test_empty_set_is_empty_result() {
        assert_eq!(StationStats::from_trips(&[]), Err(StatsError::EmptyResult));
    }
}
