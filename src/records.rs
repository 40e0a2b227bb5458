//! Trip record loading and derived-field computation.
//!
//! Reads a city's CSV source into an in-memory [`TripSet`], probing the
//! header once for the optional demographic columns and attaching the
//! derived month/day-of-week/hour fields to every record.

use std::path::Path;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use csv::StringRecord;
use tracing::{debug, info};

use crate::city::City;
use crate::errors::{LoadError, ParseError};

/// Timestamp layout used by all trip sources.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Column names as they appear in the source header.
pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// One bicycle trip, with derived fields attached at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub start_station: String,
    pub end_station: String,
    /// Trip duration in seconds.
    pub duration_secs: f64,
    pub user_type: String,
    pub gender: Option<String>,
    pub birth_year: Option<u16>,

    // derived from start_time
    pub month: u32,
    pub day: Weekday,
    pub hour: u32,
}

/// An ordered set of trips plus the per-field availability flags probed
/// from the source header.
#[derive(Debug, Clone)]
pub struct TripSet {
    pub trips: Vec<Trip>,
    pub has_gender: bool,
    pub has_birth_year: bool,
}

impl TripSet {
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

/// Header positions of the source columns. Required columns fail the load
/// when absent; optional columns degrade to an availability flag.
struct Columns {
    start_time: usize,
    end_time: Option<usize>,
    start_station: usize,
    end_station: usize,
    duration: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl Columns {
    fn probe(headers: &StringRecord) -> Result<Self, LoadError> {
        let position = |name: &'static str| headers.iter().position(|h| h == name);
        let required = |name: &'static str| position(name).ok_or(LoadError::MissingColumn(name));

        Ok(Columns {
            start_time: required(START_TIME)?,
            end_time: position(END_TIME),
            start_station: required(START_STATION)?,
            end_station: required(END_STATION)?,
            duration: required(TRIP_DURATION)?,
            user_type: required(USER_TYPE)?,
            gender: position(GENDER),
            birth_year: position(BIRTH_YEAR),
        })
    }
}

/// Loads all trips for a city from `data_dir` into a [`TripSet`].
///
/// # Errors
///
/// Fails if the source cannot be opened, a required column is absent, or
/// any record carries a malformed timestamp or duration.
pub fn load_city(data_dir: &Path, city: City) -> Result<TripSet, LoadError> {
    let path = data_dir.join(city.data_file());
    debug!(path = %path.display(), "Opening trip source");

    let mut reader = csv::Reader::from_path(&path).map_err(|source| LoadError::Open {
        path: path.clone(),
        source,
    })?;

    let headers = reader.headers().map_err(|source| LoadError::Open {
        path: path.clone(),
        source,
    })?;
    let columns = Columns::probe(headers)?;

    let mut trips = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = idx + 1;
        let record = result.map_err(|source| LoadError::Read { row, source })?;
        trips.push(parse_trip(&record, &columns, row)?);
    }

    info!(
        city = city.display_name(),
        trips = trips.len(),
        has_gender = columns.gender.is_some(),
        has_birth_year = columns.birth_year.is_some(),
        "Trip source loaded"
    );

    Ok(TripSet {
        trips,
        has_gender: columns.gender.is_some(),
        has_birth_year: columns.birth_year.is_some(),
    })
}

fn parse_trip(record: &StringRecord, columns: &Columns, row: usize) -> Result<Trip, ParseError> {
    let field = |idx: usize| record.get(idx).unwrap_or("");

    let start_time = parse_timestamp(field(columns.start_time), START_TIME, row)?;
    let end_time = match columns.end_time {
        Some(idx) if !field(idx).is_empty() => Some(parse_timestamp(field(idx), END_TIME, row)?),
        _ => None,
    };

    let duration_value = field(columns.duration);
    let duration_secs = duration_value
        .parse::<f64>()
        .map_err(|_| ParseError::Number {
            row,
            column: TRIP_DURATION,
            value: duration_value.to_string(),
        })?;

    // Empty or unparseable demographic cells degrade to "absent for this
    // record"; only required fields are held to the hard-failure policy.
    let gender = columns
        .gender
        .map(|idx| field(idx))
        .filter(|value| !value.is_empty())
        .map(str::to_string);
    let birth_year = columns
        .birth_year
        .and_then(|idx| field(idx).parse::<f64>().ok())
        .map(|year| year as u16);

    Ok(Trip {
        month: start_time.month(),
        day: start_time.weekday(),
        hour: start_time.hour(),
        start_time,
        end_time,
        start_station: field(columns.start_station).to_string(),
        end_station: field(columns.end_station).to_string(),
        duration_secs,
        user_type: field(columns.user_type).to_string(),
        gender,
        birth_year,
    })
}

fn parse_timestamp(
    value: &str,
    column: &'static str,
    row: usize,
) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|_| ParseError::Timestamp {
        row,
        column,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn write_source(name: &str, contents: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("bikeshare_explorer_{name}"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("chicago.csv"), contents).unwrap();
        dir
    }

    #[test]
    fn test_load_attaches_derived_fields() {
        let dir = write_source(
            "derived",
            "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
0,2017-01-01 00:07:57,2017-01-01 00:20:53,776.0,A,B,Subscriber,Male,1992.0
1,2017-06-15 09:30:00,,300.0,C,D,Customer,,
",
        );

        let set = load_city(&dir, City::Chicago).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(set.len(), 2);
        assert!(set.has_gender);
        assert!(set.has_birth_year);

        let first = &set.trips[0];
        assert_eq!(first.month, 1);
        assert_eq!(first.day, Weekday::Sun);
        assert_eq!(first.hour, 0);
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992));
        assert!(first.end_time.is_some());

        let second = &set.trips[1];
        assert_eq!(second.month, 6);
        assert_eq!(second.day, Weekday::Thu);
        assert_eq!(second.hour, 9);
        assert_eq!(second.gender, None);
        assert_eq!(second.birth_year, None);
        assert_eq!(second.end_time, None);
    }

    #[test]
    fn test_load_without_demographic_columns() {
        let dir = write_source(
            "no_demographics",
            "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
0,2017-02-11 09:00:00,2017-02-11 09:10:00,600.0,A,B,Subscriber
",
        );

        let set = load_city(&dir, City::Chicago).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert!(!set.has_gender);
        assert!(!set.has_birth_year);
        assert_eq!(set.trips[0].gender, None);
        assert_eq!(set.trips[0].birth_year, None);
    }

    #[test]
    fn test_missing_required_column_fails() {
        let dir = write_source(
            "missing_column",
            "\
,Start Time,End Time,Trip Duration,Start Station,End Station
0,2017-02-11 09:00:00,2017-02-11 09:10:00,600.0,A,B
",
        );

        let result = load_city(&dir, City::Chicago);
        fs::remove_dir_all(&dir).unwrap();

        match result {
            Err(LoadError::MissingColumn(column)) => assert_eq!(column, USER_TYPE),
            other => panic!("expected missing column error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_timestamp_fails_load() {
        let dir = write_source(
            "bad_timestamp",
            "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
0,not-a-timestamp,,600.0,A,B,Subscriber
",
        );

        let result = load_city(&dir, City::Chicago);
        fs::remove_dir_all(&dir).unwrap();

        assert!(matches!(
            result,
            Err(LoadError::Parse(ParseError::Timestamp { row: 1, .. }))
        ));
    }

    #[test]
    fn test_malformed_duration_fails_load() {
        let dir = write_source(
            "bad_duration",
            "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
0,2017-02-11 09:00:00,,sixty,A,B,Subscriber
",
        );

        let result = load_city(&dir, City::Chicago);
        fs::remove_dir_all(&dir).unwrap();

        assert!(matches!(
            result,
            Err(LoadError::Parse(ParseError::Number { row: 1, .. }))
        ));
    }

    #[test]
    fn test_missing_source_file() {
        let dir = env::temp_dir().join("bikeshare_explorer_absent");
        fs::create_dir_all(&dir).unwrap();
        let _ = fs::remove_file(dir.join("chicago.csv"));

        let result = load_city(&dir, City::Chicago);
        assert!(matches!(result, Err(LoadError::Open { .. })));
    }
}
