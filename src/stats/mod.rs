//! Aggregation passes over a filtered trip set.
//!
//! Four independent aggregators — travel times, stations, durations, and
//! user demographics — each consume a read-only view of the same filtered
//! [`TripSet`] and can run in parallel.

pub mod duration;
pub mod station;
pub mod time;
pub mod user;
pub mod utility;

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::errors::StatsError;
use crate::records::TripSet;

pub use duration::DurationStats;
pub use station::StationStats;
pub use time::TimeStats;
pub use user::UserStats;

/// A report value that may be absent because the source lacked the
/// backing column. Distinct from a computation error.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Availability<T> {
    Available(T),
    Unavailable,
}

impl<T> Availability<T> {
    pub fn as_available(&self) -> Option<&T> {
        match self {
            Availability::Available(value) => Some(value),
            Availability::Unavailable => None,
        }
    }
}

/// The combined output of the four aggregation passes.
#[derive(Debug, Serialize)]
pub struct Report {
    pub time: TimeStats,
    pub stations: StationStats,
    pub durations: DurationStats,
    pub users: UserStats,
}

/// Runs the four aggregators in parallel over a shared read-only set.
///
/// # Errors
///
/// Returns [`StatsError::EmptyResult`] when the filtered set is empty;
/// every pass needs at least one trip for its modes and means.
pub async fn compute_all(set: Arc<TripSet>) -> Result<Report, StatsError> {
    if set.is_empty() {
        return Err(StatsError::EmptyResult);
    }

    debug!(trips = set.len(), "Starting aggregation passes");

    let time = {
        let set = Arc::clone(&set);
        tokio::task::spawn_blocking(move || TimeStats::from_trips(&set.trips))
    };
    let stations = {
        let set = Arc::clone(&set);
        tokio::task::spawn_blocking(move || StationStats::from_trips(&set.trips))
    };
    let durations = {
        let set = Arc::clone(&set);
        tokio::task::spawn_blocking(move || DurationStats::from_trips(&set.trips))
    };
    let users = {
        let set = Arc::clone(&set);
        tokio::task::spawn_blocking(move || UserStats::from_set(&set))
    };

    Ok(Report {
        time: time.await.expect("time aggregator panicked")?,
        stations: stations.await.expect("station aggregator panicked")?,
        durations: durations.await.expect("duration aggregator panicked")?,
        users: users.await.expect("user aggregator panicked")?,
    })
}
