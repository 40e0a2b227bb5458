//! Interactive exploration session: filter prompts, report display,
//! raw-record paging, and restart handling.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use bikeshare_explorer::city::City;
use bikeshare_explorer::errors::StatsError;
use bikeshare_explorer::filter::{self, Filters, Month, month_name};
use bikeshare_explorer::records::{self, Trip};
use bikeshare_explorer::stats::{self, Availability, Report};

const PAGE_SIZE: usize = 5;
const RULE: &str = "----------------------------------------";

/// Runs the interactive prompt loop until the user declines a restart.
pub async fn run(data_dir: &Path) -> Result<()> {
    println!("Hello! Let's explore some US bikeshare data!");

    loop {
        let (city, filters) = get_filters()?;
        println!("{RULE}");

        info!(
            city = city.display_name(),
            month = filters.month_label(),
            day = filters.day_label(),
            "Loading trips"
        );

        let set = records::load_city(data_dir, city)?;
        let filtered = Arc::new(filter::apply(&set, filters));

        match stats::compute_all(Arc::clone(&filtered)).await {
            Ok(report) => {
                print_report(&report);
                page_trips(&filtered.trips)?;
            }
            Err(StatsError::EmptyResult) => {
                warn!(city = city.display_name(), "No trips matched the filters");
                println!("\nNo trips match those filters. Try a different month or day.");
            }
        }

        if !prompt_yes("\nWould you like to restart? Enter yes or no.\n")? {
            break;
        }
    }

    Ok(())
}

/// Asks for a city, month, and day, re-prompting until each input parses.
fn get_filters() -> Result<(City, Filters)> {
    let city = loop {
        let input = prompt("Enter a city name (chicago, new york city, washington): ")?;
        match City::from_input(&input) {
            Some(city) => break city,
            None => println!("Unknown city {input:?}."),
        }
    };

    let month = loop {
        let input = prompt("Enter a month name (january through june, or all): ")?;
        if input.eq_ignore_ascii_case("all") {
            break None;
        }
        match Month::from_input(&input) {
            Some(month) => break Some(month),
            None => println!("Unknown month {input:?}. The data covers January through June only."),
        }
    };

    let day = loop {
        let input = prompt("Enter a day of the week (monday through sunday, or all): ")?;
        if input.eq_ignore_ascii_case("all") {
            break None;
        }
        match filter::parse_day(&input) {
            Some(day) => break Some(day),
            None => println!("Unknown day {input:?}."),
        }
    };

    Ok((city, Filters { month, day }))
}

/// Prints the four report sections to stdout.
pub fn print_report(report: &Report) {
    println!("\nCalculating The Most Frequent Times of Travel...\n");
    println!(
        "Most Popular Month: {} ({} trips)",
        month_name(report.time.popular_month),
        report.time.popular_month_trips
    );
    println!(
        "Most Popular Day of Week: {} ({} trips)",
        report.time.popular_day, report.time.popular_day_trips
    );
    println!(
        "Most Popular Start Hour: {} ({} trips)",
        report.time.popular_hour, report.time.popular_hour_trips
    );
    println!("{RULE}");

    println!("\nCalculating The Most Popular Stations and Trip...\n");
    println!(
        "Most Popular Start Station: {} ({} trips)",
        report.stations.popular_start_station, report.stations.popular_start_station_trips
    );
    println!(
        "Most Popular End Station: {} ({} trips)",
        report.stations.popular_end_station, report.stations.popular_end_station_trips
    );
    println!(
        "Most Popular Trip: {} ({} trips)",
        report.stations.popular_route, report.stations.popular_route_trips
    );
    println!("{RULE}");

    println!("\nCalculating Trip Duration...\n");
    println!(
        "Total Travel Time (in seconds): {}",
        report.durations.total_secs
    );
    println!(
        "Mean Travel Time (in seconds): {}",
        report.durations.mean_secs
    );
    println!("{RULE}");

    println!("\nCalculating User Stats...\n");
    println!("Counts of User Types:");
    for category in &report.users.user_types {
        println!("  {}: {}", category.value, category.count);
    }

    match &report.users.genders {
        Availability::Available(genders) => {
            println!("\nCounts of Gender:");
            for category in genders {
                println!("  {}: {}", category.value, category.count);
            }
        }
        Availability::Unavailable => println!("\nSorry, no gender data available."),
    }

    match &report.users.birth_years {
        Availability::Available(years) => {
            println!("\nEarliest birth year: {}", years.earliest);
            println!("Most Recent birth year: {}", years.latest);
            println!("Most Common birth year: {}", years.most_common);
        }
        Availability::Unavailable => println!("\nSorry, no birth year data available."),
    }
    println!("{RULE}");
}

/// Shows source records five at a time for as long as the user keeps
/// answering yes.
fn page_trips(trips: &[Trip]) -> Result<()> {
    let mut shown = 0;

    while shown < trips.len() {
        let question = if shown == 0 {
            "\nWould you like to view the raw trip records? Enter yes or no.\n"
        } else {
            "\nWould you like to view the next 5 records? Enter yes or no.\n"
        };
        if !prompt_yes(question)? {
            break;
        }

        for trip in trips.iter().skip(shown).take(PAGE_SIZE) {
            println!("{}", format_trip(trip));
        }
        shown += PAGE_SIZE;

        if shown >= trips.len() {
            println!("\nEnd of records.");
        }
    }

    Ok(())
}

/// Formats a trip's source fields; the derived columns stay internal.
fn format_trip(trip: &Trip) -> String {
    let end_time = trip
        .end_time
        .map(|t| t.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{} | {} | {} -> {} | {:.0}s | {}",
        trip.start_time, end_time, trip.start_station, trip.end_station, trip.duration_secs,
        trip.user_type
    )
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        anyhow::bail!("input stream closed");
    }
    Ok(line.trim().to_string())
}

fn prompt_yes(message: &str) -> Result<bool> {
    Ok(prompt(message)?.eq_ignore_ascii_case("yes"))
}
