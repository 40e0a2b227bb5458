//! Supported cities and trip-source resolution.

use clap::ValueEnum;

/// The closed set of cities with trip data available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// The city name as users type it.
    pub fn display_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// File name of the city's trip source: lowercase, spaces replaced
    /// with underscores, `.csv` suffix.
    pub fn data_file(self) -> String {
        format!("{}.csv", self.display_name().replace(' ', "_"))
    }

    /// Parses free-form user input, case-insensitively.
    pub fn from_input(input: &str) -> Option<City> {
        let normalized = input.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|city| city.display_name() == normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_accepts_any_case() {
        assert_eq!(City::from_input("Chicago"), Some(City::Chicago));
        assert_eq!(City::from_input("  NEW YORK CITY "), Some(City::NewYorkCity));
        assert_eq!(City::from_input("washington"), Some(City::Washington));
    }

    #[test]
    fn test_from_input_rejects_unknown_city() {
        assert_eq!(City::from_input("boston"), None);
        assert_eq!(City::from_input(""), None);
    }

    #[test]
    fn test_data_file_resolution() {
        assert_eq!(City::Chicago.data_file(), "chicago.csv");
        assert_eq!(City::NewYorkCity.data_file(), "new_york_city.csv");
        assert_eq!(City::Washington.data_file(), "washington.csv");
    }
}
