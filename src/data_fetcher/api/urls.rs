//! URL building utilities for API endpoints
//!
//! Suffixes are internal constants, never user input, so nothing here
//! escapes or validates.

/// Season selector used in Jolpica paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Current,
    Year(i32),
}

impl Season {
    fn path_segment(&self) -> String {
        match self {
            Season::Current => "current".to_string(),
            Season::Year(year) => year.to_string(),
        }
    }
}

/// Session selector used in OpenF1 queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKey {
    Latest,
    Key(u32),
}

impl SessionKey {
    fn query_value(&self) -> String {
        match self {
            SessionKey::Latest => "latest".to_string(),
            SessionKey::Key(key) => key.to_string(),
        }
    }
}

/// Joins a base URL and a path suffix.
///
/// # Example
/// ```
/// use f1_race_data::data_fetcher::api::build_jolpica_url;
///
/// let url = build_jolpica_url("https://api.jolpi.ca/ergast/f1/", "/current.json");
/// assert_eq!(url, "https://api.jolpi.ca/ergast/f1/current.json");
/// ```
pub fn build_jolpica_url(base_url: &str, suffix: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        suffix.trim_start_matches('/')
    )
}

/// Builds the season schedule URL (`/current.json`, `/2025.json`).
pub fn build_schedule_url(base_url: &str, season: Season) -> String {
    build_jolpica_url(base_url, &format!("{}.json", season.path_segment()))
}

/// Builds the next-race URL for the current season.
pub fn build_next_race_url(base_url: &str) -> String {
    build_jolpica_url(base_url, "current/next.json")
}

/// Builds the driver standings URL.
///
/// # Example
/// ```
/// use f1_race_data::data_fetcher::api::{build_driver_standings_url, Season};
///
/// let url = build_driver_standings_url("https://api.example.com", Season::Year(2025));
/// assert_eq!(url, "https://api.example.com/2025/driverStandings.json");
/// ```
pub fn build_driver_standings_url(base_url: &str, season: Season) -> String {
    build_jolpica_url(
        base_url,
        &format!("{}/driverStandings.json", season.path_segment()),
    )
}

/// Builds the constructor standings URL.
pub fn build_constructor_standings_url(base_url: &str, season: Season) -> String {
    build_jolpica_url(
        base_url,
        &format!("{}/constructorStandings.json", season.path_segment()),
    )
}

/// Builds the URL for the results of the last completed race of a season.
pub fn build_last_results_url(base_url: &str, season: Season) -> String {
    build_jolpica_url(
        base_url,
        &format!("{}/last/results.json", season.path_segment()),
    )
}

/// Builds the URL for the race results of one round of the current season.
pub fn build_round_results_url(base_url: &str, round: u32) -> String {
    build_jolpica_url(base_url, &format!("current/{round}/results.json"))
}

/// Builds the URL for the qualifying results of one round of the current season.
pub fn build_qualifying_url(base_url: &str, round: u32) -> String {
    build_jolpica_url(base_url, &format!("current/{round}/qualifying.json"))
}

/// Builds an OpenF1 resource URL filtered by session.
///
/// # Example
/// ```
/// use f1_race_data::data_fetcher::api::{build_openf1_url, SessionKey};
///
/// let url = build_openf1_url("https://api.openf1.org/v1", "intervals", SessionKey::Latest);
/// assert_eq!(url, "https://api.openf1.org/v1/intervals?session_key=latest");
/// ```
pub fn build_openf1_url(base_url: &str, resource: &str, session: SessionKey) -> String {
    format!(
        "{}/{}?session_key={}",
        base_url.trim_end_matches('/'),
        resource,
        session.query_value()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.jolpi.ca/ergast/f1";

    #[test]
    fn test_schedule_urls() {
        assert_eq!(
            build_schedule_url(BASE, Season::Current),
            "https://api.jolpi.ca/ergast/f1/current.json"
        );
        assert_eq!(
            build_schedule_url(BASE, Season::Year(2025)),
            "https://api.jolpi.ca/ergast/f1/2025.json"
        );
        assert_eq!(
            build_next_race_url(BASE),
            "https://api.jolpi.ca/ergast/f1/current/next.json"
        );
    }

    #[test]
    fn test_standings_urls() {
        assert_eq!(
            build_driver_standings_url(BASE, Season::Current),
            "https://api.jolpi.ca/ergast/f1/current/driverStandings.json"
        );
        assert_eq!(
            build_constructor_standings_url(BASE, Season::Year(2025)),
            "https://api.jolpi.ca/ergast/f1/2025/constructorStandings.json"
        );
    }

    #[test]
    fn test_results_urls() {
        assert_eq!(
            build_last_results_url(BASE, Season::Current),
            "https://api.jolpi.ca/ergast/f1/current/last/results.json"
        );
        assert_eq!(
            build_round_results_url(BASE, 7),
            "https://api.jolpi.ca/ergast/f1/current/7/results.json"
        );
        assert_eq!(
            build_qualifying_url(BASE, 7),
            "https://api.jolpi.ca/ergast/f1/current/7/qualifying.json"
        );
    }

    #[test]
    fn test_join_handles_slashes() {
        assert_eq!(
            build_jolpica_url("http://localhost:8080/", "/current.json"),
            "http://localhost:8080/current.json"
        );
        assert_eq!(
            build_jolpica_url("http://localhost:8080", "current.json"),
            "http://localhost:8080/current.json"
        );
    }

    #[test]
    fn test_openf1_urls() {
        assert_eq!(
            build_openf1_url("https://api.openf1.org/v1/", "sessions", SessionKey::Latest),
            "https://api.openf1.org/v1/sessions?session_key=latest"
        );
        assert_eq!(
            build_openf1_url("https://api.openf1.org/v1", "drivers", SessionKey::Key(9158)),
            "https://api.openf1.org/v1/drivers?session_key=9158"
        );
    }
}
