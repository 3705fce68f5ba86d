//! Defensive extraction of lists from Ergast-shaped envelopes.
//!
//! Absence of data is a normal state (off-season, race not run yet), so every
//! extractor here returns an empty list instead of failing: a missing root, a
//! missing intermediate key, a node that is not an array and an empty array
//! all come out as `[]`.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::data_fetcher::models::{
    JolpicaConstructorStanding, JolpicaDriverStanding, JolpicaRace, JolpicaResult,
    QualifyingResult,
};
use crate::error::AppError;

pub const RACES_POINTER: &str = "/MRData/RaceTable/Races";
pub const DRIVER_STANDINGS_POINTER: &str =
    "/MRData/StandingsTable/StandingsLists/0/DriverStandings";
pub const CONSTRUCTOR_STANDINGS_POINTER: &str =
    "/MRData/StandingsTable/StandingsLists/0/ConstructorStandings";
const FIRST_RACE_RESULTS_POINTER: &str = "/MRData/RaceTable/Races/0/Results";
const FIRST_RACE_QUALIFYING_POINTER: &str = "/MRData/RaceTable/Races/0/QualifyingResults";
const FIRST_RACE_POINTER: &str = "/MRData/RaceTable/Races/0";

/// Deserializes the array found at `pointer`.
///
/// Entries that do not match `T` are skipped with a warning, so one odd
/// record never hides the rest of the list.
pub fn extract_list<T: DeserializeOwned>(payload: &Value, pointer: &str) -> Vec<T> {
    let Some(items) = payload.pointer(pointer).and_then(Value::as_array) else {
        debug!("No list at {pointer}");
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Skipping entry {index} at {pointer}: {e}");
                None
            }
        })
        .collect()
}

/// Checks that the payload carries the `MRData` envelope.
///
/// A payload failing this check is never cached. Extraction still yields `[]`
/// for it.
pub fn check_envelope(payload: &Value, url: &str) -> Result<(), AppError> {
    match payload.get("MRData") {
        Some(Value::Object(_)) => Ok(()),
        Some(_) => Err(AppError::api_unexpected_structure(
            "MRData is not an object",
            url,
        )),
        None => Err(AppError::api_unexpected_structure(
            "Response has no MRData envelope",
            url,
        )),
    }
}

pub fn races(payload: &Value) -> Vec<JolpicaRace> {
    extract_list(payload, RACES_POINTER)
}

pub fn driver_standings(payload: &Value) -> Vec<JolpicaDriverStanding> {
    extract_list(payload, DRIVER_STANDINGS_POINTER)
}

pub fn constructor_standings(payload: &Value) -> Vec<JolpicaConstructorStanding> {
    extract_list(payload, CONSTRUCTOR_STANDINGS_POINTER)
}

/// The first race of a results payload together with its classification.
/// A race that is present but unparseable is treated as absent.
pub fn first_race_with_results(payload: &Value) -> (Option<JolpicaRace>, Vec<JolpicaResult>) {
    let race = payload
        .pointer(FIRST_RACE_POINTER)
        .and_then(|value| match JolpicaRace::deserialize(value) {
            Ok(race) => Some(race),
            Err(e) => {
                warn!("Ignoring unparseable race in results payload: {e}");
                None
            }
        });
    let results = extract_list(payload, FIRST_RACE_RESULTS_POINTER);
    (race, results)
}

pub fn qualifying_results(payload: &Value) -> Vec<QualifyingResult> {
    extract_list(payload, FIRST_RACE_QUALIFYING_POINTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result_json(position: u32) -> Value {
        json!({
            "number": position.to_string(),
            "position": position.to_string(),
            "positionText": position.to_string(),
            "points": "0",
            "Driver": {"driverId": format!("d{position}"), "givenName": "Given", "familyName": format!("Family{position}")},
            "Constructor": {"constructorId": "team", "name": "Team"},
            "status": "Finished"
        })
    }

    #[test]
    fn test_missing_key_path_returns_empty() {
        let payloads = [
            json!({}),
            json!({"MRData": {}}),
            json!({"MRData": {"RaceTable": {}}}),
            json!({"MRData": {"RaceTable": {"Races": null}}}),
            json!({"MRData": {"RaceTable": {"Races": "not a list"}}}),
            json!(null),
            json!([]),
        ];
        for payload in payloads {
            assert!(races(&payload).is_empty(), "payload {payload}");
            assert!(driver_standings(&payload).is_empty(), "payload {payload}");
            assert!(constructor_standings(&payload).is_empty(), "payload {payload}");
            assert!(qualifying_results(&payload).is_empty(), "payload {payload}");
            let (race, results) = first_race_with_results(&payload);
            assert!(race.is_none());
            assert!(results.is_empty());
        }
    }

    #[test]
    fn test_empty_standings_lists() {
        let payload = json!({"MRData": {"StandingsTable": {"season": "2026", "StandingsLists": []}}});
        assert!(driver_standings(&payload).is_empty());
    }

    #[test]
    fn test_extracts_races_and_skips_bad_entries() {
        let payload = json!({"MRData": {"RaceTable": {"Races": [
            {"round": "1", "raceName": "Australian Grand Prix", "date": "2026-03-08"},
            {"round": "2"},
            {"round": "3", "raceName": "Japanese Grand Prix", "date": "2026-03-29", "time": "05:00:00Z"}
        ]}}});

        let extracted = races(&payload);
        assert_eq!(extracted.len(), 2);
        assert_eq!(extracted[0].round, "1");
        assert_eq!(extracted[1].race_name, "Japanese Grand Prix");
    }

    #[test]
    fn test_first_race_with_results_preserves_order() {
        let results: Vec<Value> = (1..=20).map(result_json).collect();
        let payload = json!({"MRData": {"RaceTable": {"Races": [{
            "round": "24",
            "raceName": "Abu Dhabi Grand Prix",
            "date": "2025-12-07",
            "time": "13:00:00Z",
            "Results": results
        }]}}});

        let (race, results) = first_race_with_results(&payload);
        assert_eq!(race.unwrap().round, "24");
        assert_eq!(results.len(), 20);
        let positions: Vec<&str> = results.iter().map(|r| r.position.as_str()).collect();
        let expected: Vec<String> = (1..=20).map(|p| p.to_string()).collect();
        assert_eq!(positions, expected);
    }

    #[test]
    fn test_check_envelope() {
        assert!(check_envelope(&json!({"MRData": {}}), "u").is_ok());
        assert!(matches!(
            check_envelope(&json!({"data": []}), "u"),
            Err(AppError::ApiUnexpectedStructure { .. })
        ));
        assert!(check_envelope(&json!({"MRData": 5}), "u").is_err());
    }
}
