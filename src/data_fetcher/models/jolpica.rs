//! Raw Ergast-shaped records as served by the Jolpica API.
//!
//! Every numeric value arrives as a string. Fields the API omits for some
//! rounds or seasons default so a partial record still parses.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Location {
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Circuit {
    #[serde(rename = "circuitId", default)]
    pub circuit_id: String,
    #[serde(rename = "circuitName", default)]
    pub circuit_name: String,
    #[serde(rename = "Location", default)]
    pub location: Location,
}

/// Date and optional UTC start time of a single session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionTime {
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JolpicaRace {
    #[serde(default)]
    pub season: String,
    pub round: String,
    #[serde(rename = "raceName")]
    pub race_name: String,
    #[serde(rename = "Circuit", default)]
    pub circuit: Circuit,
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(rename = "FirstPractice", default)]
    pub first_practice: Option<SessionTime>,
    #[serde(rename = "SecondPractice", default)]
    pub second_practice: Option<SessionTime>,
    #[serde(rename = "ThirdPractice", default)]
    pub third_practice: Option<SessionTime>,
    #[serde(rename = "Qualifying", default)]
    pub qualifying: Option<SessionTime>,
    #[serde(rename = "Sprint", default)]
    pub sprint: Option<SessionTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Driver {
    #[serde(rename = "driverId", default)]
    pub driver_id: String,
    #[serde(rename = "permanentNumber", default)]
    pub permanent_number: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(rename = "givenName")]
    pub given_name: String,
    #[serde(rename = "familyName")]
    pub family_name: String,
    #[serde(default)]
    pub nationality: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Constructor {
    #[serde(rename = "constructorId", default)]
    pub constructor_id: String,
    pub name: String,
    #[serde(default)]
    pub nationality: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JolpicaDriverStanding {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(rename = "positionText", default)]
    pub position_text: String,
    #[serde(default)]
    pub points: String,
    #[serde(default)]
    pub wins: String,
    #[serde(rename = "Driver")]
    pub driver: Driver,
    #[serde(rename = "Constructors", default)]
    pub constructors: Vec<Constructor>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JolpicaConstructorStanding {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(rename = "positionText", default)]
    pub position_text: String,
    #[serde(default)]
    pub points: String,
    #[serde(default)]
    pub wins: String,
    #[serde(rename = "Constructor")]
    pub constructor: Constructor,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultTime {
    #[serde(default)]
    pub millis: Option<String>,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LapTime {
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FastestLap {
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub lap: Option<String>,
    #[serde(rename = "Time", default)]
    pub time: Option<LapTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JolpicaResult {
    #[serde(default)]
    pub number: String,
    pub position: String,
    #[serde(rename = "positionText", default)]
    pub position_text: String,
    #[serde(default)]
    pub points: String,
    #[serde(rename = "Driver")]
    pub driver: Driver,
    #[serde(rename = "Constructor")]
    pub constructor: Constructor,
    #[serde(default)]
    pub grid: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "Time", default)]
    pub time: Option<ResultTime>,
    #[serde(rename = "FastestLap", default)]
    pub fastest_lap: Option<FastestLap>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualifyingResult {
    #[serde(default)]
    pub number: String,
    pub position: String,
    #[serde(rename = "Driver")]
    pub driver: Driver,
    #[serde(rename = "Constructor")]
    pub constructor: Constructor,
    #[serde(rename = "Q1", default)]
    pub q1: Option<String>,
    #[serde(rename = "Q2", default)]
    pub q2: Option<String>,
    #[serde(rename = "Q3", default)]
    pub q3: Option<String>,
}
