//! Raw OpenF1 live-timing records.

use serde::{Deserialize, Serialize};

/// A timing gap as OpenF1 reports it: seconds for cars on the lead lap,
/// text such as `"+1 LAP"` for lapped cars.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TimingGap {
    Seconds(f64),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenF1Interval {
    pub driver_number: u32,
    #[serde(default)]
    pub gap_to_leader: Option<TimingGap>,
    #[serde(default)]
    pub interval: Option<TimingGap>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub session_key: u32,
    #[serde(default)]
    pub meeting_key: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenF1Position {
    pub driver_number: u32,
    pub position: u32,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub session_key: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenF1Driver {
    pub driver_number: u32,
    #[serde(default)]
    pub broadcast_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub name_acronym: String,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub team_colour: Option<String>,
    #[serde(default)]
    pub headshot_url: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub session_key: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenF1Session {
    pub session_key: u32,
    pub session_name: String,
    #[serde(default)]
    pub session_type: String,
    pub date_start: String,
    pub date_end: String,
    #[serde(default)]
    pub meeting_key: u32,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub country_name: String,
    #[serde(default)]
    pub circuit_short_name: String,
}
