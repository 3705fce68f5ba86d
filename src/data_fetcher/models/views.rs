//! Flat, read-only view models built from the raw API records.
//!
//! Nothing here is written back anywhere; every value is rebuilt wholesale on
//! the next fetch.

use super::openf1::OpenF1Session;
use crate::data_fetcher::processors::parse_iso_utc;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Coarse geographic grouping used by the calendar filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Region {
    Europe,
    #[serde(rename = "Middle East")]
    MiddleEast,
    Americas,
    #[serde(rename = "Asia Pacific")]
    AsiaPacific,
    Other,
}

impl Region {
    /// Regions offered as calendar filters, in display order.
    pub const FILTERS: [Region; 4] = [
        Region::Europe,
        Region::MiddleEast,
        Region::Americas,
        Region::AsiaPacific,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Region::Europe => "Europe",
            Region::MiddleEast => "Middle East",
            Region::Americas => "Americas",
            Region::AsiaPacific => "Asia Pacific",
            Region::Other => "Other",
        }
    }

    /// Parses a label leniently: case, spaces, dashes and underscores are ignored,
    /// so `"middle-east"` and `"Middle East"` both match.
    pub fn from_label(label: &str) -> Option<Region> {
        let wanted: String = label
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        [
            Region::Europe,
            Region::MiddleEast,
            Region::Americas,
            Region::AsiaPacific,
            Region::Other,
        ]
        .into_iter()
        .find(|region| {
            region
                .label()
                .chars()
                .filter(|c| *c != ' ')
                .flat_map(char::to_lowercase)
                .eq(wanted.chars())
        })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One round of the season as the calendar and home views consume it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceSchedule {
    pub round: String,
    pub name: String,
    pub circuit_name: String,
    pub locality: String,
    pub country: String,
    pub date: String,
    pub time: Option<String>,
    /// Composite ISO start, `14:00:00Z` when the listing has no time.
    pub race_time: String,
    pub fp1_time: Option<String>,
    pub fp2_time: Option<String>,
    pub fp3_time: Option<String>,
    pub quali_time: Option<String>,
    pub sprint_time: Option<String>,
    pub has_sprint: bool,
    pub has_qualifying: bool,
    pub is_sprint_weekend: bool,
    pub code: String,
    pub region: Region,
}

impl RaceSchedule {
    /// Parsed race start, `None` when the composed timestamp is not valid ISO.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        parse_iso_utc(&self.race_time)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverStanding {
    pub position: u32,
    pub points: f64,
    pub wins: u32,
    pub driver_code: String,
    pub given_name: String,
    pub family_name: String,
    pub team_name: Option<String>,
}

impl DriverStanding {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstructorStanding {
    pub position: u32,
    pub points: f64,
    pub wins: u32,
    pub name: String,
    pub nationality: String,
}

/// One classified finisher. `position` is kept as the source string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceResult {
    pub position: String,
    pub driver_name: String,
    pub driver_code: String,
    pub constructor_name: String,
    /// Finishing time for the classified lead-lap cars, status otherwise.
    pub time_or_status: String,
    pub points: f64,
    pub grid: Option<u32>,
}

impl RaceResult {
    /// Places gained from the grid. A grid slot of 0 is a pit lane start and
    /// has no meaningful delta.
    pub fn places_gained(&self) -> Option<i64> {
        let grid = self.grid.filter(|g| *g > 0)?;
        let finish: u32 = self.position.parse().ok()?;
        Some(i64::from(grid) - i64::from(finish))
    }

    pub fn started_from_pit_lane(&self) -> bool {
        self.grid == Some(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualifyingRow {
    pub position: String,
    pub driver_name: String,
    pub driver_code: String,
    pub constructor_name: String,
    pub best_time: Option<String>,
}

/// A race together with its classification.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ClassifiedRace {
    pub race: Option<RaceSchedule>,
    pub results: Vec<RaceResult>,
}

/// Top three split from the remaining rows, as the standings page shows them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingsBoard<T> {
    pub podium: Vec<T>,
    pub rest: Vec<T>,
}

impl<T> Default for StandingsBoard<T> {
    fn default() -> Self {
        Self {
            podium: Vec::new(),
            rest: Vec::new(),
        }
    }
}

impl<T> StandingsBoard<T> {
    pub fn is_empty(&self) -> bool {
        self.podium.is_empty() && self.rest.is_empty()
    }

    pub fn len(&self) -> usize {
        self.podium.len() + self.rest.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct StandingsPair {
    pub drivers: StandingsBoard<DriverStanding>,
    pub constructors: StandingsBoard<ConstructorStanding>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionCount {
    pub region: Region,
    pub races: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct CalendarOverview {
    pub races: Vec<RaceSchedule>,
    pub next_race: Option<RaceSchedule>,
    pub completed: usize,
    pub upcoming: usize,
    /// Percentage of rounds already started, rounded.
    pub progress: u32,
    pub sprint_weekends: usize,
    pub region_counts: Vec<RegionCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct HomeSnapshot {
    pub next_race: Option<RaceSchedule>,
    pub podium: Vec<RaceResult>,
    pub top_drivers: Vec<DriverStanding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tyre {
    #[serde(rename = "S")]
    Soft,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "H")]
    Hard,
    #[serde(rename = "I")]
    Intermediate,
    #[serde(rename = "W")]
    Wet,
}

impl Tyre {
    pub fn letter(&self) -> char {
        match self {
            Tyre::Soft => 'S',
            Tyre::Medium => 'M',
            Tyre::Hard => 'H',
            Tyre::Intermediate => 'I',
            Tyre::Wet => 'W',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveDriver {
    pub position: u32,
    pub driver_code: String,
    pub team: String,
    pub team_color: String,
    pub gap: String,
    pub interval: String,
    pub tyre: Tyre,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct LiveBoard {
    pub drivers: Vec<LiveDriver>,
    pub session: Option<OpenF1Session>,
    pub is_live: bool,
    pub is_demo: bool,
}
