//! Builds the flat view models the calendar, standings, results and home views
//! consume from the raw Jolpica records.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::race_codes::race_identity;
use super::timing::{
    compose_start_time, count_completed, count_upcoming, driver_code, next_race, season_progress,
};
use crate::constants::views;
use crate::data_fetcher::models::{
    CalendarOverview, ClassifiedRace, ConstructorStanding, Driver, DriverStanding, HomeSnapshot,
    JolpicaConstructorStanding, JolpicaDriverStanding, JolpicaRace, JolpicaResult, QualifyingResult,
    QualifyingRow, RaceResult, RaceSchedule, Region, RegionCount, SessionTime, StandingsBoard,
};

fn session_start(session: &Option<SessionTime>) -> Option<String> {
    session
        .as_ref()
        .map(|s| compose_start_time(&s.date, s.time.as_deref()))
}

fn full_name(driver: &Driver) -> String {
    format!("{} {}", driver.given_name, driver.family_name)
}

/// Parses a standings position, falling back to `positionText` and then to the
/// row's 1-based index.
fn standing_position(position: Option<&str>, position_text: &str, index: usize) -> u32 {
    position
        .and_then(|p| p.trim().parse().ok())
        .or_else(|| position_text.trim().parse().ok())
        .unwrap_or(index as u32 + 1)
}

fn parse_points(points: &str) -> f64 {
    points.trim().parse().unwrap_or(0.0)
}

fn parse_count(value: &str) -> u32 {
    value.trim().parse().unwrap_or(0)
}

pub fn compose_race(race: &JolpicaRace) -> RaceSchedule {
    let (code, region) = race_identity(&race.race_name);
    let has_sprint = race.sprint.is_some();

    RaceSchedule {
        round: race.round.clone(),
        name: race.race_name.clone(),
        circuit_name: race.circuit.circuit_name.clone(),
        locality: race.circuit.location.locality.clone(),
        country: race.circuit.location.country.clone(),
        date: race.date.clone(),
        time: race.time.clone(),
        race_time: compose_start_time(&race.date, race.time.as_deref()),
        fp1_time: session_start(&race.first_practice),
        fp2_time: session_start(&race.second_practice),
        fp3_time: session_start(&race.third_practice),
        quali_time: session_start(&race.qualifying),
        sprint_time: session_start(&race.sprint),
        has_sprint,
        has_qualifying: race.qualifying.is_some(),
        is_sprint_weekend: has_sprint,
        code: code.to_string(),
        region,
    }
}

/// Composes a schedule in source order.
pub fn compose_schedule(races: &[JolpicaRace]) -> Vec<RaceSchedule> {
    races.iter().map(compose_race).collect()
}

pub fn compose_driver_standings(standings: &[JolpicaDriverStanding]) -> Vec<DriverStanding> {
    standings
        .iter()
        .enumerate()
        .map(|(index, standing)| DriverStanding {
            position: standing_position(
                standing.position.as_deref(),
                &standing.position_text,
                index,
            ),
            points: parse_points(&standing.points),
            wins: parse_count(&standing.wins),
            driver_code: driver_code(&standing.driver),
            given_name: standing.driver.given_name.clone(),
            family_name: standing.driver.family_name.clone(),
            // Drivers who changed teams list every constructor; the last is current
            team_name: standing.constructors.last().map(|c| c.name.clone()),
        })
        .collect()
}

pub fn compose_constructor_standings(
    standings: &[JolpicaConstructorStanding],
) -> Vec<ConstructorStanding> {
    standings
        .iter()
        .enumerate()
        .map(|(index, standing)| ConstructorStanding {
            position: standing_position(
                standing.position.as_deref(),
                &standing.position_text,
                index,
            ),
            points: parse_points(&standing.points),
            wins: parse_count(&standing.wins),
            name: standing.constructor.name.clone(),
            nationality: standing.constructor.nationality.clone(),
        })
        .collect()
}

/// Composes race results in source order. Positions are copied as given and
/// never renumbered.
pub fn compose_results(results: &[JolpicaResult]) -> Vec<RaceResult> {
    results
        .iter()
        .map(|result| RaceResult {
            position: result.position.clone(),
            driver_name: full_name(&result.driver),
            driver_code: driver_code(&result.driver),
            constructor_name: result.constructor.name.clone(),
            time_or_status: result
                .time
                .as_ref()
                .map(|t| t.time.clone())
                .unwrap_or_else(|| result.status.clone()),
            points: parse_points(&result.points),
            grid: result.grid.as_deref().and_then(|g| g.trim().parse().ok()),
        })
        .collect()
}

pub fn compose_classified_race(
    race: Option<&JolpicaRace>,
    results: &[JolpicaResult],
) -> ClassifiedRace {
    ClassifiedRace {
        race: race.map(compose_race),
        results: compose_results(results),
    }
}

/// Composes qualifying rows in source order. The best time is the last
/// session the driver reached: Q3, then Q2, then Q1.
pub fn compose_qualifying(results: &[QualifyingResult]) -> Vec<QualifyingRow> {
    results
        .iter()
        .map(|result| QualifyingRow {
            position: result.position.clone(),
            driver_name: full_name(&result.driver),
            driver_code: driver_code(&result.driver),
            constructor_name: result.constructor.name.clone(),
            best_time: [&result.q3, &result.q2, &result.q1]
                .into_iter()
                .flatten()
                .find(|t| !t.trim().is_empty())
                .cloned(),
        })
        .collect()
}

/// The first `n` rows, fewer when the list is shorter.
pub fn top_n<T: Clone>(rows: &[T], n: usize) -> Vec<T> {
    rows.iter().take(n).cloned().collect()
}

/// The first three rows.
pub fn podium<T: Clone>(rows: &[T]) -> Vec<T> {
    top_n(rows, views::PODIUM_SIZE)
}

/// Splits ranked rows into the podium and everything after it.
pub fn standings_board<T>(mut rows: Vec<T>) -> StandingsBoard<T> {
    let rest = rows.split_off(rows.len().min(views::PODIUM_SIZE));
    StandingsBoard { podium: rows, rest }
}

/// Races in `region`, in schedule order.
pub fn filter_by_region(races: &[RaceSchedule], region: Region) -> Vec<RaceSchedule> {
    races
        .iter()
        .filter(|race| race.region == region)
        .cloned()
        .collect()
}

/// Derives the calendar summary for `now`.
pub fn calendar_overview(races: Vec<RaceSchedule>, now: DateTime<Utc>) -> CalendarOverview {
    let completed = count_completed(&races, now);
    let upcoming = count_upcoming(&races, now);
    let progress = season_progress(completed, races.len());
    let next = next_race(&races, now).cloned();
    let sprint_weekends = races.iter().filter(|race| race.is_sprint_weekend).count();
    let region_counts = Region::FILTERS
        .iter()
        .map(|region| RegionCount {
            region: *region,
            races: races.iter().filter(|race| race.region == *region).count(),
        })
        .collect();

    debug!(
        "Calendar: {} races, {} completed, {} upcoming, {}% done",
        races.len(),
        completed,
        upcoming,
        progress
    );

    CalendarOverview {
        races,
        next_race: next,
        completed,
        upcoming,
        progress,
        sprint_weekends,
        region_counts,
    }
}

pub fn home_snapshot(
    schedule: &[RaceSchedule],
    last_results: &ClassifiedRace,
    standings: &[DriverStanding],
    now: DateTime<Utc>,
) -> HomeSnapshot {
    HomeSnapshot {
        next_race: next_race(schedule, now).cloned(),
        podium: podium(&last_results.results),
        top_drivers: top_n(standings, views::HOME_TOP_DRIVERS),
    }
}
