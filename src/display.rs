//! Plain-text rendering of the composed views.
//!
//! Every function returns the text instead of printing it so the layout can
//! be tested.

use chrono::{DateTime, Utc};
use f1_race_data::data_fetcher::models::{
    CalendarOverview, ClassifiedRace, ConstructorStanding, DriverStanding, HomeSnapshot, LiveBoard,
    QualifyingRow, RaceResult, RaceSchedule, StandingsBoard,
};
use f1_race_data::data_fetcher::processors::is_race_live;
use std::fmt::Write;

const RULE: &str = "────────────────────────────────────────────────────";

fn format_start(race: &RaceSchedule) -> String {
    race.start_time()
        .map(|start| start.format("%a %d %b %H:%M UTC").to_string())
        .unwrap_or_else(|| race.race_time.clone())
}

fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{points:.0}")
    } else {
        format!("{points:.1}")
    }
}

fn race_line(race: &RaceSchedule, marker: &str) -> String {
    let sprint = if race.is_sprint_weekend { "  Sprint" } else { "" };
    format!(
        "{marker}R{:<3}{:<4}{:<28}{}{sprint}",
        race.round,
        race.code,
        race.name,
        format_start(race)
    )
}

pub fn render_next_race(race: Option<&RaceSchedule>, now: DateTime<Utc>) -> String {
    let Some(race) = race else {
        return "No upcoming race this season.\n".to_string();
    };
    let live = race
        .start_time()
        .is_some_and(|start| is_race_live(start, now));
    let mut out = String::new();
    let _ = writeln!(
        out,
        "NEXT RACE  Round {}  {}{}",
        race.round,
        race.code,
        if live { "  LIVE" } else { "" }
    );
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}", race.name);
    let _ = writeln!(
        out,
        "{}, {} ({})",
        race.circuit_name, race.locality, race.country
    );
    let sessions = [
        ("Practice 1", &race.fp1_time),
        ("Practice 2", &race.fp2_time),
        ("Practice 3", &race.fp3_time),
        ("Sprint", &race.sprint_time),
        ("Qualifying", &race.quali_time),
    ];
    for (label, time) in sessions {
        if let Some(time) = time {
            let _ = writeln!(out, "  {label:<12}{time}");
        }
    }
    let _ = writeln!(out, "  {:<12}{}", "Race", format_start(race));
    out
}

pub fn render_calendar(overview: &CalendarOverview, races: &[RaceSchedule], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "CALENDAR  {} races  {} done  {} to go  {}%  {} sprint weekends",
        overview.races.len(),
        overview.completed,
        overview.upcoming,
        overview.progress,
        overview.sprint_weekends
    );
    let regions: Vec<String> = overview
        .region_counts
        .iter()
        .map(|count| format!("{} {}", count.region, count.races))
        .collect();
    let _ = writeln!(out, "{}", regions.join("  "));
    let _ = writeln!(out, "{RULE}");

    if races.is_empty() {
        let _ = writeln!(out, "No races to show.");
        return out;
    }

    let next_round = overview.next_race.as_ref().map(|race| race.round.as_str());
    for race in races {
        let marker = if Some(race.round.as_str()) == next_round {
            "> "
        } else if race.start_time().is_some_and(|start| start < now) {
            "✓ "
        } else {
            "  "
        };
        let _ = writeln!(out, "{}", race_line(race, marker));
    }
    out
}

fn driver_row(standing: &DriverStanding) -> String {
    format!(
        "{:>3}  {:<4} {:<24}{:<18}{:>6}  {} wins",
        standing.position,
        standing.driver_code,
        standing.full_name(),
        standing.team_name.as_deref().unwrap_or("-"),
        format_points(standing.points),
        standing.wins
    )
}

fn constructor_row(standing: &ConstructorStanding) -> String {
    format!(
        "{:>3}  {:<24}{:>6}  {} wins",
        standing.position,
        standing.name,
        format_points(standing.points),
        standing.wins
    )
}

fn render_board<T>(title: &str, board: &StandingsBoard<T>, row: fn(&T) -> String) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{RULE}");
    if board.is_empty() {
        let _ = writeln!(out, "No standings available.");
        return out;
    }
    for entry in &board.podium {
        let _ = writeln!(out, "{}", row(entry));
    }
    if !board.rest.is_empty() {
        let _ = writeln!(out, "{RULE}");
        for entry in &board.rest {
            let _ = writeln!(out, "{}", row(entry));
        }
    }
    out
}

pub fn render_driver_standings(board: &StandingsBoard<DriverStanding>) -> String {
    render_board("DRIVERS' CHAMPIONSHIP", board, driver_row)
}

pub fn render_constructor_standings(board: &StandingsBoard<ConstructorStanding>) -> String {
    render_board("CONSTRUCTORS' CHAMPIONSHIP", board, constructor_row)
}

fn result_row(result: &RaceResult) -> String {
    let grid = match result.grid {
        Some(0) => "pit".to_string(),
        Some(grid) => grid.to_string(),
        None => "-".to_string(),
    };
    format!(
        "{:>3}  {:<4} {:<24}{:<18}{:<14}{:>4}  grid {grid}",
        result.position,
        result.driver_code,
        result.driver_name,
        result.constructor_name,
        result.time_or_status,
        format_points(result.points)
    )
}

pub fn render_results(title: &str, results: &[RaceResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{RULE}");
    if results.is_empty() {
        let _ = writeln!(out, "No results available.");
    }
    for result in results {
        let _ = writeln!(out, "{}", result_row(result));
    }
    out
}

pub fn render_classified_race(classified: &ClassifiedRace) -> String {
    let title = match &classified.race {
        Some(race) => format!("RESULTS  Round {}  {}", race.round, race.name),
        None => "RESULTS".to_string(),
    };
    render_results(&title, &classified.results)
}

pub fn render_qualifying(round: u32, rows: &[QualifyingRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "QUALIFYING  Round {round}");
    let _ = writeln!(out, "{RULE}");
    if rows.is_empty() {
        let _ = writeln!(out, "No qualifying results available.");
    }
    for row in rows {
        let _ = writeln!(
            out,
            "{:>3}  {:<4} {:<24}{:<18}{}",
            row.position,
            row.driver_code,
            row.driver_name,
            row.constructor_name,
            row.best_time.as_deref().unwrap_or("-")
        );
    }
    out
}

pub fn render_home(home: &HomeSnapshot, now: DateTime<Utc>) -> String {
    let mut out = render_next_race(home.next_race.as_ref(), now);
    let _ = writeln!(out);
    out.push_str(&render_results("LAST RACE PODIUM", &home.podium));
    let _ = writeln!(out);
    let _ = writeln!(out, "CHAMPIONSHIP LEADERS");
    let _ = writeln!(out, "{RULE}");
    if home.top_drivers.is_empty() {
        let _ = writeln!(out, "No standings available.");
    }
    for standing in &home.top_drivers {
        let _ = writeln!(out, "{}", driver_row(standing));
    }
    out
}

pub fn render_live_board(board: &LiveBoard) -> String {
    let mut out = String::new();
    let heading = match (&board.session, board.is_demo) {
        (Some(session), _) => format!(
            "LIVE  {} {}  ({})",
            session.country_name, session.session_name, session.circuit_short_name
        ),
        (None, true) => "DEMO  No live session, replaying a recent race".to_string(),
        (None, false) => "LIVE".to_string(),
    };
    let _ = writeln!(out, "{heading}");
    let _ = writeln!(out, "{RULE}");
    for driver in &board.drivers {
        let _ = writeln!(
            out,
            "{:>3}  {:<4} {:<18}{:>10}{:>10}  {}  {}",
            driver.position,
            driver.driver_code,
            driver.team,
            driver.gap,
            driver.interval,
            driver.tyre.letter(),
            driver.team_color
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use f1_race_data::data_fetcher::models::Region;
    use f1_race_data::data_fetcher::processors::{calendar_overview, ghost_board, standings_board};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn race(round: &str, name: &str, race_time: &str, sprint: bool) -> RaceSchedule {
        RaceSchedule {
            round: round.to_string(),
            name: name.to_string(),
            circuit_name: "Circuit".to_string(),
            locality: "Town".to_string(),
            country: "Country".to_string(),
            date: race_time[..10].to_string(),
            time: None,
            race_time: race_time.to_string(),
            fp1_time: Some("2026-03-13T01:30:00Z".to_string()),
            fp2_time: None,
            fp3_time: None,
            quali_time: None,
            sprint_time: None,
            has_sprint: sprint,
            has_qualifying: true,
            is_sprint_weekend: sprint,
            code: "AUS".to_string(),
            region: Region::AsiaPacific,
        }
    }

    #[test]
    fn test_points_formatting() {
        assert_eq!(format_points(25.0), "25");
        assert_eq!(format_points(12.5), "12.5");
    }

    #[test]
    fn test_next_race_text() {
        let australia = race("1", "Australian Grand Prix", "2026-03-08T04:00:00Z", false);
        let before = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let text = render_next_race(Some(&australia), before);
        assert!(text.contains("Round 1"));
        assert!(text.contains("Practice 1"));
        assert!(text.contains("Sun 08 Mar 04:00 UTC"));
        assert!(!text.contains("LIVE"));
        assert!(render_next_race(None, before).contains("No upcoming race"));
    }

    #[test]
    fn test_race_in_progress_is_marked_live() {
        let australia = race("1", "Australian Grand Prix", "2026-03-08T04:00:00Z", false);
        let during = Utc.with_ymd_and_hms(2026, 3, 8, 5, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2026, 3, 8, 6, 30, 0).unwrap();

        let home = HomeSnapshot {
            next_race: Some(australia.clone()),
            ..HomeSnapshot::default()
        };
        assert!(render_home(&home, during).starts_with("NEXT RACE  Round 1  AUS  LIVE"));
        assert!(!render_next_race(Some(&australia), after).contains("LIVE"));
    }

    #[test]
    fn test_calendar_marks_done_and_next() {
        let races = vec![
            race("1", "Australian Grand Prix", "2026-03-08T04:00:00Z", false),
            race("2", "Chinese Grand Prix", "2026-03-15T07:00:00Z", true),
        ];
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap();
        let overview = calendar_overview(races.clone(), now);
        let text = render_calendar(&overview, &races, now);

        assert!(text.contains("50%"));
        assert!(text.contains("✓ R1"));
        assert!(text.contains("> R2"));
        assert!(text.contains("Sprint"));
    }

    #[test]
    fn test_empty_standings_text() {
        let board: StandingsBoard<DriverStanding> = standings_board(Vec::new());
        assert!(render_driver_standings(&board).contains("No standings available."));
    }

    #[test]
    fn test_pit_lane_start_is_labelled() {
        let result = RaceResult {
            position: "9".to_string(),
            driver_name: "Lewis Hamilton".to_string(),
            driver_code: "HAM".to_string(),
            constructor_name: "Ferrari".to_string(),
            time_or_status: "+31.2".to_string(),
            points: 2.0,
            grid: Some(0),
        };
        assert!(result_row(&result).ends_with("grid pit"));
    }

    #[test]
    fn test_demo_board_heading() {
        let board = LiveBoard {
            drivers: ghost_board(&mut SmallRng::seed_from_u64(1)),
            session: None,
            is_live: false,
            is_demo: true,
        };
        let text = render_live_board(&board);
        assert!(text.starts_with("DEMO"));
        assert!(text.contains("VER"));
        assert!(text.contains("Leader"));
    }
}
