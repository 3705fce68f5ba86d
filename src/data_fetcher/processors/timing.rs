//! Start-time composition and time-relative derivations (next race, season
//! progress, live windows). Every function takes `now` explicitly.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::constants::{DEFAULT_RACE_START_TIME, live};
use crate::data_fetcher::models::{Driver, OpenF1Session, RaceSchedule};
use crate::error::AppError;

/// Composes an ISO timestamp from separate date and time fields.
///
/// A missing or blank time means the race is assumed to start at 14:00 UTC.
///
/// # Example
/// ```
/// use f1_race_data::data_fetcher::processors::compose_start_time;
///
/// assert_eq!(compose_start_time("2026-03-15", None), "2026-03-15T14:00:00Z");
/// assert_eq!(compose_start_time("2026-03-15", Some("05:00:00Z")), "2026-03-15T05:00:00Z");
/// ```
pub fn compose_start_time(date: &str, time: Option<&str>) -> String {
    match time.map(str::trim).filter(|t| !t.is_empty()) {
        Some(time) => format!("{date}T{time}"),
        None => format!("{date}T{DEFAULT_RACE_START_TIME}"),
    }
}

/// Parses an ISO timestamp; one without an offset is read as UTC.
pub fn parse_iso_utc(timestamp: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// Parsed start of a session given as separate date and time fields.
pub fn parse_start_time(date: &str, time: Option<&str>) -> Option<DateTime<Utc>> {
    parse_iso_utc(&compose_start_time(date, time))
}

/// True when `start` lies strictly after `now`.
pub fn is_future(start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start > now
}

/// The first race starting strictly after `now`.
///
/// Races are ordered by parsed start before selection so an unordered source
/// still yields the earliest upcoming race. The sort is stable: races with
/// the same start resolve to source order. Races whose start cannot be
/// parsed are never selected.
pub fn next_race(races: &[RaceSchedule], now: DateTime<Utc>) -> Option<&RaceSchedule> {
    let mut dated: Vec<(DateTime<Utc>, &RaceSchedule)> = races
        .iter()
        .filter_map(|race| race.start_time().map(|start| (start, race)))
        .collect();
    dated.sort_by_key(|(start, _)| *start);
    dated
        .into_iter()
        .find(|(start, _)| is_future(*start, now))
        .map(|(_, race)| race)
}

/// Number of races whose start is strictly before `now`.
pub fn count_completed(races: &[RaceSchedule], now: DateTime<Utc>) -> usize {
    races
        .iter()
        .filter(|race| race.start_time().is_some_and(|start| start < now))
        .count()
}

/// Number of races starting at or after `now`.
pub fn count_upcoming(races: &[RaceSchedule], now: DateTime<Utc>) -> usize {
    races
        .iter()
        .filter(|race| race.start_time().is_some_and(|start| start >= now))
        .count()
}

/// `completed / total * 100`, rounded. Zero races means zero progress.
///
/// # Example
/// ```
/// use f1_race_data::data_fetcher::processors::season_progress;
///
/// assert_eq!(season_progress(0, 0), 0);
/// assert_eq!(season_progress(1, 3), 33);
/// assert_eq!(season_progress(2, 3), 67);
/// ```
pub fn season_progress(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}

/// A race is live from its start until two hours later, inclusive.
pub fn is_race_live(start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= start && now <= start + Duration::hours(live::RACE_WINDOW_HOURS)
}

/// Parsed start and scheduled end of a session.
pub fn session_window(
    session: &OpenF1Session,
) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    let parse = |value: &str| {
        parse_iso_utc(value).ok_or_else(|| {
            AppError::datetime_parse_error(format!(
                "Session {} has unparseable time '{value}'",
                session.session_key
            ))
        })
    };
    Ok((parse(&session.date_start)?, parse(&session.date_end)?))
}

/// A session is live from its start until thirty minutes after its
/// scheduled end, inclusive. Unparseable bounds mean not live.
pub fn is_session_live(session: &OpenF1Session, now: DateTime<Utc>) -> bool {
    session_window(session).is_ok_and(|(start, end)| {
        now >= start && now <= end + Duration::minutes(live::SESSION_END_BUFFER_MINUTES)
    })
}

/// The driver's official code, or the first three letters of the family
/// name upper-cased when the API has none.
pub fn driver_code(driver: &Driver) -> String {
    match driver.code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => driver
            .family_name
            .chars()
            .take(3)
            .collect::<String>()
            .to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::Region;
    use chrono::TimeZone;

    fn race(round: &str, race_time: &str) -> RaceSchedule {
        RaceSchedule {
            round: round.to_string(),
            name: format!("Round {round} Grand Prix"),
            circuit_name: String::new(),
            locality: String::new(),
            country: String::new(),
            date: race_time.chars().take(10).collect(),
            time: None,
            race_time: race_time.to_string(),
            fp1_time: None,
            fp2_time: None,
            fp3_time: None,
            quali_time: None,
            sprint_time: None,
            has_sprint: false,
            has_qualifying: false,
            is_sprint_weekend: false,
            code: "GP".to_string(),
            region: Region::Other,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_compose_default_start_time() {
        assert_eq!(compose_start_time("2026-03-15", None), "2026-03-15T14:00:00Z");
        assert_eq!(compose_start_time("2026-03-15", Some("")), "2026-03-15T14:00:00Z");
        assert_eq!(
            compose_start_time("2026-03-15", Some("04:00:00Z")),
            "2026-03-15T04:00:00Z"
        );
    }

    #[test]
    fn test_parse_iso_utc_variants() {
        assert_eq!(parse_iso_utc("2026-03-15T14:00:00Z"), Some(at(2026, 3, 15, 14)));
        assert_eq!(parse_iso_utc("2026-03-15T16:00:00+02:00"), Some(at(2026, 3, 15, 14)));
        assert_eq!(parse_iso_utc("2026-03-15T14:00:00"), Some(at(2026, 3, 15, 14)));
        assert_eq!(parse_iso_utc("TBC"), None);
        assert_eq!(parse_start_time("2026-03-15", None), Some(at(2026, 3, 15, 14)));
    }

    #[test]
    fn test_next_race_all_past_is_none() {
        let races = vec![race("1", "2025-03-16T04:00:00Z"), race("2", "2025-03-23T07:00:00Z")];
        assert!(next_race(&races, at(2026, 1, 1, 0)).is_none());
        assert!(next_race(&[], at(2026, 1, 1, 0)).is_none());
    }

    #[test]
    fn test_next_race_sorts_unordered_source() {
        let races = vec![
            race("3", "2026-04-05T06:00:00Z"),
            race("1", "2026-03-08T04:00:00Z"),
            race("2", "2026-03-15T07:00:00Z"),
        ];
        let next = next_race(&races, at(2026, 3, 10, 0)).unwrap();
        assert_eq!(next.round, "2");
    }

    #[test]
    fn test_next_race_tie_resolves_to_source_order() {
        let races = vec![
            race("1", "2026-03-08T04:00:00Z"),
            race("7a", "2026-05-03T14:00:00Z"),
            race("7b", "2026-05-03T14:00:00Z"),
        ];
        let next = next_race(&races, at(2026, 4, 1, 0)).unwrap();
        assert_eq!(next.round, "7a");
    }

    #[test]
    fn test_next_race_is_strictly_future() {
        let races = vec![race("1", "2026-03-08T04:00:00Z"), race("2", "2026-03-15T07:00:00Z")];
        let next = next_race(&races, at(2026, 3, 8, 4)).unwrap();
        assert_eq!(next.round, "2");
    }

    #[test]
    fn test_next_race_skips_unparseable() {
        let races = vec![race("1", "TBC"), race("2", "2026-03-15T07:00:00Z")];
        assert_eq!(next_race(&races, at(2026, 1, 1, 0)).unwrap().round, "2");
    }

    #[test]
    fn test_season_progress() {
        assert_eq!(season_progress(0, 0), 0);
        assert_eq!(season_progress(5, 0), 0);
        assert_eq!(season_progress(0, 24), 0);
        assert_eq!(season_progress(12, 24), 50);
        assert_eq!(season_progress(1, 8), 13);
        assert_eq!(season_progress(24, 24), 100);
    }

    #[test]
    fn test_completed_and_upcoming_counts() {
        let races = vec![
            race("1", "2026-03-08T04:00:00Z"),
            race("2", "2026-03-15T07:00:00Z"),
            race("3", "2026-04-05T06:00:00Z"),
            race("4", "TBC"),
        ];
        let now = at(2026, 3, 15, 7);
        assert_eq!(count_completed(&races, now), 1);
        assert_eq!(count_upcoming(&races, now), 2);
    }

    #[test]
    fn test_race_live_window() {
        let start = at(2026, 3, 15, 14);
        assert!(!is_race_live(start, at(2026, 3, 15, 13)));
        assert!(is_race_live(start, start));
        assert!(is_race_live(start, at(2026, 3, 15, 16)));
        assert!(!is_race_live(start, at(2026, 3, 15, 17)));
    }

    #[test]
    fn test_session_live_window_with_buffer() {
        let session = OpenF1Session {
            session_key: 9158,
            session_name: "Race".to_string(),
            session_type: "Race".to_string(),
            date_start: "2026-03-15T14:00:00+00:00".to_string(),
            date_end: "2026-03-15T16:00:00+00:00".to_string(),
            meeting_key: 1,
            location: String::new(),
            country_name: String::new(),
            circuit_short_name: String::new(),
        };
        assert!(is_session_live(&session, at(2026, 3, 15, 15)));
        assert!(is_session_live(
            &session,
            at(2026, 3, 15, 16) + Duration::minutes(30)
        ));
        assert!(!is_session_live(
            &session,
            at(2026, 3, 15, 16) + Duration::minutes(31)
        ));
        assert!(!is_session_live(&session, at(2026, 3, 15, 13)));

        let broken = OpenF1Session {
            date_start: "soon".to_string(),
            ..session
        };
        assert!(!is_session_live(&broken, at(2026, 3, 15, 15)));

        let err = session_window(&broken).unwrap_err();
        assert!(matches!(err, AppError::DateTimeParse(_)));
        assert!(err.to_string().contains("'soon'"));
    }

    #[test]
    fn test_driver_code_fallback() {
        let mut driver = Driver {
            driver_id: "hamilton".to_string(),
            permanent_number: Some("44".to_string()),
            code: Some("HAM".to_string()),
            given_name: "Lewis".to_string(),
            family_name: "Hamilton".to_string(),
            nationality: "British".to_string(),
        };
        assert_eq!(driver_code(&driver), "HAM");

        driver.code = None;
        assert_eq!(driver_code(&driver), "HAM");

        driver.code = Some(" ".to_string());
        driver.family_name = "Lindblad".to_string();
        assert_eq!(driver_code(&driver), "LIN");

        driver.family_name = "Li".to_string();
        assert_eq!(driver_code(&driver), "LI");
    }
}
