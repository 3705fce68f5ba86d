//! Live board composition from OpenF1 intervals, plus the replayed demo board
//! shown when no session is running.

use rand::Rng;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::constants::live;
use crate::data_fetcher::models::{LiveDriver, OpenF1Driver, OpenF1Interval, TimingGap, Tyre};

/// Colour used for teams missing from [`TEAM_COLORS`] or from the feed.
pub const FALLBACK_TEAM_COLOR: &str = "#666";

pub const TEAM_COLORS: &[(&str, &str)] = &[
    ("Red Bull", "#3671C6"),
    ("McLaren", "#FF8000"),
    ("Ferrari", "#E8002D"),
    ("Mercedes", "#27F4D2"),
    ("Aston Martin", "#229971"),
    ("Williams", "#64C4FF"),
    ("Alpine", "#FF87BC"),
    ("Haas", "#B6BABD"),
    ("RB", "#6692FF"),
    ("Sauber", "#52E252"),
    ("Cadillac", "#1E1E1E"),
];

struct GhostEntry {
    code: &'static str,
    team: &'static str,
    gap_seconds: f64,
    interval: &'static str,
    tyre: Tyre,
}

/// Frozen mid-race snapshot replayed by the demo board. The first row leads.
const GHOST_RACE_DATA: &[GhostEntry] = &[
    GhostEntry { code: "VER", team: "Red Bull Racing", gap_seconds: 0.0, interval: "-", tyre: Tyre::Medium },
    GhostEntry { code: "NOR", team: "McLaren", gap_seconds: 2.1, interval: "+2.1s", tyre: Tyre::Medium },
    GhostEntry { code: "LEC", team: "Ferrari", gap_seconds: 5.4, interval: "+3.3s", tyre: Tyre::Hard },
    GhostEntry { code: "HAM", team: "Ferrari", gap_seconds: 8.2, interval: "+2.8s", tyre: Tyre::Hard },
    GhostEntry { code: "PIA", team: "McLaren", gap_seconds: 12.1, interval: "+3.9s", tyre: Tyre::Medium },
    GhostEntry { code: "RUS", team: "Mercedes", gap_seconds: 15.6, interval: "+3.5s", tyre: Tyre::Hard },
    GhostEntry { code: "SAI", team: "Williams", gap_seconds: 21.3, interval: "+5.7s", tyre: Tyre::Medium },
    GhostEntry { code: "ALO", team: "Aston Martin", gap_seconds: 24.8, interval: "+3.5s", tyre: Tyre::Hard },
];

/// Colour for a team name. An exact match wins; otherwise the first entry the
/// name starts with, so `"Red Bull Racing"` resolves to Red Bull.
pub fn team_color(team: &str) -> &'static str {
    TEAM_COLORS
        .iter()
        .find(|(name, _)| *name == team)
        .or_else(|| TEAM_COLORS.iter().find(|(name, _)| team.starts_with(name)))
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_TEAM_COLOR)
}

fn is_leader(gap: Option<&TimingGap>) -> bool {
    match gap {
        None => true,
        Some(TimingGap::Seconds(seconds)) => *seconds <= 0.0,
        Some(TimingGap::Text(text)) => text.trim().is_empty(),
    }
}

pub fn format_gap(gap: Option<&TimingGap>) -> String {
    if is_leader(gap) {
        return "Leader".to_string();
    }
    match gap {
        Some(TimingGap::Seconds(seconds)) => format!("+{seconds:.1}s"),
        Some(TimingGap::Text(text)) => text.clone(),
        None => "Leader".to_string(),
    }
}

pub fn format_interval(interval: Option<&TimingGap>) -> String {
    match interval {
        Some(TimingGap::Seconds(seconds)) if *seconds > 0.0 => format!("+{seconds:.1}s"),
        Some(TimingGap::Text(text)) if !text.trim().is_empty() => text.clone(),
        _ => "-".to_string(),
    }
}

/// Leaders first, then cars on the lead lap by gap, then lapped cars.
fn compare_gaps(a: Option<&TimingGap>, b: Option<&TimingGap>) -> Ordering {
    fn rank(gap: Option<&TimingGap>) -> (u8, f64) {
        if is_leader(gap) {
            return (0, 0.0);
        }
        match gap {
            Some(TimingGap::Seconds(seconds)) => (1, *seconds),
            _ => (2, 0.0),
        }
    }
    let (rank_a, secs_a) = rank(a);
    let (rank_b, secs_b) = rank(b);
    rank_a.cmp(&rank_b).then(secs_a.total_cmp(&secs_b))
}

/// Builds the live board from raw intervals and the session's driver list.
///
/// Only the last interval seen for each driver counts. Rows are ordered by
/// gap, numbered from 1 and cut to the board size. Tyre data is not part of
/// the interval feed, so every row shows mediums.
pub fn compose_live_board(intervals: &[OpenF1Interval], drivers: &[OpenF1Driver]) -> Vec<LiveDriver> {
    let driver_map: HashMap<u32, &OpenF1Driver> =
        drivers.iter().map(|d| (d.driver_number, d)).collect();

    let mut order: Vec<u32> = Vec::new();
    let mut latest: HashMap<u32, &OpenF1Interval> = HashMap::new();
    for interval in intervals {
        if latest.insert(interval.driver_number, interval).is_none() {
            order.push(interval.driver_number);
        }
    }

    let mut rows: Vec<&OpenF1Interval> = order.iter().filter_map(|n| latest.get(n).copied()).collect();
    rows.sort_by(|a, b| compare_gaps(a.gap_to_leader.as_ref(), b.gap_to_leader.as_ref()));

    rows.into_iter()
        .take(live::BOARD_SIZE)
        .enumerate()
        .map(|(index, interval)| {
            let info = driver_map.get(&interval.driver_number);
            let driver_code = info
                .map(|d| d.name_acronym.trim())
                .filter(|code| !code.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("D{}", interval.driver_number));
            let team_color = info
                .and_then(|d| d.team_colour.as_deref())
                .map(|hex| hex.trim().trim_start_matches('#'))
                .filter(|hex| !hex.is_empty())
                .map(|hex| format!("#{hex}"))
                .unwrap_or_else(|| FALLBACK_TEAM_COLOR.to_string());

            LiveDriver {
                position: index as u32 + 1,
                driver_code,
                team: info
                    .and_then(|d| d.team_name.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
                team_color,
                gap: format_gap(interval.gap_to_leader.as_ref()),
                interval: format_interval(interval.interval.as_ref()),
                tyre: Tyre::Medium,
            }
        })
        .collect()
}

/// The demo board with every non-leader gap nudged by up to 0.15 s.
pub fn ghost_board<R: Rng + ?Sized>(rng: &mut R) -> Vec<LiveDriver> {
    GHOST_RACE_DATA
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let gap = if index == 0 {
                "Leader".to_string()
            } else {
                let jitter = rng.random_range(
                    -live::DEMO_GAP_JITTER_SECONDS..=live::DEMO_GAP_JITTER_SECONDS,
                );
                format!("+{:.1}s", entry.gap_seconds + jitter)
            };
            LiveDriver {
                position: index as u32 + 1,
                driver_code: entry.code.to_string(),
                team: entry.team.to_string(),
                team_color: team_color(entry.team).to_string(),
                gap,
                interval: entry.interval.to_string(),
                tyre: entry.tyre,
            }
        })
        .collect()
}
