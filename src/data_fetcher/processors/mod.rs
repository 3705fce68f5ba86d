pub mod composer;
pub mod live_timing;
pub mod race_codes;
pub mod timing;

pub use composer::{
    calendar_overview, compose_classified_race, compose_constructor_standings,
    compose_driver_standings, compose_qualifying, compose_race, compose_results, compose_schedule,
    filter_by_region, home_snapshot, podium, standings_board, top_n,
};
pub use live_timing::{
    FALLBACK_TEAM_COLOR, TEAM_COLORS, compose_live_board, format_gap, format_interval,
    ghost_board, team_color,
};
pub use race_codes::{FALLBACK_CODE, race_code, race_identity, race_region};
pub use timing::{
    compose_start_time, count_completed, count_upcoming, driver_code, is_future, is_race_live,
    is_session_live, next_race, parse_iso_utc, parse_start_time, season_progress, session_window,
};
