//! Application-wide constants and configuration values
//!
//! This module centralizes all magic numbers and configuration constants
//! to improve maintainability and make the codebase more configurable.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;

/// Upper bound accepted for a configured HTTP timeout
pub const MAX_HTTP_TIMEOUT_SECONDS: u64 = 120;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 16;

/// Season queried when the current season has no standings or results yet
pub const DEFAULT_FALLBACK_SEASON: i32 = 2025;

/// Default start time assumed for a race whose listing has no start time
pub const DEFAULT_RACE_START_TIME: &str = "14:00:00Z";

/// Base URLs of the public data services
pub mod endpoints {
    /// Jolpica mirror of the Ergast F1 API
    pub const JOLPICA_BASE_URL: &str = "https://api.jolpi.ca/ergast/f1";

    /// OpenF1 live timing API
    pub const OPENF1_BASE_URL: &str = "https://api.openf1.org/v1";
}

/// Cache TTL (Time To Live) values in seconds
pub mod cache_ttl {
    /// Season schedule and per-round results rarely change (1 hour)
    pub const SCHEDULE_SECONDS: u64 = 3600;

    /// Standings and "last race" can change right after a race (5 minutes)
    pub const STANDINGS_SECONDS: u64 = 300;

    /// Driver info for a live session (5 minutes)
    pub const SESSION_DRIVERS_SECONDS: u64 = 300;

    /// Live timing data is never cached
    pub const NO_STORE: u64 = 0;

    /// Number of response bodies kept in the LRU cache
    pub const HTTP_RESPONSE_CAPACITY: usize = 100;
}

/// Retry configuration
pub mod retry {
    /// Number of retries after the first attempt
    pub const MAX_RETRIES: u32 = 1;

    /// Backoff before the retry when the server sends no Retry-After (milliseconds)
    pub const BACKOFF_MS: u64 = 500;

    /// Upper bound for an honoured Retry-After header (seconds)
    pub const MAX_RETRY_AFTER_SECONDS: u64 = 10;
}

/// Live timing windows and polling
pub mod live {
    /// Live data polling interval (milliseconds)
    pub const POLL_INTERVAL_MS: u64 = 10_000;

    /// Demo board refresh interval when no session is live (milliseconds)
    pub const DEMO_INTERVAL_MS: u64 = 3_000;

    /// A race counts as live for this long after its start (hours)
    pub const RACE_WINDOW_HOURS: i64 = 2;

    /// A session still counts as live this long after its scheduled end (minutes)
    pub const SESSION_END_BUFFER_MINUTES: i64 = 30;

    /// Rows shown on the live board
    pub const BOARD_SIZE: usize = 10;

    /// Maximum jitter applied to demo gaps (seconds, either direction)
    pub const DEMO_GAP_JITTER_SECONDS: f64 = 0.15;
}

/// View sizes used by the composed pages
pub mod views {
    /// Podium slice length
    pub const PODIUM_SIZE: usize = 3;

    /// Drivers shown on the home snapshot
    pub const HOME_TOP_DRIVERS: usize = 5;
}

/// Environment variable names
pub mod env_vars {
    /// Override for the Jolpica base URL
    pub const JOLPICA_URL: &str = "F1_JOLPICA_URL";

    /// Override for the OpenF1 base URL
    pub const OPENF1_URL: &str = "F1_OPENF1_URL";

    /// Override for the log file path
    pub const LOG_FILE: &str = "F1_LOG_FILE";

    /// Override for the HTTP timeout in seconds
    pub const HTTP_TIMEOUT: &str = "F1_HTTP_TIMEOUT";

    /// Override for the fallback season
    pub const FALLBACK_SEASON: &str = "F1_FALLBACK_SEASON";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_constants_are_reasonable() {
        // Standings move faster than the schedule
        assert!(cache_ttl::STANDINGS_SECONDS < cache_ttl::SCHEDULE_SECONDS);
        assert_eq!(cache_ttl::NO_STORE, 0);
        assert!(cache_ttl::HTTP_RESPONSE_CAPACITY > 0);
    }

    #[test]
    fn test_retry_policy_is_single_retry() {
        assert_eq!(retry::MAX_RETRIES, 1);
        assert!(retry::BACKOFF_MS > 0);
        assert!(retry::MAX_RETRY_AFTER_SECONDS * 1000 >= retry::BACKOFF_MS);
    }

    #[test]
    fn test_live_constants_are_reasonable() {
        assert!(live::DEMO_INTERVAL_MS < live::POLL_INTERVAL_MS);
        assert!(live::BOARD_SIZE >= views::PODIUM_SIZE);
        assert!(live::DEMO_GAP_JITTER_SECONDS < 1.0);
    }

    #[test]
    fn test_default_timeout_within_bounds() {
        assert!(DEFAULT_HTTP_TIMEOUT_SECONDS > 0);
        assert!(DEFAULT_HTTP_TIMEOUT_SECONDS <= MAX_HTTP_TIMEOUT_SECONDS);
    }
}
