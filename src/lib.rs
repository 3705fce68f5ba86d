//! Formula 1 Race Data Library
//!
//! This library fetches the season schedule, championship standings and race
//! results from the Jolpica (Ergast) API and live timing from OpenF1, and
//! normalizes them into flat view models for display.
//!
//! Page-facing reads never fail: a transport error, a malformed body or an
//! empty season all collapse to an empty value and are logged. The `try_*`
//! forms return the underlying [`AppError`] instead.
//!
//! # Examples
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use f1_race_data::{AppError, Config, RaceDataClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let client = RaceDataClient::new(Config::load().await?)?;
//!
//!     let overview = client.fetch_calendar_overview(Utc::now()).await;
//!     println!("{}% of the season done", overview.progress);
//!
//!     if let Some(next) = overview.next_race {
//!         println!("Next: round {} {} ({})", next.round, next.name, next.code);
//!     }
//!
//!     for standing in client.fetch_driver_standings().await.iter().take(3) {
//!         println!("{} {} {}", standing.position, standing.driver_code, standing.points);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::models::{
    CalendarOverview, ClassifiedRace, ConstructorStanding, DriverStanding, HomeSnapshot,
    LiveBoard, LiveDriver, QualifyingRow, RaceResult, RaceSchedule, Region, StandingsBoard,
    StandingsPair,
};
pub use data_fetcher::{BoardSource, LivePoller, PollIntervals, RaceDataClient};
pub use error::{AppError, FetchErrorKind};

// Re-export cache monitoring functions for external tools
pub use data_fetcher::cache::{CacheStats, clear_all_caches, get_cache_stats};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
