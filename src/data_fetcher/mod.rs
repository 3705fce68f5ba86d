pub mod api;
pub mod cache;
pub mod live_poller;
pub mod models;
pub mod normalizer;
pub mod processors;

pub use api::RaceDataClient;
pub use live_poller::{BoardSource, LivePoller, PollIntervals};
pub use models::{
    CalendarOverview, ClassifiedRace, ConstructorStanding, DriverStanding, HomeSnapshot,
    LiveBoard, QualifyingRow, RaceResult, RaceSchedule, Region, StandingsPair,
};
