pub mod jolpica;
pub mod openf1;
pub mod views;

// Re-export all public types so callers can use `models::X`
pub use jolpica::{
    Circuit, Constructor, Driver, FastestLap, JolpicaConstructorStanding, JolpicaDriverStanding,
    JolpicaRace, JolpicaResult, LapTime, Location, QualifyingResult, ResultTime, SessionTime,
};
pub use openf1::{OpenF1Driver, OpenF1Interval, OpenF1Position, OpenF1Session, TimingGap};
pub use views::{
    CalendarOverview, ClassifiedRace, ConstructorStanding, DriverStanding, HomeSnapshot,
    LiveBoard, LiveDriver, QualifyingRow, RaceResult, RaceSchedule, Region, RegionCount,
    StandingsBoard, StandingsPair, Tyre,
};
