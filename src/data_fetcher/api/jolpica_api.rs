//! Schedule, standings and results reads against the Jolpica (Ergast) API.
//!
//! Each read comes in two forms. `try_*` returns the full `Result` so the
//! caller can tell a transport outage from a malformed payload. The plain
//! form is what pages use: any failure collapses to an empty list or `None`
//! and is logged with its category.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use tracing::{debug, info, instrument, warn};

use super::fetch_utils::fetch_json_checked;
use super::http_client::create_http_client_with_timeout;
use super::urls::{
    Season, build_constructor_standings_url, build_driver_standings_url, build_last_results_url,
    build_next_race_url, build_qualifying_url, build_round_results_url, build_schedule_url,
};
use crate::config::Config;
use crate::constants::cache_ttl;
use crate::data_fetcher::models::{
    CalendarOverview, ClassifiedRace, ConstructorStanding, DriverStanding, HomeSnapshot,
    QualifyingRow, RaceResult, RaceSchedule, StandingsPair,
};
use crate::data_fetcher::normalizer::{self, check_envelope};
use crate::data_fetcher::processors::{
    calendar_overview, compose_classified_race, compose_constructor_standings,
    compose_driver_standings, compose_qualifying, compose_results, compose_schedule, home_snapshot,
    standings_board,
};
use crate::error::AppError;

/// Returns the value, or logs the failure category and returns the default.
pub(crate) fn collapse<T: Default>(operation: &str, result: Result<T, AppError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(
                operation,
                kind = %e.fetch_kind(),
                retryable = e.is_retryable(),
                "Fetch failed, returning empty result: {e}"
            );
            T::default()
        }
    }
}

/// Entry point for all race data reads.
#[derive(Debug, Clone)]
pub struct RaceDataClient {
    config: Config,
    client: Client,
}

impl RaceDataClient {
    /// Builds a client with a pooled HTTP client using the configured timeout.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self { config, client })
    }

    /// Wraps an existing HTTP client, sharing its connection pool.
    pub fn with_client(config: Config, client: Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn http_client(&self) -> &Client {
        &self.client
    }

    async fn get_envelope(&self, url: &str, ttl_seconds: u64) -> Result<Value, AppError> {
        fetch_json_checked(&self.client, url, ttl_seconds, check_envelope).await
    }

    /// Runs `fetch` for the current season and, when that fails or comes back
    /// empty, once more for the configured fallback season.
    async fn with_season_fallback<T, F, Fut>(
        &self,
        operation: &str,
        is_empty: fn(&T) -> bool,
        fetch: F,
    ) -> Result<T, AppError>
    where
        F: Fn(Season) -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        match fetch(Season::Current).await {
            Ok(value) if !is_empty(&value) => return Ok(value),
            Ok(_) => info!("{operation}: current season is empty"),
            Err(e) => warn!(
                operation,
                kind = %e.fetch_kind(),
                "Current season failed: {e}"
            ),
        }

        let fallback = self.config.fallback_season;
        info!("{operation}: falling back to season {fallback}");
        fetch(Season::Year(fallback)).await
    }

    #[instrument(skip(self))]
    pub async fn try_fetch_season_schedule(&self) -> Result<Vec<RaceSchedule>, AppError> {
        let url = build_schedule_url(&self.config.jolpica_base_url, Season::Current);
        let payload = self.get_envelope(&url, cache_ttl::SCHEDULE_SECONDS).await?;
        let schedule = compose_schedule(&normalizer::races(&payload));
        debug!("Season schedule has {} races", schedule.len());
        Ok(schedule)
    }

    pub async fn fetch_season_schedule(&self) -> Vec<RaceSchedule> {
        collapse("season_schedule", self.try_fetch_season_schedule().await)
    }

    #[instrument(skip(self))]
    pub async fn try_fetch_next_race(&self) -> Result<Option<RaceSchedule>, AppError> {
        let url = build_next_race_url(&self.config.jolpica_base_url);
        let payload = self.get_envelope(&url, cache_ttl::SCHEDULE_SECONDS).await?;
        Ok(compose_schedule(&normalizer::races(&payload)).into_iter().next())
    }

    pub async fn fetch_next_race(&self) -> Option<RaceSchedule> {
        collapse("next_race", self.try_fetch_next_race().await)
    }

    async fn try_driver_standings_for(
        &self,
        season: Season,
    ) -> Result<Vec<DriverStanding>, AppError> {
        let url = build_driver_standings_url(&self.config.jolpica_base_url, season);
        let payload = self.get_envelope(&url, cache_ttl::STANDINGS_SECONDS).await?;
        Ok(compose_driver_standings(&normalizer::driver_standings(
            &payload,
        )))
    }

    /// Driver standings for the current season, or for the fallback season
    /// when the current one has none yet.
    #[instrument(skip(self))]
    pub async fn try_fetch_driver_standings(&self) -> Result<Vec<DriverStanding>, AppError> {
        self.with_season_fallback("driver_standings", Vec::is_empty, |season| {
            self.try_driver_standings_for(season)
        })
        .await
    }

    pub async fn fetch_driver_standings(&self) -> Vec<DriverStanding> {
        collapse("driver_standings", self.try_fetch_driver_standings().await)
    }

    async fn try_constructor_standings_for(
        &self,
        season: Season,
    ) -> Result<Vec<ConstructorStanding>, AppError> {
        let url = build_constructor_standings_url(&self.config.jolpica_base_url, season);
        let payload = self.get_envelope(&url, cache_ttl::STANDINGS_SECONDS).await?;
        Ok(compose_constructor_standings(
            &normalizer::constructor_standings(&payload),
        ))
    }

    #[instrument(skip(self))]
    pub async fn try_fetch_constructor_standings(
        &self,
    ) -> Result<Vec<ConstructorStanding>, AppError> {
        self.with_season_fallback("constructor_standings", Vec::is_empty, |season| {
            self.try_constructor_standings_for(season)
        })
        .await
    }

    pub async fn fetch_constructor_standings(&self) -> Vec<ConstructorStanding> {
        collapse(
            "constructor_standings",
            self.try_fetch_constructor_standings().await,
        )
    }

    async fn try_last_results_for(&self, season: Season) -> Result<ClassifiedRace, AppError> {
        let url = build_last_results_url(&self.config.jolpica_base_url, season);
        let payload = self.get_envelope(&url, cache_ttl::STANDINGS_SECONDS).await?;
        let (race, results) = normalizer::first_race_with_results(&payload);
        Ok(compose_classified_race(race.as_ref(), &results))
    }

    /// The last race run this season with its classification, falling back
    /// to the last race of the fallback season before the first round.
    #[instrument(skip(self))]
    pub async fn try_fetch_last_race_results(&self) -> Result<ClassifiedRace, AppError> {
        self.with_season_fallback(
            "last_race_results",
            |classified: &ClassifiedRace| classified.race.is_none(),
            |season| self.try_last_results_for(season),
        )
        .await
    }

    pub async fn fetch_last_race_results(&self) -> ClassifiedRace {
        collapse("last_race_results", self.try_fetch_last_race_results().await)
    }

    #[instrument(skip(self))]
    pub async fn try_fetch_race_results(&self, round: u32) -> Result<Vec<RaceResult>, AppError> {
        let url = build_round_results_url(&self.config.jolpica_base_url, round);
        let payload = self.get_envelope(&url, cache_ttl::SCHEDULE_SECONDS).await?;
        let (_, results) = normalizer::first_race_with_results(&payload);
        Ok(compose_results(&results))
    }

    pub async fn fetch_race_results(&self, round: u32) -> Vec<RaceResult> {
        collapse("race_results", self.try_fetch_race_results(round).await)
    }

    #[instrument(skip(self))]
    pub async fn try_fetch_qualifying_results(
        &self,
        round: u32,
    ) -> Result<Vec<QualifyingRow>, AppError> {
        let url = build_qualifying_url(&self.config.jolpica_base_url, round);
        let payload = self.get_envelope(&url, cache_ttl::SCHEDULE_SECONDS).await?;
        Ok(compose_qualifying(&normalizer::qualifying_results(&payload)))
    }

    pub async fn fetch_qualifying_results(&self, round: u32) -> Vec<QualifyingRow> {
        collapse(
            "qualifying_results",
            self.try_fetch_qualifying_results(round).await,
        )
    }

    pub async fn try_fetch_calendar_overview(
        &self,
        now: DateTime<Utc>,
    ) -> Result<CalendarOverview, AppError> {
        let schedule = self.try_fetch_season_schedule().await?;
        Ok(calendar_overview(schedule, now))
    }

    /// Calendar summary for `now`. A failed schedule read yields an empty
    /// overview with zero progress.
    pub async fn fetch_calendar_overview(&self, now: DateTime<Utc>) -> CalendarOverview {
        calendar_overview(self.fetch_season_schedule().await, now)
    }

    /// Driver and constructor standings fetched concurrently. Each side
    /// collapses on its own, so one failing does not empty the other.
    #[instrument(skip(self))]
    pub async fn fetch_standings_pair(&self) -> StandingsPair {
        let (drivers, constructors) = tokio::join!(
            self.fetch_driver_standings(),
            self.fetch_constructor_standings()
        );
        StandingsPair {
            drivers: standings_board(drivers),
            constructors: standings_board(constructors),
        }
    }

    /// Next race, last podium and top drivers for the landing view.
    #[instrument(skip(self))]
    pub async fn fetch_home_snapshot(&self, now: DateTime<Utc>) -> HomeSnapshot {
        let (schedule, last_results, standings) = tokio::join!(
            self.fetch_season_schedule(),
            self.fetch_last_race_results(),
            self.fetch_driver_standings()
        );
        home_snapshot(&schedule, &last_results, &standings, now)
    }
}
