//! Live timing reads against the OpenF1 API.
//!
//! Timing data is never cached. Driver lists change at most once per
//! session and are kept for five minutes.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::fetch_utils::fetch_json_checked;
use super::jolpica_api::{RaceDataClient, collapse};
use super::urls::{SessionKey, build_openf1_url};
use crate::constants::cache_ttl;
use crate::data_fetcher::models::{
    LiveBoard, OpenF1Driver, OpenF1Interval, OpenF1Position, OpenF1Session,
};
use crate::data_fetcher::normalizer::extract_list;
use crate::data_fetcher::processors::{
    compose_live_board, ghost_board, is_session_live, session_window,
};
use crate::error::AppError;

fn check_array(payload: &Value, url: &str) -> Result<(), AppError> {
    if payload.is_array() {
        Ok(())
    } else {
        Err(AppError::api_unexpected_structure("Expected a JSON array", url))
    }
}

impl RaceDataClient {
    /// OpenF1 answers with a bare JSON array; anything else is an
    /// unexpected structure.
    async fn get_openf1_list<T: DeserializeOwned>(
        &self,
        resource: &str,
        session: SessionKey,
        ttl_seconds: u64,
    ) -> Result<Vec<T>, AppError> {
        let url = build_openf1_url(&self.config().openf1_base_url, resource, session);
        let payload =
            fetch_json_checked(self.http_client(), &url, ttl_seconds, check_array).await?;
        Ok(extract_list(&payload, ""))
    }

    #[instrument(skip(self))]
    pub async fn try_fetch_latest_session(&self) -> Result<Option<OpenF1Session>, AppError> {
        let sessions: Vec<OpenF1Session> = self
            .get_openf1_list("sessions", SessionKey::Latest, cache_ttl::NO_STORE)
            .await?;
        Ok(sessions.into_iter().next())
    }

    pub async fn fetch_latest_session(&self) -> Option<OpenF1Session> {
        collapse("latest_session", self.try_fetch_latest_session().await)
    }

    #[instrument(skip(self))]
    pub async fn try_fetch_intervals(
        &self,
        session: SessionKey,
    ) -> Result<Vec<OpenF1Interval>, AppError> {
        self.get_openf1_list("intervals", session, cache_ttl::NO_STORE)
            .await
    }

    pub async fn fetch_intervals(&self, session: SessionKey) -> Vec<OpenF1Interval> {
        collapse("intervals", self.try_fetch_intervals(session).await)
    }

    #[instrument(skip(self))]
    pub async fn try_fetch_positions(
        &self,
        session: SessionKey,
    ) -> Result<Vec<OpenF1Position>, AppError> {
        self.get_openf1_list("position", session, cache_ttl::NO_STORE)
            .await
    }

    pub async fn fetch_positions(&self, session: SessionKey) -> Vec<OpenF1Position> {
        collapse("positions", self.try_fetch_positions(session).await)
    }

    #[instrument(skip(self))]
    pub async fn try_fetch_session_drivers(
        &self,
        session: SessionKey,
    ) -> Result<Vec<OpenF1Driver>, AppError> {
        self.get_openf1_list("drivers", session, cache_ttl::SESSION_DRIVERS_SECONDS)
            .await
    }

    pub async fn fetch_session_drivers(&self, session: SessionKey) -> Vec<OpenF1Driver> {
        collapse("session_drivers", self.try_fetch_session_drivers(session).await)
    }

    /// The latest session and whether it is live at `now`.
    ///
    /// A session whose start or end cannot be parsed is a `DateTimeParse`
    /// error rather than a session that is simply not live.
    pub async fn try_fetch_live_session(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Option<(OpenF1Session, bool)>, AppError> {
        let Some(session) = self.try_fetch_latest_session().await? else {
            return Ok(None);
        };
        session_window(&session)?;
        let live = is_session_live(&session, now);
        Ok(Some((session, live)))
    }

    async fn try_fetch_live_rows(&self, session: &OpenF1Session) -> Result<LiveBoard, AppError> {
        let key = SessionKey::Key(session.session_key);
        let (intervals, drivers) = tokio::join!(
            self.try_fetch_intervals(key),
            self.try_fetch_session_drivers(key)
        );
        let intervals = intervals?;
        // Rows fall back to car numbers without a driver list
        let drivers = drivers.unwrap_or_else(|e| {
            warn!(kind = %e.fetch_kind(), "Driver list unavailable: {e}");
            Vec::new()
        });

        Ok(LiveBoard {
            drivers: compose_live_board(&intervals, &drivers),
            session: Some(session.clone()),
            is_live: true,
            is_demo: false,
        })
    }

    /// The live board for `now`.
    ///
    /// When a session is live the board is built from its intervals.
    /// Otherwise, or when any live read fails, the demo board is returned.
    #[instrument(skip(self))]
    pub async fn fetch_live_board(&self, now: DateTime<Utc>) -> LiveBoard {
        let live_session = match self.try_fetch_live_session(now).await {
            Ok(Some((session, true))) => Some(session),
            Ok(Some((session, false))) => {
                debug!("Latest session {} is not live", session.session_key);
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!(kind = %e.fetch_kind(), "Session lookup failed: {e}");
                None
            }
        };

        if let Some(session) = live_session {
            match self.try_fetch_live_rows(&session).await {
                Ok(board) => {
                    info!(
                        "Live board for session {} has {} rows",
                        session.session_key,
                        board.drivers.len()
                    );
                    return board;
                }
                Err(e) => warn!(
                    kind = %e.fetch_kind(),
                    "Live timing failed, showing demo board: {e}"
                ),
            }
        }

        demo_board()
    }
}

pub fn demo_board() -> LiveBoard {
    LiveBoard {
        drivers: ghost_board(&mut rand::rng()),
        session: None,
        is_live: false,
        is_demo: true,
    }
}
