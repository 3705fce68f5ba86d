//! Background polling of the live board.
//!
//! One poll runs at a time: the next tick is only awaited once the previous
//! board has been delivered, and missed ticks are delayed instead of
//! replayed, so boards always arrive in the order they were fetched.

use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::{debug, info, warn};

use crate::constants::live;
use crate::data_fetcher::api::RaceDataClient;
use crate::data_fetcher::models::LiveBoard;

/// Anything that can produce a live board for a given instant.
pub trait BoardSource: Send + Sync + 'static {
    fn fetch_board(&self, now: DateTime<Utc>) -> impl Future<Output = LiveBoard> + Send;
}

impl BoardSource for RaceDataClient {
    fn fetch_board(&self, now: DateTime<Utc>) -> impl Future<Output = LiveBoard> + Send {
        self.fetch_live_board(now)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    /// Period while a session is live
    pub live: Duration,
    /// Period while the demo board is shown
    pub demo: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            live: Duration::from_millis(live::POLL_INTERVAL_MS),
            demo: Duration::from_millis(live::DEMO_INTERVAL_MS),
        }
    }
}

impl PollIntervals {
    pub fn for_board(&self, board: &LiveBoard) -> Duration {
        if board.is_live { self.live } else { self.demo }
    }
}

fn ticker(start: Instant, period: Duration) -> Interval {
    let mut ticker = interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Handle to a running poll task.
///
/// The task ends when [`LivePoller::stop`] is called, when the handle is
/// dropped, or when the receiving end of the update channel is dropped.
#[derive(Debug)]
pub struct LivePoller {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl LivePoller {
    pub fn spawn<S: BoardSource>(source: S, updates: mpsc::Sender<LiveBoard>) -> Self {
        Self::spawn_with_intervals(source, updates, PollIntervals::default())
    }

    pub fn spawn_with_intervals<S: BoardSource>(
        source: S,
        updates: mpsc::Sender<LiveBoard>,
        intervals: PollIntervals,
    ) -> Self {
        let (shutdown, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(run(source, updates, shutdown_rx, intervals));
        Self { shutdown, task }
    }

    /// Asks the task to stop. An in-flight poll or a board still waiting for
    /// room in the update channel is dropped, not delivered.
    pub fn stop(&self) {
        // Err means the task already ended and dropped its receiver
        let _ = self.shutdown.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stops the task and waits for it to end.
    pub async fn shutdown(self) {
        self.stop();
        self.join().await;
    }

    /// Waits for the task to end on its own.
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            warn!("Live poller task ended abnormally: {e}");
        }
    }
}

async fn run<S: BoardSource>(
    source: S,
    updates: mpsc::Sender<LiveBoard>,
    mut shutdown: watch::Receiver<bool>,
    intervals: PollIntervals,
) {
    let mut period = intervals.demo;
    let mut ticks = ticker(Instant::now(), period);
    let mut polls: u64 = 0;

    info!("Live poller started");
    loop {
        if *shutdown.borrow() {
            break;
        }

        tokio::select! {
            _ = ticks.tick() => {}
            _ = shutdown.changed() => break,
        }

        let board = tokio::select! {
            board = source.fetch_board(Utc::now()) => board,
            _ = shutdown.changed() => {
                debug!("Dropping in-flight poll on shutdown");
                break;
            }
        };
        polls += 1;

        let next_period = intervals.for_board(&board);
        let delivered = tokio::select! {
            sent = updates.send(board) => sent.is_ok(),
            _ = shutdown.changed() => {
                debug!("Dropping undelivered board on shutdown");
                break;
            }
        };
        if !delivered {
            debug!("Live board receiver dropped");
            break;
        }

        if next_period != period {
            debug!("Poll period changes from {period:?} to {next_period:?}");
            period = next_period;
            ticks = ticker(Instant::now() + period, period);
        }
    }
    info!("Live poller stopped after {polls} polls");
}
