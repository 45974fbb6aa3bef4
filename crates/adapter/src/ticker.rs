//! Periodic timeout poll.
//!
//! A [`Ticker`] is a tokio task that sends [`GameCommand::Tick`] every period
//! until it is cancelled, dropped, or the receiving side goes away.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::types::GameCommand;

/// Handle to a running tick task. Dropping it stops the task.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Start ticking into `tx`. The first tick fires one period from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(period: Duration, tx: mpsc::Sender<GameCommand>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if tx.send(GameCommand::Tick).await.is_err() {
                    break;
                }
            }
        });
        tracing::trace!(period_ms = period.as_millis() as u64, "ticker started");
        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
