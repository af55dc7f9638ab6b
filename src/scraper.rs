//! The poll loop: wait for the timer, fetch a batch, forward it, repeat.
//!
//! Any failure ends the loop for good. There is no retry; the error is
//! handed back to whoever called [`Scraper::run`], which is expected to
//! exit the process.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::{Limit, ScrapeSettings};
use crate::error::ScrapeError;
use crate::fetch::{Fetcher, Transport};
use crate::sink::Sink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Waiting,
    Ticking,
    Terminated,
}

/// One-shot stop signal shared between the loop task and its owner.
#[derive(Clone, Default)]
pub struct Termination {
    token: CancellationToken,
    raised: Arc<AtomicBool>,
}

impl Termination {
    /// Raise the signal. Returns `true` only for the call that actually
    /// raised it; later calls are no-ops.
    pub fn raise(&self) -> bool {
        let first = !self.raised.swap(true, Ordering::AcqRel);
        self.token.cancel();
        first
    }

    pub async fn wait(&self) {
        self.token.cancelled().await
    }

    /// Raises the signal when dropped, so a panicking loop still wakes
    /// its owner.
    fn guard(&self) -> TerminationGuard {
        TerminationGuard(self.clone())
    }
}

struct TerminationGuard(Termination);

impl Drop for TerminationGuard {
    fn drop(&mut self) {
        self.0.raise();
    }
}

pub struct Scraper<T, S> {
    fetcher: Fetcher<T>,
    sink: S,
    limit: Limit,
    rate: Duration,
    termination: Termination,
    state: watch::Sender<State>,
}

impl<T, S> Scraper<T, S>
where
    T: Transport + Send + Sync + 'static,
    S: Sink + Send + 'static,
{
    pub fn new(fetcher: Fetcher<T>, sink: S, settings: &ScrapeSettings) -> Self {
        let (state, _) = watch::channel(State::Idle);
        Scraper {
            fetcher,
            sink,
            limit: settings.limit,
            rate: settings.rate,
            termination: Termination::default(),
            state,
        }
    }

    /// Watch the loop move between states.
    #[cfg(test)]
    pub fn subscribe(&self) -> watch::Receiver<State> {
        self.state.subscribe()
    }

    #[cfg(test)]
    pub fn termination(&self) -> Termination {
        self.termination.clone()
    }

    /// Start the loop on a background task and wait until it terminates.
    ///
    /// Returns the error that stopped the loop, or `Ok` if the termination
    /// signal was raised from outside.
    pub async fn run(self) -> Result<(), ScrapeError> {
        let termination = self.termination.clone();
        let task = tokio::spawn(self.drive());

        termination.wait().await;
        task.await?
    }

    async fn drive(mut self) -> Result<(), ScrapeError> {
        let _guard = self.termination.guard();

        let mut ticker = time::interval_at(Instant::now() + self.rate, self.rate);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.transition(State::Waiting);

        loop {
            tokio::select! {
                biased;
                _ = self.termination.wait() => break,
                _ = ticker.tick() => {}
            }

            self.transition(State::Ticking);
            match self.tick().await {
                Ok(count) => {
                    info!(count, "forwarded pastes");
                    self.transition(State::Waiting);
                }
                Err(e) => {
                    // reported once, by whoever receives it from `run`
                    self.termination.raise();
                    drop(ticker);
                    self.transition(State::Terminated);
                    return Err(e);
                }
            }
        }

        drop(ticker);
        self.transition(State::Terminated);
        Ok(())
    }

    fn transition(&self, state: State) {
        debug!(?state, "scraper state");
        self.state.send_replace(state);
    }

    async fn tick(&mut self) -> Result<usize, ScrapeError> {
        debug!(limit = %self.limit, "tick");
        let batch = self.fetcher.fetch(self.limit).await?;
        let count = batch.len();
        self.sink.forward(batch).await?;
        Ok(count)
    }
}
