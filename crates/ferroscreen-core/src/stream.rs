//! Polling stream over a [`ScreenerSession`].
//!
//! The stream is pull based: each poll of the stream runs at most one
//! execution. Consecutive executions start at least `interval` apart, measured
//! start to start, and never overlap.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, BoxStream, StreamExt};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::ScreenerError;
use crate::materializer::ResultTable;
use crate::session::ScreenerSession;

/// Shortest cadence a stream will poll at.
pub const MIN_STREAM_INTERVAL: Duration = Duration::from_secs(1);

pub type UpdateCallback = Arc<dyn Fn(&ResultTable) + Send + Sync>;

#[derive(Clone)]
pub struct StreamConfig {
    interval: Duration,
    max_iterations: Option<u64>,
    on_update: Option<UpdateCallback>,
    cancellation: CancellationToken,
}

impl StreamConfig {
    /// Intervals below [`MIN_STREAM_INTERVAL`] are raised to it.
    pub fn new(interval: Duration) -> Self {
        let interval = if interval < MIN_STREAM_INTERVAL {
            tracing::warn!(
                requested_ms = interval.as_millis() as u64,
                floor_ms = MIN_STREAM_INTERVAL.as_millis() as u64,
                "stream interval below floor, clamping"
            );
            MIN_STREAM_INTERVAL
        } else {
            interval
        };
        Self {
            interval,
            max_iterations: None,
            on_update: None,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Called with every successful table before it is yielded.
    pub fn with_on_update<F>(mut self, on_update: F) -> Self
    where
        F: Fn(&ResultTable) + Send + Sync + 'static,
    {
        self.on_update = Some(Arc::new(on_update));
        self
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    pub const fn max_iterations(&self) -> Option<u64> {
        self.max_iterations
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }
}

impl std::fmt::Debug for StreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamConfig")
            .field("interval", &self.interval)
            .field("max_iterations", &self.max_iterations)
            .field("on_update", &self.on_update.is_some())
            .field("cancelled", &self.cancellation.is_cancelled())
            .finish()
    }
}

struct PollState {
    session: ScreenerSession,
    config: StreamConfig,
    completed: u64,
    last_start: Option<Instant>,
    failed: bool,
}

impl PollState {
    fn exhausted(&self) -> bool {
        self.failed
            || self.config.cancellation.is_cancelled()
            || self
                .config
                .max_iterations
                .is_some_and(|max| self.completed >= max)
    }
}

impl ScreenerSession {
    /// Repeats [`execute`](Self::execute) on `config`'s cadence.
    ///
    /// The stream ends after the iteration cap, on cancellation, or right
    /// after yielding the first error. Dropping it while an execution is in
    /// flight lets that execution finish in the background.
    pub fn stream(&self, config: StreamConfig) -> BoxStream<'static, Result<ResultTable, ScreenerError>> {
        let state = PollState {
            session: self.clone(),
            config,
            completed: 0,
            last_start: None,
            failed: false,
        };

        stream::unfold(state, |mut state| async move {
            if state.exhausted() {
                return None;
            }

            if let Some(last_start) = state.last_start {
                let next_start = last_start + state.config.interval;
                tokio::select! {
                    biased;
                    _ = state.config.cancellation.cancelled() => return None,
                    _ = tokio::time::sleep_until(next_start) => {}
                }
            }

            state.last_start = Some(Instant::now());
            let session = state.session.clone();
            let result = match tokio::spawn(async move { session.execute().await }).await {
                Ok(result) => result,
                Err(join_error) => Err(ScreenerError::Execution(join_error.to_string())),
            };
            state.completed += 1;

            match &result {
                Ok(table) => {
                    if let Some(on_update) = &state.config.on_update {
                        on_update(table);
                    }
                }
                Err(error) => {
                    tracing::warn!(iteration = state.completed, error = %error, "stream iteration failed");
                    state.failed = true;
                }
            }
            Some((result, state))
        })
        .boxed()
    }
}
