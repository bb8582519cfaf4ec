// SPDX-License-Identifier: MIT

//! Rate-limited task executor.
//!
//! Serializes outbound routing requests and caps how many start within any
//! rolling 60-second window. A single worker task owns the queue and the
//! timestamp window, so ordering is FIFO by construction and no locking is
//! needed around the window state.

use std::collections::VecDeque;
use std::future::Future;
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;

use crate::error::AppError;

/// Length of the rolling rate-limit window.
const WINDOW: Duration = Duration::from_secs(60);

/// Small fixed pause between consecutive task starts.
const INTER_REQUEST_DELAY: Duration = Duration::from_millis(100);

/// A queued unit of work. The closure resolves its caller's oneshot itself,
/// which keeps the channel monomorphic while `submit` stays generic.
type Job = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;

/// Async throttle admitting at most `requests_per_minute` task starts in any
/// trailing 60-second interval. Tasks run one at a time, in submission order.
#[derive(Clone)]
pub struct RateLimitedExecutor {
    tx: mpsc::UnboundedSender<Job>,
}

impl RateLimitedExecutor {
    /// Create an executor and spawn its worker task.
    pub fn new(requests_per_minute: usize) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_worker(rx, requests_per_minute.max(1)));
        Self { tx }
    }

    /// Queue a task and wait for its result.
    ///
    /// A failing task rejects only its own submission; later tasks still run.
    pub async fn submit<T, F, Fut>(&self, task: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, AppError>> + Send + 'static,
    {
        let (done_tx, done_rx) = oneshot::channel();

        let job: Job = Box::new(move || {
            Box::pin(async move {
                let result = task().await;
                // The caller may have given up waiting; nothing to do then.
                let _ = done_tx.send(result);
            })
        });

        self.tx
            .send(job)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("rate limiter worker stopped")))?;

        done_rx
            .await
            .map_err(|_| AppError::Internal(anyhow::anyhow!("rate limiter dropped task")))?
    }
}

/// Worker loop. Exits when every executor handle has been dropped.
async fn run_worker(mut rx: mpsc::UnboundedReceiver<Job>, requests_per_minute: usize) {
    let mut window: VecDeque<Instant> = VecDeque::new();

    while let Some(job) = rx.recv().await {
        // Wait until the rolling window has a free slot.
        loop {
            let now = Instant::now();
            while window
                .front()
                .is_some_and(|t| now.duration_since(*t) >= WINDOW)
            {
                window.pop_front();
            }

            if window.len() < requests_per_minute {
                break;
            }

            // Window is full; sleep until the oldest dispatch ages out.
            let oldest = *window.front().expect("window is non-empty when full");
            let wait = WINDOW - now.duration_since(oldest);
            tracing::info!(wait_secs = wait.as_secs(), "Rate limit reached, waiting");
            tokio::time::sleep(wait).await;
        }

        window.push_back(Instant::now());
        job().await;

        tokio::time::sleep(INTER_REQUEST_DELAY).await;
    }
}
