//! Dispatch sinks: inline delivery and a background queue.
//!
//! The background queue is a bounded mpsc channel drained by one spawned
//! worker. Shutdown is signalled through a `watch` channel; the worker then
//! drains what is already queued, bounded by the configured grace period.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use oshapp_core::config::{DispatchConfig, DispatchMode};
use oshapp_core::error::AppError;
use oshapp_core::result::AppResult;
use oshapp_service::{DispatchRequest, DispatchSink};

use crate::router::NotificationRouter;

/// Delivers each request before `submit` returns.
#[derive(Debug, Clone)]
pub struct InlineDispatch {
    router: NotificationRouter,
}

impl InlineDispatch {
    /// Creates a new inline sink.
    pub fn new(router: NotificationRouter) -> Self {
        Self { router }
    }
}

#[async_trait]
impl DispatchSink for InlineDispatch {
    async fn submit(&self, request: DispatchRequest) -> AppResult<()> {
        self.router.dispatch(&request).await;
        Ok(())
    }
}

/// Enqueues requests for the background worker.
#[derive(Debug, Clone)]
pub struct DispatchQueue {
    sender: mpsc::Sender<DispatchRequest>,
}

#[async_trait]
impl DispatchSink for DispatchQueue {
    async fn submit(&self, request: DispatchRequest) -> AppResult<()> {
        self.sender.try_send(request).map_err(|e| match e {
            mpsc::error::TrySendError::Full(req) => AppError::delivery(format!(
                "Dispatch queue is full, dropping notification for appointment {}",
                req.appointment.id
            )),
            mpsc::error::TrySendError::Closed(req) => AppError::delivery(format!(
                "Dispatch queue is closed, dropping notification for appointment {}",
                req.appointment.id
            )),
        })
    }
}

/// Handle on the background worker.
#[derive(Debug)]
pub struct DispatchWorker {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl DispatchWorker {
    /// Signal shutdown and wait for the worker to drain and exit.
    pub async fn shutdown(self) -> AppResult<()> {
        let _ = self.shutdown.send(true);
        self.handle
            .await
            .map_err(|e| AppError::internal(format!("Dispatch worker panicked: {e}")))
    }
}

impl DispatchQueue {
    /// Spawn the worker and return the queue with its handle.
    pub fn spawn(router: NotificationRouter, config: &DispatchConfig) -> (Self, DispatchWorker) {
        let (sender, receiver) = mpsc::channel(config.queue_capacity.max(1));
        let (shutdown, cancel) = watch::channel(false);
        let grace = Duration::from_secs(config.shutdown_grace_seconds);

        let handle = tokio::spawn(run_worker(router, receiver, cancel, grace));

        (Self { sender }, DispatchWorker { shutdown, handle })
    }
}

/// Worker loop. Runs until the shutdown signal or until every sender is gone.
async fn run_worker(
    router: NotificationRouter,
    mut receiver: mpsc::Receiver<DispatchRequest>,
    mut cancel: watch::Receiver<bool>,
    grace: Duration,
) {
    info!("Dispatch worker started");

    loop {
        tokio::select! {
            changed = cancel.changed() => {
                if changed.is_err() || *cancel.borrow() {
                    info!("Dispatch worker received shutdown signal");
                    break;
                }
            }
            next = receiver.recv() => match next {
                Some(request) => {
                    router.dispatch(&request).await;
                }
                None => {
                    info!("Dispatch queue closed, worker exiting");
                    return;
                }
            }
        }
    }

    receiver.close();
    let pending = receiver.len();
    debug!(pending, "Draining dispatch queue");

    let drain = async {
        while let Some(request) = receiver.recv().await {
            router.dispatch(&request).await;
        }
    };
    if tokio::time::timeout(grace, drain).await.is_err() {
        warn!(
            grace_seconds = grace.as_secs(),
            "Shutdown grace period elapsed, dropping queued notifications"
        );
    }

    info!("Dispatch worker shut down complete");
}

/// Build the sink selected by configuration. Background mode also returns
/// the worker handle, which the caller must shut down.
pub fn sink_for(
    router: NotificationRouter,
    config: &DispatchConfig,
) -> (Arc<dyn DispatchSink>, Option<DispatchWorker>) {
    match config.mode {
        DispatchMode::Inline => (Arc::new(InlineDispatch::new(router)), None),
        DispatchMode::Background => {
            let (queue, worker) = DispatchQueue::spawn(router, config);
            (Arc::new(queue), Some(worker))
        }
    }
}
