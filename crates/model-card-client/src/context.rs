//! Cancellation for in-flight requests
//!
//! A view owns one [`CancelHandle`] and issues every request through a
//! [`RequestContext`] derived from it. Cancelling the handle (for example
//! when the view is disposed) resolves all pending requests with
//! [`Error::Cancelled`] and drops the underlying HTTP futures.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Owner side of a cancellation token
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Cancel every context created from this handle. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// New request context; already cancelled if the handle is
    pub fn context(&self) -> RequestContext {
        RequestContext {
            id: Uuid::new_v4(),
            cancel: self.tx.subscribe(),
        }
    }
}

/// Per-request view of a cancellation token
#[derive(Debug, Clone)]
pub struct RequestContext {
    id: Uuid,
    cancel: watch::Receiver<bool>,
}

impl RequestContext {
    /// Context that is never cancelled
    pub fn detached() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self {
            id: Uuid::new_v4(),
            cancel: rx,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Resolves once the context is cancelled; never resolves for a
    /// context whose handle is gone without cancelling
    pub async fn cancelled(&self) {
        let mut rx = self.cancel.clone();
        let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }

    /// Drive `fut` unless the context is cancelled first
    pub async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_cancelled() {
            debug!(request_id = %self.id, "Skipping request on cancelled context");
            return Err(Error::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.cancelled() => {
                debug!(request_id = %self.id, "Request cancelled");
                Err(Error::Cancelled)
            }
            result = fut => result,
        }
    }
}
