//! Per-item results for bulk operations

use futures::future::join_all;
use model_card_common::{CardStatus, ModelCard, ModelCardUpdate};
use std::future::Future;
use tracing::{info, warn};

use crate::api::ModelCardApi;
use crate::error::Error;

/// Outcome of one item in a batch
#[derive(Debug)]
pub struct BatchItem<T> {
    pub id: String,
    pub outcome: Result<T, Error>,
}

/// Counts for a finished batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Results of a bulk operation, one item per input id in input order
#[derive(Debug)]
pub struct BatchReport<T> {
    items: Vec<BatchItem<T>>,
}

impl<T> BatchReport<T> {
    /// Run `op` for every id concurrently and keep every outcome
    pub async fn collect<F, Fut>(ids: &[String], op: F) -> Self
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        let tasks = ids.iter().map(|id| {
            let call = op(id.clone());
            let id = id.clone();
            async move {
                let outcome = call.await;
                if let Err(e) = &outcome {
                    warn!("Batch item {} failed: {}", id, e);
                }
                BatchItem { id, outcome }
            }
        });

        Self {
            items: join_all(tasks).await,
        }
    }

    pub fn items(&self) -> &[BatchItem<T>] {
        &self.items
    }

    pub fn into_items(self) -> Vec<BatchItem<T>> {
        self.items
    }

    /// Ids whose call succeeded
    pub fn succeeded(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .filter(|item| item.outcome.is_ok())
            .map(|item| item.id.as_str())
    }

    /// Ids whose call failed, with the error
    pub fn failed(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.items
            .iter()
            .filter_map(|item| item.outcome.as_ref().err().map(|e| (item.id.as_str(), e)))
    }

    pub fn is_success(&self) -> bool {
        self.items.iter().all(|item| item.outcome.is_ok())
    }

    pub fn summary(&self) -> BatchSummary {
        let succeeded = self.succeeded().count();
        BatchSummary {
            total: self.items.len(),
            succeeded,
            failed: self.items.len() - succeeded,
        }
    }
}

/// Delete every id; failures do not stop the others
pub async fn delete_many<A>(api: &A, ids: &[String]) -> BatchReport<()>
where
    A: ModelCardApi + ?Sized,
{
    let report = BatchReport::collect(ids, |id| async move { api.delete_model_card(&id).await }).await;
    let summary = report.summary();
    info!(
        "Batch delete finished: {} succeeded, {} failed",
        summary.succeeded, summary.failed
    );
    report
}

/// Set the status of every id; failures do not stop the others
pub async fn update_status_many<A>(
    api: &A,
    ids: &[String],
    status: CardStatus,
) -> BatchReport<ModelCard>
where
    A: ModelCardApi + ?Sized,
{
    let update = ModelCardUpdate::status(status);
    let update = &update;
    let report = BatchReport::collect(ids, |id| async move {
        api.update_model_card(&id, update).await
    })
    .await;
    let summary = report.summary();
    info!(
        "Batch status update to {} finished: {} succeeded, {} failed",
        status, summary.succeeded, summary.failed
    );
    report
}
