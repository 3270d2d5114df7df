//! Load bookkeeping shared by the views

use model_card_client::Error;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::messages::Operation;

/// Fetch state of a view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed { message: String },
}

/// Handed out when a fetch starts; results are accepted only for the
/// newest ticket of a live view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Generation counter plus disposal flag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadGuard {
    generation: u64,
    disposed: bool,
}

impl LoadGuard {
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    pub fn accepts(&self, ticket: LoadTicket) -> bool {
        !self.disposed && ticket.0 == self.generation
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Outcome of feeding a fetch result into a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Accepted,
    /// Superseded by a newer fetch, or the view is gone
    Stale,
    /// The request was cancelled; state is unchanged
    Cancelled,
}

/// Map a fetch result onto a load state, logging the underlying error.
/// A cancelled fetch falls back to `Loaded` when earlier data is still
/// shown, otherwise to `Idle`.
pub(crate) fn settle<T>(
    op: Operation,
    result: Result<T, Error>,
    load: &mut LoadState,
    has_data: bool,
) -> Result<T, Applied> {
    match result {
        Ok(value) => {
            *load = LoadState::Loaded;
            Ok(value)
        }
        Err(Error::Cancelled) => {
            debug!("{} cancelled", op);
            *load = if has_data {
                LoadState::Loaded
            } else {
                LoadState::Idle
            };
            Err(Applied::Cancelled)
        }
        Err(e) => {
            error!("Failed to {}: {}", op, e);
            *load = LoadState::Failed {
                message: op.failure_message(),
            };
            Err(Applied::Accepted)
        }
    }
}
