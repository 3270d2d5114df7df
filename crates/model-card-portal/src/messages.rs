//! User-facing failure messages
//!
//! Every failure of an operation collapses into one generic sentence; the
//! underlying error only goes to the log.

use std::fmt;

/// A user-triggered operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LoadList,
    LoadCard,
    CreateCard,
    UpdateCard,
    DeleteCards,
    UpdateStatus,
    AddMetrics,
    AddCompliance,
    LoadStatistics,
    LoadDistribution,
    LoadJobs,
    LoadDiagnostics,
    RunDiagnostics,
}

impl Operation {
    fn action(&self) -> &'static str {
        match self {
            Self::LoadList => "load model cards",
            Self::LoadCard => "load model card",
            Self::CreateCard => "create model card",
            Self::UpdateCard => "update model card",
            Self::DeleteCards => "delete model cards",
            Self::UpdateStatus => "update model card status",
            Self::AddMetrics => "add fairness metrics",
            Self::AddCompliance => "add compliance information",
            Self::LoadStatistics => "load statistics",
            Self::LoadDistribution => "load fairness distribution",
            Self::LoadJobs => "load jobs",
            Self::LoadDiagnostics => "load diagnostic runs",
            Self::RunDiagnostics => "start diagnostics",
        }
    }

    pub fn failure_message(&self) -> String {
        format!("Failed to {}. Please try again later.", self.action())
    }

    /// Message for a batch where only some items failed
    pub fn partial_failure_message(&self, failed: usize, total: usize) -> String {
        format!(
            "Failed to {} for {} of {} selected items. Please try again later.",
            self.action(),
            failed,
            total
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action())
    }
}
