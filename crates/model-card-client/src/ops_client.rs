//! Client for background jobs and diagnostics

use model_card_common::{DiagnosticRun, DiagnosticRunList, JobList};
use tracing::info;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpCore;

/// Client for the job and diagnostics endpoints
#[derive(Debug, Clone)]
pub struct OpsClient {
    core: HttpCore,
}

impl OpsClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            core: HttpCore::new(config)?,
        })
    }

    pub fn from_core(core: HttpCore) -> Self {
        Self { core }
    }

    pub async fn list_jobs(&self) -> Result<JobList> {
        let url = self.core.endpoint(&["jobs"])?;
        self.core.get(url).await
    }

    pub async fn list_diagnostic_runs(&self) -> Result<DiagnosticRunList> {
        let url = self.core.endpoint(&["diagnostics", "runs"])?;
        self.core.get(url).await
    }

    /// Start a diagnostics run
    pub async fn run_diagnostics(&self) -> Result<DiagnosticRun> {
        let url = self.core.endpoint(&["diagnostics", "run"])?;
        let run: DiagnosticRun = self.core.post_empty(url).await?;
        info!("Started diagnostics run: {}", run.id);
        Ok(run)
    }
}
