pub mod error;
pub mod filter;
pub mod models;
pub mod ops;
pub mod wire;

pub use error::{Error, Result};
pub use filter::{FilterState, DEFAULT_LIMIT};
pub use models::{
    CardStatus, ComplianceInfo, ComplianceStatus, FairnessDistribution, FairnessMetric, ModelCard,
    ModelCardCreate, ModelCardPage, ModelCardStatistics, ModelCardUpdate, RiskTier,
};
pub use ops::{DiagnosticRun, DiagnosticRunList, Job, JobList, JobStatus};
