//! Tagged view models handed to a renderer

use model_card_client::BatchSummary;
use model_card_common::{
    ComplianceInfo, DiagnosticRunList, FairnessDistribution, FairnessMetric, FilterState, JobList,
    ModelCard, ModelCardPage, ModelCardStatistics,
};
use std::collections::BTreeSet;

/// Everything a screen can show; renderers switch over the variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Panel<'a> {
    /// Nothing requested yet
    Empty,
    Loading,
    Failed {
        message: &'a str,
    },
    CardTable {
        page: &'a ModelCardPage,
        filter: &'a FilterState,
        selected: &'a BTreeSet<String>,
        notice: Option<&'a str>,
    },
    Overview {
        card: &'a ModelCard,
    },
    Fairness {
        card: &'a ModelCard,
        metrics: &'a [FairnessMetric],
    },
    Compliance {
        card: &'a ModelCard,
        records: &'a [ComplianceInfo],
    },
    Statistics {
        stats: &'a ModelCardStatistics,
    },
    Distribution {
        distribution: &'a FairnessDistribution,
    },
    Jobs {
        jobs: &'a JobList,
    },
    Diagnostics {
        runs: &'a DiagnosticRunList,
    },
    BatchResult {
        action: &'a str,
        summary: BatchSummary,
        failures: &'a [(String, String)],
    },
}
