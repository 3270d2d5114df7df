//! Multi-step card creation
//!
//! Steps run `Details -> Fairness -> Compliance -> Review`. Submission posts
//! the card first, then its metrics, then each compliance record, in that
//! order. A failure after the card exists leaves it in place and reports
//! which stage broke.

use model_card_client::{ModelCardApi, RequestContext};
use model_card_common::{ComplianceInfo, FairnessMetric, ModelCard};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

use crate::card_form::{CardForm, FormField};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Details,
    Fairness,
    Compliance,
    Review,
}

impl WizardStep {
    fn next(self) -> Self {
        match self {
            Self::Details => Self::Fairness,
            Self::Fairness => Self::Compliance,
            Self::Compliance | Self::Review => Self::Review,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Details | Self::Fairness => Self::Details,
            Self::Compliance => Self::Fairness,
            Self::Review => Self::Compliance,
        }
    }
}

/// Submission stage, for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStage {
    CreateCard,
    FairnessMetrics,
    ComplianceInfo,
}

impl fmt::Display for SubmitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CreateCard => "create card",
            Self::FairnessMetrics => "add fairness metrics",
            Self::ComplianceInfo => "add compliance information",
        })
    }
}

#[derive(Error, Debug)]
#[error("Wizard failed at {stage}: {source}")]
pub struct WizardError {
    pub stage: SubmitStage,
    /// Set when the card was created before the failure
    pub created_id: Option<String>,
    #[source]
    pub source: model_card_client::Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    Edit(FormField),
    Next,
    Back,
    AddMetric(FairnessMetric),
    RemoveMetric(usize),
    AddCompliance(ComplianceInfo),
    RemoveCompliance(usize),
}

/// Everything the server returned for a successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct WizardOutcome {
    pub card: ModelCard,
    pub metrics: Vec<FairnessMetric>,
    pub compliance: Vec<ComplianceInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateWizard {
    pub step: WizardStep,
    pub form: CardForm,
    pub metrics: Vec<FairnessMetric>,
    pub compliance: Vec<ComplianceInfo>,
}

impl CreateWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce(mut self, action: WizardAction) -> model_card_common::Result<Self> {
        self.apply(action)?;
        Ok(self)
    }

    /// Apply one action; leaving `Details` requires a valid form
    pub fn apply(&mut self, action: WizardAction) -> model_card_common::Result<()> {
        match action {
            WizardAction::Edit(field) => self.form.set(field),
            WizardAction::Next => {
                if self.step == WizardStep::Details {
                    self.form.validate()?;
                }
                self.step = self.step.next();
            }
            WizardAction::Back => self.step = self.step.prev(),
            WizardAction::AddMetric(metric) => {
                metric.validate()?;
                self.metrics.push(metric);
            }
            WizardAction::RemoveMetric(index) => {
                if index < self.metrics.len() {
                    self.metrics.remove(index);
                }
            }
            WizardAction::AddCompliance(record) => {
                record.validate()?;
                self.compliance.push(record);
            }
            WizardAction::RemoveCompliance(index) => {
                if index < self.compliance.len() {
                    self.compliance.remove(index);
                }
            }
        }
        Ok(())
    }

    /// Post the card, then metrics, then compliance records
    pub async fn submit<A>(
        &self,
        api: &A,
        ctx: &RequestContext,
    ) -> Result<WizardOutcome, WizardError>
    where
        A: ModelCardApi + ?Sized,
    {
        let payload = self.form.to_create().map_err(|e| WizardError {
            stage: SubmitStage::CreateCard,
            created_id: None,
            source: e.into(),
        })?;

        let card = ctx
            .run(api.create_model_card(&payload))
            .await
            .map_err(|source| WizardError {
                stage: SubmitStage::CreateCard,
                created_id: None,
                source,
            })?;

        let fail = |stage: SubmitStage, source: model_card_client::Error| {
            warn!("Wizard stopped at {} for card {}: {}", stage, card.id, source);
            WizardError {
                stage,
                created_id: Some(card.id.clone()),
                source,
            }
        };

        let metrics = if self.metrics.is_empty() {
            Vec::new()
        } else {
            ctx.run(api.add_fairness_metrics(&card.id, &self.metrics))
                .await
                .map_err(|e| fail(SubmitStage::FairnessMetrics, e))?
        };

        let mut compliance = Vec::with_capacity(self.compliance.len());
        for record in &self.compliance {
            let added = ctx
                .run(api.add_compliance_info(&card.id, record))
                .await
                .map_err(|e| fail(SubmitStage::ComplianceInfo, e))?;
            compliance.push(added);
        }

        info!(
            "Wizard created card {} with {} metrics and {} compliance records",
            card.id,
            metrics.len(),
            compliance.len()
        );

        Ok(WizardOutcome {
            card,
            metrics,
            compliance,
        })
    }
}
