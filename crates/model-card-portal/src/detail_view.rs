//! Single card view with tabs

use model_card_client::Error;
use model_card_common::{ComplianceInfo, FairnessMetric, ModelCard};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::load::{settle, Applied, LoadGuard, LoadState, LoadTicket};
use crate::messages::Operation;
use crate::panel::Panel;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailTab {
    #[default]
    Overview,
    Fairness,
    Compliance,
}

impl DetailTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Fairness => "fairness",
            Self::Compliance => "compliance",
        }
    }
}

impl fmt::Display for DetailTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for DetailTab {
    type Err = model_card_common::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overview" => Ok(Self::Overview),
            "fairness" => Ok(Self::Fairness),
            "compliance" => Ok(Self::Compliance),
            _ => Err(model_card_common::Error::UnknownVariant {
                kind: "tab",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailAction {
    SelectTab(DetailTab),
    /// Metrics appended after a successful add
    MetricsAdded(Vec<FairnessMetric>),
    /// Record appended after a successful add
    ComplianceAdded(ComplianceInfo),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailView {
    pub card_id: String,
    pub card: Option<ModelCard>,
    pub tab: DetailTab,
    pub load: LoadState,
    guard: LoadGuard,
}

impl DetailView {
    pub fn new(card_id: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
            card: None,
            tab: DetailTab::Overview,
            load: LoadState::Idle,
            guard: LoadGuard::default(),
        }
    }

    pub fn reduce(mut self, action: DetailAction) -> Self {
        self.apply(action);
        self
    }

    pub fn apply(&mut self, action: DetailAction) {
        match action {
            DetailAction::SelectTab(tab) => self.tab = tab,
            DetailAction::MetricsAdded(metrics) => {
                if let Some(card) = self.card.as_mut() {
                    card.fairness_metrics.extend(metrics);
                }
            }
            DetailAction::ComplianceAdded(record) => {
                if let Some(card) = self.card.as_mut() {
                    card.compliance_info.push(record);
                }
            }
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.load = LoadState::Loading;
        self.guard.begin()
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<ModelCard, Error>) -> Applied {
        if !self.guard.accepts(ticket) {
            return Applied::Stale;
        }

        match settle(Operation::LoadCard, result, &mut self.load, self.card.is_some()) {
            Ok(card) => {
                self.card = Some(card);
                Applied::Accepted
            }
            Err(applied) => applied,
        }
    }

    pub fn dispose(&mut self) {
        self.guard.dispose();
    }

    pub fn panel(&self) -> Panel<'_> {
        if let LoadState::Failed { message } = &self.load {
            return Panel::Failed { message };
        }

        let Some(card) = &self.card else {
            return match self.load {
                LoadState::Loading => Panel::Loading,
                _ => Panel::Empty,
            };
        };

        match self.tab {
            DetailTab::Overview => Panel::Overview { card },
            DetailTab::Fairness => Panel::Fairness {
                card,
                metrics: &card.fairness_metrics,
            },
            DetailTab::Compliance => Panel::Compliance {
                card,
                records: &card.compliance_info,
            },
        }
    }
}
