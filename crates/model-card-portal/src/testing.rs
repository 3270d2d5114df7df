//! In-memory `ModelCardApi` for view and wizard tests

use async_trait::async_trait;
use chrono::Utc;
use model_card_client::{Error, ModelCardApi, Result, StatusCode};
use model_card_common::{
    ComplianceInfo, FairnessDistribution, FairnessMetric, FilterState, ModelCard,
    ModelCardCreate, ModelCardPage, ModelCardStatistics, ModelCardUpdate,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Which call should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Create,
    AddMetrics,
    AddCompliance,
}

#[derive(Default)]
pub struct FakeApi {
    cards: Mutex<Vec<ModelCard>>,
    fail_on: Option<FailOn>,
    calls: AtomicUsize,
}

impl FakeApi {
    pub fn failing(fail_on: FailOn) -> Self {
        Self {
            fail_on: Some(fail_on),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn cards(&self) -> Vec<ModelCard> {
        self.cards.lock().unwrap().clone()
    }

    fn enter(&self, point: Option<FailOn>) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if point.is_some() && point == self.fail_on {
            return Err(Error::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn with_card<T>(&self, id: &str, f: impl FnOnce(&mut ModelCard) -> T) -> Result<T> {
        let mut cards = self.cards.lock().unwrap();
        let card = cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::Status {
                status: StatusCode::NOT_FOUND,
                message: "Model card not found".to_string(),
            })?;
        Ok(f(card))
    }
}

#[async_trait]
impl ModelCardApi for FakeApi {
    async fn list_model_cards(&self, filter: &FilterState) -> Result<ModelCardPage> {
        self.enter(None)?;
        let cards = self.cards.lock().unwrap();
        Ok(ModelCardPage {
            models: cards
                .iter()
                .skip(filter.skip as usize)
                .take(filter.limit as usize)
                .cloned()
                .collect(),
            total: cards.len() as u64,
            skip: filter.skip,
            limit: filter.limit,
        })
    }

    async fn get_model_card(&self, id: &str) -> Result<ModelCard> {
        self.enter(None)?;
        self.with_card(id, |c| c.clone())
    }

    async fn create_model_card(&self, data: &ModelCardCreate) -> Result<ModelCard> {
        self.enter(Some(FailOn::Create))?;
        let mut cards = self.cards.lock().unwrap();
        let card = ModelCard {
            id: format!("fake-{}", cards.len() + 1),
            name: data.name.clone(),
            version: data.version.clone(),
            description: data.description.clone(),
            domain: data.domain.clone(),
            risk_tier: data.risk_tier,
            status: data.status,
            fairness_score: data.fairness_score,
            documentation_url: data.documentation_url.clone(),
            contact_email: data.contact_email.clone(),
            tags: data.tags.clone(),
            organization_id: data.organization_id.clone(),
            created_at: Utc::now(),
            updated_at: None,
            fairness_metrics: Vec::new(),
            compliance_info: Vec::new(),
        };
        cards.push(card.clone());
        Ok(card)
    }

    async fn update_model_card(&self, id: &str, data: &ModelCardUpdate) -> Result<ModelCard> {
        self.enter(None)?;
        self.with_card(id, |card| {
            if let Some(v) = &data.name {
                card.name = v.clone();
            }
            if let Some(v) = &data.version {
                card.version = v.clone();
            }
            if let Some(v) = &data.description {
                card.description = v.clone();
            }
            if let Some(v) = &data.domain {
                card.domain = v.clone();
            }
            if let Some(v) = data.risk_tier {
                card.risk_tier = v;
            }
            if let Some(v) = data.status {
                card.status = v;
            }
            if let Some(v) = data.fairness_score {
                card.fairness_score = v;
            }
            if let Some(v) = &data.documentation_url {
                card.documentation_url = v.clone();
            }
            if let Some(v) = &data.contact_email {
                card.contact_email = v.clone();
            }
            if let Some(v) = &data.tags {
                card.tags = v.clone();
            }
            card.updated_at = Some(Utc::now());
            card.clone()
        })
    }

    async fn delete_model_card(&self, id: &str) -> Result<()> {
        self.enter(None)?;
        self.with_card(id, |_| ())?;
        self.cards.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }

    async fn get_fairness_metrics(&self, id: &str) -> Result<Vec<FairnessMetric>> {
        self.enter(None)?;
        self.with_card(id, |c| c.fairness_metrics.clone())
    }

    async fn add_fairness_metrics(
        &self,
        id: &str,
        metrics: &[FairnessMetric],
    ) -> Result<Vec<FairnessMetric>> {
        self.enter(Some(FailOn::AddMetrics))?;
        self.with_card(id, |card| {
            let added: Vec<FairnessMetric> = metrics
                .iter()
                .cloned()
                .map(|mut m| {
                    m.model_card_id = Some(id.to_string());
                    m
                })
                .collect();
            card.fairness_metrics.extend(added.iter().cloned());
            added
        })
    }

    async fn get_compliance_info(&self, id: &str) -> Result<Vec<ComplianceInfo>> {
        self.enter(None)?;
        self.with_card(id, |c| c.compliance_info.clone())
    }

    async fn add_compliance_info(
        &self,
        id: &str,
        record: &ComplianceInfo,
    ) -> Result<ComplianceInfo> {
        self.enter(Some(FailOn::AddCompliance))?;
        self.with_card(id, |card| {
            let mut record = record.clone();
            record.model_card_id = Some(id.to_string());
            card.compliance_info.push(record.clone());
            record
        })
    }

    async fn get_model_card_statistics(&self) -> Result<ModelCardStatistics> {
        self.enter(None)?;
        Ok(ModelCardStatistics {
            total_models: self.cards.lock().unwrap().len() as u64,
            ..ModelCardStatistics::default()
        })
    }

    async fn get_fairness_distribution(&self) -> Result<FairnessDistribution> {
        self.enter(None)?;
        let cards = self.cards.lock().unwrap();
        Ok(FairnessDistribution::from_scores(
            cards.iter().filter_map(|c| c.fairness_score),
        ))
    }
}
