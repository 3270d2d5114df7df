//! Client for the model card endpoints

use model_card_common::{
    ComplianceInfo, FairnessDistribution, FairnessMetric, FilterState, ModelCard,
    ModelCardCreate, ModelCardPage, ModelCardStatistics, ModelCardUpdate,
};
use reqwest::Url;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpCore;

const MODEL_CARDS: &str = "model-cards";

/// Client for interacting with the model card registry
#[derive(Debug, Clone)]
pub struct ModelCardClient {
    core: HttpCore,
}

impl ModelCardClient {
    /// Create a new client from configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            core: HttpCore::new(config)?,
        })
    }

    /// Create a client sharing an existing HTTP core
    pub fn from_core(core: HttpCore) -> Self {
        Self { core }
    }

    pub fn core(&self) -> &HttpCore {
        &self.core
    }

    /// Exact URL requested by [`list_model_cards`](Self::list_model_cards)
    pub fn list_url(&self, filter: &FilterState) -> Result<Url> {
        filter.validate()?;

        let mut url = self.core.endpoint(&[MODEL_CARDS])?;
        url.query_pairs_mut().extend_pairs(filter.query_pairs());
        Ok(url)
    }

    /// List model cards matching a filter
    pub async fn list_model_cards(&self, filter: &FilterState) -> Result<ModelCardPage> {
        let url = self.list_url(filter)?;
        let page: ModelCardPage = self.core.get(url).await?;
        debug!(
            "Fetched {} of {} model cards (skip={})",
            page.models.len(),
            page.total,
            page.skip
        );
        Ok(page)
    }

    /// Get one model card with its nested metrics and compliance records
    pub async fn get_model_card(&self, id: &str) -> Result<ModelCard> {
        let url = self.core.endpoint(&[MODEL_CARDS, id])?;
        self.core.get(url).await
    }

    pub async fn create_model_card(&self, data: &ModelCardCreate) -> Result<ModelCard> {
        let url = self.core.endpoint(&[MODEL_CARDS])?;
        let created: ModelCard = self.core.post(url, data).await?;
        info!("Created model card: {} ({})", created.id, created.name);
        Ok(created)
    }

    pub async fn update_model_card(&self, id: &str, data: &ModelCardUpdate) -> Result<ModelCard> {
        let url = self.core.endpoint(&[MODEL_CARDS, id])?;
        let updated: ModelCard = self.core.put(url, data).await?;
        info!("Updated model card: {}", id);
        Ok(updated)
    }

    pub async fn delete_model_card(&self, id: &str) -> Result<()> {
        let url = self.core.endpoint(&[MODEL_CARDS, id])?;
        self.core.delete(url).await?;
        info!("Deleted model card: {}", id);
        Ok(())
    }

    pub async fn get_fairness_metrics(&self, id: &str) -> Result<Vec<FairnessMetric>> {
        let url = self.core.endpoint(&[MODEL_CARDS, id, "fairness-metrics"])?;
        self.core.get(url).await
    }

    /// Append metrics to a card; the body is sent as a JSON array
    pub async fn add_fairness_metrics(
        &self,
        id: &str,
        metrics: &[FairnessMetric],
    ) -> Result<Vec<FairnessMetric>> {
        let url = self.core.endpoint(&[MODEL_CARDS, id, "fairness-metrics"])?;
        let added: Vec<FairnessMetric> = self.core.post(url, metrics).await?;
        info!("Added {} fairness metrics to model card: {}", added.len(), id);
        Ok(added)
    }

    pub async fn get_compliance_info(&self, id: &str) -> Result<Vec<ComplianceInfo>> {
        let url = self.core.endpoint(&[MODEL_CARDS, id, "compliance-info"])?;
        self.core.get(url).await
    }

    pub async fn add_compliance_info(
        &self,
        id: &str,
        record: &ComplianceInfo,
    ) -> Result<ComplianceInfo> {
        let url = self.core.endpoint(&[MODEL_CARDS, id, "compliance-info"])?;
        let added: ComplianceInfo = self.core.post(url, record).await?;
        info!(
            "Added {} compliance record to model card: {}",
            added.framework_name, id
        );
        Ok(added)
    }

    pub async fn get_model_card_statistics(&self) -> Result<ModelCardStatistics> {
        let url = self.core.endpoint(&[MODEL_CARDS, "statistics"])?;
        self.core.get(url).await
    }

    pub async fn get_fairness_distribution(&self) -> Result<FairnessDistribution> {
        let url = self.core.endpoint(&[MODEL_CARDS, "fairness-distribution"])?;
        self.core.get(url).await
    }
}
