//! Trait seam over the model card operations

use async_trait::async_trait;
use model_card_common::{
    ComplianceInfo, FairnessDistribution, FairnessMetric, FilterState, ModelCard,
    ModelCardCreate, ModelCardPage, ModelCardStatistics, ModelCardUpdate,
};

use crate::client::ModelCardClient;
use crate::error::Result;

/// Model card operations, implemented by [`ModelCardClient`] and by test fakes
#[async_trait]
pub trait ModelCardApi: Send + Sync {
    async fn list_model_cards(&self, filter: &FilterState) -> Result<ModelCardPage>;

    async fn get_model_card(&self, id: &str) -> Result<ModelCard>;

    async fn create_model_card(&self, data: &ModelCardCreate) -> Result<ModelCard>;

    async fn update_model_card(&self, id: &str, data: &ModelCardUpdate) -> Result<ModelCard>;

    async fn delete_model_card(&self, id: &str) -> Result<()>;

    async fn get_fairness_metrics(&self, id: &str) -> Result<Vec<FairnessMetric>>;

    async fn add_fairness_metrics(
        &self,
        id: &str,
        metrics: &[FairnessMetric],
    ) -> Result<Vec<FairnessMetric>>;

    async fn get_compliance_info(&self, id: &str) -> Result<Vec<ComplianceInfo>>;

    async fn add_compliance_info(&self, id: &str, record: &ComplianceInfo)
        -> Result<ComplianceInfo>;

    async fn get_model_card_statistics(&self) -> Result<ModelCardStatistics>;

    async fn get_fairness_distribution(&self) -> Result<FairnessDistribution>;
}

#[async_trait]
impl ModelCardApi for ModelCardClient {
    async fn list_model_cards(&self, filter: &FilterState) -> Result<ModelCardPage> {
        ModelCardClient::list_model_cards(self, filter).await
    }

    async fn get_model_card(&self, id: &str) -> Result<ModelCard> {
        ModelCardClient::get_model_card(self, id).await
    }

    async fn create_model_card(&self, data: &ModelCardCreate) -> Result<ModelCard> {
        ModelCardClient::create_model_card(self, data).await
    }

    async fn update_model_card(&self, id: &str, data: &ModelCardUpdate) -> Result<ModelCard> {
        ModelCardClient::update_model_card(self, id, data).await
    }

    async fn delete_model_card(&self, id: &str) -> Result<()> {
        ModelCardClient::delete_model_card(self, id).await
    }

    async fn get_fairness_metrics(&self, id: &str) -> Result<Vec<FairnessMetric>> {
        ModelCardClient::get_fairness_metrics(self, id).await
    }

    async fn add_fairness_metrics(
        &self,
        id: &str,
        metrics: &[FairnessMetric],
    ) -> Result<Vec<FairnessMetric>> {
        ModelCardClient::add_fairness_metrics(self, id, metrics).await
    }

    async fn get_compliance_info(&self, id: &str) -> Result<Vec<ComplianceInfo>> {
        ModelCardClient::get_compliance_info(self, id).await
    }

    async fn add_compliance_info(
        &self,
        id: &str,
        record: &ComplianceInfo,
    ) -> Result<ComplianceInfo> {
        ModelCardClient::add_compliance_info(self, id, record).await
    }

    async fn get_model_card_statistics(&self) -> Result<ModelCardStatistics> {
        ModelCardClient::get_model_card_statistics(self).await
    }

    async fn get_fairness_distribution(&self) -> Result<FairnessDistribution> {
        ModelCardClient::get_fairness_distribution(self).await
    }
}
