//! Create/edit form state for a model card

use model_card_client::{ModelCardApi, RequestContext};
use model_card_common::{
    CardStatus, Error, ModelCard, ModelCardCreate, ModelCardUpdate, RiskTier,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FormMode {
    #[default]
    Create,
    Edit {
        id: String,
    },
}

/// A single field edit
#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Name(String),
    Version(String),
    Description(String),
    Domain(String),
    RiskTier(RiskTier),
    Status(CardStatus),
    FairnessScore(String),
    DocumentationUrl(String),
    ContactEmail(String),
    Tags(String),
}

/// Raw form inputs, kept as typed text until submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardForm {
    pub mode: FormMode,
    pub name: String,
    pub version: String,
    pub description: String,
    pub domain: String,
    pub risk_tier: RiskTier,
    pub status: CardStatus,
    pub fairness_score: String,
    pub documentation_url: String,
    pub contact_email: String,
    /// Comma-separated
    pub tags: String,
}

impl Default for CardForm {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            name: String::new(),
            version: String::new(),
            description: String::new(),
            domain: String::new(),
            risk_tier: RiskTier::Low,
            status: CardStatus::Draft,
            fairness_score: String::new(),
            documentation_url: String::new(),
            contact_email: String::new(),
            tags: String::new(),
        }
    }
}

impl CardForm {
    pub fn create() -> Self {
        Self::default()
    }

    /// Prefill from an existing card
    pub fn edit(card: &ModelCard) -> Self {
        Self {
            mode: FormMode::Edit {
                id: card.id.clone(),
            },
            name: card.name.clone(),
            version: card.version.clone(),
            description: card.description.clone(),
            domain: card.domain.clone(),
            risk_tier: card.risk_tier,
            status: card.status,
            fairness_score: card
                .fairness_score
                .map(|s| s.to_string())
                .unwrap_or_default(),
            documentation_url: card.documentation_url.clone().unwrap_or_default(),
            contact_email: card.contact_email.clone().unwrap_or_default(),
            tags: card.tags.join(", "),
        }
    }

    /// Load a full create payload, e.g. one read from a file
    pub fn from_create(payload: &ModelCardCreate) -> Self {
        Self {
            mode: FormMode::Create,
            name: payload.name.clone(),
            version: payload.version.clone(),
            description: payload.description.clone(),
            domain: payload.domain.clone(),
            risk_tier: payload.risk_tier,
            status: payload.status,
            fairness_score: payload
                .fairness_score
                .map(|s| s.to_string())
                .unwrap_or_default(),
            documentation_url: payload.documentation_url.clone().unwrap_or_default(),
            contact_email: payload.contact_email.clone().unwrap_or_default(),
            tags: payload.tags.join(", "),
        }
    }

    pub fn reduce(mut self, field: FormField) -> Self {
        self.set(field);
        self
    }

    pub fn set(&mut self, field: FormField) {
        match field {
            FormField::Name(v) => self.name = v,
            FormField::Version(v) => self.version = v,
            FormField::Description(v) => self.description = v,
            FormField::Domain(v) => self.domain = v,
            FormField::RiskTier(v) => self.risk_tier = v,
            FormField::Status(v) => self.status = v,
            FormField::FairnessScore(v) => self.fairness_score = v,
            FormField::DocumentationUrl(v) => self.documentation_url = v,
            FormField::ContactEmail(v) => self.contact_email = v,
            FormField::Tags(v) => self.tags = v,
        }
    }

    /// Tags in input order, trimmed, blanks dropped
    pub fn parsed_tags(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn parsed_score(&self) -> model_card_common::Result<Option<f64>> {
        let raw = self.fairness_score.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<f64>()
            .map(Some)
            .map_err(|_| Error::InvalidValue {
                field: "fairness_score",
                value: raw.to_string(),
            })
    }

    pub fn validate(&self) -> model_card_common::Result<()> {
        self.to_create().map(|_| ())
    }

    pub fn to_create(&self) -> model_card_common::Result<ModelCardCreate> {
        let payload = ModelCardCreate {
            name: self.name.trim().to_string(),
            version: self.version.trim().to_string(),
            description: self.description.trim().to_string(),
            domain: self.domain.trim().to_string(),
            risk_tier: self.risk_tier,
            status: self.status,
            fairness_score: self.parsed_score()?,
            documentation_url: optional(&self.documentation_url),
            contact_email: optional(&self.contact_email),
            tags: self.parsed_tags(),
            organization_id: None,
        };
        payload.validate()?;
        Ok(payload)
    }

    /// Every form field, as submitted by the edit form; blanked optional
    /// fields are sent as explicit clears
    pub fn to_update(&self) -> model_card_common::Result<ModelCardUpdate> {
        let full = self.to_create()?;
        Ok(ModelCardUpdate {
            name: Some(full.name),
            version: Some(full.version),
            description: Some(full.description),
            domain: Some(full.domain),
            risk_tier: Some(full.risk_tier),
            status: Some(full.status),
            fairness_score: Some(full.fairness_score),
            documentation_url: Some(full.documentation_url),
            contact_email: Some(full.contact_email),
            tags: Some(full.tags),
        })
    }

    /// Validate, then create or update depending on the mode
    pub async fn submit<A>(&self, api: &A, ctx: &RequestContext) -> model_card_client::Result<ModelCard>
    where
        A: ModelCardApi + ?Sized,
    {
        match &self.mode {
            FormMode::Create => {
                let payload = self.to_create()?;
                ctx.run(api.create_model_card(&payload)).await
            }
            FormMode::Edit { id } => {
                let payload = self.to_update()?;
                ctx.run(api.update_model_card(id, &payload)).await
            }
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
