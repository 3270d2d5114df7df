//! Model card records and their child resources

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::wire;

/// Coarse ordinal classification of a model's potential harm
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    pub const ALL: [RiskTier; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Review state of a model card
///
/// Transitions between any two states are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    #[default]
    Draft,
    PendingReview,
    Approved,
    Deprecated,
}

impl CardStatus {
    pub const ALL: [CardStatus; 4] = [
        Self::Draft,
        Self::PendingReview,
        Self::Approved,
        Self::Deprecated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingReview => "pending_review",
            Self::Approved => "approved",
            Self::Deprecated => "deprecated",
        }
    }
}

/// Assessed status against a regulatory framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    PartiallyCompliant,
    NonCompliant,
    #[default]
    NotAssessed,
}

impl ComplianceStatus {
    pub const ALL: [ComplianceStatus; 4] = [
        Self::Compliant,
        Self::PartiallyCompliant,
        Self::NonCompliant,
        Self::NotAssessed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::PartiallyCompliant => "partially_compliant",
            Self::NonCompliant => "non_compliant",
            Self::NotAssessed => "not_assessed",
        }
    }
}

macro_rules! impl_str_enum {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| Error::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

impl_str_enum!(RiskTier, "risk tier");
impl_str_enum!(CardStatus, "status");
impl_str_enum!(ComplianceStatus, "compliance status");

/// A model card as returned by the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCard {
    /// Server-assigned identifier; numeric ids are kept as text
    #[serde(deserialize_with = "wire::id")]
    pub id: String,

    pub name: String,

    pub version: String,

    pub description: String,

    /// Application domain, e.g. "finance" or "healthcare"
    pub domain: String,

    pub risk_tier: RiskTier,

    pub status: CardStatus,

    /// Aggregate fairness score in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fairness_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(
        default,
        deserialize_with = "wire::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub organization_id: Option<String>,

    #[serde(deserialize_with = "wire::timestamp")]
    pub created_at: DateTime<Utc>,

    #[serde(
        default,
        deserialize_with = "wire::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,

    /// Present on single-card reads
    #[serde(default)]
    pub fairness_metrics: Vec<FairnessMetric>,

    /// Present on single-card reads
    #[serde(default)]
    pub compliance_info: Vec<ComplianceInfo>,
}

/// Payload for creating a model card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCardCreate {
    pub name: String,
    pub version: String,
    pub description: String,
    pub domain: String,
    pub risk_tier: RiskTier,

    #[serde(default)]
    pub status: CardStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fairness_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

impl ModelCardCreate {
    /// Create a draft payload with the required fields set
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
        domain: impl Into<String>,
        risk_tier: RiskTier,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
            domain: domain.into(),
            risk_tier,
            status: CardStatus::Draft,
            fairness_score: None,
            documentation_url: None,
            contact_email: None,
            tags: Vec::new(),
            organization_id: None,
        }
    }

    /// Check required-field presence and the fairness score range
    pub fn validate(&self) -> crate::Result<()> {
        require("name", &self.name)?;
        require("version", &self.version)?;
        require("description", &self.description)?;
        require("domain", &self.domain)?;
        validate_score(self.fairness_score)
    }
}

/// Partial update payload; unset fields are left untouched by the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelCardUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_tier: Option<RiskTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CardStatus>,
    /// `Some(None)` is sent as `null` and clears the value
    #[serde(
        default,
        deserialize_with = "wire::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub fairness_score: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "wire::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub documentation_url: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "wire::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub contact_email: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ModelCardUpdate {
    /// Update that only changes the status
    pub fn status(status: CardStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> crate::Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("version", &self.version),
            ("description", &self.description),
            ("domain", &self.domain),
        ] {
            if let Some(value) = value {
                require(field, value)?;
            }
        }
        validate_score(self.fairness_score.flatten())
    }
}

/// A quantitative fairness measure attached to a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairnessMetric {
    #[serde(
        default,
        deserialize_with = "wire::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(
        default,
        deserialize_with = "wire::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub model_card_id: Option<String>,

    /// e.g. "demographic_parity"
    pub metric_name: String,

    pub metric_value: f64,

    pub threshold_value: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demographic_group: Option<String>,

    #[serde(
        default,
        deserialize_with = "wire::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl FairnessMetric {
    /// New metric without server-assigned fields
    pub fn new(metric_name: impl Into<String>, metric_value: f64, threshold_value: f64) -> Self {
        Self {
            id: None,
            model_card_id: None,
            metric_name: metric_name.into(),
            metric_value,
            threshold_value,
            demographic_group: None,
            created_at: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.demographic_group = Some(group.into());
        self
    }

    pub fn validate(&self) -> crate::Result<()> {
        require("metric_name", &self.metric_name)
    }
}

/// Assessment of a card against an external framework
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceInfo {
    #[serde(
        default,
        deserialize_with = "wire::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(
        default,
        deserialize_with = "wire::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub model_card_id: Option<String>,

    /// e.g. "EU AI Act"
    pub framework_name: String,

    pub framework_version: String,

    pub compliance_status: ComplianceStatus,

    pub assessment_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_url: Option<String>,
}

impl ComplianceInfo {
    pub fn new(
        framework_name: impl Into<String>,
        framework_version: impl Into<String>,
        compliance_status: ComplianceStatus,
        assessment_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            model_card_id: None,
            framework_name: framework_name.into(),
            framework_version: framework_version.into(),
            compliance_status,
            assessment_date,
            notes: None,
            evidence_url: None,
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        require("framework_name", &self.framework_name)?;
        require("framework_version", &self.framework_version)
    }
}

/// One page of the card listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCardPage {
    pub models: Vec<ModelCard>,
    pub total: u64,
    pub skip: u32,
    pub limit: u32,
}

impl ModelCardPage {
    pub fn has_next(&self) -> bool {
        u64::from(self.skip) + u64::from(self.limit) < self.total
    }

    pub fn has_prev(&self) -> bool {
        self.skip > 0
    }
}

/// Aggregate counts across the registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelCardStatistics {
    #[serde(default)]
    pub total_models: u64,

    #[serde(default)]
    pub by_domain: BTreeMap<String, u64>,

    #[serde(default)]
    pub by_risk_tier: BTreeMap<String, u64>,

    #[serde(default)]
    pub by_status: BTreeMap<String, u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_fairness_score: Option<f64>,
}

/// Histogram of fairness scores keyed by bucket label ("0.8-1.0")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FairnessDistribution(pub BTreeMap<String, u64>);

impl FairnessDistribution {
    pub const BUCKETS: [&'static str; 5] = ["0.0-0.2", "0.2-0.4", "0.4-0.6", "0.6-0.8", "0.8-1.0"];

    /// Bucket label for a score; 1.0 lands in the top bucket
    pub fn bucket_for(score: f64) -> Option<&'static str> {
        if !(0.0..=1.0).contains(&score) {
            return None;
        }
        let index = ((score * 5.0).floor() as usize).min(Self::BUCKETS.len() - 1);
        Some(Self::BUCKETS[index])
    }

    /// Build a distribution with every bucket present
    pub fn from_scores(scores: impl IntoIterator<Item = f64>) -> Self {
        let mut buckets: BTreeMap<String, u64> =
            Self::BUCKETS.iter().map(|b| (b.to_string(), 0)).collect();
        for score in scores {
            if let Some(label) = Self::bucket_for(score) {
                *buckets.entry(label.to_string()).or_default() += 1;
            }
        }
        Self(buckets)
    }

    pub fn count(&self, bucket: &str) -> u64 {
        self.0.get(bucket).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }
}

fn require(field: &'static str, value: &str) -> crate::Result<()> {
    if value.trim().is_empty() {
        return Err(Error::MissingField(field));
    }
    Ok(())
}

fn validate_score(score: Option<f64>) -> crate::Result<()> {
    match score {
        Some(value) if !(0.0..=1.0).contains(&value) => Err(Error::OutOfRange {
            field: "fairness_score",
            value,
            expected: "0.0 to 1.0",
        }),
        _ => Ok(()),
    }
}
