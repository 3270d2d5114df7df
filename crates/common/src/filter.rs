//! Filter and pagination state for the model card listing

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::{CardStatus, RiskTier};

/// Page size used when nothing else is configured
pub const DEFAULT_LIMIT: u32 = 12;

/// Query value object for `GET /model-cards`
///
/// `skip` and `limit` are always sent. The optional filters are sent only
/// when set and non-empty, in the order `skip, limit, domain, risk_tier,
/// status, search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub skip: u32,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_tier: Option<RiskTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CardStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(0, DEFAULT_LIMIT)
    }
}

impl FilterState {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self {
            skip,
            limit,
            domain: None,
            risk_tier: None,
            status: None,
            search: None,
        }
    }

    /// First page with the given page size
    pub fn with_limit(limit: u32) -> Self {
        Self::new(0, limit)
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.set_domain(Some(domain.into()));
        self
    }

    pub fn with_risk_tier(mut self, risk_tier: RiskTier) -> Self {
        self.set_risk_tier(Some(risk_tier));
        self
    }

    pub fn with_status(mut self, status: CardStatus) -> Self {
        self.set_status(Some(status));
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.set_search(Some(search.into()));
        self
    }

    pub fn with_skip(mut self, skip: u32) -> Self {
        self.skip = skip;
        self
    }

    // Filter setters restart pagination.

    pub fn set_domain(&mut self, domain: Option<String>) {
        self.domain = domain;
        self.skip = 0;
    }

    pub fn set_risk_tier(&mut self, risk_tier: Option<RiskTier>) {
        self.risk_tier = risk_tier;
        self.skip = 0;
    }

    pub fn set_status(&mut self, status: Option<CardStatus>) {
        self.status = status;
        self.skip = 0;
    }

    pub fn set_search(&mut self, search: Option<String>) {
        self.search = search;
        self.skip = 0;
    }

    /// Drop every optional filter and return to the first page
    pub fn clear_filters(&mut self) {
        *self = Self::new(0, self.limit);
    }

    pub fn has_filters(&self) -> bool {
        non_empty(&self.domain).is_some()
            || self.risk_tier.is_some()
            || self.status.is_some()
            || non_empty(&self.search).is_some()
    }

    pub fn next_page(&mut self) {
        self.skip = self.skip.saturating_add(self.limit);
    }

    pub fn prev_page(&mut self) {
        self.skip = self.skip.saturating_sub(self.limit);
    }

    /// Jump to a 1-based page number; page 0 is treated as page 1
    pub fn go_to_page(&mut self, page: u32) {
        self.skip = page.saturating_sub(1).saturating_mul(self.limit);
    }

    /// 1-based page number of the current offset
    pub fn page_number(&self) -> u32 {
        if self.limit == 0 {
            return 1;
        }
        self.skip / self.limit + 1
    }

    /// Number of pages needed for `total` items (at least one)
    pub fn page_count(&self, total: u64) -> u64 {
        if self.limit == 0 || total == 0 {
            return 1;
        }
        total.div_ceil(u64::from(self.limit))
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.limit == 0 {
            return Err(Error::InvalidFilter("limit must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// Ordered query parameters for the listing request
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("skip", self.skip.to_string()),
            ("limit", self.limit.to_string()),
        ];

        if let Some(domain) = non_empty(&self.domain) {
            pairs.push(("domain", domain.to_string()));
        }
        if let Some(risk_tier) = self.risk_tier {
            pairs.push(("risk_tier", risk_tier.as_str().to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(search) = non_empty(&self.search) {
            pairs.push(("search", search.to_string()));
        }

        pairs
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
