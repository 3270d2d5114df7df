//! Model Card Registry Client
//!
//! Typed wrappers around the registry REST API (`/api/v1`).
//!
//! ## Endpoints
//!
//! - `GET /model-cards?skip&limit&domain&risk_tier&status&search` - List and filter cards
//! - `GET|PUT|DELETE /model-cards/{id}` - Read, update, delete one card
//! - `POST /model-cards` - Create a card
//! - `GET|POST /model-cards/{id}/fairness-metrics` - Fairness metrics
//! - `GET|POST /model-cards/{id}/compliance-info` - Compliance records
//! - `GET /model-cards/statistics` - Aggregate counts
//! - `GET /model-cards/fairness-distribution` - Fairness score histogram
//! - `GET /jobs`, `GET /diagnostics/runs`, `POST /diagnostics/run` - Operations
//!
//! Every call is a single request. There are no retries; a transport error
//! or non-2xx response comes back as an [`Error`].

pub mod api;
pub mod batch;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod ops_client;

pub use api::ModelCardApi;
pub use batch::{delete_many, update_status_many, BatchItem, BatchReport, BatchSummary};
pub use client::ModelCardClient;
pub use config::ClientConfig;
pub use context::{CancelHandle, RequestContext};
pub use error::{Error, Result};
pub use http::HttpCore;
pub use ops_client::OpsClient;
pub use reqwest::StatusCode;
