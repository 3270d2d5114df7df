//! In-process mock of the registry backend
//!
//! Keeps cards in memory and records the raw query string of every listing
//! request so tests can assert on the exact URL the client sent.

use axum::{
    extract::{Path, Query, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use model_card_common::{
    CardStatus, ComplianceInfo, ComplianceStatus, DiagnosticRun, DiagnosticRunList,
    FairnessDistribution, FairnessMetric, Job, JobList, JobStatus, ModelCard, ModelCardCreate,
    ModelCardPage, ModelCardStatistics, ModelCardUpdate, RiskTier,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Card id whose GET never answers in time
pub const SLOW_ID: &str = "slow";

/// Shared mock state
#[derive(Default)]
pub struct MockState {
    pub cards: Mutex<Vec<ModelCard>>,
    pub list_queries: Mutex<Vec<String>>,
    pub runs: Mutex<Vec<DiagnosticRun>>,
    next_id: Mutex<u64>,
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockBackend {
    /// Start the mock on an ephemeral port
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = create_router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Failed to read local address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock backend error");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub async fn seed(&self, data: ModelCardCreate) -> ModelCard {
        insert_card(&self.state, data).await
    }

    pub async fn last_list_query(&self) -> Option<String> {
        self.state.list_queries.lock().await.last().cloned()
    }

    pub async fn card(&self, id: &str) -> Option<ModelCard> {
        self.state.cards.lock().await.iter().find(|c| c.id == id).cloned()
    }
}

pub fn sample_card(name: &str, domain: &str, risk_tier: RiskTier) -> ModelCardCreate {
    ModelCardCreate::new(name, "1.0.0", format!("{name} model"), domain, risk_tier)
}

fn create_router(state: Arc<MockState>) -> Router {
    Router::new()
        .route(
            "/api/v1/model-cards",
            get(list_cards_handler).post(create_card_handler),
        )
        .route("/api/v1/model-cards/statistics", get(statistics_handler))
        .route(
            "/api/v1/model-cards/fairness-distribution",
            get(distribution_handler),
        )
        .route(
            "/api/v1/model-cards/{id}",
            get(get_card_handler)
                .put(update_card_handler)
                .delete(delete_card_handler),
        )
        .route(
            "/api/v1/model-cards/{id}/fairness-metrics",
            get(get_metrics_handler).post(add_metrics_handler),
        )
        .route(
            "/api/v1/model-cards/{id}/compliance-info",
            get(get_compliance_handler).post(add_compliance_handler),
        )
        .route("/api/v1/jobs", get(jobs_handler))
        .route("/api/v1/diagnostics/runs", get(runs_handler))
        .route("/api/v1/diagnostics/run", post(run_diagnostics_handler))
        .with_state(state)
}

struct ApiError {
    status: StatusCode,
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "detail": self.detail }))).into_response()
    }
}

fn not_found() -> ApiError {
    ApiError {
        status: StatusCode::NOT_FOUND,
        detail: "Model card not found".to_string(),
    }
}

async fn insert_card(state: &MockState, data: ModelCardCreate) -> ModelCard {
    let mut next_id = state.next_id.lock().await;
    *next_id += 1;

    let card = ModelCard {
        id: format!("card-{}", *next_id),
        name: data.name,
        version: data.version,
        description: data.description,
        domain: data.domain,
        risk_tier: data.risk_tier,
        status: data.status,
        fairness_score: data.fairness_score,
        documentation_url: data.documentation_url,
        contact_email: data.contact_email,
        tags: data.tags,
        organization_id: data.organization_id.or_else(|| Some("org-1".to_string())),
        created_at: Utc::now(),
        updated_at: None,
        fairness_metrics: Vec::new(),
        compliance_info: Vec::new(),
    };

    state.cards.lock().await.push(card.clone());
    card
}

#[derive(Debug, Deserialize)]
struct ListParams {
    skip: u32,
    limit: u32,
    domain: Option<String>,
    risk_tier: Option<RiskTier>,
    status: Option<CardStatus>,
    search: Option<String>,
}

async fn list_cards_handler(
    State(state): State<Arc<MockState>>,
    RawQuery(raw): RawQuery,
    Query(params): Query<ListParams>,
) -> Json<ModelCardPage> {
    state
        .list_queries
        .lock()
        .await
        .push(raw.unwrap_or_default());

    let cards = state.cards.lock().await;
    let needle = params.search.as_deref().map(str::to_lowercase);
    let matching: Vec<&ModelCard> = cards
        .iter()
        .filter(|c| params.domain.as_deref().map_or(true, |d| c.domain == d))
        .filter(|c| params.risk_tier.map_or(true, |r| c.risk_tier == r))
        .filter(|c| params.status.map_or(true, |s| c.status == s))
        .filter(|c| {
            needle.as_deref().map_or(true, |n| {
                c.name.to_lowercase().contains(n) || c.description.to_lowercase().contains(n)
            })
        })
        .collect();

    let models = matching
        .iter()
        .skip(params.skip as usize)
        .take(params.limit as usize)
        .map(|c| ModelCard {
            fairness_metrics: Vec::new(),
            compliance_info: Vec::new(),
            ..(*c).clone()
        })
        .collect();

    Json(ModelCardPage {
        models,
        total: matching.len() as u64,
        skip: params.skip,
        limit: params.limit,
    })
}

async fn create_card_handler(
    State(state): State<Arc<MockState>>,
    Json(payload): Json<ModelCardCreate>,
) -> (StatusCode, Json<ModelCard>) {
    let card = insert_card(&state, payload).await;
    (StatusCode::CREATED, Json(card))
}

async fn get_card_handler(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> Result<Json<ModelCard>, ApiError> {
    if id == SLOW_ID {
        tokio::time::sleep(Duration::from_secs(10)).await;
    }

    let cards = state.cards.lock().await;
    cards
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(not_found)
}

async fn update_card_handler(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(update): Json<ModelCardUpdate>,
) -> Result<Json<ModelCard>, ApiError> {
    let mut cards = state.cards.lock().await;
    let card = cards.iter_mut().find(|c| c.id == id).ok_or_else(not_found)?;

    if let Some(name) = update.name {
        card.name = name;
    }
    if let Some(version) = update.version {
        card.version = version;
    }
    if let Some(description) = update.description {
        card.description = description;
    }
    if let Some(domain) = update.domain {
        card.domain = domain;
    }
    if let Some(risk_tier) = update.risk_tier {
        card.risk_tier = risk_tier;
    }
    if let Some(status) = update.status {
        card.status = status;
    }
    if let Some(fairness_score) = update.fairness_score {
        card.fairness_score = fairness_score;
    }
    if let Some(documentation_url) = update.documentation_url {
        card.documentation_url = documentation_url;
    }
    if let Some(contact_email) = update.contact_email {
        card.contact_email = contact_email;
    }
    if let Some(tags) = update.tags {
        card.tags = tags;
    }
    card.updated_at = Some(Utc::now());

    Ok(Json(card.clone()))
}

async fn delete_card_handler(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut cards = state.cards.lock().await;
    let before = cards.len();
    cards.retain(|c| c.id != id);

    if cards.len() == before {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn get_metrics_handler(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<FairnessMetric>>, ApiError> {
    let cards = state.cards.lock().await;
    let card = cards.iter().find(|c| c.id == id).ok_or_else(not_found)?;
    Ok(Json(card.fairness_metrics.clone()))
}

async fn add_metrics_handler(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(metrics): Json<Vec<FairnessMetric>>,
) -> Result<(StatusCode, Json<Vec<FairnessMetric>>), ApiError> {
    let mut cards = state.cards.lock().await;
    let card = cards.iter_mut().find(|c| c.id == id).ok_or_else(not_found)?;

    let mut added = Vec::with_capacity(metrics.len());
    for mut metric in metrics {
        metric.id = Some(format!("{}-metric-{}", id, card.fairness_metrics.len() + 1));
        metric.model_card_id = Some(id.clone());
        metric.created_at = Some(Utc::now());
        card.fairness_metrics.push(metric.clone());
        added.push(metric);
    }

    Ok((StatusCode::CREATED, Json(added)))
}

async fn get_compliance_handler(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ComplianceInfo>>, ApiError> {
    let cards = state.cards.lock().await;
    let card = cards.iter().find(|c| c.id == id).ok_or_else(not_found)?;
    Ok(Json(card.compliance_info.clone()))
}

async fn add_compliance_handler(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(mut record): Json<ComplianceInfo>,
) -> Result<(StatusCode, Json<ComplianceInfo>), ApiError> {
    let mut cards = state.cards.lock().await;
    let card = cards.iter_mut().find(|c| c.id == id).ok_or_else(not_found)?;

    record.id = Some(format!("{}-compliance-{}", id, card.compliance_info.len() + 1));
    record.model_card_id = Some(id.clone());
    card.compliance_info.push(record.clone());

    Ok((StatusCode::CREATED, Json(record)))
}

async fn statistics_handler(State(state): State<Arc<MockState>>) -> Json<ModelCardStatistics> {
    let cards = state.cards.lock().await;

    let mut stats = ModelCardStatistics {
        total_models: cards.len() as u64,
        ..ModelCardStatistics::default()
    };
    for card in cards.iter() {
        *stats.by_domain.entry(card.domain.clone()).or_default() += 1;
        *stats
            .by_risk_tier
            .entry(card.risk_tier.to_string())
            .or_default() += 1;
        *stats.by_status.entry(card.status.to_string()).or_default() += 1;
    }

    let scores: Vec<f64> = cards.iter().filter_map(|c| c.fairness_score).collect();
    if !scores.is_empty() {
        stats.average_fairness_score = Some(scores.iter().sum::<f64>() / scores.len() as f64);
    }

    Json(stats)
}

async fn distribution_handler(State(state): State<Arc<MockState>>) -> Json<FairnessDistribution> {
    let cards = state.cards.lock().await;
    Json(FairnessDistribution::from_scores(
        cards.iter().filter_map(|c| c.fairness_score),
    ))
}

async fn jobs_handler() -> Json<JobList> {
    let jobs = vec![
        Job {
            id: "job-1".to_string(),
            name: "fairness-recompute".to_string(),
            status: JobStatus::Running,
            created_at: Utc::now(),
            started_at: Some(Utc::now()),
            completed_at: None,
            progress: Some(40),
            error: None,
        },
        Job {
            id: "job-2".to_string(),
            name: "compliance-export".to_string(),
            status: JobStatus::Completed,
            created_at: Utc::now(),
            started_at: Some(Utc::now()),
            completed_at: Some(Utc::now()),
            progress: Some(100),
            error: None,
        },
    ];
    let total = jobs.len() as u64;
    Json(JobList { jobs, total })
}

async fn runs_handler(State(state): State<Arc<MockState>>) -> Json<DiagnosticRunList> {
    Json(DiagnosticRunList {
        runs: state.runs.lock().await.clone(),
    })
}

async fn run_diagnostics_handler(State(state): State<Arc<MockState>>) -> Json<DiagnosticRun> {
    let mut runs = state.runs.lock().await;
    let run = DiagnosticRun {
        id: format!("run-{}", runs.len() + 1),
        status: JobStatus::Queued,
        started_at: Utc::now(),
        completed_at: None,
        summary: None,
        results: serde_json::Value::Null,
    };
    runs.push(run.clone());
    Json(run)
}

pub fn sample_metric() -> FairnessMetric {
    FairnessMetric::new("demographic_parity", 0.92, 0.8).with_group("age_over_65")
}

pub fn sample_compliance() -> ComplianceInfo {
    ComplianceInfo::new(
        "EU AI Act",
        "2024",
        ComplianceStatus::PartiallyCompliant,
        NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
    )
}
