//! Model Card Portal CLI
//!
//! Commands:
//! - list: Browse cards with filters and pagination
//! - show: Display one card (overview, fairness or compliance tab)
//! - create: Create a card, with optional metrics and compliance, from JSON
//! - update: Change a card's status or apply a JSON update
//! - delete / set-status: Bulk operations on several ids
//! - stats / distribution: Registry aggregates
//! - jobs / diagnostics: Background operations

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use model_card_client::{
    delete_many, update_status_many, BatchReport, CancelHandle, ClientConfig, ModelCardClient,
    OpsClient, RequestContext,
};
use model_card_common::{
    CardStatus, ComplianceInfo, FairnessMetric, ModelCardCreate, ModelCardUpdate, RiskTier,
};
use model_card_portal::{
    render_panel, Applied, CardForm, CreateWizard, DetailAction, DetailTab, DetailView, ListAction,
    ListView, LoadState, Operation, Panel, SubmitStage, WizardStep,
};
use serde::Deserialize;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "model-cards")]
#[command(about = "Browse and govern the model card registry")]
struct Cli {
    /// Registry base URL (overrides MODEL_CARD_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List model cards
    List {
        /// Free-text search over name and description
        #[arg(short, long)]
        search: Option<String>,

        #[arg(short, long)]
        domain: Option<String>,

        #[arg(short, long)]
        risk_tier: Option<RiskTier>,

        #[arg(long)]
        status: Option<CardStatus>,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Show one model card
    Show {
        id: String,

        /// overview, fairness or compliance
        #[arg(short, long, default_value = "overview")]
        tab: DetailTab,
    },

    /// Create a model card from a JSON file
    Create {
        /// Card fields plus optional `fairness_metrics` and `compliance_info` arrays
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Update a model card
    Update {
        id: String,

        #[arg(long)]
        status: Option<CardStatus>,

        /// JSON file with the fields to change
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Delete one or more model cards
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Set the status of one or more model cards
    SetStatus {
        status: CardStatus,

        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Show registry statistics
    Stats,

    /// Show the fairness score histogram
    Distribution,

    /// List background jobs
    Jobs,

    /// List diagnostic runs
    Diagnostics {
        /// Start a new run first
        #[arg(long)]
        run: bool,
    },
}

/// Body accepted by `create --file`
#[derive(Deserialize)]
struct CreateFile {
    #[serde(flatten)]
    card: ModelCardCreate,

    #[serde(default)]
    fairness_metrics: Vec<FairnessMetric>,

    #[serde(default)]
    compliance_info: Vec<ComplianceInfo>,
}

struct Session {
    client: ModelCardClient,
    ops: OpsClient,
    config: ClientConfig,
    ctx: RequestContext,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "model_cards=info,model_card_portal=info,model_card_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = ClientConfig::from_env().context("Failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
        config.validate().context("Invalid --api-url")?;
    }

    let client = ModelCardClient::new(&config).context("Failed to build registry client")?;
    let ops = OpsClient::from_core(client.core().clone());

    let cancel = CancelHandle::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received interrupt, cancelling request");
            on_interrupt.cancel();
        }
    });

    let session = Session {
        client,
        ops,
        config,
        ctx: cancel.context(),
    };

    match cli.command {
        Commands::List {
            search,
            domain,
            risk_tier,
            status,
            page,
        } => list(&session, search, domain, risk_tier, status, page).await,
        Commands::Show { id, tab } => show(&session, id, tab).await,
        Commands::Create { file } => create(&session, &file).await,
        Commands::Update { id, status, file } => update(&session, &id, status, file.as_deref()).await,
        Commands::Delete { ids } => {
            let report = session
                .ctx
                .run(async { Ok(delete_many(&session.client, &ids).await) })
                .await;
            finish_batch(&session, Operation::DeleteCards, "Delete", &ids, report)
        }
        Commands::SetStatus { status, ids } => {
            let report = session
                .ctx
                .run(async { Ok(update_status_many(&session.client, &ids, status).await) })
                .await;
            let action = format!("Set status to {status}");
            finish_batch(&session, Operation::UpdateStatus, &action, &ids, report)
        }
        Commands::Stats => {
            let stats = fetch(
                &session.ctx,
                Operation::LoadStatistics,
                session.client.get_model_card_statistics(),
            )
            .await?;
            print_panel(&Panel::Statistics { stats: &stats });
            Ok(())
        }
        Commands::Distribution => {
            let distribution = fetch(
                &session.ctx,
                Operation::LoadDistribution,
                session.client.get_fairness_distribution(),
            )
            .await?;
            print_panel(&Panel::Distribution {
                distribution: &distribution,
            });
            Ok(())
        }
        Commands::Jobs => {
            let jobs = fetch(&session.ctx, Operation::LoadJobs, session.ops.list_jobs()).await?;
            print_panel(&Panel::Jobs { jobs: &jobs });
            Ok(())
        }
        Commands::Diagnostics { run } => {
            if run {
                let started = fetch(
                    &session.ctx,
                    Operation::RunDiagnostics,
                    session.ops.run_diagnostics(),
                )
                .await?;
                println!("Started diagnostics run {} ({})", started.id, started.status.as_str());
            }
            let runs = fetch(
                &session.ctx,
                Operation::LoadDiagnostics,
                session.ops.list_diagnostic_runs(),
            )
            .await?;
            print_panel(&Panel::Diagnostics { runs: &runs });
            Ok(())
        }
    }
}

async fn list(
    session: &Session,
    search: Option<String>,
    domain: Option<String>,
    risk_tier: Option<RiskTier>,
    status: Option<CardStatus>,
    page: u32,
) -> Result<()> {
    let mut view = ListView::new(session.config.page_size);
    view.apply(ListAction::SetSearch(search.unwrap_or_default()));
    view.apply(ListAction::SetDomain(domain));
    view.apply(ListAction::SetRiskTier(risk_tier));
    view.apply(ListAction::SetStatus(status));
    view.apply(ListAction::GoToPage(page));

    let ticket = view.begin_load();
    let result = session
        .ctx
        .run(session.client.list_model_cards(&view.filter))
        .await;
    settled(view.finish_load(ticket, result), &view.load)?;

    print_panel(&view.panel());
    Ok(())
}

async fn show(session: &Session, id: String, tab: DetailTab) -> Result<()> {
    let mut view = DetailView::new(id).reduce(DetailAction::SelectTab(tab));

    let ticket = view.begin_load();
    let result = session
        .ctx
        .run(session.client.get_model_card(&view.card_id))
        .await;
    settled(view.finish_load(ticket, result), &view.load)?;

    print_panel(&view.panel());
    Ok(())
}

async fn create(session: &Session, file: &Path) -> Result<()> {
    let body: CreateFile = read_json(file)?;
    let wizard = CreateWizard {
        step: WizardStep::Review,
        form: CardForm::from_create(&body.card),
        metrics: body.fairness_metrics,
        compliance: body.compliance_info,
    };

    match wizard.submit(&session.client, &session.ctx).await {
        Ok(outcome) => {
            print_panel(&Panel::Overview {
                card: &outcome.card,
            });
            println!(
                "Added {} fairness metrics and {} compliance records",
                outcome.metrics.len(),
                outcome.compliance.len()
            );
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            let op = match e.stage {
                SubmitStage::CreateCard => Operation::CreateCard,
                SubmitStage::FairnessMetrics => Operation::AddMetrics,
                SubmitStage::ComplianceInfo => Operation::AddCompliance,
            };
            if let Some(id) = e.created_id {
                println!("Model card {id} was created before the failure");
            }
            bail!(op.failure_message())
        }
    }
}

async fn update(
    session: &Session,
    id: &str,
    status: Option<CardStatus>,
    file: Option<&Path>,
) -> Result<()> {
    let mut data: ModelCardUpdate = match file {
        Some(path) => read_json(path)?,
        None => ModelCardUpdate::default(),
    };
    if status.is_some() {
        data.status = status;
    }
    if data.is_empty() {
        bail!("Nothing to update; pass --status or --file");
    }
    data.validate().context("Invalid update")?;

    let card = fetch(
        &session.ctx,
        Operation::UpdateCard,
        session.client.update_model_card(id, &data),
    )
    .await?;
    print_panel(&Panel::Overview { card: &card });
    Ok(())
}

fn finish_batch<T>(
    session: &Session,
    op: Operation,
    action: &str,
    ids: &[String],
    report: model_card_client::Result<BatchReport<T>>,
) -> Result<()> {
    let report = match report {
        Ok(report) => report,
        Err(_) => bail!("Cancelled."),
    };

    let mut view = ListView::new(session.config.page_size);
    for id in ids {
        view.apply(ListAction::ToggleSelect(id.clone()));
    }
    view.apply_batch(op, &report);

    let failures: Vec<(String, String)> = report
        .failed()
        .map(|(id, e)| {
            let reason = if e.is_not_found() { "not found" } else { "request failed" };
            (id.to_string(), reason.to_string())
        })
        .collect();
    print_panel(&Panel::BatchResult {
        action,
        summary: report.summary(),
        failures: &failures,
    });

    match view.notice {
        Some(notice) => bail!(notice),
        None => Ok(()),
    }
}

/// Run one request and collapse any failure into the operation's message
async fn fetch<T, F>(ctx: &RequestContext, op: Operation, request: F) -> Result<T>
where
    F: Future<Output = model_card_client::Result<T>>,
{
    match ctx.run(request).await {
        Ok(value) => Ok(value),
        Err(e) if e.is_cancelled() => bail!("Cancelled."),
        Err(e) => {
            error!("Failed to {}: {}", op, e);
            bail!(op.failure_message())
        }
    }
}

fn settled(applied: Applied, load: &LoadState) -> Result<()> {
    match (applied, load) {
        (Applied::Cancelled, _) => bail!("Cancelled."),
        (_, LoadState::Failed { message }) => bail!(message.clone()),
        _ => Ok(()),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_panel(panel: &Panel<'_>) {
    for line in render_panel(panel) {
        println!("{line}");
    }
}
