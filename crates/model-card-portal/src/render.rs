//! Plain-text rendering of panels

use model_card_common::{FairnessDistribution, ModelCard};

use crate::panel::Panel;

/// Render a panel as terminal lines
pub fn render_panel(panel: &Panel<'_>) -> Vec<String> {
    match *panel {
        Panel::Empty => vec!["No model cards found.".to_string()],
        Panel::Loading => vec!["Loading...".to_string()],
        Panel::Failed { message } => vec![format!("Error: {message}")],
        Panel::CardTable {
            page,
            filter,
            selected,
            notice,
        } => {
            let mut lines = Vec::with_capacity(page.models.len() + 4);
            if let Some(notice) = notice {
                lines.push(format!("! {notice}"));
            }
            if page.models.is_empty() {
                lines.push("No model cards match the current filters.".to_string());
            } else {
                lines.push(format!(
                    "  {:<12} {:<28} {:<8} {:<14} {:<9} {:<15} {}",
                    "ID", "NAME", "VERSION", "DOMAIN", "RISK", "STATUS", "FAIRNESS"
                ));
                for card in &page.models {
                    let mark = if selected.contains(&card.id) { "*" } else { " " };
                    lines.push(format!(
                        "{mark} {:<12} {:<28} {:<8} {:<14} {:<9} {:<15} {}",
                        card.id,
                        card.name,
                        card.version,
                        card.domain,
                        card.risk_tier,
                        card.status,
                        score(card.fairness_score)
                    ));
                }
            }
            lines.push(format!(
                "Page {} of {} ({} total)",
                filter.page_number(),
                filter.page_count(page.total),
                page.total
            ));
            lines
        }
        Panel::Overview { card } => overview(card),
        Panel::Fairness { card, metrics } => {
            let mut lines = vec![format!("Fairness metrics for {} {}", card.name, card.version)];
            if metrics.is_empty() {
                lines.push("  (none)".to_string());
            }
            for m in metrics {
                let group = m
                    .demographic_group
                    .as_deref()
                    .map(|g| format!(" [{g}]"))
                    .unwrap_or_default();
                lines.push(format!(
                    "  {}{}: {:.3} (threshold {:.3})",
                    m.metric_name, group, m.metric_value, m.threshold_value
                ));
            }
            lines
        }
        Panel::Compliance { card, records } => {
            let mut lines = vec![format!("Compliance for {} {}", card.name, card.version)];
            if records.is_empty() {
                lines.push("  (none)".to_string());
            }
            for r in records {
                lines.push(format!(
                    "  {} {}: {} (assessed {})",
                    r.framework_name, r.framework_version, r.compliance_status, r.assessment_date
                ));
                if let Some(notes) = &r.notes {
                    lines.push(format!("    {notes}"));
                }
            }
            lines
        }
        Panel::Statistics { stats } => {
            let mut lines = vec![format!("Total models: {}", stats.total_models)];
            if let Some(avg) = stats.average_fairness_score {
                lines.push(format!("Average fairness score: {avg:.3}"));
            }
            for (title, counts) in [
                ("By domain", &stats.by_domain),
                ("By risk tier", &stats.by_risk_tier),
                ("By status", &stats.by_status),
            ] {
                lines.push(format!("{title}:"));
                lines.extend(counts.iter().map(|(k, v)| format!("  {k}: {v}")));
            }
            lines
        }
        Panel::Distribution { distribution } => histogram(distribution),
        Panel::Jobs { jobs } => {
            let mut lines = vec![format!("Jobs ({} total)", jobs.total)];
            for job in &jobs.jobs {
                let progress = job.progress.map(|p| format!(" {p}%")).unwrap_or_default();
                lines.push(format!("  {} {} {}{}", job.id, job.name, job.status.as_str(), progress));
                if let Some(error) = &job.error {
                    lines.push(format!("    error: {error}"));
                }
            }
            lines
        }
        Panel::Diagnostics { runs } => {
            if runs.runs.is_empty() {
                return vec!["No diagnostic runs.".to_string()];
            }
            runs.runs
                .iter()
                .map(|run| {
                    format!(
                        "  {} {} started {}{}",
                        run.id,
                        run.status.as_str(),
                        run.started_at.format("%Y-%m-%d %H:%M:%S"),
                        run.summary
                            .as_deref()
                            .map(|s| format!(": {s}"))
                            .unwrap_or_default()
                    )
                })
                .collect()
        }
        Panel::BatchResult {
            action,
            summary,
            failures,
        } => {
            let mut lines = vec![format!(
                "{action}: {} succeeded, {} failed",
                summary.succeeded, summary.failed
            )];
            lines.extend(failures.iter().map(|(id, msg)| format!("  {id}: {msg}")));
            lines
        }
    }
}

fn overview(card: &ModelCard) -> Vec<String> {
    let mut lines = vec![
        format!("{} {} ({})", card.name, card.version, card.id),
        format!("  {}", card.description),
        format!("  Domain:     {}", card.domain),
        format!("  Risk tier:  {}", card.risk_tier),
        format!("  Status:     {}", card.status),
        format!("  Fairness:   {}", score(card.fairness_score)),
    ];
    if !card.tags.is_empty() {
        lines.push(format!("  Tags:       {}", card.tags.join(", ")));
    }
    if let Some(url) = &card.documentation_url {
        lines.push(format!("  Docs:       {url}"));
    }
    if let Some(email) = &card.contact_email {
        lines.push(format!("  Contact:    {email}"));
    }
    lines.push(format!(
        "  Created:    {}",
        card.created_at.format("%Y-%m-%d %H:%M:%S")
    ));
    lines
}

const BAR_WIDTH: u64 = 40;

fn histogram(distribution: &FairnessDistribution) -> Vec<String> {
    let max = distribution.0.values().copied().max().unwrap_or(0);
    FairnessDistribution::BUCKETS
        .iter()
        .map(|bucket| {
            let count = distribution.count(bucket);
            let width = if max == 0 { 0 } else { count * BAR_WIDTH / max };
            format!("{bucket} | {:<40} {count}", "#".repeat(width as usize))
        })
        .collect()
}

fn score(value: Option<f64>) -> String {
    value.map(|s| format!("{s:.2}")).unwrap_or_else(|| "-".to_string())
}
