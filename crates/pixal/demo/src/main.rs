#![deny(unsafe_code)]
//! PIXAL demo binary.
//!
//! Generates a synthetic wine table, selects the highly rated wines and
//! runs several interactive induction rounds, persisting the search state
//! as JSON between rounds the way a web front end would. Finishes by
//! scoring a few hand-written rules against the same selection.

mod synthetic;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use pixal_data::{infer_dtypes, Constraint, Dataset};
use pixal_induction::{
    induce, score_batch, ClauseMap, InduceRequest, InduceResponse, InductionConfig, ProposedRule,
    ScoreKind, SearchSnapshot,
};
use tracing::info;

use synthetic::SyntheticWines;

/// PIXAL demo CLI
#[derive(Parser)]
#[command(name = "pixal-demo")]
#[command(about = "Explain a row selection with conjunctive rules", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, env = "PIXAL_CONFIG")]
    config: Option<PathBuf>,

    /// Rows to generate
    #[arg(long, default_value_t = 500)]
    rows: usize,

    /// Random seed for the synthetic table
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Interactive rounds to run
    #[arg(long, default_value_t = 3)]
    rounds: usize,

    /// Minimum quality rating to select
    #[arg(long, default_value_t = 7)]
    min_quality: i64,

    /// Score function override (f1, anomaly)
    #[arg(long)]
    score: Option<ScoreKind>,

    /// Log level
    #[arg(long, env = "PIXAL_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

// ── Formatting Helpers ──────────────────────────────────────────────────

fn section(title: &str) {
    println!();
    println!(" ┌{}┐", "─".repeat(60));
    println!(" │  {:<56}  │", title);
    println!(" └{}┘", "─".repeat(60));
}

fn print_response(round: usize, response: &InduceResponse) {
    match &response.summary {
        Some(summary) => println!(
            "   [--]  round {}: {} step(s), {} new rule(s), stop = {:?}",
            round, summary.steps, summary.accepted, summary.stop_reason
        ),
        None => println!("   [!!]  round {}: no explanatory rule found", round),
    }
    for rule in &response.accepted {
        println!("   [OK]  {:.3}  {}", rule.score, rule.name);
    }
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => InductionConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => InductionConfig::default(),
    };
    if let Some(kind) = cli.score {
        config.score = kind;
    }

    section("Dataset");
    let dataset = SyntheticWines::new(cli.seed).generate(cli.rows)?;
    let dtypes = infer_dtypes(&dataset);
    for (column, dtype) in &dtypes {
        println!("   [--]  {:<10} {}", column, dtype);
    }

    let selected = select_quality(&dataset, cli.min_quality)?;
    if selected.is_empty() {
        bail!("no rows with quality >= {}", cli.min_quality);
    }
    info!(rows = dataset.row_count(), selected = selected.len(), "selection made");

    section("Induction rounds");
    let mut snapshot_json: Option<String> = None;
    let mut last = None;
    for round in 1..=cli.rounds {
        let state = snapshot_json
            .as_deref()
            .map(SearchSnapshot::from_json)
            .transpose()?;
        let request = InduceRequest {
            selected_ids: selected.clone(),
            comparison_ids: None,
            state,
            config: config.clone(),
        };
        let response = induce(&dataset, &dtypes, &request)?;
        print_response(round, &response);
        snapshot_json = Some(response.state.to_json()?);
        let done = response.summary.is_none();
        last = Some(response);
        if done {
            break;
        }
    }

    section("Hand-written rules");
    let mut proposals = vec![
        ProposedRule {
            id: "red".into(),
            clauses: ClauseMap::from([("color".to_string(), Constraint::values(["red"]))]),
        },
        ProposedRule {
            id: "strong-red".into(),
            clauses: ClauseMap::from([
                ("color".to_string(), Constraint::values(["red"])),
                ("alcohol".to_string(), Constraint::range(11.5, 14.5)),
            ]),
        },
    ];
    if let Some(best) = last.as_ref().and_then(|r| r.last_accepted.as_ref()) {
        proposals.push(ProposedRule {
            id: format!("induced:{}", best.id),
            clauses: best.clauses.clone(),
        });
    }
    for score in score_batch(&dataset, &dtypes, &selected, None, &proposals, config.score)? {
        println!("   [OK]  {:.3}  {}", score.score, score.id);
    }

    Ok(())
}

fn select_quality(dataset: &Dataset, min_quality: i64) -> anyhow::Result<Vec<usize>> {
    let quality = dataset.column("quality")?;
    Ok(quality
        .iter()
        .enumerate()
        .filter(|(_, v)| v.as_number().is_some_and(|q| q >= min_quality as f64))
        .map(|(row, _)| row)
        .collect())
}

