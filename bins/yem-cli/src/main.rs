//! yem-cli: replay payment scenarios and inspect harmonic weights.

mod ledger;
mod scenario;
mod settings;

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use yem_brain::Upvoters;
use yem_core::types::{ResourceId, UserId};

use crate::ledger::Ledger;
use crate::scenario::{Scenario, State};
use crate::settings::CliSettings;

/// Pay-per-action content platform engine.
#[derive(Parser, Debug)]
#[command(name = "yem-cli", version, about = "Replay upvote/view payments and print payouts")]
struct Cli {
    /// Log level filter (overridden by RUST_LOG).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Log format: text or json.
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    /// Platform settings file (server, prices, server share).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run every event of a JSON scenario and print payouts and balances.
    Replay {
        /// Path to the scenario file.
        scenario: PathBuf,

        /// Print the final report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Print the reciprocals 1/1 .. 1/n and their sum.
    Harmonic {
        /// Number of terms.
        n: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    match cli.command {
        Commands::Replay { scenario, json } => replay(cli.config, scenario, json),
        Commands::Harmonic { n } => harmonic(n),
    }
}

fn replay(config: Option<PathBuf>, path: PathBuf, json: bool) -> Result<()> {
    let settings = CliSettings::load(config.as_deref())?;
    let platform_config = settings
        .platform_config()
        .context("invalid platform settings")?;
    info!(
        server = %platform_config.server,
        upvote_price = %platform_config.upvote_price,
        view_price = %platform_config.view_price,
        server_share = %platform_config.server_share,
        "platform configured"
    );

    let scenario = Scenario::load(&path)?;
    let mut state = scenario.platform(platform_config)?;
    let events = scenario.events()?;
    info!(
        users = state.users().len(),
        events = events.len(),
        "replaying {}",
        path.display()
    );

    let mut ledger = Ledger::new();
    for (i, event) in events.iter().enumerate() {
        let index = i + 1;
        match state.apply(event) {
            Ok(transition) => {
                if !json {
                    let paid: Vec<String> = transition
                        .payout
                        .iter()
                        .map(|(user, amount)| format!("{user}={amount}"))
                        .collect();
                    println!(
                        "#{index} {} {} {} -> {}",
                        event.kind(),
                        event.user(),
                        event.resource(),
                        paid.join(" ")
                    );
                }
                ledger.record_payout(&transition.payout);
                state = transition.state;
            }
            Err(e) => {
                warn!(index, kind = event.kind(), reason = %e, "event rejected");
                if !json {
                    println!(
                        "#{index} {} {} {} rejected: {e}",
                        event.kind(),
                        event.user(),
                        event.resource()
                    );
                }
                ledger.record_rejection(index, event, &e);
            }
        }
    }

    let upvoters = upvoter_lists(&state);
    if json {
        let report = ledger.report(upvoters);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!(
        "accepted: {}  rejected: {}",
        ledger.accepted(),
        ledger.rejections().len()
    );
    println!("paid out: {}", ledger.total());
    println!("balances:");
    for (user, amount) in ledger.balances() {
        println!("  {user}: {amount}");
    }
    println!("upvoters:");
    for (resource, users) in &upvoters {
        let names: Vec<&str> = users.iter().map(UserId::as_str).collect();
        println!("  {resource}: [{}]", names.join(", "));
    }
    Ok(())
}

fn harmonic(n: usize) -> Result<()> {
    let record = yem_harmonic::reciprocals_to(n)?;
    for (i, term) in record.reciprocals().iter().enumerate() {
        println!("1/{} = {term}", i + 1);
    }
    println!("H({}) = {}", record.natural(), record.total());
    Ok(())
}

fn upvoter_lists(state: &State) -> BTreeMap<ResourceId, Vec<UserId>> {
    state
        .resources()
        .map(|resource| {
            let users = state
                .upvoters(resource)
                .map(Upvoters::to_vec)
                .unwrap_or_default();
            (resource.clone(), users)
        })
        .collect()
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Logs go to stderr so replay output on stdout stays machine-readable.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
