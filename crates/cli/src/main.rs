mod cli;
mod config;
mod loader;
mod report;
mod terminal;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use proximity_compute::deck::similar_items_below_threshold;
use proximity_compute::{analyze_profiles_with_config, pairwise_distance_matrix_with_config};
use proximity_core::config::load_dotenv;
use proximity_core::{Config, Profile};
use tracing::info;

use crate::cli::{CliArgs, Command};
use crate::config::CliConfig;
use crate::report::{matrix_cells, result_row, RESULT_HEADERS};
use crate::terminal::Terminal;

const NO_PROFILES_MESSAGE: &str = "No FSRS parameters were found on existing presets.";
const NO_MATRIX_MESSAGE: &str = "No presets with FSRS parameters are available.";

fn main() -> Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    load_dotenv();
    let config = Config::from_env();
    config.log_summary();

    let args = CliArgs::parse();
    let cli_config = CliConfig::load(args.config.as_deref())
        .context("failed to load configuration")?;
    let terminal = Terminal::new(cli_config.color && !args.no_color);

    let profiles = loader::load_profiles(Path::new(args.command.presets_path()))?;
    info!(profiles = profiles.len(), "presets loaded");

    let outcome = run(&args, &config, &cli_config, &terminal, &profiles);
    Ok(ExitCode::from(exit_status(&terminal, outcome)?))
}

/// Print a command failure once and map it to a process status.
fn exit_status(terminal: &Terminal, outcome: Result<()>) -> Result<u8> {
    match outcome {
        Ok(()) => Ok(0),
        Err(err) => {
            terminal.print_error(&format!("{err:#}"))?;
            Ok(1)
        }
    }
}

fn run(
    args: &CliArgs,
    config: &Config,
    cli_config: &CliConfig,
    terminal: &Terminal,
    profiles: &[Profile],
) -> Result<()> {
    let decimals = cli_config.decimal_places;

    match &args.command {
        Command::Analyze { .. } => {
            if profiles.is_empty() {
                return terminal.print_info(NO_PROFILES_MESSAGE);
            }

            let results = analyze_profiles_with_config(profiles, &config.analysis)
                .context("failed to analyze presets")?;
            if args.json {
                return terminal.print_line(&serde_json::to_string_pretty(&results)?);
            }

            let rows: Vec<Vec<String>> = results
                .iter()
                .map(|r| result_row(r, decimals).to_vec())
                .collect();
            terminal.print_table("FSRS Preset Proximity", &RESULT_HEADERS, &rows, Some(4))
        }
        Command::Matrix { .. } => {
            let pairwise = pairwise_distance_matrix_with_config(profiles, &config.analysis)
                .context("failed to compute pairwise distances")?;
            if pairwise.is_empty() {
                return terminal.print_info(NO_MATRIX_MESSAGE);
            }
            if args.json {
                let value = serde_json::json!({
                    "presets": pairwise.names(),
                    "distances": pairwise.distances,
                });
                return terminal.print_line(&serde_json::to_string_pretty(&value)?);
            }

            let names = pairwise.names();
            let mut headers = vec![""];
            headers.extend(names.iter().copied());
            let rows: Vec<Vec<String>> = matrix_cells(&pairwise, decimals)
                .into_iter()
                .zip(&names)
                .map(|(cells, name)| std::iter::once(name.to_string()).chain(cells).collect())
                .collect();
            terminal.print_table("FSRS Preset Proximity - All Distances", &headers, &rows, None)
        }
        Command::Similar {
            name, threshold, ..
        } => {
            let pairwise = pairwise_distance_matrix_with_config(profiles, &config.analysis)
                .context("failed to compute pairwise distances")?;
            let Some(index) = pairwise.position(name) else {
                anyhow::bail!("preset '{}' not found", name);
            };

            let threshold = threshold.unwrap_or(config.analysis.similar_threshold);
            let similar = similar_items_below_threshold(
                &pairwise.names(),
                &pairwise.distances[index],
                index,
                threshold,
            );
            if args.json {
                return terminal.print_line(&serde_json::to_string_pretty(&similar)?);
            }

            if similar.is_empty() {
                return terminal.print_info(&format!(
                    "No presets closer than {threshold} to \"{name}\"."
                ));
            }
            terminal.print_info(&format!("Presets closer than {threshold} to \"{name}\":"))?;
            for line in &similar {
                terminal.print_line(&format!("  {line}"))?;
            }
            Ok(())
        }
    }
}
