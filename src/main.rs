use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use ats_analyzer::config::Config;
use ats_analyzer::engine::{analyze_team_json, head_to_head_games, ComparisonAnalysis};
use ats_analyzer::models::GameRecord;
use ats_analyzer::report;

fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let games = load_json(&config.games)?;
    let lines = load_json(&config.lines)?;
    info!(
        "Loaded inputs: {} game(s), {} line record(s)",
        games.as_array().map_or(0, Vec::len),
        lines.as_array().map_or(0, Vec::len)
    );

    let analysis = analyze_team_json(&config.team, &games, &lines)?;
    warn_on_estimates(&config, &config.team, analysis.result.data_quality.estimated_fraction());

    let output = if let Some(opponent) = &config.opponent {
        let opponent_analysis = analyze_team_json(opponent, &games, &lines)?;
        warn_on_estimates(
            &config,
            opponent,
            opponent_analysis.result.data_quality.estimated_fraction(),
        );
        let game_records: Vec<GameRecord> = games
            .as_array()
            .map(|a| {
                a.iter()
                    .filter_map(|v| serde_json::from_value(v.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();
        let comparison = ComparisonAnalysis {
            head_to_head: head_to_head_games(&config.team, opponent, &game_records),
            team_a: analysis,
            team_b: opponent_analysis,
        };
        if config.json {
            serde_json::to_string_pretty(&comparison)?
        } else {
            report::render_comparison(&comparison)
        }
    } else if config.json {
        serde_json::to_string_pretty(&analysis)?
    } else {
        report::render_team(&analysis.result)
    };

    println!("{}", output);
    Ok(())
}

fn load_json(path: &Path) -> Result<serde_json::Value> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Estimated results are lower confidence; say so loudly instead of letting
/// the report bury the distinction.
fn warn_on_estimates(config: &Config, team: &str, estimated_fraction: f64) {
    if estimated_fraction > config.estimated_warn_fraction {
        warn!(
            "⚠️  {:.0}% of {}'s games use ESTIMATED spreads; treat these numbers as low confidence",
            estimated_fraction * 100.0,
            team
        );
    }
}
