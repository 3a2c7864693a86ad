use std::path::PathBuf;

use clap::Parser;

/// Against-the-spread analytics for historical betting performance
#[derive(Parser, Debug, Clone)]
#[command(name = "ats-analyzer", version, about)]
pub struct Config {
    /// Path to the JSON array of game records (already fetched)
    #[arg(long, env = "ATS_GAMES_PATH")]
    pub games: PathBuf,

    /// Path to the JSON array of betting-line records
    #[arg(long, env = "ATS_LINES_PATH")]
    pub lines: PathBuf,

    /// Team to analyze (exact name as it appears in the game records)
    #[arg(long, env = "ATS_TEAM")]
    pub team: String,

    /// Optional second team for a head-to-head comparison
    #[arg(long, env = "ATS_OPPONENT")]
    pub opponent: Option<String>,

    /// Emit the full result as JSON instead of the text report
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Warn when estimated spreads exceed this fraction of classified games
    #[arg(long, env = "ATS_ESTIMATED_WARN_FRACTION", default_value = "0.25")]
    pub estimated_warn_fraction: f64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.team.trim().is_empty() {
            anyhow::bail!("--team must not be empty");
        }
        if let Some(opponent) = &self.opponent {
            if opponent.trim().is_empty() {
                anyhow::bail!("--opponent must not be empty when provided");
            }
            if opponent == &self.team {
                anyhow::bail!("--opponent must differ from --team");
            }
        }
        if !(0.0..=1.0).contains(&self.estimated_warn_fraction) {
            anyhow::bail!("estimated_warn_fraction must be between 0.0 and 1.0");
        }
        Ok(())
    }
}
