use serde::{Deserialize, Serialize};

/// A final game result as produced by the retrieval layer.
///
/// Every contingent field is optional: upstream feeds routinely omit scores
/// for forfeits and team names for provisional fixtures. A record is *valid*
/// for classification only when both team names and both scores are present;
/// anything else is rejected and counted, never coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// External game ID from the results provider
    pub id: String,
    /// Season year (e.g. 2023)
    pub season: Option<i32>,
    /// "regular" | "postseason"
    pub season_type: Option<String>,
    pub week: Option<u32>,
    /// Kickoff timestamp as delivered by the feed; parsed leniently,
    /// never trusted to be well-formed
    pub start_date: Option<String>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub home_points: Option<i32>,
    pub away_points: Option<i32>,
}

/// A single sportsbook line referencing a game.
///
/// Multiple lines may reference the same game (one per provider). The spread
/// is home-team-relative: negative means the home team is favored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Foreign key to `GameRecord::id`
    pub game_id: String,
    /// Sportsbook / source name (e.g. "DraftKings")
    pub provider: Option<String>,
    /// Home-relative point spread
    pub spread: Option<f64>,
    /// Total (over/under); carried through but unused by the engine core
    pub over_under: Option<f64>,
    pub home_moneyline: Option<i32>,
    pub away_moneyline: Option<i32>,
}
