use serde::Serialize;
use tracing::debug;

use crate::models::GameRecord;

use super::spread::ResolvedSpread;
use super::yearly::attribute_year;

/// Half-point tolerance band around an exact cover. An ATS margin whose
/// absolute value is within this band is a push. Fixed, not tunable.
pub const PUSH_TOLERANCE: f64 = 0.5;

/// Spread-size bucket boundaries on |team-perspective spread|.
const SMALL_MAX: f64 = 3.5;
const MEDIUM_MAX: f64 = 7.0;
const LARGE_MAX: f64 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AtsOutcome {
    Win,
    Loss,
    Push,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Home,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteStatus {
    Favorite,
    Underdog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpreadBucket {
    Small,
    Medium,
    Large,
    Huge,
}

/// A fully classified game: the unit of aggregation and of every index bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedGame {
    pub game: GameRecord,
    pub spread: ResolvedSpread,
    pub team_score: i32,
    pub opponent_score: i32,
    pub opponent: String,
    /// team_score - opponent_score
    pub actual_margin: f64,
    /// actual_margin - team-perspective spread
    pub ats_margin: f64,
    pub outcome: AtsOutcome,
    pub venue: Venue,
    pub favorite_status: FavoriteStatus,
    pub spread_bucket: SpreadBucket,
    /// Attributed season year (see `yearly::attribute_year`)
    pub year: i32,
}

/// Fields proven present by `validate`. Borrowed from the record so the gate
/// adds no copies on the hot path.
#[derive(Debug, Clone, Copy)]
pub struct ValidGame<'a> {
    pub home_team: &'a str,
    pub away_team: &'a str,
    pub home_points: i32,
    pub away_points: i32,
}

/// Hard validation gate: both team names and both scores must be present.
/// Returns `None` for records that must be rejected (counted as invalid by
/// the facade), never a partially classified game.
pub fn validate(game: &GameRecord) -> Option<ValidGame<'_>> {
    let home_team = game.home_team.as_deref().filter(|t| !t.is_empty());
    let away_team = game.away_team.as_deref().filter(|t| !t.is_empty());
    match (home_team, away_team, game.home_points, game.away_points) {
        (Some(home_team), Some(away_team), Some(home_points), Some(away_points)) => Some(ValidGame {
            home_team,
            away_team,
            home_points,
            away_points,
        }),
        _ => {
            debug!(game_id = %game.id, "rejecting game with missing teams or scores");
            None
        }
    }
}

/// Classify a validated game against its resolved spread. Pure: the only
/// output is the `ClassifiedGame`.
pub fn classify(
    game: &GameRecord,
    valid: ValidGame<'_>,
    team: &str,
    spread: &ResolvedSpread,
) -> ClassifiedGame {
    let venue = if team == valid.home_team {
        Venue::Home
    } else {
        Venue::Away
    };
    let (team_score, opponent_score, opponent) = match venue {
        Venue::Home => (valid.home_points, valid.away_points, valid.away_team),
        Venue::Away => (valid.away_points, valid.home_points, valid.home_team),
    };

    let actual_margin = (team_score - opponent_score) as f64;
    // Spread is already team-perspective; no further sign flip here.
    let ats_margin = actual_margin - spread.value;

    let outcome = if ats_margin.abs() <= PUSH_TOLERANCE {
        AtsOutcome::Push
    } else if ats_margin > PUSH_TOLERANCE {
        AtsOutcome::Win
    } else {
        AtsOutcome::Loss
    };

    // A spread of exactly 0 (pick'em) counts as underdog.
    let favorite_status = if spread.value < 0.0 {
        FavoriteStatus::Favorite
    } else {
        FavoriteStatus::Underdog
    };

    let spread_bucket = bucket_for(spread.value);

    ClassifiedGame {
        game: game.clone(),
        spread: spread.clone(),
        team_score,
        opponent_score,
        opponent: opponent.to_string(),
        actual_margin,
        ats_margin,
        outcome,
        venue,
        favorite_status,
        spread_bucket,
        year: attribute_year(game),
    }
}

fn bucket_for(spread: f64) -> SpreadBucket {
    let magnitude = spread.abs();
    if magnitude <= SMALL_MAX {
        SpreadBucket::Small
    } else if magnitude <= MEDIUM_MAX {
        SpreadBucket::Medium
    } else if magnitude <= LARGE_MAX {
        SpreadBucket::Large
    } else {
        SpreadBucket::Huge
    }
}
