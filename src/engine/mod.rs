//! Against-the-spread analytics engine.
//!
//! A pure, synchronous batch computation: one O(n) pass over in-memory game
//! and line records, producing a fully computed metric structure plus
//! drill-down game buckets. Deterministic: identical inputs always yield
//! identical outputs, so two teams can be analyzed concurrently with no
//! shared state and results can be cached on input identity alone.

pub mod classify;
pub mod index;
pub mod quality;
pub mod situational;
pub mod spread;
pub mod yearly;

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{GameRecord, LineRecord};

use self::classify::{classify, validate, AtsOutcome};
use self::index::OrganizedGames;
use self::quality::DataQuality;
use self::situational::{Record, Situational};
use self::spread::resolve_spread;
use self::yearly::{NotableGame, NotableTracker, YearlyRollup, YearlySummary};

/// Notional profit on a winning -110 bet (risk 100 to win ~90.91).
const WIN_PAYOUT: f64 = 90.91;
/// Notional loss on a losing -110 bet.
const LOSS_PAYOUT: f64 = -100.0;
/// Notional stake per game for the ROI denominator.
const STAKE: f64 = 100.0;

/// The single fatal failure path: malformed top-level input. Individual bad
/// games never raise; they degrade into the data-quality counters.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("games input must be a JSON array, got {0}")]
    GamesNotAList(&'static str),
    #[error("lines input must be a JSON array, got {0}")]
    LinesNotAList(&'static str),
}

/// Full ATS performance picture for one team. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAtsResult {
    pub team: String,
    pub overall: Record,
    pub win_percentage: f64,
    /// Mean absolute team-perspective spread over classified games
    pub avg_spread: f64,
    /// Mean ATS margin over classified games
    pub avg_margin: f64,
    /// Return on investment at standard -110 odds, percent
    pub roi: f64,
    pub situational: Situational,
    pub yearly: Vec<YearlySummary>,
    pub best_covers: Vec<NotableGame>,
    pub worst_beats: Vec<NotableGame>,
    pub data_quality: DataQuality,
}

/// Engine output: the metrics plus the organized game buckets behind them,
/// always returned as a pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAnalysis {
    pub result: TeamAtsResult,
    pub organized: OrganizedGames,
}

/// Two independent team analyses plus their shared head-to-head meetings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonAnalysis {
    pub team_a: TeamAnalysis,
    pub team_b: TeamAnalysis,
    pub head_to_head: Vec<GameRecord>,
}

/// Analyze one team's ATS performance over a batch of games.
///
/// Single pass: each game is validated, its spread resolved, classified, and
/// fed to every accumulator before the next game is touched. Infallible on
/// typed inputs; malformed individual records land in
/// `data_quality.invalid_games`.
pub fn analyze_team(team: &str, games: &[GameRecord], lines: &[LineRecord]) -> TeamAnalysis {
    // Pre-group lines so per-game lookup is O(1) within the single pass.
    let mut lines_by_game: HashMap<&str, Vec<&LineRecord>> = HashMap::new();
    for line in lines {
        lines_by_game.entry(line.game_id.as_str()).or_default().push(line);
    }

    let mut overall = Record::default();
    let mut situational = Situational::default();
    let mut rollup = YearlyRollup::default();
    let mut notable = NotableTracker::default();
    let mut data_quality = DataQuality::default();
    let mut organized = OrganizedGames::default();

    let mut spread_magnitude_sum = 0.0;
    let mut ats_margin_sum = 0.0;
    let mut payout_sum = 0.0;

    for game in games {
        let valid = match validate(game) {
            Some(v) => v,
            None => {
                data_quality.record_invalid();
                continue;
            }
        };

        let is_home = team == valid.home_team;
        let game_lines = lines_by_game
            .get(game.id.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let resolved = resolve_spread(game, game_lines, is_home);
        data_quality.record_classified(&resolved);

        let classified = classify(game, valid, team, &resolved);

        overall.add(classified.outcome);
        situational.add(&classified);
        rollup.add(&classified);
        notable.add(&classified);

        spread_magnitude_sum += classified.spread.value.abs();
        ats_margin_sum += classified.ats_margin;
        payout_sum += match classified.outcome {
            AtsOutcome::Win => WIN_PAYOUT,
            AtsOutcome::Loss => LOSS_PAYOUT,
            AtsOutcome::Push => 0.0,
        };

        organized.insert(classified);
    }

    let n = overall.games();
    let (avg_spread, avg_margin, roi) = if n == 0 {
        (0.0, 0.0, 0.0)
    } else {
        let n = n as f64;
        (
            spread_magnitude_sum / n,
            ats_margin_sum / n,
            100.0 * payout_sum / (n * STAKE),
        )
    };

    let data_quality = data_quality.finish();
    let (best_covers, worst_beats) = notable.finish();

    info!(
        team = %team,
        games = n,
        invalid = data_quality.invalid_games,
        quality = data_quality.score,
        "ATS analysis complete"
    );

    TeamAnalysis {
        result: TeamAtsResult {
            team: team.to_string(),
            win_percentage: overall.win_percentage(),
            overall,
            avg_spread,
            avg_margin,
            roi,
            situational,
            yearly: rollup.finish(),
            best_covers,
            worst_beats,
            data_quality,
        },
        organized,
    }
}

/// JSON-value entry point used at the collaborator boundary. The only fatal
/// condition is a top-level value that is not an array; elements that fail to
/// deserialize degrade instead (games into the invalid counter, lines are
/// dropped).
pub fn analyze_team_json(team: &str, games: &Value, lines: &Value) -> Result<TeamAnalysis, EngineError> {
    let game_values = games
        .as_array()
        .ok_or_else(|| EngineError::GamesNotAList(json_kind(games)))?;
    let line_values = lines
        .as_array()
        .ok_or_else(|| EngineError::LinesNotAList(json_kind(lines)))?;

    let games: Vec<GameRecord> = game_values
        .iter()
        .map(|v| {
            serde_json::from_value(v.clone()).unwrap_or_else(|e| {
                debug!("unparseable game record ({}); rejecting", e);
                unparseable_game()
            })
        })
        .collect();
    let lines: Vec<LineRecord> = line_values
        .iter()
        .filter_map(|v| {
            serde_json::from_value(v.clone())
                .map_err(|e| debug!("dropping unparseable line record ({})", e))
                .ok()
        })
        .collect();

    Ok(analyze_team(team, &games, &lines))
}

/// Compare two teams: two independent engine runs over each team's own
/// inputs, plus the head-to-head meetings drawn from team A's schedule.
pub fn compare_teams(
    team_a: &str,
    games_a: &[GameRecord],
    lines_a: &[LineRecord],
    team_b: &str,
    games_b: &[GameRecord],
    lines_b: &[LineRecord],
) -> ComparisonAnalysis {
    ComparisonAnalysis {
        team_a: analyze_team(team_a, games_a, lines_a),
        team_b: analyze_team(team_b, games_b, lines_b),
        head_to_head: head_to_head_games(team_a, team_b, games_a),
    }
}

/// Games whose home/away pair is exactly the two teams, in either order.
pub fn head_to_head_games(team_a: &str, team_b: &str, games: &[GameRecord]) -> Vec<GameRecord> {
    games
        .iter()
        .filter(|g| {
            match (g.home_team.as_deref(), g.away_team.as_deref()) {
                (Some(home), Some(away)) => {
                    (home == team_a && away == team_b) || (home == team_b && away == team_a)
                }
                _ => false,
            }
        })
        .cloned()
        .collect()
}

/// A sentinel that the validation gate is guaranteed to reject, so elements
/// that fail to deserialize are counted as invalid rather than lost.
fn unparseable_game() -> GameRecord {
    GameRecord {
        id: String::new(),
        season: None,
        season_type: None,
        week: None,
        start_date: None,
        home_team: None,
        away_team: None,
        home_points: None,
        away_points: None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn game(
        id: &str,
        season: i32,
        home: &str,
        away: &str,
        home_pts: i32,
        away_pts: i32,
    ) -> GameRecord {
        GameRecord {
            id: id.into(),
            season: Some(season),
            season_type: Some("regular".into()),
            week: Some(1),
            start_date: None,
            home_team: Some(home.into()),
            away_team: Some(away.into()),
            home_points: Some(home_pts),
            away_points: Some(away_pts),
        }
    }

    fn line(game_id: &str, provider: &str, spread: f64) -> LineRecord {
        LineRecord {
            game_id: game_id.into(),
            provider: Some(provider.into()),
            spread: Some(spread),
            over_under: None,
            home_moneyline: None,
            away_moneyline: None,
        }
    }

    fn fixture() -> (Vec<GameRecord>, Vec<LineRecord>) {
        let games = vec![
            // Home favorite, covers: ats = 7 - (-3) = 10 → win
            game("g1", 2022, "Chiefs", "Bills", 31, 24),
            // Away underdog, fails to cover: ats = -3 - 3.5 = -6.5 → loss
            game("g2", 2022, "Bills", "Chiefs", 20, 17),
            // Home 2.5-point underdog, pushes: ats = 3 - 2.5 = 0.5 → push
            game("g3", 2023, "Chiefs", "Raiders", 24, 21),
            // No line → estimated: 0.7*7 - 2.5 = 2.4; ats = 7 - 2.4 = 4.6 → win
            game("g4", 2023, "Chiefs", "Broncos", 28, 21),
            // Missing away score → rejected
            GameRecord {
                away_points: None,
                ..game("g5", 2023, "Chiefs", "Chargers", 0, 0)
            },
        ];
        let lines = vec![
            line("g1", "DraftKings", -3.0),
            // Home-relative -3.5 → +3.5 from the away Chiefs' perspective
            line("g2", "ESPN Bet", -3.5),
            line("g3", "Bovada", 2.5),
        ];
        (games, lines)
    }

    #[test]
    fn test_full_pass_counts_and_outcomes() {
        let (games, lines) = fixture();
        let analysis = analyze_team("Chiefs", &games, &lines);
        let r = &analysis.result;

        assert_eq!(r.overall.wins, 2);
        assert_eq!(r.overall.losses, 1);
        assert_eq!(r.overall.pushes, 1);
        assert_eq!(r.data_quality.total_games, 4);
        assert_eq!(r.data_quality.verified_spreads, 3);
        assert_eq!(r.data_quality.estimated_spreads, 1);
        assert_eq!(r.data_quality.invalid_games, 1);
        // round(100 * 3/4)
        assert_eq!(r.data_quality.score, 75);
        assert!(r.data_quality.sources.contains("DraftKings"));
        assert!(r.data_quality.sources.contains("ESPN Bet"));
        assert!(r.data_quality.sources.contains("Bovada"));
    }

    #[test]
    fn test_partition_sums_conserved_everywhere() {
        let (games, lines) = fixture();
        let analysis = analyze_team("Chiefs", &games, &lines);
        let r = &analysis.result;
        let s = &r.situational;
        let n = r.overall.games();

        assert_eq!(s.home.games() + s.away.games(), n);
        assert_eq!(s.favorite.games() + s.underdog.games(), n);
        let sizes = &s.spread_sizes;
        assert_eq!(
            sizes.small.games() + sizes.medium.games() + sizes.large.games() + sizes.huge.games(),
            n
        );
        assert_eq!(analysis.organized.all.len() as u32, n);
        let yearly_total: u32 = r.yearly.iter().map(|y| y.record.games()).sum();
        assert_eq!(yearly_total, n);
    }

    #[test]
    fn test_margin_of_exactly_ten_is_not_a_best_cover() {
        let (games, lines) = fixture();
        let analysis = analyze_team("Chiefs", &games, &lines);
        // g1's ats margin is exactly 10.0: a win, but not notable
        assert!(analysis.result.best_covers.is_empty());
        assert!(analysis.result.worst_beats.is_empty());
    }

    #[test]
    fn test_roi_and_averages() {
        let (games, lines) = fixture();
        let analysis = analyze_team("Chiefs", &games, &lines);
        let r = &analysis.result;

        // 2 wins, 1 loss, 1 push: (2*90.91 - 100) / (4*100) * 100
        let expected_roi = 100.0 * (2.0 * 90.91 - 100.0) / 400.0;
        assert_relative_eq!(r.roi, expected_roi, epsilon = 1e-9);
        // |-3| + |3.5| + |2.5| + |2.4| = 11.4 over 4 games
        assert_relative_eq!(r.avg_spread, 11.4 / 4.0, epsilon = 1e-9);
        // 10 - 6.5 + 0.5 + 4.6 = 8.6 over 4 games
        assert_relative_eq!(r.avg_margin, 8.6 / 4.0, epsilon = 1e-9);
        // 2 wins / 3 decided
        assert_relative_eq!(r.win_percentage, 200.0 / 3.0, epsilon = 1e-9);
        assert!(r.roi.is_finite() && r.avg_spread.is_finite() && r.avg_margin.is_finite());
    }

    #[test]
    fn test_empty_inputs_yield_finite_zeroes() {
        let analysis = analyze_team("Chiefs", &[], &[]);
        let r = &analysis.result;
        assert_eq!(r.overall.games(), 0);
        assert_relative_eq!(r.roi, 0.0, epsilon = 1e-9);
        assert_relative_eq!(r.avg_spread, 0.0, epsilon = 1e-9);
        assert_relative_eq!(r.avg_margin, 0.0, epsilon = 1e-9);
        assert_relative_eq!(r.win_percentage, 0.0, epsilon = 1e-9);
        assert_eq!(r.data_quality.score, 0);
        assert!(analysis.organized.all.is_empty());
    }

    #[test]
    fn test_idempotence() {
        let (games, lines) = fixture();
        let first = analyze_team("Chiefs", &games, &lines);
        let second = analyze_team("Chiefs", &games, &lines);
        assert_eq!(first, second);
    }

    #[test]
    fn test_yearly_series_ascending() {
        let (games, lines) = fixture();
        let analysis = analyze_team("Chiefs", &games, &lines);
        let years: Vec<i32> = analysis.result.yearly.iter().map(|y| y.year).collect();
        assert_eq!(years, vec![2022, 2023]);
    }

    #[test]
    fn test_json_entry_point_rejects_non_arrays() {
        let err = analyze_team_json("Chiefs", &json!({"games": []}), &json!([]));
        assert!(matches!(err, Err(EngineError::GamesNotAList("an object"))));
        let err = analyze_team_json("Chiefs", &json!([]), &json!(null));
        assert!(matches!(err, Err(EngineError::LinesNotAList("null"))));
    }

    #[test]
    fn test_json_entry_point_degrades_bad_elements() {
        let games = json!([
            {
                "id": "g1",
                "season": 2023,
                "home_team": "Chiefs",
                "away_team": "Bills",
                "home_points": 27,
                "away_points": 20
            },
            42
        ]);
        let lines = json!([false]);
        let analysis = analyze_team_json("Chiefs", &games, &lines).expect("arrays are valid");
        let q = &analysis.result.data_quality;
        assert_eq!(q.total_games, 1);
        assert_eq!(q.invalid_games, 1);
        assert_eq!(q.estimated_spreads, 1);
    }

    #[test]
    fn test_head_to_head_filter() {
        let (games, _) = fixture();
        let meetings = head_to_head_games("Chiefs", "Bills", &games);
        let ids: Vec<&str> = meetings.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["g1", "g2"]);
    }

    #[test]
    fn test_compare_teams_is_two_independent_runs() {
        let (games, lines) = fixture();
        let comparison = compare_teams("Chiefs", &games, &lines, "Bills", &games, &lines);
        let solo = analyze_team("Bills", &games, &lines);
        assert_eq!(comparison.team_b, solo);
        assert_eq!(comparison.head_to_head.len(), 2);
    }
}
