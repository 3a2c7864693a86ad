use serde::Serialize;
use tracing::debug;

use crate::models::{GameRecord, LineRecord};

/// Sportsbooks we trust, most trusted first. Matched case-insensitively as a
/// substring so feed variants like "ESPN BET" or "DraftKings (NJ)" still hit.
pub const PROVIDER_PRIORITY: [&str; 3] = ["ESPN Bet", "DraftKings", "Bovada"];

/// Source label for spreads produced by the fallback estimator.
pub const ESTIMATED_SOURCE: &str = "ESTIMATED";

/// Source label when a line exists but its provider field is empty.
pub const UNKNOWN_SOURCE: &str = "Unknown Sportsbook";

/// Home-field edge in points used by the fallback estimator.
const HOME_FIELD_POINTS: f64 = 2.5;

/// Regression factor applied to the actual margin when estimating a missing
/// line. Final margins overstate pre-game expectations, so shrink them.
const MARGIN_REGRESSION: f64 = 0.7;

/// A point spread resolved to the analyzed team's perspective.
/// Positive value = the team was the underdog by that many points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSpread {
    pub game_id: String,
    /// Team-perspective spread (home-relative value sign-flipped for away games)
    pub value: f64,
    /// Winning provider's name, or `ESTIMATED_SOURCE` / `UNKNOWN_SOURCE`
    pub source: String,
    /// True when the value came from an actual sportsbook line
    pub verified: bool,
}

/// Select the most trustworthy spread for one game, or estimate one.
///
/// `lines` must already be filtered to this game's ID (the facade pre-groups
/// them). Lines without a numeric spread cannot contribute and are skipped.
/// This function always produces a numeric value; when no usable line exists
/// it falls back to a conservative estimate marked `verified = false`.
pub fn resolve_spread(game: &GameRecord, lines: &[&LineRecord], is_home: bool) -> ResolvedSpread {
    let candidates: Vec<&LineRecord> = lines
        .iter()
        .copied()
        .filter(|l| l.spread.is_some())
        .collect();

    if let Some(line) = pick_line(&candidates) {
        // Safe: candidates are filtered on spread.is_some()
        let home_relative = line.spread.unwrap_or(0.0);
        let value = if is_home { home_relative } else { -home_relative };
        let source = match line.provider.as_deref() {
            Some(p) if !p.trim().is_empty() => p.to_string(),
            _ => UNKNOWN_SOURCE.to_string(),
        };
        debug!(
            game_id = %game.id,
            source = %source,
            spread = value,
            "resolved verified spread"
        );
        return ResolvedSpread {
            game_id: game.id.clone(),
            value,
            source,
            verified: true,
        };
    }

    let value = estimate_spread(game, is_home);
    debug!(game_id = %game.id, spread = value, "no usable line; estimated spread");
    ResolvedSpread {
        game_id: game.id.clone(),
        value,
        source: ESTIMATED_SOURCE.to_string(),
        verified: false,
    }
}

/// Priority providers first (first priority hit wins), then first available.
fn pick_line<'a>(candidates: &[&'a LineRecord]) -> Option<&'a LineRecord> {
    for wanted in PROVIDER_PRIORITY {
        let wanted_lower = wanted.to_lowercase();
        let hit = candidates.iter().find(|l| {
            l.provider
                .as_deref()
                .map(|p| p.to_lowercase().contains(&wanted_lower))
                .unwrap_or(false)
        });
        if let Some(line) = hit {
            return Some(line);
        }
    }
    candidates.first().copied()
}

/// Conservative team-perspective estimate when no line exists: shrink the
/// actual margin, then charge the home side its home-field edge. With no
/// scores at all, the home-field edge alone is the estimate.
fn estimate_spread(game: &GameRecord, is_home: bool) -> f64 {
    let home_adjust = if is_home {
        -HOME_FIELD_POINTS
    } else {
        HOME_FIELD_POINTS
    };
    match (game.home_points, game.away_points) {
        (Some(home), Some(away)) => {
            let team_margin = if is_home {
                (home - away) as f64
            } else {
                (away - home) as f64
            };
            MARGIN_REGRESSION * team_margin + home_adjust
        }
        _ => home_adjust,
    }
}
