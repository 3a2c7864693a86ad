use std::collections::BTreeSet;

use serde::Serialize;

use super::spread::ResolvedSpread;

/// The engine's built-in confidence signal: how much of the output rests on
/// verified sportsbook lines versus estimates. Surfaced with every result,
/// never silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataQuality {
    /// Games that reached classification
    pub total_games: u32,
    pub verified_spreads: u32,
    pub estimated_spreads: u32,
    /// Rejected records; these never reached classification and do not
    /// count toward `total_games`
    pub invalid_games: u32,
    /// round(100 * verified / total), 0 when no games
    pub score: u32,
    /// Provider names that actually contributed verified lines
    pub sources: BTreeSet<String>,
}

impl DataQuality {
    pub fn record_classified(&mut self, spread: &ResolvedSpread) {
        self.total_games += 1;
        if spread.verified {
            self.verified_spreads += 1;
            self.sources.insert(spread.source.clone());
        } else {
            self.estimated_spreads += 1;
        }
    }

    pub fn record_invalid(&mut self) {
        self.invalid_games += 1;
    }

    /// Derive the confidence score once accumulation is done.
    pub fn finish(mut self) -> Self {
        self.score = if self.total_games == 0 {
            0
        } else {
            (100.0 * self.verified_spreads as f64 / self.total_games as f64).round() as u32
        };
        self
    }

    /// Fraction of classified games that needed an estimated spread.
    pub fn estimated_fraction(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.estimated_spreads as f64 / self.total_games as f64
        }
    }
}
