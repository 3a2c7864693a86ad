use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate};
use serde::Serialize;

use super::classify::{AtsOutcome, ClassifiedGame};
use super::situational::Record;
use crate::models::GameRecord;

/// Year attributed when a record has no season and no parseable start date.
/// A weak fallback, kept deliberately visible rather than dropping the game.
pub const FALLBACK_YEAR: i32 = 2024;

/// ATS margin beyond which a game is notable (strictly greater-than; a margin
/// of exactly 10 does not qualify).
pub const NOTABLE_MARGIN: f64 = 10.0;

/// Maximum entries retained in each notable-games list.
pub const MAX_NOTABLE: usize = 10;

/// One season's tally in the win-percentage time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlySummary {
    pub year: i32,
    pub record: Record,
    pub win_percentage: f64,
}

/// Accumulates one `Record` per attributed season year.
#[derive(Debug, Default)]
pub struct YearlyRollup {
    years: BTreeMap<i32, Record>,
}

impl YearlyRollup {
    pub fn add(&mut self, game: &ClassifiedGame) {
        self.years.entry(game.year).or_default().add(game.outcome);
    }

    /// Final time series, ascending by year.
    pub fn finish(self) -> Vec<YearlySummary> {
        self.years
            .into_iter()
            .map(|(year, record)| YearlySummary {
                year,
                record,
                win_percentage: record.win_percentage(),
            })
            .collect()
    }
}

/// Attribute a season year: the record's season field, else the calendar year
/// of a parseable start date, else `FALLBACK_YEAR`.
pub fn attribute_year(game: &GameRecord) -> i32 {
    if let Some(season) = game.season {
        return season;
    }
    game.start_date
        .as_deref()
        .and_then(parse_start_year)
        .unwrap_or(FALLBACK_YEAR)
}

/// Feeds deliver dates as RFC 3339 timestamps or bare dates; accept both.
fn parse_start_year(raw: &str) -> Option<i32> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.year());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().map(|d| d.year())
}

/// A best-cover or worst-beat entry, carrying everything needed to render a
/// human-readable justification without re-deriving it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotableGame {
    pub opponent: String,
    pub date: Option<String>,
    /// Team-perspective spread
    pub spread: f64,
    /// Literal score string, team side first (e.g. "31-17")
    pub score: String,
    /// ATS margin
    pub margin: f64,
    pub year: i32,
    pub outcome: AtsOutcome,
    /// Spread source label (provider name or "ESTIMATED")
    pub source: String,
}

/// Tracks the largest-magnitude covers and non-covers across the pass.
#[derive(Debug, Default)]
pub struct NotableTracker {
    best_covers: Vec<NotableGame>,
    worst_beats: Vec<NotableGame>,
}

impl NotableTracker {
    pub fn add(&mut self, game: &ClassifiedGame) {
        if game.ats_margin > NOTABLE_MARGIN {
            self.best_covers.push(notable_from(game));
        } else if game.ats_margin < -NOTABLE_MARGIN {
            self.worst_beats.push(notable_from(game));
        }
    }

    /// Sort (covers descending, beats ascending) and cap both lists.
    pub fn finish(mut self) -> (Vec<NotableGame>, Vec<NotableGame>) {
        self.best_covers
            .sort_by(|a, b| b.margin.total_cmp(&a.margin));
        self.best_covers.truncate(MAX_NOTABLE);
        self.worst_beats
            .sort_by(|a, b| a.margin.total_cmp(&b.margin));
        self.worst_beats.truncate(MAX_NOTABLE);
        (self.best_covers, self.worst_beats)
    }
}

fn notable_from(game: &ClassifiedGame) -> NotableGame {
    NotableGame {
        opponent: game.opponent.clone(),
        date: game.game.start_date.clone(),
        spread: game.spread.value,
        score: format!("{}-{}", game.team_score, game.opponent_score),
        margin: game.ats_margin,
        year: game.year,
        outcome: game.outcome,
        source: game.spread.source.clone(),
    }
}
