use serde::Serialize;

use super::classify::{AtsOutcome, ClassifiedGame, FavoriteStatus, SpreadBucket, Venue};

/// Win/loss/push tally. Pushes are tracked but excluded from the
/// win-percentage denominator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
}

impl Record {
    pub fn add(&mut self, outcome: AtsOutcome) {
        match outcome {
            AtsOutcome::Win => self.wins += 1,
            AtsOutcome::Loss => self.losses += 1,
            AtsOutcome::Push => self.pushes += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.pushes
    }

    /// 100 * wins / (wins + losses); 0 when no decided games.
    pub fn win_percentage(&self) -> f64 {
        let decided = self.wins + self.losses;
        if decided == 0 {
            0.0
        } else {
            100.0 * self.wins as f64 / decided as f64
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpreadSizeRecords {
    pub small: Record,
    pub medium: Record,
    pub large: Record,
    pub huge: Record,
}

/// Tallies across three orthogonal partitions: venue, favorite status, and
/// spread size. Every classified game lands in exactly one Record per
/// partition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Situational {
    pub home: Record,
    pub away: Record,
    pub favorite: Record,
    pub underdog: Record,
    pub spread_sizes: SpreadSizeRecords,
}

impl Situational {
    pub fn add(&mut self, game: &ClassifiedGame) {
        match game.venue {
            Venue::Home => self.home.add(game.outcome),
            Venue::Away => self.away.add(game.outcome),
        }
        match game.favorite_status {
            FavoriteStatus::Favorite => self.favorite.add(game.outcome),
            FavoriteStatus::Underdog => self.underdog.add(game.outcome),
        }
        let size_record = match game.spread_bucket {
            SpreadBucket::Small => &mut self.spread_sizes.small,
            SpreadBucket::Medium => &mut self.spread_sizes.medium,
            SpreadBucket::Large => &mut self.spread_sizes.large,
            SpreadBucket::Huge => &mut self.spread_sizes.huge,
        };
        size_record.add(game.outcome);
    }
}
