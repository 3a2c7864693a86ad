use std::collections::BTreeMap;

use serde::Serialize;

use super::classify::{ClassifiedGame, FavoriteStatus, SpreadBucket, Venue};

/// Drill-down buckets: for every aggregate partition, the concrete games
/// behind it. Every classified game appears in the flat list and in exactly
/// one bucket of each partition; nothing is ever excluded here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrganizedGames {
    pub all: Vec<ClassifiedGame>,
    pub by_year: BTreeMap<i32, Vec<ClassifiedGame>>,
    pub home: Vec<ClassifiedGame>,
    pub away: Vec<ClassifiedGame>,
    pub favorite: Vec<ClassifiedGame>,
    pub underdog: Vec<ClassifiedGame>,
    pub small_spread: Vec<ClassifiedGame>,
    pub medium_spread: Vec<ClassifiedGame>,
    pub large_spread: Vec<ClassifiedGame>,
    pub huge_spread: Vec<ClassifiedGame>,
}

impl OrganizedGames {
    pub fn insert(&mut self, game: ClassifiedGame) {
        self.by_year.entry(game.year).or_default().push(game.clone());
        match game.venue {
            Venue::Home => self.home.push(game.clone()),
            Venue::Away => self.away.push(game.clone()),
        }
        match game.favorite_status {
            FavoriteStatus::Favorite => self.favorite.push(game.clone()),
            FavoriteStatus::Underdog => self.underdog.push(game.clone()),
        }
        match game.spread_bucket {
            SpreadBucket::Small => self.small_spread.push(game.clone()),
            SpreadBucket::Medium => self.medium_spread.push(game.clone()),
            SpreadBucket::Large => self.large_spread.push(game.clone()),
            SpreadBucket::Huge => self.huge_spread.push(game.clone()),
        }
        self.all.push(game);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::classify::AtsOutcome;
    use crate::engine::spread::ResolvedSpread;
    use crate::models::GameRecord;

    fn classified(
        id: &str,
        year: i32,
        venue: Venue,
        favorite_status: FavoriteStatus,
        spread_bucket: SpreadBucket,
    ) -> ClassifiedGame {
        ClassifiedGame {
            game: GameRecord {
                id: id.into(),
                season: Some(year),
                season_type: None,
                week: None,
                start_date: None,
                home_team: Some("Chiefs".into()),
                away_team: Some("Bills".into()),
                home_points: Some(24),
                away_points: Some(17),
            },
            spread: ResolvedSpread {
                game_id: id.into(),
                value: -3.0,
                source: "DraftKings".into(),
                verified: true,
            },
            team_score: 24,
            opponent_score: 17,
            opponent: "Bills".into(),
            actual_margin: 7.0,
            ats_margin: 10.0,
            outcome: AtsOutcome::Win,
            venue,
            favorite_status,
            spread_bucket,
            year,
        }
    }

    #[test]
    fn test_game_lands_in_every_partition() {
        let mut organized = OrganizedGames::default();
        organized.insert(classified(
            "g1",
            2022,
            Venue::Away,
            FavoriteStatus::Underdog,
            SpreadBucket::Large,
        ));
        assert_eq!(organized.all.len(), 1);
        assert_eq!(organized.by_year.get(&2022).map(Vec::len), Some(1));
        assert_eq!(organized.away.len(), 1);
        assert_eq!(organized.underdog.len(), 1);
        assert_eq!(organized.large_spread.len(), 1);
        assert!(organized.home.is_empty());
        assert!(organized.favorite.is_empty());
        assert!(organized.small_spread.is_empty());
    }

    #[test]
    fn test_year_buckets_partition_all_games() {
        let mut organized = OrganizedGames::default();
        for (id, year) in [("g1", 2021), ("g2", 2022), ("g3", 2021)] {
            organized.insert(classified(
                id,
                year,
                Venue::Home,
                FavoriteStatus::Favorite,
                SpreadBucket::Small,
            ));
        }
        let bucketed: usize = organized.by_year.values().map(Vec::len).sum();
        assert_eq!(bucketed, organized.all.len());
        assert_eq!(organized.by_year.get(&2021).map(Vec::len), Some(2));
    }
}
