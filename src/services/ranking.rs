use crate::domain::{Leaderboard, LeaderboardEntry, RankedEntry};
use std::cmp::Ordering;

/// Ranks representative entries for one category.
///
/// Entries are sorted by rating, highest first. The sort is stable, so equal
/// ratings keep their input order. Ranks follow standard competition ranking:
/// equal ratings share a rank, and the next distinct rating is ranked one past
/// the number of entries above it. Every entry sharing its rating with another
/// is marked tied.
pub fn rank(mut entries: Vec<LeaderboardEntry>) -> Leaderboard {
    entries.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));

    let mut ranked: Vec<RankedEntry> = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        let (rank, is_tied) = match ranked.last_mut() {
            Some(previous) if previous.entry.rating == entry.rating => {
                previous.is_tied = true;
                (previous.rank, true)
            }
            _ => (position + 1, false),
        };
        ranked.push(RankedEntry {
            entry,
            rank,
            is_tied,
        });
    }

    Leaderboard { entries: ranked }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn entry(name: &str, rating: f64) -> LeaderboardEntry {
        LeaderboardEntry {
            restaurant_id: name.to_lowercase(),
            restaurant_slug: None,
            restaurant_name: name.to_string(),
            rating,
            item: None,
            date: None,
        }
    }

    fn ranks_and_ties(ratings: &[f64]) -> Vec<(usize, bool)> {
        let entries = ratings
            .iter()
            .enumerate()
            .map(|(i, &rating)| entry(&format!("R{i}"), rating))
            .collect();
        rank(entries)
            .iter()
            .map(|ranked| (ranked.rank, ranked.is_tied))
            .collect()
    }

    #[rstest]
    #[case(&[5.0, 5.0, 4.0, 3.0], &[(1, true), (1, true), (3, false), (4, false)])]
    #[case(&[3.0, 4.0, 5.0], &[(1, false), (2, false), (3, false)])]
    #[case(&[4.0, 4.0, 4.0], &[(1, true), (1, true), (1, true)])]
    #[case(&[5.0, 4.5, 4.5, 4.5, 2.0, 2.0], &[(1, false), (2, true), (2, true), (2, true), (5, true), (5, true)])]
    #[case(&[4.2], &[(1, false)])]
    fn assigns_competition_ranks(#[case] ratings: &[f64], #[case] expected: &[(usize, bool)]) {
        assert_eq!(ranks_and_ties(ratings), expected);
    }

    #[test]
    fn empty_input_yields_empty_leaderboard() {
        assert!(rank(Vec::new()).is_empty());
    }

    #[test]
    fn ties_keep_input_order() {
        let leaderboard = rank(vec![
            entry("Apizza Scholls", 4.0),
            entry("Best Pizza", 4.5),
            entry("Colony Grill", 4.0),
        ]);
        let names: Vec<_> = leaderboard
            .iter()
            .map(|ranked| ranked.entry.restaurant_name.as_str())
            .collect();
        assert_eq!(names, vec!["Best Pizza", "Apizza Scholls", "Colony Grill"]);
    }

    #[test]
    fn near_equal_ratings_are_not_tied() {
        let ranks = ranks_and_ties(&[4.1, 4.100_000_001]);
        assert_eq!(ranks, vec![(1, false), (2, false)]);
        let leaderboard = rank(vec![entry("A", 4.1), entry("B", 4.100_000_001)]);
        assert_eq!(leaderboard.entries[0].entry.restaurant_name, "B");
    }
}
