//! Snapshot builders shared by the integration tests.
#![allow(dead_code)]

use serde_json::Value;
use standings::domain::parse_visit_date;
use standings::{RatingRecord, Restaurant, Visit};

/// Builds a restaurant from `(date, rating record)` pairs.
pub fn restaurant(id: &str, name: &str, visits: &[(&str, Value)]) -> Restaurant {
    visits
        .iter()
        .fold(Restaurant::new(id, name), |restaurant, (date, ratings)| {
            restaurant.with_visit(Visit::new(
                parse_visit_date(date),
                RatingRecord::from_value(ratings),
            ))
        })
}

pub fn names_and_ranks(leaderboard: &standings::Leaderboard) -> Vec<(String, usize)> {
    leaderboard
        .iter()
        .map(|ranked| (ranked.entry.restaurant_name.clone(), ranked.rank))
        .collect()
}
