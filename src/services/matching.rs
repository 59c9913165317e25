use crate::domain::{DishLeaderboard, LeaderboardEntry};
use crate::services::ranking::rank;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use strsim::normalized_levenshtein;
use tracing::{debug, info};

/// Leading pizza size: an integer followed by an inch mark.
static SIZE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*(\d+)\s*["“”″]\s*"#).expect("size token pattern is valid"));

const NEAR_MISS_THRESHOLD: f64 = 0.8;

/// The identity of a dish derived from its free-text order.
///
/// Two orders are the same dish when their topping sets are equal, whatever
/// the size, the ordering or the casing of the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishIdentity {
    pub size_inches: Option<u32>,
    /// Sorted, de-duplicated topping tokens.
    pub toppings: Vec<String>,
}

impl DishIdentity {
    /// Parses an order. Returns `None` when nothing but a size is left.
    pub fn parse(order: &str) -> Option<Self> {
        let lowered = order.to_lowercase();

        let (size_inches, rest) = match SIZE_TOKEN.captures(&lowered) {
            Some(captures) => {
                let size = captures.get(1).and_then(|m| m.as_str().parse().ok());
                let end = captures.get(0).map_or(0, |m| m.end());
                (size, lowered.get(end..).unwrap_or_default())
            }
            None => (None, lowered.as_str()),
        };

        let toppings: BTreeSet<String> = rest
            .split([',', ';'])
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();

        if toppings.is_empty() {
            return None;
        }

        Some(Self {
            size_inches,
            toppings: toppings.into_iter().collect(),
        })
    }

    pub fn key(&self) -> String {
        self.toppings.join(", ")
    }

    /// "Pepperoni" for one topping, "Pepperoni & Sausage" for two, and
    /// "Pepperoni Special" for three or more.
    pub fn display_name(&self) -> String {
        let names: Vec<String> = self.toppings.iter().map(|t| capitalize(t)).collect();
        match names.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [first, second] => format!("{first} & {second}"),
            [first, ..] => format!("{first} Special"),
        }
    }
}

/// Grouping key for a dish within one restaurant.
///
/// Falls back to the trimmed, lower-cased order when the order has no toppings.
pub fn dish_key(order: &str) -> String {
    DishIdentity::parse(order)
        .map(|identity| identity.key())
        .unwrap_or_else(|| order.trim().to_lowercase())
}

/// Groups per-pizza representative entries by dish identity and ranks every
/// dish served at two or more distinct restaurants.
///
/// Entries are expected to be reduced already, one per restaurant and dish.
pub fn same_named_dishes(entries: &[LeaderboardEntry]) -> Vec<DishLeaderboard> {
    let mut groups: BTreeMap<String, (DishIdentity, Vec<LeaderboardEntry>)> = BTreeMap::new();

    for entry in entries {
        let Some(identity) = entry.item.as_deref().and_then(DishIdentity::parse) else {
            continue;
        };
        groups
            .entry(identity.key())
            .or_insert_with(|| (identity, Vec::new()))
            .1
            .push(entry.clone());
    }

    log_near_misses(groups.keys());

    let mut leaderboards: Vec<DishLeaderboard> = groups
        .into_iter()
        .filter(|(_, (_, group))| distinct_restaurants(group) >= 2)
        .map(|(key, (identity, group))| DishLeaderboard {
            key,
            display_name: identity.display_name(),
            leaderboard: rank(group),
        })
        .collect();

    leaderboards.sort_by(|a, b| {
        a.display_name
            .cmp(&b.display_name)
            .then_with(|| a.key.cmp(&b.key))
    });

    info!(
        "Matched {} same-named dishes across restaurants",
        leaderboards.len()
    );
    leaderboards
}

fn distinct_restaurants(group: &[LeaderboardEntry]) -> usize {
    group
        .iter()
        .map(|entry| entry.restaurant_id.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

// Near misses are reported only, never merged.
fn log_near_misses<'a>(keys: impl Iterator<Item = &'a String>) {
    let keys: Vec<&String> = keys.collect();
    for (i, a) in keys.iter().enumerate() {
        for b in keys.iter().skip(i + 1) {
            let similarity = normalized_levenshtein(a, b);
            let nested = a.contains(b.as_str()) || b.contains(a.as_str());
            if similarity >= NEAR_MISS_THRESHOLD || nested {
                debug!("Dishes '{a}' and '{b}' look alike ({similarity:.2}) but are kept apart");
            }
        }
    }
}

/// Upper-cases the first letter of a topping; later words keep their case.
fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
