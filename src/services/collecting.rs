use crate::domain::{Category, LeaderboardEntry, Restaurant};
use crate::services::extraction::{extract, CategoryDatum};
use crate::services::matching::dish_key;
use crate::services::normalizing::normalize;
use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey<'a> {
    restaurant_id: &'a str,
    category: Category,
    dish: Option<String>,
}

/// Representative entries, one per restaurant (and dish) for each category.
///
/// Within a category, entries are in restaurant-name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedEntries {
    by_category: BTreeMap<Category, Vec<LeaderboardEntry>>,
}

impl CollectedEntries {
    pub fn get(&self, category: Category) -> &[LeaderboardEntry] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn take(&mut self, category: Category) -> Vec<LeaderboardEntry> {
        self.by_category.remove(&category).unwrap_or_default()
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.by_category.keys().copied()
    }
}

/// Restaurants in display-name order, ties broken by id.
pub fn by_name(restaurants: &[Restaurant]) -> Vec<&Restaurant> {
    let mut ordered: Vec<&Restaurant> = restaurants.iter().collect();
    ordered.sort_by_cached_key(|restaurant| {
        (restaurant.name.to_lowercase(), restaurant.id.clone())
    });
    ordered
}

/// Runs the extractor over every visit and keeps the best entry per group.
///
/// A group is a restaurant and a category, plus the dish for per-dish
/// categories. The best entry is the highest single rating; an exact tie goes
/// to the earliest visit. Ratings are never averaged across visits.
pub fn collect(restaurants: &[Restaurant]) -> CollectedEntries {
    let mut index: FxHashMap<GroupKey<'_>, usize> = FxHashMap::default();
    let mut best: Vec<(Category, LeaderboardEntry)> = Vec::new();

    for restaurant in by_name(restaurants) {
        for visit in &restaurant.visits {
            let ratings = normalize(&visit.ratings);

            for datum in extract(&ratings) {
                let category = datum.category;
                let key = GroupKey {
                    restaurant_id: &restaurant.id,
                    category,
                    dish: datum
                        .item
                        .as_deref()
                        .filter(|_| category.is_per_dish())
                        .map(dish_key),
                };
                let candidate = entry_for(restaurant, visit.date, datum);

                match index.get(&key) {
                    Some(&position) => {
                        let (_, current) = &mut best[position];
                        if beats(&candidate, current) {
                            *current = candidate;
                        }
                    }
                    None => {
                        index.insert(key, best.len());
                        best.push((category, candidate));
                    }
                }
            }
        }
    }

    let mut by_category: BTreeMap<Category, Vec<LeaderboardEntry>> = BTreeMap::new();
    for (category, entry) in best {
        by_category.entry(category).or_default().push(entry);
    }

    for (category, entries) in &by_category {
        debug!("Collected {} entries for {category}", entries.len());
    }

    CollectedEntries { by_category }
}

fn entry_for(
    restaurant: &Restaurant,
    date: Option<NaiveDate>,
    datum: CategoryDatum,
) -> LeaderboardEntry {
    LeaderboardEntry {
        restaurant_id: restaurant.id.clone(),
        restaurant_slug: restaurant.slug.clone(),
        restaurant_name: restaurant.name.clone(),
        rating: datum.value,
        item: datum.item,
        date,
    }
}

/// Whether `candidate` should replace `current` as the group's representative.
fn beats(candidate: &LeaderboardEntry, current: &LeaderboardEntry) -> bool {
    if candidate.rating != current.rating {
        return candidate.rating > current.rating;
    }
    match (candidate.date, current.date) {
        (Some(candidate_date), Some(current_date)) => candidate_date < current_date,
        (Some(_), None) => true,
        _ => false,
    }
}
