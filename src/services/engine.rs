use crate::domain::{
    Category, CategoryLeaderboard, DishLeaderboard, Leaderboard, LeaderboardEntry, OtherStuff,
    PizzaComponent, Placement, Restaurant, StandingsData,
};
use crate::services::collecting::collect;
use crate::services::matching::same_named_dishes;
use crate::services::ranking::rank;
use tracing::{debug, info};

/// Computes every leaderboard family from a complete snapshot.
///
/// Pure: the input is never modified and every call allocates fresh output,
/// so repeated calls on the same snapshot give identical results.
pub fn compute_standings(restaurants: &[Restaurant]) -> StandingsData {
    let mut collected = collect(restaurants);

    let pizza_components = PizzaComponent::ALL
        .into_iter()
        .filter_map(|component| {
            let entries = collected.take(Category::Component(component));
            non_empty(component, component.label(), entries)
        })
        .collect();

    let other_stuff = OtherStuff::ALL
        .into_iter()
        .filter_map(|item| {
            let entries = collected.take(Category::OtherStuff(item));
            non_empty(item, item.label(), entries)
        })
        .collect();

    let same_named = same_named_dishes(collected.get(Category::NamedPizza));

    let standings = StandingsData {
        overall: rank(collected.take(Category::Overall)),
        pizza_overall: rank(collected.take(Category::PizzaOverall)),
        pizza_components,
        other_stuff,
        same_named,
        top_pizzas: rank(collected.take(Category::NamedPizza)),
        top_appetizers: rank(collected.take(Category::NamedAppetizer)),
    };

    info!(
        "Computed standings for {} restaurants: {} overall, {} component and {} other-stuff leaderboards",
        restaurants.len(),
        standings.overall.len(),
        standings.pizza_components.len(),
        standings.other_stuff.len()
    );

    standings
}

/// Representative entries for one category, unranked, in restaurant-name order.
pub fn entries_for(restaurants: &[Restaurant], category: Category) -> Vec<LeaderboardEntry> {
    collect(restaurants).take(category)
}

/// A single leaderboard. Unlike the list families of [`compute_standings`],
/// an empty category yields an empty leaderboard rather than nothing.
pub fn leaderboard_for(restaurants: &[Restaurant], category: Category) -> Leaderboard {
    let leaderboard = rank(entries_for(restaurants, category));
    debug!("Ranked {} entries for {category}", leaderboard.len());
    leaderboard
}

/// Only the cross-restaurant dish comparisons.
pub fn same_named_dishes_for(restaurants: &[Restaurant]) -> Vec<DishLeaderboard> {
    same_named_dishes(collect(restaurants).get(Category::NamedPizza))
}

/// Every position a restaurant holds, in leaderboard presentation order.
pub fn placements_for(standings: &StandingsData, restaurant_id: &str) -> Vec<Placement> {
    let mut placements = Vec::new();

    for category in Category::all() {
        if let Some(leaderboard) = standings.leaderboard(category) {
            placements.extend(placements_in(leaderboard, category, None, restaurant_id));
        }
    }

    for dish in &standings.same_named {
        placements.extend(placements_in(
            &dish.leaderboard,
            Category::NamedPizza,
            Some(&dish.display_name),
            restaurant_id,
        ));
    }

    placements
}

fn placements_in<'a>(
    leaderboard: &'a Leaderboard,
    category: Category,
    dish: Option<&'a String>,
    restaurant_id: &'a str,
) -> impl Iterator<Item = Placement> + 'a {
    leaderboard
        .iter()
        .filter(move |ranked| ranked.entry.restaurant_id == restaurant_id)
        .map(move |ranked| Placement {
            category,
            dish: dish.cloned(),
            rank: ranked.rank,
            is_tied: ranked.is_tied,
            rating: ranked.entry.rating,
            out_of: leaderboard.len(),
            item: ranked.entry.item.clone(),
        })
}

fn non_empty<C>(
    category: C,
    label: &'static str,
    entries: Vec<LeaderboardEntry>,
) -> Option<CategoryLeaderboard<C>> {
    if entries.is_empty() {
        return None;
    }
    Some(CategoryLeaderboard {
        category,
        label,
        leaderboard: rank(entries),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{parse_visit_date, RatingRecord, Visit};
    use serde_json::{json, Value};

    fn restaurant(id: &str, name: &str, visits: &[(&str, Value)]) -> Restaurant {
        visits.iter().fold(Restaurant::new(id, name), |r, (date, ratings)| {
            r.with_visit(Visit::new(
                parse_visit_date(date),
                RatingRecord::from_value(ratings),
            ))
        })
    }

    fn snapshot() -> Vec<Restaurant> {
        vec![
            restaurant(
                "1",
                "Lucali",
                &[(
                    "2023-04-01",
                    json!({
                        "overall": 4.5,
                        "pizzas": [{ "order": "14\" pepperoni, sausage", "rating": 4.5 }],
                        "pizza-components": { "crust": 5 },
                    }),
                )],
            ),
            restaurant(
                "2",
                "Razza",
                &[(
                    "2023-05-01",
                    json!({
                        "overall": 4.8,
                        "pizzas": [{ "order": "sausage, pepperoni", "rating": 4.0 }],
                        "the-other-stuff": { "service": 4 },
                    }),
                )],
            ),
        ]
    }

    #[test]
    fn list_families_omit_empty_categories() {
        let standings = compute_standings(&snapshot());

        let components: Vec<_> = standings
            .pizza_components
            .iter()
            .map(|board| board.category)
            .collect();
        assert_eq!(components, vec![PizzaComponent::Crust]);
        let other: Vec<_> = standings.other_stuff.iter().map(|b| b.category).collect();
        assert_eq!(other, vec![OtherStuff::Service]);
        assert_eq!(standings.same_named.len(), 1);
        assert!(standings.top_appetizers.is_empty());
    }

    #[test]
    fn headline_leaderboards_are_ranked() {
        let standings = compute_standings(&snapshot());
        let overall: Vec<_> = standings
            .overall
            .iter()
            .map(|ranked| (ranked.entry.restaurant_name.as_str(), ranked.rank))
            .collect();
        assert_eq!(overall, vec![("Razza", 1), ("Lucali", 2)]);

        let pizza_overall: Vec<_> = standings
            .pizza_overall
            .iter()
            .map(|ranked| ranked.entry.rating)
            .collect();
        assert_eq!(pizza_overall, vec![4.5, 4.0]);
    }

    #[test]
    fn helper_queries_are_sub_views_of_the_full_computation() {
        let restaurants = snapshot();
        let standings = compute_standings(&restaurants);

        assert_eq!(
            leaderboard_for(&restaurants, Category::Overall),
            standings.overall
        );
        assert_eq!(same_named_dishes_for(&restaurants), standings.same_named);
        assert!(leaderboard_for(&restaurants, Category::Component(PizzaComponent::Bake)).is_empty());
        assert_eq!(entries_for(&restaurants, Category::NamedPizza).len(), 2);
    }

    #[test]
    fn placements_cover_every_leaderboard_a_restaurant_appears_in() {
        let standings = compute_standings(&snapshot());
        let placements = placements_for(&standings, "1");

        let summary: Vec<_> = placements
            .iter()
            .map(|p| (p.category, p.dish.as_deref(), p.rank, p.out_of))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Category::Overall, None, 2, 2),
                (Category::PizzaOverall, None, 1, 2),
                (Category::Component(PizzaComponent::Crust), None, 1, 1),
                (Category::NamedPizza, None, 1, 2),
                (Category::NamedPizza, Some("Pepperoni & Sausage"), 1, 2),
            ]
        );
        assert!(placements_for(&standings, "missing").is_empty());
    }
}
