use crate::domain::{
    Category, DishLeaderboard, Leaderboard, Placement, Restaurant, StandingsData,
    StandingsManifest, Storage,
};
use crate::error::Result;
use crate::services::engine;
use std::sync::Arc;
use tracing::info;

/// Loads a snapshot from storage, runs the engine and publishes the results.
pub struct StandingsService {
    store: Arc<dyn Storage>,
}

impl StandingsService {
    pub fn new(store: Arc<dyn Storage + 'static>) -> Self {
        info!("Created new Standings Service");
        Self { store }
    }

    fn load(&self) -> Result<Vec<Restaurant>> {
        let restaurants = self.store.load_restaurants()?;
        info!(
            "Loaded snapshot with {} restaurants and {} visits",
            restaurants.len(),
            restaurants.iter().map(|r| r.visits.len()).sum::<usize>()
        );
        Ok(restaurants)
    }

    /// Computes the full bundle and saves it as the standings manifest.
    pub fn publish_all(&self) -> Result<StandingsData> {
        let restaurants = self.load()?;
        let standings = engine::compute_standings(&restaurants);

        let manifest = StandingsManifest::new(&restaurants, standings);
        self.store.save_manifest(&manifest)?;
        info!(
            "Saved standings manifest with {} leaderboards",
            manifest.metadata.leaderboards
        );

        Ok(manifest.standings)
    }

    /// Computes and saves a single category leaderboard.
    pub fn publish_category(&self, category: Category) -> Result<Leaderboard> {
        let restaurants = self.load()?;
        let leaderboard = engine::leaderboard_for(&restaurants, category);
        self.store.save_leaderboard(category.key(), &leaderboard)?;
        info!("Saved {category} leaderboard with {} entries", leaderboard.len());
        Ok(leaderboard)
    }

    /// Computes and saves one leaderboard per same-named dish.
    pub fn publish_dishes(&self) -> Result<Vec<DishLeaderboard>> {
        let restaurants = self.load()?;
        let dishes = engine::same_named_dishes_for(&restaurants);
        for dish in &dishes {
            let name = format!("dish-{}", file_stem(&dish.key));
            self.store.save_leaderboard(&name, &dish.leaderboard)?;
        }
        info!("Saved {} same-named dish leaderboards", dishes.len());
        Ok(dishes)
    }

    /// Every leaderboard position held by one restaurant.
    pub fn placements(&self, restaurant_id: &str) -> Result<Vec<Placement>> {
        let restaurants = self.load()?;
        let standings = engine::compute_standings(&restaurants);
        Ok(engine::placements_for(&standings, restaurant_id))
    }
}

fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            c if c.is_alphanumeric() => c,
            _ => '_',
        })
        .collect::<String>()
        .split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
