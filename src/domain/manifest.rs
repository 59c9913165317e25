use crate::domain::restaurant::Restaurant;
use crate::domain::standings::StandingsData;
use chrono::Local;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsManifest {
    pub total_restaurants: usize,
    pub total_visits: usize,
    pub last_updated: String,
    pub standings: StandingsData,
    pub metadata: ManifestMetadata,
}

#[derive(Default, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestMetadata {
    pub leaderboards: usize,
    pub same_named_dishes: usize,
    pub version: String,
}

impl StandingsManifest {
    pub fn new(restaurants: &[Restaurant], standings: StandingsData) -> Self {
        let total_visits = restaurants.iter().map(|r| r.visits.len()).sum();

        // Headline leaderboards are always present: overall, pizza overall, top pizzas, top appetizers.
        let leaderboards = 4
            + standings.pizza_components.len()
            + standings.other_stuff.len()
            + standings.same_named.len();

        Self {
            total_restaurants: restaurants.len(),
            total_visits,
            last_updated: Local::now().to_rfc3339(),
            metadata: ManifestMetadata {
                leaderboards,
                same_named_dishes: standings.same_named.len(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            standings,
        }
    }
}
