mod manifest;
pub mod rating;
mod restaurant;
mod standings;
pub(crate) mod storage;

pub use manifest::{ManifestMetadata, StandingsManifest};
pub use rating::{NestedRatings, OrderedItem, OtherStuff, PizzaComponent, RatingRecord};
pub use restaurant::{parse_visit_date, Restaurant, Visit};
pub use standings::{
    Category, CategoryLeaderboard, DishLeaderboard, Leaderboard, LeaderboardEntry, Placement,
    RankedEntry, StandingsData,
};
pub use storage::Storage;
