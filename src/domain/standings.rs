use crate::domain::rating::{OtherStuff, PizzaComponent};
use crate::error::{Result, StandingsError};
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A leaderboard family member: every category a leaderboard can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Overall,
    PizzaOverall,
    Component(PizzaComponent),
    OtherStuff(OtherStuff),
    /// Individual pizzas, one entry per restaurant and dish.
    NamedPizza,
    /// Individual appetizers, one entry per restaurant and dish.
    NamedAppetizer,
}

impl Category {
    /// Categories whose entries are keyed by dish as well as by restaurant.
    pub fn is_per_dish(self) -> bool {
        matches!(self, Self::NamedPizza | Self::NamedAppetizer)
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Overall => "overall",
            Self::PizzaOverall => "pizza-overall",
            Self::Component(component) => component.key(),
            Self::OtherStuff(item) => item.key(),
            Self::NamedPizza => "named-pizzas",
            Self::NamedAppetizer => "named-appetizers",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Overall => "Overall",
            Self::PizzaOverall => "Pizza Overall",
            Self::Component(component) => component.label(),
            Self::OtherStuff(item) => item.label(),
            Self::NamedPizza => "Pizzas",
            Self::NamedAppetizer => "Appetizers",
        }
    }

    /// Every category, in the order leaderboards are presented.
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::Overall, Self::PizzaOverall]
            .into_iter()
            .chain(PizzaComponent::ALL.into_iter().map(Self::Component))
            .chain(OtherStuff::ALL.into_iter().map(Self::OtherStuff))
            .chain([Self::NamedPizza, Self::NamedAppetizer])
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = StandingsError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .find(|category| category.key() == wanted)
            .ok_or_else(|| StandingsError::UnknownCategory(s.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// A derived, per-run entry: which restaurant achieved which rating, and when.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub restaurant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_slug: Option<String>,
    pub restaurant_name: String,
    pub rating: f64,
    /// Free-text dish description for per-dish categories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
    pub rank: usize,
    pub is_tied: bool,
}

/// Ranked entries sorted by rating, highest first.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<RankedEntry>,
}

impl Leaderboard {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedEntry> {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLeaderboard<C> {
    pub category: C,
    pub label: &'static str,
    pub leaderboard: Leaderboard,
}

/// Leaderboard comparing the same dish across restaurants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DishLeaderboard {
    /// Sorted topping tokens joined by `", "`.
    pub key: String,
    pub display_name: String,
    pub leaderboard: Leaderboard,
}

/// Every leaderboard family computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsData {
    pub overall: Leaderboard,
    pub pizza_overall: Leaderboard,
    pub pizza_components: Vec<CategoryLeaderboard<PizzaComponent>>,
    pub other_stuff: Vec<CategoryLeaderboard<OtherStuff>>,
    pub same_named: Vec<DishLeaderboard>,
    pub top_pizzas: Leaderboard,
    pub top_appetizers: Leaderboard,
}

impl StandingsData {
    /// Looks up one leaderboard by category. List families return `None` for
    /// categories that had no entries.
    pub fn leaderboard(&self, category: Category) -> Option<&Leaderboard> {
        match category {
            Category::Overall => Some(&self.overall),
            Category::PizzaOverall => Some(&self.pizza_overall),
            Category::Component(component) => self
                .pizza_components
                .iter()
                .find(|board| board.category == component)
                .map(|board| &board.leaderboard),
            Category::OtherStuff(item) => self
                .other_stuff
                .iter()
                .find(|board| board.category == item)
                .map(|board| &board.leaderboard),
            Category::NamedPizza => Some(&self.top_pizzas),
            Category::NamedAppetizer => Some(&self.top_appetizers),
        }
    }
}

/// One leaderboard position held by a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub category: Category,
    /// Same-named dish display name, when the placement comes from a dish comparison.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dish: Option<String>,
    pub rank: usize,
    pub is_tied: bool,
    pub rating: f64,
    pub out_of: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
}
