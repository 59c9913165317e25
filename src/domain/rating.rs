use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::trace;

pub const OVERALL_KEY: &str = "overall";
pub const PIZZA_OVERALL_KEY: &str = "pizzaOverall";
pub const PIZZAS_KEY: &str = "pizzas";
pub const APPETIZERS_KEY: &str = "appetizers";
pub const PIZZA_COMPONENTS_KEY: &str = "pizza-components";
pub const OTHER_STUFF_KEY: &str = "the-other-stuff";

/// The fixed pizza-component vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PizzaComponent {
    Crust,
    Sauce,
    Bake,
    Consistency,
    Toppings,
    Cheese,
}

impl PizzaComponent {
    pub const ALL: [Self; 6] = [
        Self::Crust,
        Self::Sauce,
        Self::Bake,
        Self::Consistency,
        Self::Toppings,
        Self::Cheese,
    ];

    /// Key used in stored rating records.
    pub fn key(self) -> &'static str {
        match self {
            Self::Crust => "crust",
            Self::Sauce => "sauce",
            Self::Bake => "bake",
            Self::Consistency => "consistency",
            Self::Toppings => "toppings",
            Self::Cheese => "cheese",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Crust => "Crust",
            Self::Sauce => "Sauce",
            Self::Bake => "Bake",
            Self::Consistency => "Consistency",
            Self::Toppings => "Toppings",
            Self::Cheese => "Cheese",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|component| component.key() == key)
    }
}

/// The fixed "other stuff" vocabulary: everything about a visit that isn't the pizza.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OtherStuff {
    Appetizers,
    WaitStaff,
    Atmosphere,
    Service,
    Value,
    Beverages,
}

impl OtherStuff {
    pub const ALL: [Self; 6] = [
        Self::Appetizers,
        Self::WaitStaff,
        Self::Atmosphere,
        Self::Service,
        Self::Value,
        Self::Beverages,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Appetizers => "appetizers",
            Self::WaitStaff => "wait-staff",
            Self::Atmosphere => "atmosphere",
            Self::Service => "service",
            Self::Value => "value",
            Self::Beverages => "beverages",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Appetizers => "Appetizers",
            Self::WaitStaff => "Wait Staff",
            Self::Atmosphere => "Atmosphere",
            Self::Service => "Service",
            Self::Value => "Value",
            Self::Beverages => "Beverages",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|item| item.key() == key)
    }
}

/// One ordered dish (pizza or appetizer) with its free-text description.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderedItem {
    pub order: String,
    pub rating: Option<f64>,
}

/// Canonical nested view of a rating record.
///
/// Only finite scores are ever stored here; anything else was dropped at load time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NestedRatings {
    pub overall: Option<f64>,
    pub pizza_overall: Option<f64>,
    pub pizzas: Vec<OrderedItem>,
    pub appetizers: Vec<OrderedItem>,
    pub pizza_components: BTreeMap<PizzaComponent, f64>,
    pub other_stuff: BTreeMap<OtherStuff, f64>,
}

/// A rating record as stored, tagged by shape when it is loaded.
///
/// A stored record is nested iff at least one of its values is an object or
/// an array. Every record is classified on its own since visits of the same
/// restaurant may use different shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum RatingRecord {
    /// Legacy category-key to score map.
    Flat(BTreeMap<String, f64>),
    Nested(NestedRatings),
}

impl Default for RatingRecord {
    fn default() -> Self {
        Self::Flat(BTreeMap::new())
    }
}

impl RatingRecord {
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(_))
    }

    /// Classifies a raw JSON value. Never fails: malformed input yields an empty record.
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(map) = value else {
            trace!("Rating record is not an object, treating as empty");
            return Self::default();
        };

        if map.values().any(|v| v.is_object() || v.is_array()) {
            Self::Nested(nested_from_map(map))
        } else {
            Self::Flat(
                map.iter()
                    .filter_map(|(key, v)| score_from_value(v).map(|score| (key.clone(), score)))
                    .collect(),
            )
        }
    }
}

impl<'de> Deserialize<'de> for RatingRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Reads a score from a JSON value.
///
/// Numbers and numeric strings count; `null`, non-finite values and anything
/// else are absent.
pub fn score_from_value(value: &Value) -> Option<f64> {
    let score = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    score.is_finite().then_some(score)
}

fn nested_from_map(map: &Map<String, Value>) -> NestedRatings {
    NestedRatings {
        overall: map.get(OVERALL_KEY).and_then(score_from_value),
        pizza_overall: map.get(PIZZA_OVERALL_KEY).and_then(score_from_value),
        pizzas: ordered_items(map.get(PIZZAS_KEY)),
        appetizers: ordered_items(map.get(APPETIZERS_KEY)),
        pizza_components: vocabulary_scores(map.get(PIZZA_COMPONENTS_KEY), PizzaComponent::from_key),
        other_stuff: vocabulary_scores(map.get(OTHER_STUFF_KEY), OtherStuff::from_key),
    }
}

fn ordered_items(value: Option<&Value>) -> Vec<OrderedItem> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let item = item.as_object()?;
            let order = match item.get("order") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => String::new(),
            };
            Some(OrderedItem {
                order,
                rating: item.get("rating").and_then(score_from_value),
            })
        })
        .collect()
}

fn vocabulary_scores<K: Ord>(
    value: Option<&Value>,
    parse_key: impl Fn(&str) -> Option<K>,
) -> BTreeMap<K, f64> {
    let Some(Value::Object(map)) = value else {
        return BTreeMap::new();
    };

    map.iter()
        .filter_map(|(key, v)| {
            let Some(category) = parse_key(key) else {
                trace!("Ignoring unknown rating key {key}");
                return None;
            };
            score_from_value(v).map(|score| (category, score))
        })
        .collect()
}
