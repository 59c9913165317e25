use crate::domain::rating::RatingRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::trace;

/// A restaurant with every visit the club has made to it.
///
/// Only `id` is required. Any other field of the wrong type reads as absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Restaurant {
    #[serde(deserialize_with = "identifier")]
    pub id: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "visit_list")]
    pub visits: Vec<Visit>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Visit {
    pub id: Option<String>,
    pub date: Option<NaiveDate>,
    pub attendees: Vec<String>,
    pub notes: Option<String>,
    pub ratings: RatingRecord,
}

impl Restaurant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: None,
            name: name.into(),
            visits: Vec::new(),
        }
    }

    pub fn with_visit(mut self, visit: Visit) -> Self {
        self.visits.push(visit);
        self
    }
}

impl Visit {
    pub fn new(date: Option<NaiveDate>, ratings: RatingRecord) -> Self {
        Self {
            date,
            ratings,
            ..Self::default()
        }
    }

    /// Reads a visit from a JSON object, or `None` when the value is not one.
    ///
    /// The record may sit under `ratings` or the older `rating`; when both are
    /// present the first that is an object wins.
    pub fn from_value(value: &Value) -> Option<Self> {
        let Value::Object(map) = value else {
            trace!("Skipping visit that is not an object");
            return None;
        };

        Some(Self {
            id: map.get("id").and_then(value_to_identifier),
            date: map
                .get("date")
                .and_then(Value::as_str)
                .and_then(parse_visit_date),
            attendees: map.get("attendees").map(attendees).unwrap_or_default(),
            notes: map.get("notes").and_then(value_to_text),
            ratings: rating_record(map),
        })
    }
}

impl<'de> Deserialize<'de> for Visit {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).ok_or_else(|| serde::de::Error::custom("visit must be an object"))
    }
}

/// Parses an ISO date, accepting full timestamps by reading their date part.
pub fn parse_visit_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn rating_record(map: &Map<String, Value>) -> RatingRecord {
    ["ratings", "rating"]
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|value| value.is_object())
        .map(RatingRecord::from_value)
        .unwrap_or_default()
}

fn value_to_identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_to_text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn attendees(value: &Value) -> Vec<String> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items.iter().filter_map(value_to_identifier).collect()
}

fn identifier<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_identifier(&value)
        .ok_or_else(|| serde::de::Error::custom("restaurant id must be a string or a number"))
}

fn optional_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(&value))
}

fn text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

fn visit_list<'de, D>(deserializer: D) -> std::result::Result<Vec<Visit>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        trace!("Visits are not a list, treating as none");
        return Ok(Vec::new());
    };
    Ok(items.iter().filter_map(Visit::from_value).collect())
}
