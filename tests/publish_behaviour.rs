//! End-to-end runs of the standings service against files on disk.

use serde_json::Value;
use standings::domain::PizzaComponent;
use standings::infrastructure::FileSystemStore;
use standings::services::StandingsService;
use standings::{Category, StandingsError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/restaurants.json")
}

fn service(data_dir: &Path) -> StandingsService {
    StandingsService::new(Arc::new(FileSystemStore::new(fixture(), data_dir)))
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read output")).expect("parse output")
}

#[test]
fn publishes_manifest_for_fixture_snapshot() {
    let dir = TempDir::new().expect("tempdir");
    let standings = service(dir.path()).publish_all().expect("publish");

    let overall: Vec<_> = standings
        .overall
        .iter()
        .map(|ranked| (ranked.entry.restaurant_name.as_str(), ranked.rank))
        .collect();
    assert_eq!(overall, vec![("Razza", 1), ("Lucali", 2)]);

    let manifest = read_json(&dir.path().join("standings.json"));
    assert_eq!(manifest["totalRestaurants"], 3);
    assert_eq!(manifest["totalVisits"], 4);
    assert_eq!(manifest["standings"]["overall"][0]["restaurantSlug"], "razza");
    assert_eq!(manifest["standings"]["overall"][0]["date"], "2024-03-09");
    assert_eq!(
        manifest["standings"]["sameNamed"][0]["displayName"],
        "Pepperoni & Sausage"
    );
    assert_eq!(manifest["metadata"]["sameNamedDishes"], 1);
}

#[test]
fn crust_ties_break_towards_the_earliest_visit() {
    let dir = TempDir::new().expect("tempdir");
    let crust = service(dir.path())
        .publish_category(Category::Component(PizzaComponent::Crust))
        .expect("publish");

    let rows: Vec<_> = crust
        .iter()
        .map(|ranked| {
            (
                ranked.entry.restaurant_name.as_str(),
                ranked.rank,
                ranked.is_tied,
                ranked.entry.date.map(|d| d.to_string()),
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Lucali", 1, true, Some("2023-08-01".to_string())),
            ("Razza", 1, true, Some("2022-11-19".to_string())),
        ]
    );

    let saved = read_json(&dir.path().join("leaderboards").join("crust.json"));
    assert_eq!(saved.as_array().map(Vec::len), Some(2));
}

#[test]
fn publishes_one_file_per_same_named_dish() {
    let dir = TempDir::new().expect("tempdir");
    let dishes = service(dir.path()).publish_dishes().expect("publish");

    assert_eq!(dishes.len(), 1);
    let saved = read_json(
        &dir.path()
            .join("leaderboards")
            .join("dish-pepperoni_sausage.json"),
    );
    assert_eq!(saved[0]["restaurantName"], "Razza");
    assert_eq!(saved[1]["item"], "14\" pepperoni, sausage");
}

#[test]
fn placements_for_a_restaurant() {
    let dir = TempDir::new().expect("tempdir");
    let placements = service(dir.path()).placements("3").expect("placements");

    let categories: Vec<_> = placements.iter().map(|p| p.category).collect();
    assert_eq!(
        categories,
        vec![Category::PizzaOverall, Category::NamedPizza]
    );
    assert!(placements.iter().all(|p| p.out_of >= p.rank));
}

#[test]
fn non_array_snapshot_fails_loudly() {
    let dir = TempDir::new().expect("tempdir");
    let snapshot = dir.path().join("snapshot.json");
    fs::write(&snapshot, r#"{ "restaurants": [] }"#).expect("write snapshot");

    let service = StandingsService::new(Arc::new(FileSystemStore::new(&snapshot, dir.path())));
    assert!(matches!(
        service.publish_all(),
        Err(StandingsError::InvalidSnapshot(_))
    ));
    assert!(!dir.path().join("standings.json").exists());
}
