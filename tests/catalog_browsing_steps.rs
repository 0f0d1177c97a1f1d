//! Behaviour tests for browsing and searching the integration catalog.

mod catalog_steps;

use catalog_steps::world::{CatalogWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/catalog_browsing.feature",
    name = "Look up an integration by id"
)]
#[tokio::test(flavor = "multi_thread")]
async fn look_up_integration(world: CatalogWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/catalog_browsing.feature",
    name = "Unknown integrations are absent"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_integration_absent(world: CatalogWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/catalog_browsing.feature",
    name = "Search matches feature tags"
)]
#[tokio::test(flavor = "multi_thread")]
async fn search_matches_features(world: CatalogWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/catalog_browsing.feature",
    name = "Browse by category"
)]
#[tokio::test(flavor = "multi_thread")]
async fn browse_by_category(world: CatalogWorld) {
    let _ = world;
}
