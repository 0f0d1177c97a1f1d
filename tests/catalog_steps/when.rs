//! When steps for catalog browsing BDD scenarios.

use super::world::CatalogWorld;
use rstest_bdd_macros::when;
use switchyard::catalog::domain::IntegrationCategory;

#[when(r#"integration "{id}" is looked up"#)]
fn look_up_integration(world: &mut CatalogWorld, id: String) -> Result<(), eyre::Report> {
    let found = world.catalog()?.get_by_id(&id).cloned();
    world.looked_up = Some(found);
    Ok(())
}

#[when(r#"integrations are searched for "{query}""#)]
fn search_integrations(world: &mut CatalogWorld, query: String) -> Result<(), eyre::Report> {
    let results = world
        .catalog()?
        .search(&query)
        .into_iter()
        .cloned()
        .collect();
    world.results = results;
    Ok(())
}

#[when(r#"the "{category}" category is listed"#)]
fn list_category(world: &mut CatalogWorld, category: String) -> Result<(), eyre::Report> {
    let parsed = IntegrationCategory::try_from(category.as_str())?;
    let results = world
        .catalog()?
        .get_by_category(parsed)
        .into_iter()
        .cloned()
        .collect();
    world.results = results;
    Ok(())
}
