//! Then steps for catalog browsing BDD scenarios.

use super::world::CatalogWorld;
use rstest_bdd_macros::then;

#[then(r#"the integration "{id}" is returned"#)]
fn integration_returned(world: &CatalogWorld, id: String) -> Result<(), eyre::Report> {
    let definition = world
        .looked_up
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no lookup was performed"))?
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected integration {id}, found none"))?;
    if definition.id().as_str() != id {
        return Err(eyre::eyre!("expected {id}, found {}", definition.id()));
    }
    Ok(())
}

#[then("no integration is returned")]
fn no_integration_returned(world: &CatalogWorld) -> Result<(), eyre::Report> {
    match world.looked_up.as_ref() {
        Some(None) => Ok(()),
        Some(Some(definition)) => Err(eyre::eyre!("unexpected integration {}", definition.id())),
        None => Err(eyre::eyre!("no lookup was performed")),
    }
}

#[then(r#"the results include "{id}""#)]
fn results_include(world: &CatalogWorld, id: String) -> Result<(), eyre::Report> {
    if !world
        .results
        .iter()
        .any(|definition| definition.id().as_str() == id)
    {
        return Err(eyre::eyre!("{id} missing from {} results", world.results.len()));
    }
    Ok(())
}

#[then(r#"every result is in the "{category}" category"#)]
fn every_result_in_category(world: &CatalogWorld, category: String) -> Result<(), eyre::Report> {
    if world.results.is_empty() {
        return Err(eyre::eyre!("expected at least one result"));
    }
    if let Some(stray) = world
        .results
        .iter()
        .find(|definition| definition.category().as_str() != category)
    {
        return Err(eyre::eyre!("{} is in {}", stray.id(), stray.category()));
    }
    Ok(())
}
