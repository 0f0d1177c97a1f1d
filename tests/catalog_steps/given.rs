//! Given steps for catalog browsing BDD scenarios.

use super::world::CatalogWorld;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use switchyard::catalog::IntegrationCatalog;

#[given("the built-in integration catalog")]
fn builtin_catalog(world: &mut CatalogWorld) -> Result<(), eyre::Report> {
    world.catalog = Some(IntegrationCatalog::builtin().wrap_err("load built-in catalog")?);
    Ok(())
}
