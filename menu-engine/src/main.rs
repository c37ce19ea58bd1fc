use anyhow::Context;
use menu_engine::{ApiResponse, Catalog, CostingService, setup_environment, summarize};
use menu_engine::costing::StockSnapshot;
use menu_engine::costing::money::to_f64;
use menu_engine::inventory::InventoryProvider;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logger)
    let config = setup_environment();
    tracing::info!(catalog = %config.catalog_path, env = %config.environment, "Menu report starting");

    // 2. Load catalog
    let catalog = Catalog::load(&config.catalog_path)
        .with_context(|| format!("loading catalog {}", config.catalog_path))?;
    let (inventory, menus) = catalog.into_stores().context("seeding stores")?;
    let inventory = Arc::new(inventory);
    let service = CostingService::new(Arc::clone(&inventory), Arc::new(menus));

    // 3. Evaluate every non-archived menu
    let evaluations = service.evaluate_all().await?;
    for evaluation in &evaluations {
        tracing::info!(
            menu_id = %evaluation.menu_id,
            cost = to_f64(evaluation.total_ingredient_cost),
            margin = to_f64(evaluation.margin),
            preparable = evaluation.preparable,
            missing = evaluation.missing_ingredient_count,
            "Menu"
        );
    }

    // 4. Summarize
    let snapshot = StockSnapshot::from_products(inventory.list_products().await?);
    let report = summarize(&evaluations, &snapshot, config.low_stock_threshold);
    if report.not_preparable_count > 0 {
        tracing::warn!(
            not_preparable = report.not_preparable_count,
            shortages = report.shortages.len(),
            "Some menus cannot be prepared"
        );
    }

    let response = ApiResponse::success(report.to_view(&evaluations));
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
