use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use menu_engine::costing::IngredientIssue;
use menu_engine::inventory::{InventoryError, InventoryResult};
use menu_engine::{
    Catalog, CostingService, ErrorCode, InMemoryInventory, InMemoryMenuStore, InventoryProvider,
    summarize,
};
use rust_decimal::Decimal;
use shared::models::{Menu, MenuIngredient, MenuStatus, Product, Unit};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Wraps the in-memory inventory and counts batched fetches
struct CountingInventory {
    inner: InMemoryInventory,
    fetches: AtomicUsize,
}

#[async_trait]
impl InventoryProvider for CountingInventory {
    async fn fetch_products(&self, ids: &[String]) -> InventoryResult<Vec<Product>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_products(ids).await
    }

    async fn get_product(&self, id: &str) -> InventoryResult<Option<Product>> {
        self.inner.get_product(id).await
    }

    async fn list_products(&self) -> InventoryResult<Vec<Product>> {
        self.inner.list_products().await
    }
}

/// Always fails, standing in for an unreachable backing store
struct BrokenInventory;

#[async_trait]
impl InventoryProvider for BrokenInventory {
    async fn fetch_products(&self, _ids: &[String]) -> InventoryResult<Vec<Product>> {
        Err(InventoryError::Unavailable("connection refused".into()))
    }

    async fn get_product(&self, _id: &str) -> InventoryResult<Option<Product>> {
        Err(InventoryError::Unavailable("connection refused".into()))
    }

    async fn list_products(&self) -> InventoryResult<Vec<Product>> {
        Err(InventoryError::Unavailable("connection refused".into()))
    }
}

/// Serves products as given, bypassing the in-memory store's validation
struct RawInventory(Vec<Product>);

#[async_trait]
impl InventoryProvider for RawInventory {
    async fn fetch_products(&self, ids: &[String]) -> InventoryResult<Vec<Product>> {
        Ok(self.0.iter().filter(|p| ids.contains(&p.id)).cloned().collect())
    }

    async fn get_product(&self, id: &str) -> InventoryResult<Option<Product>> {
        Ok(self.0.iter().find(|p| p.id == id).cloned())
    }

    async fn list_products(&self) -> InventoryResult<Vec<Product>> {
        Ok(self.0.clone())
    }
}

fn pow10(exp: u32) -> Decimal {
    Decimal::from_i128_with_scale(10i128.pow(exp), 0)
}

fn products() -> Vec<Product> {
    vec![
        Product::new("product:flour", "Flour", dec("0.002"), dec("5000"), Unit::Gram),
        Product::new("product:milk", "Milk", dec("0.0012"), dec("1500"), Unit::Milliliter),
        Product::new("product:eggs", "Eggs", dec("0.25"), dec("6"), Unit::Piece),
    ]
}

fn menu(id: &str, status: MenuStatus, ingredients: Vec<MenuIngredient>) -> Menu {
    Menu {
        id: id.to_string(),
        name: id.trim_start_matches("menu:").to_string(),
        description: None,
        service_date: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
        sale_price: dec("9.50"),
        status,
        ingredients,
        created_at: 0,
    }
}

fn crepes() -> Menu {
    menu(
        "menu:crepes",
        MenuStatus::Active,
        vec![
            MenuIngredient::new("product:flour", dec("0.25"), Unit::Kilogram),
            MenuIngredient::new("product:milk", dec("0.5"), Unit::Liter),
            MenuIngredient::new("product:eggs", dec("4"), Unit::Piece),
            MenuIngredient::new("product:flour", dec("10"), Unit::Gram),
        ],
    )
}

fn omelette() -> Menu {
    menu(
        "menu:omelette",
        MenuStatus::Active,
        vec![MenuIngredient::new("product:eggs", dec("1"), Unit::Dozen)],
    )
}

fn service() -> (
    CostingService<CountingInventory, InMemoryMenuStore>,
    Arc<CountingInventory>,
    Arc<InMemoryMenuStore>,
) {
    let inventory = Arc::new(CountingInventory {
        inner: InMemoryInventory::with_products(products()).unwrap(),
        fetches: AtomicUsize::new(0),
    });
    let menus = Arc::new(InMemoryMenuStore::with_menus([crepes(), omelette()]).unwrap());
    (
        CostingService::new(Arc::clone(&inventory), Arc::clone(&menus)),
        inventory,
        menus,
    )
}

#[tokio::test]
async fn test_single_batched_fetch_per_evaluation() {
    let (service, inventory, _) = service();

    let evaluation = service.evaluate_menu("menu:crepes").await.unwrap();
    assert_eq!(inventory.fetches.load(Ordering::SeqCst), 1);

    // 250g + 10g flour, 500ml milk, 4 eggs
    // 0.50 + 0.02 + 0.60 + 1.00 = 2.12
    assert_eq!(evaluation.total_ingredient_cost, dec("2.12"));
    assert_eq!(evaluation.margin, dec("7.38"));
    assert!(evaluation.preparable);
    assert_eq!(evaluation.ingredients.len(), 4);
    assert_eq!(evaluation.ingredients[3].position, 3);

    service.evaluate_menu("menu:omelette").await.unwrap();
    assert_eq!(inventory.fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_missing_menu_is_fatal() {
    let (service, inventory, _) = service();
    let err = service.evaluate_menu("menu:ghost").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MenuNotFound);
    assert_eq!(inventory.fetches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_ensure_preparable_lists_short_products() {
    let (service, _, _) = service();

    assert!(service.ensure_preparable("menu:crepes").await.is_ok());

    let err = service.ensure_preparable("menu:omelette").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MenuNotPreparable);
    let details = err.details.unwrap();
    assert_eq!(details["menu_id"], "menu:omelette");
    assert_eq!(details["missing_products"], serde_json::json!(["product:eggs"]));
}

#[tokio::test]
async fn test_ensure_preparable_empty_menu() {
    let (service, _, menus) = service();
    let empty = menus
        .create_menu(
            shared::models::MenuCreate {
                name: "Nothing".into(),
                description: None,
                service_date: NaiveDate::from_ymd_opt(2026, 12, 24).unwrap(),
                sale_price: dec("1"),
                ingredients: vec![],
            },
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
        )
        .unwrap();

    let err = service.ensure_preparable(&empty.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MenuEmpty);
}

#[tokio::test]
async fn test_stock_change_between_evaluations() {
    let (service, inventory, _) = service();

    let before = service.evaluate_menu("menu:omelette").await.unwrap();
    assert!(!before.preparable);
    assert_eq!(before.ingredients[0].missing_quantity, Some(dec("6")));

    inventory.inner.adjust_stock("product:eggs", dec("6")).unwrap();

    let after = service.evaluate_menu("menu:omelette").await.unwrap();
    assert!(after.preparable);
    assert_eq!(after.ingredients[0].missing_quantity, Some(Decimal::ZERO));
    // the earlier result is untouched
    assert!(!before.preparable);
}

#[tokio::test]
async fn test_deleted_product_degrades_gracefully() {
    let (service, inventory, _) = service();
    inventory.inner.remove_product("product:milk").unwrap();

    let evaluation = service.evaluate_menu("menu:crepes").await.unwrap();
    assert!(!evaluation.preparable);
    assert_eq!(evaluation.unresolved_ingredient_count, 1);
    // milk excluded: 0.50 + 0.02 + 1.00
    assert_eq!(evaluation.total_ingredient_cost, dec("1.52"));
}

#[tokio::test]
async fn test_evaluate_all_skips_archived() {
    let (service, _, menus) = service();
    menus.set_status("menu:omelette", MenuStatus::Archived).unwrap();

    let evaluations = service.evaluate_all().await.unwrap();
    assert_eq!(evaluations.len(), 1);
    assert_eq!(evaluations[0].menu_id, "menu:crepes");
}

#[tokio::test]
async fn test_evaluate_all_propagates_storage_failure() {
    let menus = Arc::new(InMemoryMenuStore::with_menus([crepes()]).unwrap());
    let service = CostingService::new(Arc::new(BrokenInventory), menus);

    let err = service.evaluate_all().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::StorageError);
}

#[tokio::test]
async fn test_report_from_catalog_file() {
    let catalog = r#"{
        "products": [
            { "id": "product:rice", "name": "Rice", "unit_cost": "0.003",
              "stock_quantity": "800", "stock_unit": "gram", "low_stock_threshold": "1000" },
            { "id": "product:stock", "name": "Stock", "unit_cost": "0.002",
              "stock_quantity": "3000", "stock_unit": "milliliter" }
        ],
        "menus": [
            { "id": "menu:risotto", "name": "Risotto", "service_date": "2026-11-05",
              "sale_price": "14", "status": "ACTIVE",
              "ingredients": [
                { "product_id": "product:rice", "quantity": "0.3", "unit": "kilogram" },
                { "product_id": "product:stock", "quantity": "1", "unit": "liter" }
              ] },
            { "id": "menu:paella", "name": "Paella", "service_date": "2026-11-06",
              "sale_price": "18", "status": "ACTIVE",
              "ingredients": [
                { "product_id": "product:rice", "quantity": "900", "unit": "gram" }
              ] }
        ]
    }"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(catalog.as_bytes()).unwrap();

    let (inventory, menus) = Catalog::load(file.path()).unwrap().into_stores().unwrap();
    let inventory = Arc::new(inventory);
    let service = CostingService::new(Arc::clone(&inventory), Arc::new(menus));

    let evaluations = service.evaluate_all().await.unwrap();
    assert_eq!(evaluations.len(), 2);

    let snapshot =
        menu_engine::StockSnapshot::from_products(inventory.list_products().await.unwrap());
    let report = summarize(&evaluations, &snapshot, Decimal::ZERO);

    assert_eq!(report.preparable_count, 1);
    assert_eq!(report.shortages.len(), 1);
    assert_eq!(report.shortages[0].product_id, "product:rice");
    assert_eq!(report.shortages[0].max_missing_quantity, Some(dec("100")));
    assert_eq!(report.shortages[0].menu_ids, vec!["menu:paella"]);
    assert_eq!(report.low_stock.len(), 1);
    assert_eq!(report.low_stock[0].product_id, "product:rice");

    let view = serde_json::to_value(report.to_view(&evaluations)).unwrap();
    // risotto: 0.90 + 2.00 = 2.90
    assert_eq!(view["menus"][0]["total_ingredient_cost"], 2.9);
}

#[tokio::test]
async fn test_check_ingredient() {
    let (service, inventory, _) = service();

    let ok = service
        .check_ingredient(&MenuIngredient::new("product:milk", dec("0.25"), Unit::Liter))
        .await
        .unwrap();
    assert_eq!(ok.converted_quantity, Some(dec("250")));
    assert_eq!(ok.ingredient_cost, Some(dec("0.3")));
    assert!(ok.stock_sufficient);
    assert_eq!(inventory.fetches.load(Ordering::SeqCst), 0);

    let err = service
        .check_ingredient(&MenuIngredient::new("product:saffron", dec("1"), Unit::Gram))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ProductNotFound);

    let err = service
        .check_ingredient(&MenuIngredient::new("product:milk", dec("1"), Unit::Kilogram))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::IncompatibleUnits);
    assert_eq!(err.details.unwrap()["to"], "ml");

    let err = service
        .check_ingredient(&MenuIngredient::new("product:flour", pow10(26), Unit::Kilogram))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
}

#[tokio::test]
async fn test_check_ingredient_cost_out_of_range() {
    let inventory = Arc::new(RawInventory(vec![Product::new(
        "product:truffle",
        "Truffle",
        pow10(27),
        dec("10"),
        Unit::Gram,
    )]));
    let service = CostingService::new(inventory, Arc::new(InMemoryMenuStore::new()));

    let err = service
        .check_ingredient(&MenuIngredient::new("product:truffle", dec("100"), Unit::Gram))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    assert_eq!(err.details.unwrap()["field"], "ingredient_cost");
}

#[tokio::test]
async fn test_huge_ingredient_quantity_is_rejected() {
    let menus = InMemoryMenuStore::with_menus([crepes(), menu(
        "menu:mountain",
        MenuStatus::Active,
        vec![MenuIngredient::new("product:flour", pow10(26), Unit::Kilogram)],
    )])
    .unwrap();
    let inventory = Arc::new(InMemoryInventory::with_products(products()).unwrap());
    let service = CostingService::new(inventory, Arc::new(menus));

    let err = service.evaluate_menu("menu:mountain").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);

    // skipped in a batch, the other menu still evaluates
    let evaluations = service.evaluate_all().await.unwrap();
    assert_eq!(evaluations.len(), 1);
    assert_eq!(evaluations[0].menu_id, "menu:crepes");
}

#[tokio::test]
async fn test_unvalidated_product_cost_overflow_is_reported() {
    let inventory = Arc::new(RawInventory(vec![
        Product::new("product:truffle", "Truffle", pow10(27), dec("10"), Unit::Gram),
        Product::new("product:flour", "Flour", dec("0.002"), dec("5000"), Unit::Gram),
    ]));
    let menus = InMemoryMenuStore::with_menus([menu(
        "menu:truffle",
        MenuStatus::Active,
        vec![
            MenuIngredient::new("product:truffle", dec("100"), Unit::Gram),
            MenuIngredient::new("product:flour", dec("100"), Unit::Gram),
        ],
    )])
    .unwrap();
    let service = CostingService::new(inventory, Arc::new(menus));

    let evaluation = service.evaluate_menu("menu:truffle").await.unwrap();
    assert!(!evaluation.preparable);
    assert_eq!(evaluation.unresolved_ingredient_count, 1);
    assert_eq!(
        evaluation.ingredients[0].issue,
        Some(IngredientIssue::Overflow {
            field: "ingredient_cost".into()
        })
    );
    assert_eq!(evaluation.total_ingredient_cost, dec("0.2"));
}
