//! Integration tests for the supply and stock relationship endpoints.
//!
//! Tests cover:
//! - Linking suppliers to products with full and sparse properties
//! - The upsert semantics of re-linking an existing pair
//! - Stock assignment, re-assignment, and aisle preservation
//! - Validation of prices, lead times, quantities, and aisles
//! - Redirects back to the form when a referenced record is missing
//! - Cascade deletion of edges when a linked record goes away

mod common;

use axum::{body, http::Method, response::Response};
use common::{location, TestApp};
use sea_orm::EntityTrait;
use serde_json::Value;
use supplychain_api::entities::store::StoreType;
use supplychain_api::entities::{stock_level, supply};

async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

// ==================== Supply Link Tests ====================

#[tokio::test]
async fn test_link_supplier_product_redirects_to_supplier() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("Acme Industrial Supply").await;
    let product = app.seed_product("Desk Lamp", "LMP-001").await;

    let response = app
        .submit_form(
            "/suppliers/link/supplier-product/",
            &[
                ("supplier_id", &supplier.id.to_string()),
                ("product_id", &product.id.to_string()),
                ("unit_price", "12.50"),
                ("lead_time_days", "7"),
            ],
        )
        .await;

    assert_eq!(response.status(), 303);
    assert_eq!(
        location(&response),
        format!("/suppliers/{}/?kind=success&notice=linked", supplier.id)
    );

    let detail = response_json(
        app.request(Method::GET, &format!("/suppliers/{}/", supplier.id))
            .await,
    )
    .await;
    let supplied = detail["supplied_products"]
        .as_array()
        .expect("supplied products array");
    assert_eq!(supplied.len(), 1);
    assert_eq!(supplied[0]["sku"], "LMP-001");

    let rows = supply::Entity::find()
        .all(&*app.state.db)
        .await
        .expect("query supply rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].unit_price, Some(rust_decimal_macros::dec!(12.50)));
    assert_eq!(rows[0].lead_time_days, Some(7));
}

#[tokio::test]
async fn test_link_with_sparse_properties() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("Nordic Timber AB").await;
    let product = app.seed_product("Pine Shelf", "SHL-120").await;

    let response = app
        .submit_form(
            "/suppliers/link/supplier-product/",
            &[
                ("supplier_id", &supplier.id.to_string()),
                ("product_id", &product.id.to_string()),
                ("lead_time_days", "14"),
            ],
        )
        .await;
    assert_eq!(response.status(), 303);

    let rows = supply::Entity::find()
        .all(&*app.state.db)
        .await
        .expect("query supply rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].unit_price, None, "Omitted price stays unset");
    assert_eq!(rows[0].lead_time_days, Some(14));
}

#[tokio::test]
async fn test_relinking_updates_terms_in_place() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("Acme Industrial Supply").await;
    let product = app.seed_product("Desk Lamp", "LMP-001").await;

    let first = app
        .submit_form(
            "/suppliers/link/supplier-product/",
            &[
                ("supplier_id", &supplier.id.to_string()),
                ("product_id", &product.id.to_string()),
                ("unit_price", "10.00"),
                ("lead_time_days", "5"),
            ],
        )
        .await;
    assert_eq!(
        location(&first),
        format!("/suppliers/{}/?kind=success&notice=linked", supplier.id)
    );

    let original = supply::Entity::find()
        .one(&*app.state.db)
        .await
        .expect("query supply row")
        .expect("supply row present");

    // Re-submit the pair with a new price and no lead time.
    let second = app
        .submit_form(
            "/suppliers/link/supplier-product/",
            &[
                ("supplier_id", &supplier.id.to_string()),
                ("product_id", &product.id.to_string()),
                ("unit_price", "12.00"),
            ],
        )
        .await;
    assert_eq!(second.status(), 303);
    assert_eq!(
        location(&second),
        format!("/suppliers/{}/?kind=success&notice=link-updated", supplier.id)
    );

    let rows = supply::Entity::find()
        .all(&*app.state.db)
        .await
        .expect("query supply rows");
    assert_eq!(rows.len(), 1, "Re-linking must not stack a second edge");
    assert_eq!(rows[0].id, original.id);
    assert_eq!(rows[0].since, original.since, "since keeps its first value");
    assert_eq!(rows[0].unit_price, Some(rust_decimal_macros::dec!(12.00)));
    assert_eq!(
        rows[0].lead_time_days,
        Some(5),
        "Omitted lead time keeps its recorded value"
    );
}

#[tokio::test]
async fn test_link_missing_product_redirects_back_to_form() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("Acme Industrial Supply").await;

    let response = app
        .submit_form(
            "/suppliers/link/supplier-product/",
            &[
                ("supplier_id", &supplier.id.to_string()),
                ("product_id", &uuid::Uuid::new_v4().to_string()),
            ],
        )
        .await;

    assert_eq!(response.status(), 303);
    assert_eq!(
        location(&response),
        "/suppliers/link/supplier-product/?kind=error&notice=not-found"
    );

    let rows = supply::Entity::find()
        .all(&*app.state.db)
        .await
        .expect("query supply rows");
    assert!(rows.is_empty(), "No edge may appear for a missing product");
}

#[tokio::test]
async fn test_link_rejects_bad_numeric_properties() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("Acme Industrial Supply").await;
    let product = app.seed_product("Desk Lamp", "LMP-001").await;
    let supplier_id = supplier.id.to_string();
    let product_id = product.id.to_string();

    let negative_price = app
        .submit_form(
            "/suppliers/link/supplier-product/",
            &[
                ("supplier_id", &supplier_id),
                ("product_id", &product_id),
                ("unit_price", "-3.50"),
            ],
        )
        .await;
    assert_eq!(negative_price.status(), 400);
    let body = response_json(negative_price).await;
    assert_eq!(body["message"], "unit_price cannot be negative");

    let garbage_price = app
        .submit_form(
            "/suppliers/link/supplier-product/",
            &[
                ("supplier_id", &supplier_id),
                ("product_id", &product_id),
                ("unit_price", "cheap"),
            ],
        )
        .await;
    assert_eq!(garbage_price.status(), 400);
    let body = response_json(garbage_price).await;
    assert_eq!(body["message"], "unit_price must be a number");

    let negative_lead = app
        .submit_form(
            "/suppliers/link/supplier-product/",
            &[
                ("supplier_id", &supplier_id),
                ("product_id", &product_id),
                ("lead_time_days", "-1"),
            ],
        )
        .await;
    assert_eq!(negative_lead.status(), 400);
    let body = response_json(negative_lead).await;
    assert_eq!(body["message"], "lead_time_days cannot be negative");
}

#[tokio::test]
async fn test_link_requires_both_selections() {
    let app = TestApp::new().await;
    let product = app.seed_product("Desk Lamp", "LMP-001").await;

    let response = app
        .submit_form(
            "/suppliers/link/supplier-product/",
            &[("product_id", &product.id.to_string())],
        )
        .await;

    assert_eq!(response.status(), 400);
    let body = response_json(response).await;
    assert_eq!(body["message"], "supplier is required");
}

#[tokio::test]
async fn test_link_form_offers_selections() {
    let app = TestApp::new().await;
    app.seed_supplier("Acme Industrial Supply").await;
    app.seed_product("Desk Lamp", "LMP-001").await;

    let response = app
        .request(Method::GET, "/suppliers/link/supplier-product/")
        .await;
    assert_eq!(response.status(), 200);

    let body = response_json(response).await;
    assert_eq!(body["title"], "Link Supplier to Product");
    assert_eq!(body["suppliers"][0]["label"], "Acme Industrial Supply");
    assert_eq!(
        body["products"][0]["label"], "Desk Lamp (LMP-001)",
        "Product labels carry the SKU"
    );
}

// ==================== Stock Assignment Tests ====================

#[tokio::test]
async fn test_assign_stock_records_then_updates() {
    let app = TestApp::new().await;
    let store = app.seed_store("Downtown Flagship", StoreType::Flagship).await;
    let product = app.seed_product("Desk Lamp", "LMP-001").await;

    let first = app
        .submit_form(
            "/suppliers/stock/assign/",
            &[
                ("product_id", &product.id.to_string()),
                ("store_id", &store.id.to_string()),
                ("quantity", "5"),
                ("aisle", "A-12"),
            ],
        )
        .await;
    assert_eq!(first.status(), 303);
    assert_eq!(
        location(&first),
        format!(
            "/suppliers/stores/{}/?kind=success&notice=stock-recorded",
            store.id
        )
    );

    let original = stock_level::Entity::find()
        .one(&*app.state.db)
        .await
        .expect("query stock row")
        .expect("stock row present");
    assert_eq!(original.quantity, 5);

    // Re-assign the pair with a new quantity and a blank aisle field, the
    // way a browser submits an untouched text input.
    let second = app
        .submit_form(
            "/suppliers/stock/assign/",
            &[
                ("product_id", &product.id.to_string()),
                ("store_id", &store.id.to_string()),
                ("quantity", "8"),
                ("aisle", ""),
            ],
        )
        .await;
    assert_eq!(second.status(), 303);
    assert_eq!(
        location(&second),
        format!(
            "/suppliers/stores/{}/?kind=success&notice=stock-updated",
            store.id
        )
    );

    let rows = stock_level::Entity::find()
        .all(&*app.state.db)
        .await
        .expect("query stock rows");
    assert_eq!(rows.len(), 1, "Re-assignment must not stack a second row");
    assert_eq!(rows[0].id, original.id);
    assert_eq!(rows[0].quantity, 8);
    assert_eq!(
        rows[0].aisle.as_deref(),
        Some("A-12"),
        "A blank aisle submission keeps the recorded value"
    );
    assert!(
        rows[0].last_updated >= original.last_updated,
        "Re-assignment refreshes last_updated"
    );
}

#[tokio::test]
async fn test_assign_stock_accepts_zero_quantity() {
    let app = TestApp::new().await;
    let store = app.seed_store("Riverside Retail", StoreType::Retail).await;
    let product = app.seed_product("Ceramic Mug", "MUG-450").await;

    let response = app
        .submit_form(
            "/suppliers/stock/assign/",
            &[
                ("product_id", &product.id.to_string()),
                ("store_id", &store.id.to_string()),
                ("quantity", "0"),
            ],
        )
        .await;
    assert_eq!(response.status(), 303, "An out-of-stock row is still valid");

    let row = stock_level::Entity::find()
        .one(&*app.state.db)
        .await
        .expect("query stock row")
        .expect("stock row present");
    assert_eq!(row.quantity, 0);
    assert_eq!(row.aisle, None);
}

#[tokio::test]
async fn test_assign_stock_validates_quantity_and_aisle() {
    let app = TestApp::new().await;
    let store = app.seed_store("Riverside Retail", StoreType::Retail).await;
    let product = app.seed_product("Desk Lamp", "LMP-001").await;
    let store_id = store.id.to_string();
    let product_id = product.id.to_string();

    let missing_quantity = app
        .submit_form(
            "/suppliers/stock/assign/",
            &[("product_id", &product_id), ("store_id", &store_id)],
        )
        .await;
    assert_eq!(missing_quantity.status(), 400);
    let body = response_json(missing_quantity).await;
    assert_eq!(body["message"], "quantity is required");

    let garbage_quantity = app
        .submit_form(
            "/suppliers/stock/assign/",
            &[
                ("product_id", &product_id),
                ("store_id", &store_id),
                ("quantity", "many"),
            ],
        )
        .await;
    assert_eq!(garbage_quantity.status(), 400);
    let body = response_json(garbage_quantity).await;
    assert_eq!(body["message"], "quantity must be a whole number");

    let negative_quantity = app
        .submit_form(
            "/suppliers/stock/assign/",
            &[
                ("product_id", &product_id),
                ("store_id", &store_id),
                ("quantity", "-2"),
            ],
        )
        .await;
    assert_eq!(negative_quantity.status(), 400);
    let body = response_json(negative_quantity).await;
    assert_eq!(body["message"], "quantity cannot be negative");

    let long_aisle = "A".repeat(51);
    let overlong_aisle = app
        .submit_form(
            "/suppliers/stock/assign/",
            &[
                ("product_id", &product_id),
                ("store_id", &store_id),
                ("quantity", "5"),
                ("aisle", &long_aisle),
            ],
        )
        .await;
    assert_eq!(overlong_aisle.status(), 400);
    let body = response_json(overlong_aisle).await;
    assert_eq!(body["message"], "aisle cannot exceed 50 characters");
}

#[tokio::test]
async fn test_assign_stock_missing_store_redirects_back_to_form() {
    let app = TestApp::new().await;
    let product = app.seed_product("Desk Lamp", "LMP-001").await;

    let response = app
        .submit_form(
            "/suppliers/stock/assign/",
            &[
                ("product_id", &product.id.to_string()),
                ("store_id", &uuid::Uuid::new_v4().to_string()),
                ("quantity", "5"),
            ],
        )
        .await;

    assert_eq!(response.status(), 303);
    assert_eq!(
        location(&response),
        "/suppliers/stock/assign/?kind=error&notice=not-found"
    );
}

#[tokio::test]
async fn test_stock_form_offers_selections() {
    let app = TestApp::new().await;
    app.seed_product("Desk Lamp", "LMP-001").await;
    app.seed_store("Downtown Flagship", StoreType::Flagship).await;

    let response = app.request(Method::GET, "/suppliers/stock/assign/").await;
    assert_eq!(response.status(), 200);

    let body = response_json(response).await;
    assert_eq!(body["title"], "Assign Stock to Store");
    assert_eq!(body["products"][0]["label"], "Desk Lamp (LMP-001)");
    assert_eq!(body["stores"][0]["label"], "Downtown Flagship");
}

// ==================== Cascade Tests ====================

#[tokio::test]
async fn test_deleting_supplier_cascades_supply_edges() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("Acme Industrial Supply").await;
    let product = app.seed_product("Desk Lamp", "LMP-001").await;

    app.submit_form(
        "/suppliers/link/supplier-product/",
        &[
            ("supplier_id", &supplier.id.to_string()),
            ("product_id", &product.id.to_string()),
        ],
    )
    .await;

    let delete = app
        .request(Method::POST, &format!("/suppliers/{}/delete/", supplier.id))
        .await;
    assert_eq!(delete.status(), 303);

    let edges = supply::Entity::find()
        .all(&*app.state.db)
        .await
        .expect("query supply rows");
    assert!(edges.is_empty(), "Supply edges go with their supplier");

    // The product itself survives, now without suppliers.
    let detail = response_json(
        app.request(Method::GET, &format!("/suppliers/products/{}/", product.id))
            .await,
    )
    .await;
    assert!(detail["suppliers"].as_array().expect("suppliers array").is_empty());
}

#[tokio::test]
async fn test_deleting_product_cascades_stock_rows() {
    let app = TestApp::new().await;
    let store = app.seed_store("Downtown Flagship", StoreType::Flagship).await;
    let product = app.seed_product("Desk Lamp", "LMP-001").await;

    app.submit_form(
        "/suppliers/stock/assign/",
        &[
            ("product_id", &product.id.to_string()),
            ("store_id", &store.id.to_string()),
            ("quantity", "5"),
        ],
    )
    .await;

    let delete = app
        .request(
            Method::POST,
            &format!("/suppliers/products/{}/delete/", product.id),
        )
        .await;
    assert_eq!(delete.status(), 303);

    let rows = stock_level::Entity::find()
        .all(&*app.state.db)
        .await
        .expect("query stock rows");
    assert!(rows.is_empty(), "Stock rows go with their product");

    let detail = response_json(
        app.request(Method::GET, &format!("/suppliers/stores/{}/", store.id))
            .await,
    )
    .await;
    assert!(detail["stocked_products"]
        .as_array()
        .expect("stocked products array")
        .is_empty());
}
