//! Integration tests for the low-stock dashboard.
//!
//! Tests cover:
//! - Entity counts and the default low-stock threshold
//! - Strictly-below threshold semantics and ascending quantity order
//! - The "not set" aisle marker
//! - Threshold overrides via query parameter
//! - Rejection of negative thresholds

mod common;

use axum::{body, http::Method, response::Response};
use common::TestApp;
use serde_json::Value;
use supplychain_api::entities::store::StoreType;
use supplychain_api::services::stock::AssignStockInput;

async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

/// Two products spread across two stores with quantities 3, 15, 9, 10.
/// Only 3 and 9 sit strictly below the default threshold of 10.
async fn seed_inventory(app: &TestApp) {
    let lamp = app.seed_product("Desk Lamp", "LMP-001").await;
    let mug = app.seed_product("Ceramic Mug", "MUG-450").await;
    let flagship = app.seed_store("Downtown Flagship", StoreType::Flagship).await;
    let retail = app.seed_store("Riverside Retail", StoreType::Retail).await;
    app.seed_supplier("Acme Industrial Supply").await;
    app.seed_supplier("Nordic Timber AB").await;

    let assignments = [
        (lamp.id, flagship.id, 3, Some("A-1")),
        (lamp.id, retail.id, 15, None),
        (mug.id, flagship.id, 9, None),
        (mug.id, retail.id, 10, Some("B-4")),
    ];
    for (product_id, store_id, quantity, aisle) in assignments {
        app.state
            .services
            .stock
            .assign_stock(AssignStockInput {
                product_id,
                store_id,
                quantity,
                aisle: aisle.map(str::to_string),
            })
            .await
            .expect("seed stock row");
    }
}

// ==================== Dashboard Tests ====================

#[tokio::test]
async fn test_dashboard_reports_counts_and_low_stock() {
    let app = TestApp::new().await;
    seed_inventory(&app).await;

    let response = app.request(Method::GET, "/suppliers/dashboard/").await;
    assert_eq!(response.status(), 200);

    let body = response_json(response).await;
    assert_eq!(body["threshold"], 10);
    assert_eq!(body["total_suppliers"], 2);
    assert_eq!(body["total_products"], 2);
    assert_eq!(body["total_stores"], 2);
    assert_eq!(body["low_stock_count"], 2);

    let rows = body["low_stock"].as_array().expect("low stock array");
    assert_eq!(rows.len(), 2, "Quantity 10 sits on the boundary and is not low");

    // Lowest quantity first.
    assert_eq!(rows[0]["quantity"], 3);
    assert_eq!(rows[0]["product_name"], "Desk Lamp");
    assert_eq!(rows[0]["sku"], "LMP-001");
    assert_eq!(rows[0]["store_name"], "Downtown Flagship");
    assert_eq!(rows[0]["aisle"], "A-1");

    assert_eq!(rows[1]["quantity"], 9);
    assert_eq!(rows[1]["product_name"], "Ceramic Mug");
    assert_eq!(
        rows[1]["aisle"], "not set",
        "Missing aisles get a readable marker"
    );
}

#[tokio::test]
async fn test_dashboard_threshold_override() {
    let app = TestApp::new().await;
    seed_inventory(&app).await;

    let body = response_json(
        app.request(Method::GET, "/suppliers/dashboard/?threshold=16")
            .await,
    )
    .await;
    assert_eq!(body["threshold"], 16);
    let quantities: Vec<i64> = body["low_stock"]
        .as_array()
        .expect("low stock array")
        .iter()
        .map(|row| row["quantity"].as_i64().expect("quantity"))
        .collect();
    assert_eq!(quantities, vec![3, 9, 10, 15]);

    let body = response_json(
        app.request(Method::GET, "/suppliers/dashboard/?threshold=4")
            .await,
    )
    .await;
    assert_eq!(body["low_stock_count"], 1);
    assert_eq!(body["low_stock"][0]["quantity"], 3);
}

#[tokio::test]
async fn test_dashboard_zero_threshold_reports_nothing() {
    let app = TestApp::new().await;
    seed_inventory(&app).await;

    let body = response_json(
        app.request(Method::GET, "/suppliers/dashboard/?threshold=0")
            .await,
    )
    .await;
    assert_eq!(body["threshold"], 0);
    assert_eq!(body["low_stock_count"], 0);
    assert!(body["low_stock"].as_array().expect("low stock array").is_empty());
}

#[tokio::test]
async fn test_dashboard_rejects_negative_threshold() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::GET, "/suppliers/dashboard/?threshold=-1")
        .await;

    assert_eq!(response.status(), 400);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Invalid input: threshold cannot be negative");
}

#[tokio::test]
async fn test_empty_dashboard_uses_defaults() {
    let app = TestApp::new().await;

    let body = response_json(app.request(Method::GET, "/suppliers/dashboard/").await).await;
    assert_eq!(body["threshold"], 10);
    assert_eq!(body["total_suppliers"], 0);
    assert_eq!(body["total_products"], 0);
    assert_eq!(body["total_stores"], 0);
    assert_eq!(body["low_stock_count"], 0);
    assert!(body["low_stock"].as_array().expect("low stock array").is_empty());
}
