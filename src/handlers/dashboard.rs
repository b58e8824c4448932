use crate::handlers::common::{map_service_error, success_response};
use crate::queries::stock_queries::LowStockRow;
use crate::{errors::ApiError, AppState};
use axum::{
    extract::{Query, State},
    response::Response,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct DashboardParams {
    /// Quantities strictly below this value count as low stock
    pub threshold: Option<i32>,
}

/// One product/store pair running low
#[derive(Debug, Serialize, ToSchema)]
pub struct LowStockEntry {
    pub product_id: Uuid,
    pub product_name: String,
    pub sku: String,
    pub store_id: Uuid,
    pub store_name: String,
    pub quantity: i32,
    pub aisle: String,
}

impl From<LowStockRow> for LowStockEntry {
    fn from(row: LowStockRow) -> Self {
        let aisle = row.aisle_label().to_string();
        Self {
            product_id: row.product_id,
            product_name: row.product_name,
            sku: row.sku,
            store_id: row.store_id,
            store_name: row.store_name,
            quantity: row.quantity,
            aisle,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardView {
    pub threshold: i32,
    pub total_suppliers: u64,
    pub total_products: u64,
    pub total_stores: u64,
    pub low_stock_count: u64,
    pub low_stock: Vec<LowStockEntry>,
}

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard/", get(dashboard))
}

#[utoipa::path(
    get,
    path = "/suppliers/dashboard/",
    params(DashboardParams),
    responses(
        (status = 200, description = "Inventory dashboard", body = DashboardView),
        (status = 400, description = "Invalid threshold", body = crate::errors::ErrorResponse)
    ),
    tag = "Dashboard"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Result<Response, ApiError> {
    let report = state
        .services
        .reporting
        .get_dashboard(params.threshold)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(DashboardView {
        threshold: report.threshold,
        total_suppliers: report.counts.suppliers,
        total_products: report.counts.products,
        total_stores: report.counts.stores,
        low_stock_count: report.low_stock_count,
        low_stock: report.low_stock.into_iter().map(Into::into).collect(),
    }))
}
