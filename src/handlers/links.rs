use crate::handlers::common::{
    ensure_decimal_non_negative, ensure_i32_non_negative, map_service_error,
    normalize_optional_string, normalize_string, parse_identity, parse_optional_decimal,
    parse_optional_i32, parse_required_i32, redirect_with_error, redirect_with_notice,
    require_field, success_response,
};
use crate::services::SelectionOption;
use crate::{
    errors::{ApiError, ServiceError},
    services::stock::AssignStockInput,
    services::supply_links::LinkSupplierProductInput,
    AppState,
};
use axum::{
    extract::{Form, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const LINK_FORM_PATH: &str = "/suppliers/link/supplier-product/";
const STOCK_FORM_PATH: &str = "/suppliers/stock/assign/";

#[derive(Debug, Serialize, ToSchema)]
pub struct LinkFormView {
    pub title: String,
    pub suppliers: Vec<SelectionOption>,
    pub products: Vec<SelectionOption>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StockFormView {
    pub title: String,
    pub products: Vec<SelectionOption>,
    pub stores: Vec<SelectionOption>,
}

/// Browser form payload for linking a supplier to a product
#[derive(Debug, Deserialize, ToSchema)]
pub struct LinkFormPayload {
    #[serde(default)]
    pub supplier_id: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub unit_price: Option<String>,
    #[serde(default)]
    pub lead_time_days: Option<String>,
}

/// Browser form payload for recording stock of a product at a store
#[derive(Debug, Deserialize, ToSchema)]
pub struct StockFormPayload {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub store_id: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub aisle: Option<String>,
}

pub fn links_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/link/supplier-product/",
            get(link_form).post(submit_link),
        )
        .route("/stock/assign/", get(stock_form).post(submit_stock))
}

#[utoipa::path(
    get,
    path = "/suppliers/link/supplier-product/",
    responses(
        (status = 200, description = "Link form with selectable suppliers and products", body = LinkFormView)
    ),
    tag = "Relationships"
)]
pub async fn link_form(State(state): State<AppState>) -> Result<Response, ApiError> {
    let suppliers = state
        .services
        .suppliers
        .list_for_selection()
        .await
        .map_err(map_service_error)?;
    let products = state
        .services
        .products
        .list_for_selection()
        .await
        .map_err(map_service_error)?;
    Ok(success_response(LinkFormView {
        title: "Link Supplier to Product".to_string(),
        suppliers,
        products,
    }))
}

#[utoipa::path(
    post,
    path = "/suppliers/link/supplier-product/",
    request_body(
        content = LinkFormPayload,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Link recorded, redirects to the supplier detail"),
        (status = 400, description = "Invalid form input", body = crate::errors::ErrorResponse)
    ),
    tag = "Relationships"
)]
pub async fn submit_link(
    State(state): State<AppState>,
    Form(payload): Form<LinkFormPayload>,
) -> Result<Response, ApiError> {
    let supplier_raw = normalize_string(payload.supplier_id);
    require_field(&supplier_raw, "supplier")?;
    let product_raw = normalize_string(payload.product_id);
    require_field(&product_raw, "product")?;
    let unit_price = parse_optional_decimal(payload.unit_price.as_deref(), "unit_price")?;
    if let Some(price) = unit_price.as_ref() {
        ensure_decimal_non_negative(price, "unit_price")?;
    }
    let lead_time_days = parse_optional_i32(payload.lead_time_days.as_deref(), "lead_time_days")?;
    if let Some(days) = lead_time_days {
        ensure_i32_non_negative(days, "lead_time_days")?;
    }

    let outcome = match (
        parse_identity(&supplier_raw, "Supplier"),
        parse_identity(&product_raw, "Product"),
    ) {
        (Ok(supplier_id), Ok(product_id)) => {
            state
                .services
                .supply_links
                .link_supplier_product(LinkSupplierProductInput {
                    supplier_id,
                    product_id,
                    unit_price,
                    lead_time_days,
                })
                .await
        }
        (Err(err), _) | (_, Err(err)) => Err(err),
    };

    match outcome {
        Ok(link) => {
            let notice = if link.created { "linked" } else { "link-updated" };
            Ok(
                redirect_with_notice(&format!("/suppliers/{}/", link.supply.supplier_id), notice)
                    .into_response(),
            )
        }
        Err(ServiceError::NotFound(_)) => {
            Ok(redirect_with_error(LINK_FORM_PATH, "not-found").into_response())
        }
        Err(err) => Err(map_service_error(err)),
    }
}

#[utoipa::path(
    get,
    path = "/suppliers/stock/assign/",
    responses(
        (status = 200, description = "Stock form with selectable products and stores", body = StockFormView)
    ),
    tag = "Relationships"
)]
pub async fn stock_form(State(state): State<AppState>) -> Result<Response, ApiError> {
    let products = state
        .services
        .products
        .list_for_selection()
        .await
        .map_err(map_service_error)?;
    let stores = state
        .services
        .stores
        .list_for_selection()
        .await
        .map_err(map_service_error)?;
    Ok(success_response(StockFormView {
        title: "Assign Stock to Store".to_string(),
        products,
        stores,
    }))
}

#[utoipa::path(
    post,
    path = "/suppliers/stock/assign/",
    request_body(
        content = StockFormPayload,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Stock recorded, redirects to the store detail"),
        (status = 400, description = "Invalid form input", body = crate::errors::ErrorResponse)
    ),
    tag = "Relationships"
)]
pub async fn submit_stock(
    State(state): State<AppState>,
    Form(payload): Form<StockFormPayload>,
) -> Result<Response, ApiError> {
    let product_raw = normalize_string(payload.product_id);
    require_field(&product_raw, "product")?;
    let store_raw = normalize_string(payload.store_id);
    require_field(&store_raw, "store")?;
    let quantity = parse_required_i32(payload.quantity.as_deref(), "quantity")?;
    ensure_i32_non_negative(quantity, "quantity")?;
    let aisle = normalize_optional_string(payload.aisle);
    if let Some(value) = aisle.as_deref() {
        if value.chars().count() > 50 {
            return Err(ApiError::ValidationError(
                "aisle cannot exceed 50 characters".to_string(),
            ));
        }
    }

    let outcome = match (
        parse_identity(&product_raw, "Product"),
        parse_identity(&store_raw, "Store"),
    ) {
        (Ok(product_id), Ok(store_id)) => {
            state
                .services
                .stock
                .assign_stock(AssignStockInput {
                    product_id,
                    store_id,
                    quantity,
                    aisle,
                })
                .await
        }
        (Err(err), _) | (_, Err(err)) => Err(err),
    };

    match outcome {
        Ok(assignment) => {
            let notice = if assignment.created {
                "stock-recorded"
            } else {
                "stock-updated"
            };
            Ok(redirect_with_notice(
                &format!("/suppliers/stores/{}/", assignment.record.store_id),
                notice,
            )
            .into_response())
        }
        Err(ServiceError::NotFound(_)) => {
            Ok(redirect_with_error(STOCK_FORM_PATH, "not-found").into_response())
        }
        Err(err) => Err(map_service_error(err)),
    }
}
