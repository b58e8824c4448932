use crate::entities::store::{self, StoreType};
use crate::entities::{product, stock_level};
use crate::handlers::common::{
    map_service_error, normalize_optional_string, normalize_string, parse_identity,
    redirect_with_error, redirect_with_notice, require_field, success_response, validate_input,
};
use crate::{
    errors::{ApiError, ServiceError},
    services::stores::{CreateStoreInput, UpdateStoreInput},
    AppState,
};
use axum::{
    extract::{Form, Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Store record as returned by the browse endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct StoreResponse {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub store_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<store::Model> for StoreResponse {
    fn from(model: store::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            location: model.location,
            store_type: model.store_type.to_string(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoreListView {
    pub stores: Vec<StoreResponse>,
}

/// One stocked product row on the store detail page
#[derive(Debug, Serialize, ToSchema)]
pub struct StockedProductEntry {
    pub product_id: Uuid,
    pub product_name: String,
    pub sku: String,
    pub quantity: i32,
    pub aisle: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl StockedProductEntry {
    fn from_parts(record: stock_level::Model, product: product::Model) -> Self {
        Self {
            product_id: product.id,
            product_name: product.name,
            sku: product.sku,
            quantity: record.quantity,
            aisle: record.aisle,
            last_updated: record.last_updated,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoreDetailView {
    pub store: StoreResponse,
    pub stocked_products: Vec<StockedProductEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoreFormView {
    pub title: String,
    pub store: Option<StoreResponse>,
    /// Allowed values for the store_type selector
    pub store_types: Vec<String>,
}

/// Browser form payload for creating or editing a store
#[derive(Debug, Deserialize, ToSchema)]
pub struct StoreFormPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub store_type: Option<String>,
}

#[derive(Debug, Validate)]
struct StoreFormData {
    #[validate(length(max = 255, message = "name cannot exceed 255 characters"))]
    name: String,
    #[validate(length(max = 255, message = "location cannot exceed 255 characters"))]
    location: Option<String>,
    store_type: StoreType,
}

fn store_type_options() -> Vec<String> {
    StoreType::iter().map(|t| t.to_string()).collect()
}

fn parse_store_type(raw: &str) -> Result<StoreType, ApiError> {
    StoreType::from_str(raw).map_err(|_| {
        ApiError::ValidationError(format!(
            "store_type must be one of: {}",
            store_type_options().join(", ")
        ))
    })
}

fn validated_form_data(payload: StoreFormPayload) -> Result<StoreFormData, ApiError> {
    let name = normalize_string(payload.name);
    require_field(&name, "name")?;
    let store_type_raw = normalize_string(payload.store_type);
    require_field(&store_type_raw, "store_type")?;
    let data = StoreFormData {
        name,
        location: normalize_optional_string(payload.location),
        store_type: parse_store_type(&store_type_raw)?,
    };
    validate_input(&data)?;
    Ok(data)
}

pub fn stores_routes() -> Router<AppState> {
    Router::new()
        .route("/stores/", get(list_stores))
        .route("/stores/create/", get(new_store_form).post(create_store))
        .route("/stores/:id/", get(store_detail))
        .route("/stores/:id/edit/", get(edit_store_form).post(update_store))
        .route("/stores/:id/delete/", post(delete_store))
}

#[utoipa::path(
    get,
    path = "/suppliers/stores/",
    responses(
        (status = 200, description = "Stores listed", body = StoreListView)
    ),
    tag = "Stores"
)]
pub async fn list_stores(State(state): State<AppState>) -> Result<Response, ApiError> {
    let stores = state
        .services
        .stores
        .list_stores()
        .await
        .map_err(map_service_error)?;
    Ok(success_response(StoreListView {
        stores: stores.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/suppliers/stores/create/",
    responses(
        (status = 200, description = "Blank store form", body = StoreFormView)
    ),
    tag = "Stores"
)]
pub async fn new_store_form() -> Response {
    success_response(StoreFormView {
        title: "Create Store".to_string(),
        store: None,
        store_types: store_type_options(),
    })
}

#[utoipa::path(
    post,
    path = "/suppliers/stores/create/",
    request_body(
        content = StoreFormPayload,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Store created, redirects to the store list"),
        (status = 400, description = "Invalid form input", body = crate::errors::ErrorResponse)
    ),
    tag = "Stores"
)]
pub async fn create_store(
    State(state): State<AppState>,
    Form(payload): Form<StoreFormPayload>,
) -> Result<Response, ApiError> {
    let data = validated_form_data(payload)?;
    state
        .services
        .stores
        .create_store(CreateStoreInput {
            name: data.name,
            location: data.location,
            store_type: data.store_type,
        })
        .await
        .map_err(map_service_error)?;
    Ok(redirect_with_notice("/suppliers/stores/", "created").into_response())
}

#[utoipa::path(
    get,
    path = "/suppliers/stores/:id/",
    params(
        ("id" = Uuid, Path, description = "Store ID")
    ),
    responses(
        (status = 200, description = "Store retrieved", body = StoreDetailView),
        (status = 404, description = "Store not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Stores"
)]
pub async fn store_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let store_id = parse_identity(&id, "Store").map_err(map_service_error)?;
    let store = state
        .services
        .stores
        .get_store(store_id)
        .await
        .map_err(map_service_error)?;
    let stocked = state
        .services
        .stock
        .stocked_products(store_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(StoreDetailView {
        store: store.into(),
        stocked_products: stocked
            .into_iter()
            .filter_map(|(record, product)| {
                product.map(|p| StockedProductEntry::from_parts(record, p))
            })
            .collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/suppliers/stores/:id/edit/",
    params(
        ("id" = Uuid, Path, description = "Store ID")
    ),
    responses(
        (status = 200, description = "Prefilled store form", body = StoreFormView),
        (status = 404, description = "Store not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Stores"
)]
pub async fn edit_store_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let store_id = parse_identity(&id, "Store").map_err(map_service_error)?;
    let store = state
        .services
        .stores
        .get_store(store_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(StoreFormView {
        title: "Edit Store".to_string(),
        store: Some(store.into()),
        store_types: store_type_options(),
    }))
}

#[utoipa::path(
    post,
    path = "/suppliers/stores/:id/edit/",
    params(
        ("id" = Uuid, Path, description = "Store ID")
    ),
    request_body(
        content = StoreFormPayload,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Store updated, redirects to the store detail"),
        (status = 400, description = "Invalid form input", body = crate::errors::ErrorResponse),
        (status = 404, description = "Store not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Stores"
)]
pub async fn update_store(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(payload): Form<StoreFormPayload>,
) -> Result<Response, ApiError> {
    let store_id = parse_identity(&id, "Store").map_err(map_service_error)?;
    // Missing records 404 before any field validation runs
    state
        .services
        .stores
        .get_store(store_id)
        .await
        .map_err(map_service_error)?;
    let data = validated_form_data(payload)?;
    state
        .services
        .stores
        .update_store(
            store_id,
            UpdateStoreInput {
                name: data.name,
                location: data.location,
                store_type: data.store_type,
            },
        )
        .await
        .map_err(map_service_error)?;
    Ok(redirect_with_notice(&format!("/suppliers/stores/{store_id}/"), "updated").into_response())
}

#[utoipa::path(
    post,
    path = "/suppliers/stores/:id/delete/",
    params(
        ("id" = Uuid, Path, description = "Store ID")
    ),
    responses(
        (status = 303, description = "Redirects to the store list with the outcome notice")
    ),
    tag = "Stores"
)]
pub async fn delete_store(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let outcome = match parse_identity(&id, "Store") {
        Ok(store_id) => state.services.stores.delete_store(store_id).await,
        Err(err) => Err(err),
    };
    match outcome {
        Ok(()) => Ok(redirect_with_notice("/suppliers/stores/", "deleted").into_response()),
        Err(ServiceError::NotFound(_)) => {
            Ok(redirect_with_error("/suppliers/stores/", "not-found").into_response())
        }
        Err(err) => Err(map_service_error(err)),
    }
}
