use crate::entities::product;
use crate::handlers::common::{
    map_service_error, normalize_optional_string, normalize_string, parse_identity,
    redirect_with_error, redirect_with_notice, require_field, success_response, validate_input,
};
use crate::handlers::suppliers::SupplierResponse;
use crate::{
    errors::{ApiError, ServiceError},
    services::products::{CreateProductInput, UpdateProductInput},
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
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

const DEFAULT_UNIT_OF_MEASURE: &str = "pieces";

/// Product record as returned by the browse endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub unit_of_measure: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<product::Model> for ProductResponse {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            sku: model.sku,
            description: model.description,
            category: model.category,
            unit_of_measure: model.unit_of_measure,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListView {
    pub products: Vec<ProductResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetailView {
    pub product: ProductResponse,
    pub suppliers: Vec<SupplierResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductFormView {
    pub title: String,
    pub product: Option<ProductResponse>,
}

/// Browser form payload for creating or editing a product
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductFormPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub unit_of_measure: Option<String>,
}

#[derive(Debug, Validate)]
struct ProductFormData {
    #[validate(length(max = 255, message = "name cannot exceed 255 characters"))]
    name: String,
    #[validate(length(max = 100, message = "sku cannot exceed 100 characters"))]
    sku: String,
    #[validate(length(max = 2000, message = "description cannot exceed 2000 characters"))]
    description: Option<String>,
    #[validate(length(max = 100, message = "category cannot exceed 100 characters"))]
    category: Option<String>,
    #[validate(length(max = 50, message = "unit_of_measure cannot exceed 50 characters"))]
    unit_of_measure: String,
}

fn validated_form_data(payload: ProductFormPayload) -> Result<ProductFormData, ApiError> {
    let name = normalize_string(payload.name);
    require_field(&name, "name")?;
    let sku = normalize_string(payload.sku);
    require_field(&sku, "sku")?;
    let unit_of_measure = normalize_optional_string(payload.unit_of_measure)
        .unwrap_or_else(|| DEFAULT_UNIT_OF_MEASURE.to_string());
    let data = ProductFormData {
        name,
        sku,
        description: normalize_optional_string(payload.description),
        category: normalize_optional_string(payload.category),
        unit_of_measure,
    };
    validate_input(&data)?;
    Ok(data)
}

pub fn products_routes() -> Router<AppState> {
    Router::new()
        .route("/products/", get(list_products))
        .route("/products/create/", get(new_product_form).post(create_product))
        .route("/products/:id/", get(product_detail))
        .route(
            "/products/:id/edit/",
            get(edit_product_form).post(update_product),
        )
        .route("/products/:id/delete/", post(delete_product))
}

#[utoipa::path(
    get,
    path = "/suppliers/products/",
    responses(
        (status = 200, description = "Products listed", body = ProductListView)
    ),
    tag = "Products"
)]
pub async fn list_products(State(state): State<AppState>) -> Result<Response, ApiError> {
    let products = state
        .services
        .products
        .list_products()
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ProductListView {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/suppliers/products/create/",
    responses(
        (status = 200, description = "Blank product form", body = ProductFormView)
    ),
    tag = "Products"
)]
pub async fn new_product_form() -> Response {
    success_response(ProductFormView {
        title: "Create Product".to_string(),
        product: None,
    })
}

#[utoipa::path(
    post,
    path = "/suppliers/products/create/",
    request_body(
        content = ProductFormPayload,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Product created, redirects to the product list"),
        (status = 400, description = "Invalid form input", body = crate::errors::ErrorResponse),
        (status = 409, description = "SKU already taken", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Form(payload): Form<ProductFormPayload>,
) -> Result<Response, ApiError> {
    let data = validated_form_data(payload)?;
    state
        .services
        .products
        .create_product(CreateProductInput {
            name: data.name,
            sku: data.sku,
            description: data.description,
            category: data.category,
            unit_of_measure: data.unit_of_measure,
        })
        .await
        .map_err(map_service_error)?;
    Ok(redirect_with_notice("/suppliers/products/", "created").into_response())
}

#[utoipa::path(
    get,
    path = "/suppliers/products/:id/",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product retrieved", body = ProductDetailView),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn product_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let product_id = parse_identity(&id, "Product").map_err(map_service_error)?;
    let product = state
        .services
        .products
        .get_product(product_id)
        .await
        .map_err(map_service_error)?;
    let suppliers = state
        .services
        .supply_links
        .list_suppliers(product_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ProductDetailView {
        product: product.into(),
        suppliers: suppliers.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/suppliers/products/:id/edit/",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Prefilled product form", body = ProductFormView),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn edit_product_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let product_id = parse_identity(&id, "Product").map_err(map_service_error)?;
    let product = state
        .services
        .products
        .get_product(product_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ProductFormView {
        title: "Edit Product".to_string(),
        product: Some(product.into()),
    }))
}

#[utoipa::path(
    post,
    path = "/suppliers/products/:id/edit/",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body(
        content = ProductFormPayload,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Product updated, redirects to the product detail"),
        (status = 400, description = "Invalid form input", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "SKU already taken", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(payload): Form<ProductFormPayload>,
) -> Result<Response, ApiError> {
    let product_id = parse_identity(&id, "Product").map_err(map_service_error)?;
    // Missing records 404 before any field validation runs
    state
        .services
        .products
        .get_product(product_id)
        .await
        .map_err(map_service_error)?;
    let data = validated_form_data(payload)?;
    state
        .services
        .products
        .update_product(
            product_id,
            UpdateProductInput {
                name: data.name,
                sku: data.sku,
                description: data.description,
                category: data.category,
                unit_of_measure: data.unit_of_measure,
            },
        )
        .await
        .map_err(map_service_error)?;
    Ok(
        redirect_with_notice(&format!("/suppliers/products/{product_id}/"), "updated")
            .into_response(),
    )
}

#[utoipa::path(
    post,
    path = "/suppliers/products/:id/delete/",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 303, description = "Redirects to the product list with the outcome notice")
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let outcome = match parse_identity(&id, "Product") {
        Ok(product_id) => state.services.products.delete_product(product_id).await,
        Err(err) => Err(err),
    };
    match outcome {
        Ok(()) => Ok(redirect_with_notice("/suppliers/products/", "deleted").into_response()),
        Err(ServiceError::NotFound(_)) => {
            Ok(redirect_with_error("/suppliers/products/", "not-found").into_response())
        }
        Err(err) => Err(map_service_error(err)),
    }
}
