use crate::entities::supplier;
use crate::handlers::common::{
    map_service_error, normalize_optional_string, normalize_string, parse_identity,
    redirect_with_error, redirect_with_notice, require_field, success_response, validate_input,
};
use crate::handlers::products::ProductResponse;
use crate::{
    errors::{ApiError, ServiceError},
    services::suppliers::{CreateSupplierInput, UpdateSupplierInput},
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

/// Supplier record as returned by the browse endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct SupplierResponse {
    pub id: Uuid,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<supplier::Model> for SupplierResponse {
    fn from(model: supplier::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            contact_person: model.contact_person,
            email: model.email,
            phone: model.phone,
            address: model.address,
            country: model.country,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupplierListView {
    pub suppliers: Vec<SupplierResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupplierDetailView {
    pub supplier: SupplierResponse,
    pub supplied_products: Vec<ProductResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupplierFormView {
    pub title: String,
    pub supplier: Option<SupplierResponse>,
}

/// Browser form payload for creating or editing a supplier
#[derive(Debug, Deserialize, ToSchema)]
pub struct SupplierFormPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Validate)]
struct SupplierFormData {
    #[validate(length(max = 255, message = "name cannot exceed 255 characters"))]
    name: String,
    #[validate(length(max = 255, message = "contact_person cannot exceed 255 characters"))]
    contact_person: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    email: Option<String>,
    #[validate(length(max = 50, message = "phone cannot exceed 50 characters"))]
    phone: Option<String>,
    #[validate(length(max = 512, message = "address cannot exceed 512 characters"))]
    address: Option<String>,
    #[validate(length(max = 100, message = "country cannot exceed 100 characters"))]
    country: Option<String>,
}

fn validated_form_data(payload: SupplierFormPayload) -> Result<SupplierFormData, ApiError> {
    let name = normalize_string(payload.name);
    require_field(&name, "name")?;
    let data = SupplierFormData {
        name,
        contact_person: normalize_optional_string(payload.contact_person),
        email: normalize_optional_string(payload.email),
        phone: normalize_optional_string(payload.phone),
        address: normalize_optional_string(payload.address),
        country: normalize_optional_string(payload.country),
    };
    validate_input(&data)?;
    Ok(data)
}

pub fn suppliers_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_suppliers))
        .route("/create/", get(new_supplier_form).post(create_supplier))
        .route("/:id/", get(supplier_detail))
        .route("/:id/edit/", get(edit_supplier_form).post(update_supplier))
        .route("/:id/delete/", post(delete_supplier))
}

#[utoipa::path(
    get,
    path = "/suppliers/",
    responses(
        (status = 200, description = "Suppliers listed", body = SupplierListView)
    ),
    tag = "Suppliers"
)]
pub async fn list_suppliers(State(state): State<AppState>) -> Result<Response, ApiError> {
    let suppliers = state
        .services
        .suppliers
        .list_suppliers()
        .await
        .map_err(map_service_error)?;
    Ok(success_response(SupplierListView {
        suppliers: suppliers.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/suppliers/create/",
    responses(
        (status = 200, description = "Blank supplier form", body = SupplierFormView)
    ),
    tag = "Suppliers"
)]
pub async fn new_supplier_form() -> Response {
    success_response(SupplierFormView {
        title: "Create Supplier".to_string(),
        supplier: None,
    })
}

#[utoipa::path(
    post,
    path = "/suppliers/create/",
    request_body(
        content = SupplierFormPayload,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Supplier created, redirects to the supplier list"),
        (status = 400, description = "Invalid form input", body = crate::errors::ErrorResponse),
        (status = 409, description = "Supplier name already taken", body = crate::errors::ErrorResponse)
    ),
    tag = "Suppliers"
)]
pub async fn create_supplier(
    State(state): State<AppState>,
    Form(payload): Form<SupplierFormPayload>,
) -> Result<Response, ApiError> {
    let data = validated_form_data(payload)?;
    state
        .services
        .suppliers
        .create_supplier(CreateSupplierInput {
            name: data.name,
            contact_person: data.contact_person,
            email: data.email,
            phone: data.phone,
            address: data.address,
            country: data.country,
        })
        .await
        .map_err(map_service_error)?;
    Ok(redirect_with_notice("/suppliers/", "created").into_response())
}

#[utoipa::path(
    get,
    path = "/suppliers/:id/",
    params(
        ("id" = Uuid, Path, description = "Supplier ID")
    ),
    responses(
        (status = 200, description = "Supplier retrieved", body = SupplierDetailView),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Suppliers"
)]
pub async fn supplier_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let supplier_id = parse_identity(&id, "Supplier").map_err(map_service_error)?;
    let supplier = state
        .services
        .suppliers
        .get_supplier(supplier_id)
        .await
        .map_err(map_service_error)?;
    let supplied = state
        .services
        .supply_links
        .list_supplied_products(supplier_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(SupplierDetailView {
        supplier: supplier.into(),
        supplied_products: supplied.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/suppliers/:id/edit/",
    params(
        ("id" = Uuid, Path, description = "Supplier ID")
    ),
    responses(
        (status = 200, description = "Prefilled supplier form", body = SupplierFormView),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Suppliers"
)]
pub async fn edit_supplier_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let supplier_id = parse_identity(&id, "Supplier").map_err(map_service_error)?;
    let supplier = state
        .services
        .suppliers
        .get_supplier(supplier_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(SupplierFormView {
        title: "Edit Supplier".to_string(),
        supplier: Some(supplier.into()),
    }))
}

#[utoipa::path(
    post,
    path = "/suppliers/:id/edit/",
    params(
        ("id" = Uuid, Path, description = "Supplier ID")
    ),
    request_body(
        content = SupplierFormPayload,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Supplier updated, redirects to the supplier detail"),
        (status = 400, description = "Invalid form input", body = crate::errors::ErrorResponse),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Supplier name already taken", body = crate::errors::ErrorResponse)
    ),
    tag = "Suppliers"
)]
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(payload): Form<SupplierFormPayload>,
) -> Result<Response, ApiError> {
    let supplier_id = parse_identity(&id, "Supplier").map_err(map_service_error)?;
    // Missing records 404 before any field validation runs
    state
        .services
        .suppliers
        .get_supplier(supplier_id)
        .await
        .map_err(map_service_error)?;
    let data = validated_form_data(payload)?;
    state
        .services
        .suppliers
        .update_supplier(
            supplier_id,
            UpdateSupplierInput {
                name: data.name,
                contact_person: data.contact_person,
                email: data.email,
                phone: data.phone,
                address: data.address,
                country: data.country,
            },
        )
        .await
        .map_err(map_service_error)?;
    Ok(redirect_with_notice(&format!("/suppliers/{supplier_id}/"), "updated").into_response())
}

#[utoipa::path(
    post,
    path = "/suppliers/:id/delete/",
    params(
        ("id" = Uuid, Path, description = "Supplier ID")
    ),
    responses(
        (status = 303, description = "Redirects to the supplier list with the outcome notice")
    ),
    tag = "Suppliers"
)]
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let outcome = match parse_identity(&id, "Supplier") {
        Ok(supplier_id) => state.services.suppliers.delete_supplier(supplier_id).await,
        Err(err) => Err(err),
    };
    match outcome {
        Ok(()) => Ok(redirect_with_notice("/suppliers/", "deleted").into_response()),
        Err(ServiceError::NotFound(_)) => {
            Ok(redirect_with_error("/suppliers/", "not-found").into_response())
        }
        Err(err) => Err(map_service_error(err)),
    }
}
