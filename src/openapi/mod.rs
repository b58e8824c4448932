use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Supplier Portal API",
        version = "0.1.0",
        description = r#"
# Supplier Portal API

Browser-form style service for a supply chain inventory graph: suppliers,
the products they supply, and the stores where those products sit on shelves.

## Conventions

- All browse routes live under `/suppliers/` and use trailing slashes.
- Forms submit as `application/x-www-form-urlencoded`; successful writes
  answer `303 See Other` with a `kind`/`notice` pair in the redirect query
  (for example `?kind=success&notice=created`).
- Supplier names and product SKUs are unique; collisions answer `409`.
- Linking a supplier to a product, or recording stock of a product at a
  store, upserts on the pair: repeating a submission updates the existing
  relationship instead of creating a second one.

## Error Handling

Errors use a consistent JSON envelope with appropriate status codes:

```json
{
  "error": "Bad Request",
  "message": "quantity cannot be negative",
  "timestamp": "2025-03-10T00:00:00Z"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Suppliers", description = "Supplier CRUD endpoints"),
        (name = "Products", description = "Product CRUD endpoints"),
        (name = "Stores", description = "Store CRUD endpoints"),
        (name = "Relationships", description = "Supplier-product links and stock assignments"),
        (name = "Dashboard", description = "Low stock reporting")
    ),
    paths(
        // Suppliers
        crate::handlers::suppliers::list_suppliers,
        crate::handlers::suppliers::new_supplier_form,
        crate::handlers::suppliers::create_supplier,
        crate::handlers::suppliers::supplier_detail,
        crate::handlers::suppliers::edit_supplier_form,
        crate::handlers::suppliers::update_supplier,
        crate::handlers::suppliers::delete_supplier,

        // Products
        crate::handlers::products::list_products,
        crate::handlers::products::new_product_form,
        crate::handlers::products::create_product,
        crate::handlers::products::product_detail,
        crate::handlers::products::edit_product_form,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,

        // Stores
        crate::handlers::stores::list_stores,
        crate::handlers::stores::new_store_form,
        crate::handlers::stores::create_store,
        crate::handlers::stores::store_detail,
        crate::handlers::stores::edit_store_form,
        crate::handlers::stores::update_store,
        crate::handlers::stores::delete_store,

        // Relationships
        crate::handlers::links::link_form,
        crate::handlers::links::submit_link,
        crate::handlers::links::stock_form,
        crate::handlers::links::submit_stock,

        // Dashboard
        crate::handlers::dashboard::dashboard,
    ),
    components(
        schemas(
            // Supplier types
            crate::handlers::suppliers::SupplierResponse,
            crate::handlers::suppliers::SupplierListView,
            crate::handlers::suppliers::SupplierDetailView,
            crate::handlers::suppliers::SupplierFormView,
            crate::handlers::suppliers::SupplierFormPayload,

            // Product types
            crate::handlers::products::ProductResponse,
            crate::handlers::products::ProductListView,
            crate::handlers::products::ProductDetailView,
            crate::handlers::products::ProductFormView,
            crate::handlers::products::ProductFormPayload,

            // Store types
            crate::handlers::stores::StoreResponse,
            crate::handlers::stores::StoreListView,
            crate::handlers::stores::StoreDetailView,
            crate::handlers::stores::StoreFormView,
            crate::handlers::stores::StoreFormPayload,
            crate::handlers::stores::StockedProductEntry,

            // Relationship types
            crate::services::SelectionOption,
            crate::handlers::links::LinkFormView,
            crate::handlers::links::LinkFormPayload,
            crate::handlers::links::StockFormView,
            crate::handlers::links::StockFormPayload,

            // Dashboard types
            crate::handlers::dashboard::LowStockEntry,
            crate::handlers::dashboard::DashboardView,

            // Error types
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
