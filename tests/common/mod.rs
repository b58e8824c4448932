use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use supplychain_api::entities::{product, store, store::StoreType, supplier};
use supplychain_api::services::{
    products::CreateProductInput, stores::CreateStoreInput, suppliers::CreateSupplierInput,
};
use supplychain_api::{
    config::AppConfig,
    db,
    events::{self, EventSender},
    handlers::AppServices,
    AppState,
};
use tokio::sync::mpsc;
use tower::ServiceExt;

/// Helper harness for spinning up an application backed by an in-memory
/// SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        // Minimal configuration suitable for tests. Each harness owns a
        // private in-memory database, so suites can run in parallel. A
        // single pooled connection keeps that database alive for the
        // lifetime of the harness.
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.auto_migrate = true;
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");

        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let (event_tx, event_rx) = mpsc::channel(256);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let services = AppServices::new(db_arc.clone(), Arc::new(event_sender.clone()), &cfg);

        let state = AppState {
            db: db_arc,
            config: cfg,
            event_sender,
            services,
        };

        let router = supplychain_api::app(state.clone());

        Self {
            router,
            state,
            _event_task: event_task,
        }
    }

    /// Send a bodyless request against the router.
    pub async fn request(&self, method: Method, uri: &str) -> axum::response::Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// POST a browser-style urlencoded form to the given path.
    #[allow(dead_code)]
    pub async fn submit_form(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
    ) -> axum::response::Response {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form_body(fields)))
            .expect("failed to build form request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Create a supplier directly through the service layer.
    #[allow(dead_code)]
    pub async fn seed_supplier(&self, name: &str) -> supplier::Model {
        self.state
            .services
            .suppliers
            .create_supplier(CreateSupplierInput {
                name: name.to_string(),
                contact_person: None,
                email: None,
                phone: None,
                address: None,
                country: None,
            })
            .await
            .expect("seed supplier for tests")
    }

    /// Create a product directly through the service layer.
    #[allow(dead_code)]
    pub async fn seed_product(&self, name: &str, sku: &str) -> product::Model {
        self.state
            .services
            .products
            .create_product(CreateProductInput {
                name: name.to_string(),
                sku: sku.to_string(),
                description: None,
                category: None,
                unit_of_measure: "pieces".to_string(),
            })
            .await
            .expect("seed product for tests")
    }

    /// Create a store directly through the service layer.
    #[allow(dead_code)]
    pub async fn seed_store(&self, name: &str, store_type: StoreType) -> store::Model {
        self.state
            .services
            .stores
            .create_store(CreateStoreInput {
                name: name.to_string(),
                location: None,
                store_type,
            })
            .await
            .expect("seed store for tests")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self._event_task.abort();
    }
}

/// Encode form fields the way a browser submits them.
#[allow(dead_code)]
pub fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{}={}", encode_component(name), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

#[allow(dead_code)]
fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// The Location header of a redirect response.
#[allow(dead_code)]
pub fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect location header")
        .to_str()
        .expect("utf-8 location header")
}
