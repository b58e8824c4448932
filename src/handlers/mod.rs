pub mod common;
pub mod dashboard;
pub mod links;
pub mod products;
pub mod stores;
pub mod suppliers;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::events::EventSender;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub suppliers: Arc<crate::services::suppliers::SupplierService>,
    pub products: Arc<crate::services::products::ProductService>,
    pub stores: Arc<crate::services::stores::StoreService>,
    pub supply_links: Arc<crate::services::supply_links::SupplyLinkService>,
    pub stock: Arc<crate::services::stock::StockService>,
    pub reporting: Arc<crate::services::reporting::ReportingService>,
}

impl AppServices {
    /// Build the AppServices container backing the HTTP layer.
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>, config: &AppConfig) -> Self {
        let suppliers = Arc::new(crate::services::suppliers::SupplierService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let products = Arc::new(crate::services::products::ProductService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let stores = Arc::new(crate::services::stores::StoreService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let supply_links = Arc::new(crate::services::supply_links::SupplyLinkService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let stock = Arc::new(crate::services::stock::StockService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let reporting = Arc::new(crate::services::reporting::ReportingService::new(
            db_pool,
            config.low_stock_threshold,
        ));

        Self {
            suppliers,
            products,
            stores,
            supply_links,
            stock,
            reporting,
        }
    }
}
