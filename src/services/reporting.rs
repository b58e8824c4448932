use crate::{
    errors::ServiceError,
    queries::stock_queries::{EntityCounts, GetEntityCountsQuery, GetLowStockQuery, LowStockRow},
    queries::Query,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::instrument;

/// Read-only reporting over the whole graph
#[derive(Clone)]
pub struct ReportingService {
    db: Arc<DatabaseConnection>,
    default_threshold: i32,
}

/// Everything the dashboard shows in one roundtrip-bounded bundle
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub threshold: i32,
    pub counts: EntityCounts,
    pub low_stock_count: u64,
    pub low_stock: Vec<LowStockRow>,
}

impl ReportingService {
    pub fn new(db: Arc<DatabaseConnection>, default_threshold: i32) -> Self {
        Self {
            db,
            default_threshold,
        }
    }

    /// Low-stock rows plus entity cardinalities. `threshold` falls back
    /// to the configured default when not supplied.
    #[instrument(skip(self))]
    pub async fn get_dashboard(
        &self,
        threshold: Option<i32>,
    ) -> Result<DashboardReport, ServiceError> {
        let threshold = threshold.unwrap_or(self.default_threshold);
        if threshold < 0 {
            return Err(ServiceError::InvalidInput(
                "threshold cannot be negative".to_string(),
            ));
        }

        let low_stock = GetLowStockQuery { threshold }.execute(&self.db).await?;
        let counts = GetEntityCountsQuery {}.execute(&self.db).await?;

        Ok(DashboardReport {
            threshold,
            counts,
            low_stock_count: low_stock.len() as u64,
            low_stock,
        })
    }
}
