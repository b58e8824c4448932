/*!
 * Health endpoints for the supplier portal.
 *
 * - Basic health check (`/health`) - cached up/down status
 * - Readiness check (`/health/ready`) - verifies the database connection
 * - Liveness check (`/health/live`) - process is alive plus uptime
 * - Version info (`/health/version`) - build metadata
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

/// Basic health status
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
}

/// Health check detail for one component
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthDetail {
    pub status: HealthStatus,
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Overall health information
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthInfo {
    pub status: HealthStatus,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub details: HashMap<String, HealthDetail>,
}

/// Health check state
#[derive(Clone)]
pub struct HealthState {
    pub db_pool: Arc<DatabaseConnection>,
    pub health_cache: Arc<RwLock<HealthInfo>>,
    pub start_time: SystemTime,
}

impl HealthState {
    pub fn new(db_pool: Arc<DatabaseConnection>) -> Self {
        Self {
            db_pool,
            health_cache: Arc::new(RwLock::new(HealthInfo {
                status: HealthStatus::Up,
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: Utc::now(),
                uptime_seconds: 0,
                details: HashMap::new(),
            })),
            start_time: SystemTime::now(),
        }
    }

    pub fn uptime(&self) -> u64 {
        SystemTime::now()
            .duration_since(self.start_time)
            .unwrap_or(Duration::from_secs(0))
            .as_secs()
    }

    /// Re-probe components and refresh the cached health snapshot
    pub async fn update_health(&self) {
        let database = match crate::db::check_connection(&self.db_pool).await {
            Ok(_) => HealthDetail {
                status: HealthStatus::Up,
                message: None,
                timestamp: Utc::now(),
            },
            Err(e) => {
                error!("Database health check failed: {}", e);
                HealthDetail {
                    status: HealthStatus::Down,
                    message: Some(e.to_string()),
                    timestamp: Utc::now(),
                }
            }
        };

        let mut health = self.health_cache.write().await;
        health.timestamp = Utc::now();
        health.uptime_seconds = self.uptime();
        health.details.insert("database".to_string(), database);

        let any_down = health
            .details
            .values()
            .any(|detail| detail.status == HealthStatus::Down);
        health.status = if any_down {
            HealthStatus::Down
        } else {
            HealthStatus::Up
        };
    }
}

/// Returns build and version information
pub async fn version_info() -> impl IntoResponse {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "commit": option_env!("GIT_HASH").unwrap_or("unknown"),
        "built": option_env!("BUILD_TIME").unwrap_or("unknown"),
    }))
}

/// Basic health check endpoint
pub async fn health_check(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    debug!("Health check endpoint called");

    let health = state.health_cache.read().await;

    let status_code = match health.status {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        status_code,
        Json(json!({
            "status": health.status,
            "version": health.version,
            "timestamp": health.timestamp,
        })),
    )
}

/// Readiness check endpoint, probes the database before answering
pub async fn readiness_check(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    debug!("Readiness check endpoint called");

    state.update_health().await;
    let health = state.health_cache.read().await;

    let status_code = match health.status {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        status_code,
        Json(json!({
            "ready": health.status == HealthStatus::Up,
            "timestamp": health.timestamp,
        })),
    )
}

/// Liveness check endpoint
pub async fn liveness_check(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    debug!("Liveness check endpoint called");

    let health = state.health_cache.read().await;

    (
        StatusCode::OK,
        Json(json!({
            "alive": true,
            "uptime_seconds": health.uptime_seconds,
            "timestamp": health.timestamp,
        })),
    )
}

/// Run periodic health checks
pub async fn run_health_checker(state: Arc<HealthState>) {
    debug!("Starting periodic health checker");

    let mut interval = tokio::time::interval(Duration::from_secs(30));

    loop {
        interval.tick().await;
        state.update_health().await;

        let health = state.health_cache.read().await;
        if health.status != HealthStatus::Up {
            warn!("System health is not optimal: {:?}", health.status);

            for (name, detail) in &health.details {
                if detail.status != HealthStatus::Up {
                    warn!("Component {name} is not healthy: {:?}", detail.status);
                }
            }
        }
    }
}

/// Creates the health check router and starts the background checker
pub fn health_routes(db_pool: Arc<DatabaseConnection>) -> Router {
    let health_state = Arc::new(HealthState::new(db_pool));

    tokio::spawn(run_health_checker(health_state.clone()));

    Router::new()
        .route("/", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check))
        .route("/version", get(version_info))
        .with_state(health_state)
}
