// Entity services
pub mod products;
pub mod stores;
pub mod suppliers;

// Relationship services
pub mod stock;
pub mod supply_links;

// Reporting
pub mod reporting;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// (identity, label) pair for populating selection dropdowns on link
/// forms. Read-only; never part of validation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SelectionOption {
    pub id: Uuid,
    pub label: String,
}

impl SelectionOption {
    pub fn new(id: Uuid, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}
