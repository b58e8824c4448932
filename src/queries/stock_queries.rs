use crate::{
    entities::{product, stock_level, store, supplier},
    errors::ServiceError,
};
use async_trait::async_trait;
use sea_orm::{
    DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use sea_orm::{ColumnTrait, RelationTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[async_trait]
pub trait Query: Send + Sync {
    type Result: Send + Sync;

    async fn execute(&self, db: &DatabaseConnection) -> Result<Self::Result, ServiceError>;
}

/// One stocking edge sitting below the low-stock threshold, joined with
/// both of its endpoints so the report needs no follow-up lookups.
#[derive(Debug, Clone, Serialize, FromQueryResult)]
pub struct LowStockRow {
    pub product_id: Uuid,
    pub product_name: String,
    pub sku: String,
    pub store_id: Uuid,
    pub store_name: String,
    pub quantity: i32,
    pub aisle: Option<String>,
}

impl LowStockRow {
    /// Aisle for display. Distinguishes "never recorded" from a blank value.
    pub fn aisle_label(&self) -> &str {
        match self.aisle.as_deref() {
            Some(aisle) => aisle,
            None => "not set",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetLowStockQuery {
    pub threshold: i32,
}

#[async_trait]
impl Query for GetLowStockQuery {
    type Result = Vec<LowStockRow>;

    async fn execute(&self, db: &DatabaseConnection) -> Result<Self::Result, ServiceError> {
        // One joined query; quantities strictly below the threshold,
        // smallest first.
        stock_level::Entity::find()
            .join(
                sea_orm::JoinType::InnerJoin,
                stock_level::Relation::Product.def(),
            )
            .join(
                sea_orm::JoinType::InnerJoin,
                stock_level::Relation::Store.def(),
            )
            .filter(stock_level::Column::Quantity.lt(self.threshold))
            .order_by_asc(stock_level::Column::Quantity)
            .select_only()
            .column_as(product::Column::Id, "product_id")
            .column_as(product::Column::Name, "product_name")
            .column(product::Column::Sku)
            .column_as(store::Column::Id, "store_id")
            .column_as(store::Column::Name, "store_name")
            .column(stock_level::Column::Quantity)
            .column(stock_level::Column::Aisle)
            .into_model::<LowStockRow>()
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)
    }
}

/// Cardinalities shown alongside the low-stock report.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EntityCounts {
    pub suppliers: u64,
    pub products: u64,
    pub stores: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetEntityCountsQuery {}

#[async_trait]
impl Query for GetEntityCountsQuery {
    type Result = EntityCounts;

    async fn execute(&self, db: &DatabaseConnection) -> Result<Self::Result, ServiceError> {
        let suppliers = supplier::Entity::find()
            .count(db)
            .await
            .map_err(ServiceError::DatabaseError)?;
        let products = product::Entity::find()
            .count(db)
            .await
            .map_err(ServiceError::DatabaseError)?;
        let stores = store::Entity::find()
            .count(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        Ok(EntityCounts {
            suppliers,
            products,
            stores,
        })
    }
}
