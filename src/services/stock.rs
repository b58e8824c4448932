use crate::{
    entities::{product, stock_level, store},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Service for the stocking edge between products and stores.
///
/// All writes are upserts keyed on the (product, store) pair; the pair's
/// unique index keeps concurrent assignments from creating a second row
/// for the same pair.
#[derive(Clone)]
pub struct StockService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

/// Outcome of a stock assignment; `created` selects the success message.
#[derive(Debug, Clone)]
pub struct StockAssignment {
    pub record: stock_level::Model,
    pub created: bool,
}

impl StockService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Record how much of a product a store holds. Quantity is always
    /// written and last_updated refreshed; the aisle changes only when a
    /// non-empty value was supplied, so an omitted aisle leaves the
    /// recorded one untouched.
    #[instrument(skip(self, input))]
    pub async fn assign_stock(
        &self,
        input: AssignStockInput,
    ) -> Result<StockAssignment, ServiceError> {
        let product_id = input.product_id;
        let store_id = input.store_id;

        self.ensure_product_exists(product_id).await?;
        self.ensure_store_exists(store_id).await?;

        let now = Utc::now();

        let edge = stock_level::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(product_id),
            store_id: Set(store_id),
            quantity: Set(input.quantity),
            aisle: Set(input.aisle.clone()),
            last_updated: Set(now),
        };

        let inserted = stock_level::Entity::insert(edge)
            .on_conflict(
                OnConflict::columns([stock_level::Column::ProductId, stock_level::Column::StoreId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&*self.db)
            .await?;
        let created = inserted > 0;

        if !created {
            let mut update = stock_level::Entity::update_many()
                .filter(stock_level::Column::ProductId.eq(product_id))
                .filter(stock_level::Column::StoreId.eq(store_id))
                .col_expr(stock_level::Column::Quantity, Expr::value(input.quantity))
                .col_expr(stock_level::Column::LastUpdated, Expr::value(now));

            if let Some(aisle) = input.aisle.as_deref() {
                update = update.col_expr(stock_level::Column::Aisle, Expr::value(aisle));
            }

            update.exec(&*self.db).await?;
        }

        let record = stock_level::Entity::find()
            .filter(stock_level::Column::ProductId.eq(product_id))
            .filter(stock_level::Column::StoreId.eq(store_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::InternalError("Stock row missing after upsert".to_string())
            })?;

        self.event_sender.send_or_log(Event::StockAssigned {
            product_id,
            store_id,
            quantity: input.quantity,
            created,
        });

        info!(
            "Stock {}: product {} at store {} -> {} units",
            if created { "recorded" } else { "updated" },
            product_id,
            store_id,
            input.quantity
        );

        Ok(StockAssignment { record, created })
    }

    /// Stock rows for a store together with the stocked product
    #[instrument(skip(self))]
    pub async fn stocked_products(
        &self,
        store_id: Uuid,
    ) -> Result<Vec<(stock_level::Model, Option<product::Model>)>, ServiceError> {
        self.ensure_store_exists(store_id).await?;

        stock_level::Entity::find()
            .filter(stock_level::Column::StoreId.eq(store_id))
            .find_also_related(product::Entity)
            .order_by_asc(product::Column::Name)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    async fn ensure_product_exists(&self, product_id: Uuid) -> Result<(), ServiceError> {
        if product::Entity::find_by_id(product_id)
            .one(&*self.db)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound(format!("Product {}", product_id)));
        }
        Ok(())
    }

    async fn ensure_store_exists(&self, store_id: Uuid) -> Result<(), ServiceError> {
        if store::Entity::find_by_id(store_id)
            .one(&*self.db)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound(format!("Store {}", store_id)));
        }
        Ok(())
    }
}

/// Input for assigning stock. `aisle` is None when the form field was
/// omitted or blank.
#[derive(Debug, Deserialize)]
pub struct AssignStockInput {
    pub product_id: Uuid,
    pub store_id: Uuid,
    pub quantity: i32,
    pub aisle: Option<String>,
}
