use crate::{
    entities::{product, supplier, supply},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Service for the supply edge between suppliers and products.
///
/// Writes are keyed on the (supplier, product) pair: linking an already
/// linked pair refreshes the supplied terms instead of stacking a second
/// edge. The pair's unique index makes the create-if-absent step atomic,
/// so concurrent link calls cannot produce duplicates.
#[derive(Clone)]
pub struct SupplyLinkService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

/// Outcome of a link call; `created` selects the success message.
#[derive(Debug, Clone)]
pub struct SupplyLinkOutcome {
    pub supply: supply::Model,
    pub created: bool,
}

impl SupplyLinkService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Link a supplier to a product, or refresh the terms of an existing
    /// link. Optional properties follow a sparse policy: only supplied
    /// keys are written, and `since` keeps its original value.
    #[instrument(skip(self, input))]
    pub async fn link_supplier_product(
        &self,
        input: LinkSupplierProductInput,
    ) -> Result<SupplyLinkOutcome, ServiceError> {
        let supplier_id = input.supplier_id;
        let product_id = input.product_id;

        self.ensure_supplier_exists(supplier_id).await?;
        self.ensure_product_exists(product_id).await?;

        let edge = supply::ActiveModel {
            id: Set(Uuid::new_v4()),
            supplier_id: Set(supplier_id),
            product_id: Set(product_id),
            since: Set(Utc::now()),
            unit_price: Set(input.unit_price),
            lead_time_days: Set(input.lead_time_days),
        };

        // Create-if-absent; zero rows affected means the pair already
        // exists and we update it in place instead.
        let inserted = supply::Entity::insert(edge)
            .on_conflict(
                OnConflict::columns([supply::Column::SupplierId, supply::Column::ProductId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&*self.db)
            .await?;
        let created = inserted > 0;

        if !created {
            let mut update = supply::Entity::update_many()
                .filter(supply::Column::SupplierId.eq(supplier_id))
                .filter(supply::Column::ProductId.eq(product_id));

            let mut touched = false;
            if let Some(price) = input.unit_price {
                update = update.col_expr(supply::Column::UnitPrice, Expr::value(price));
                touched = true;
            }
            if let Some(days) = input.lead_time_days {
                update = update.col_expr(supply::Column::LeadTimeDays, Expr::value(days));
                touched = true;
            }

            if touched {
                update.exec(&*self.db).await?;
            }
        }

        let supply = supply::Entity::find()
            .filter(supply::Column::SupplierId.eq(supplier_id))
            .filter(supply::Column::ProductId.eq(product_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::InternalError("Supply edge missing after upsert".to_string())
            })?;

        self.event_sender.send_or_log(Event::SupplyLinked {
            supplier_id,
            product_id,
            created,
        });

        if created {
            info!(
                "Supply link created: supplier {} -> product {}",
                supplier_id, product_id
            );
        } else {
            info!(
                "Supply link refreshed: supplier {} -> product {}",
                supplier_id, product_id
            );
        }

        Ok(SupplyLinkOutcome { supply, created })
    }

    /// Products reachable from a supplier's outgoing supply edges
    #[instrument(skip(self))]
    pub async fn list_supplied_products(
        &self,
        supplier_id: Uuid,
    ) -> Result<Vec<product::Model>, ServiceError> {
        self.ensure_supplier_exists(supplier_id).await?;

        let rows = supply::Entity::find()
            .filter(supply::Column::SupplierId.eq(supplier_id))
            .find_also_related(product::Entity)
            .order_by_asc(product::Column::Name)
            .all(&*self.db)
            .await?;

        Ok(rows.into_iter().filter_map(|(_, p)| p).collect())
    }

    /// Suppliers reachable from a product's incoming supply edges
    #[instrument(skip(self))]
    pub async fn list_suppliers(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<supplier::Model>, ServiceError> {
        self.ensure_product_exists(product_id).await?;

        let rows = supply::Entity::find()
            .filter(supply::Column::ProductId.eq(product_id))
            .find_also_related(supplier::Entity)
            .order_by_asc(supplier::Column::Name)
            .all(&*self.db)
            .await?;

        Ok(rows.into_iter().filter_map(|(_, s)| s).collect())
    }

    async fn ensure_supplier_exists(&self, supplier_id: Uuid) -> Result<(), ServiceError> {
        if supplier::Entity::find_by_id(supplier_id)
            .one(&*self.db)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound(format!("Supplier {}", supplier_id)));
        }
        Ok(())
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
}

/// Input for linking a supplier to a product
#[derive(Debug, Deserialize)]
pub struct LinkSupplierProductInput {
    pub supplier_id: Uuid,
    pub product_id: Uuid,
    pub unit_price: Option<Decimal>,
    pub lead_time_days: Option<i32>,
}
