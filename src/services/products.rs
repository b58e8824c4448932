use crate::{
    entities::product,
    errors::ServiceError,
    events::{Event, EventSender},
    services::SelectionOption,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Service for managing the product catalog
#[derive(Clone)]
pub struct ProductService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

impl ProductService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Create a new product. SKU is the business key and must be unique.
    #[instrument(skip(self, input))]
    pub async fn create_product(
        &self,
        input: CreateProductInput,
    ) -> Result<product::Model, ServiceError> {
        self.ensure_sku_available(&input.sku, None).await?;

        let product_id = Uuid::new_v4();

        let product = product::ActiveModel {
            id: Set(product_id),
            name: Set(input.name),
            sku: Set(input.sku.clone()),
            description: Set(input.description),
            category: Set(input.category),
            unit_of_measure: Set(input.unit_of_measure),
            ..Default::default()
        };

        let product = product
            .insert(&*self.db)
            .await
            .map_err(|e| ServiceError::classify_unique_violation(e, "SKU", &input.sku))?;

        self.event_sender
            .send_or_log(Event::ProductCreated(product_id));

        info!("Product created: {} (sku {})", product_id, product.sku);
        Ok(product)
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: Uuid) -> Result<product::Model, ServiceError> {
        product::Entity::find_by_id(product_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {}", product_id)))
    }

    /// List all products, name order
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<product::Model>, ServiceError> {
        product::Entity::find()
            .order_by_asc(product::Column::Name)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    /// Update a product; the edit form posts every field
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> Result<product::Model, ServiceError> {
        let product = self.get_product(product_id).await?;
        self.ensure_sku_available(&input.sku, Some(product_id))
            .await?;

        let mut product: product::ActiveModel = product.into();
        product.name = Set(input.name);
        product.sku = Set(input.sku.clone());
        product.description = Set(input.description);
        product.category = Set(input.category);
        product.unit_of_measure = Set(input.unit_of_measure);

        let product = product
            .update(&*self.db)
            .await
            .map_err(|e| ServiceError::classify_unique_violation(e, "SKU", &input.sku))?;

        self.event_sender
            .send_or_log(Event::ProductUpdated(product_id));

        info!("Product updated: {}", product_id);
        Ok(product)
    }

    /// Delete a product. Supply edges and stock rows cascade with it.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, product_id: Uuid) -> Result<(), ServiceError> {
        let product = self.get_product(product_id).await?;

        product::Entity::delete_by_id(product.id)
            .exec(&*self.db)
            .await?;

        self.event_sender
            .send_or_log(Event::ProductDeleted(product_id));

        info!("Product deleted: {}", product_id);
        Ok(())
    }

    /// (id, label) pairs for the link-form dropdowns; label carries the
    /// SKU so same-named products stay distinguishable.
    #[instrument(skip(self))]
    pub async fn list_for_selection(&self) -> Result<Vec<SelectionOption>, ServiceError> {
        let products = self.list_products().await?;
        Ok(products
            .into_iter()
            .map(|p| SelectionOption::new(p.id, format!("{} ({})", p.name, p.sku)))
            .collect())
    }

    async fn ensure_sku_available(
        &self,
        sku: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = product::Entity::find().filter(product::Column::Sku.eq(sku));
        if let Some(id) = exclude {
            query = query.filter(product::Column::Id.ne(id));
        }

        if query.one(&*self.db).await?.is_some() {
            return Err(ServiceError::duplicate_key("SKU", sku));
        }
        Ok(())
    }
}

/// Input for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub unit_of_measure: String,
}

/// Input for updating a product
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub unit_of_measure: String,
}
