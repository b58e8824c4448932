use crate::{
    entities::store::{self, StoreType},
    errors::ServiceError,
    events::{Event, EventSender},
    services::SelectionOption,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Service for managing store records
#[derive(Clone)]
pub struct StoreService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

impl StoreService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Create a new store
    #[instrument(skip(self, input))]
    pub async fn create_store(&self, input: CreateStoreInput) -> Result<store::Model, ServiceError> {
        let store_id = Uuid::new_v4();

        let store = store::ActiveModel {
            id: Set(store_id),
            name: Set(input.name),
            location: Set(input.location),
            store_type: Set(input.store_type),
            ..Default::default()
        };

        let store = store.insert(&*self.db).await?;

        self.event_sender.send_or_log(Event::StoreCreated(store_id));

        info!("Store created: {}", store_id);
        Ok(store)
    }

    /// Get a store by ID
    #[instrument(skip(self))]
    pub async fn get_store(&self, store_id: Uuid) -> Result<store::Model, ServiceError> {
        store::Entity::find_by_id(store_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Store {}", store_id)))
    }

    /// List all stores, name order
    #[instrument(skip(self))]
    pub async fn list_stores(&self) -> Result<Vec<store::Model>, ServiceError> {
        store::Entity::find()
            .order_by_asc(store::Column::Name)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    /// Update a store; the edit form posts every field
    #[instrument(skip(self, input))]
    pub async fn update_store(
        &self,
        store_id: Uuid,
        input: UpdateStoreInput,
    ) -> Result<store::Model, ServiceError> {
        let store = self.get_store(store_id).await?;

        let mut store: store::ActiveModel = store.into();
        store.name = Set(input.name);
        store.location = Set(input.location);
        store.store_type = Set(input.store_type);

        let store = store.update(&*self.db).await?;

        self.event_sender.send_or_log(Event::StoreUpdated(store_id));

        info!("Store updated: {}", store_id);
        Ok(store)
    }

    /// Delete a store. Stock rows cascade with it.
    #[instrument(skip(self))]
    pub async fn delete_store(&self, store_id: Uuid) -> Result<(), ServiceError> {
        let store = self.get_store(store_id).await?;

        store::Entity::delete_by_id(store.id)
            .exec(&*self.db)
            .await?;

        self.event_sender.send_or_log(Event::StoreDeleted(store_id));

        info!("Store deleted: {}", store_id);
        Ok(())
    }

    /// (id, label) pairs for the stock-assignment dropdown
    #[instrument(skip(self))]
    pub async fn list_for_selection(&self) -> Result<Vec<SelectionOption>, ServiceError> {
        let stores = self.list_stores().await?;
        Ok(stores
            .into_iter()
            .map(|s| {
                let label = match &s.location {
                    Some(location) => format!("{} - {}", s.name, location),
                    None => s.name.clone(),
                };
                SelectionOption::new(s.id, label)
            })
            .collect())
    }
}

/// Input for creating a store
#[derive(Debug, Deserialize)]
pub struct CreateStoreInput {
    pub name: String,
    pub location: Option<String>,
    pub store_type: StoreType,
}

/// Input for updating a store
#[derive(Debug, Deserialize)]
pub struct UpdateStoreInput {
    pub name: String,
    pub location: Option<String>,
    pub store_type: StoreType,
}
