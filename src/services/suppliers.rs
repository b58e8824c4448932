use crate::{
    entities::supplier,
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

/// Service for managing supplier records
#[derive(Clone)]
pub struct SupplierService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

impl SupplierService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Create a new supplier
    #[instrument(skip(self, input))]
    pub async fn create_supplier(
        &self,
        input: CreateSupplierInput,
    ) -> Result<supplier::Model, ServiceError> {
        self.ensure_name_available(&input.name, None).await?;

        let supplier_id = Uuid::new_v4();

        let supplier = supplier::ActiveModel {
            id: Set(supplier_id),
            name: Set(input.name.clone()),
            contact_person: Set(input.contact_person),
            email: Set(input.email),
            phone: Set(input.phone),
            address: Set(input.address),
            country: Set(input.country),
            ..Default::default()
        };

        let supplier = supplier.insert(&*self.db).await.map_err(|e| {
            ServiceError::classify_unique_violation(e, "Supplier name", &input.name)
        })?;

        self.event_sender
            .send_or_log(Event::SupplierCreated(supplier_id));

        info!("Supplier created: {}", supplier_id);
        Ok(supplier)
    }

    /// Get a supplier by ID
    #[instrument(skip(self))]
    pub async fn get_supplier(&self, supplier_id: Uuid) -> Result<supplier::Model, ServiceError> {
        supplier::Entity::find_by_id(supplier_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Supplier {}", supplier_id)))
    }

    /// List all suppliers, name order
    #[instrument(skip(self))]
    pub async fn list_suppliers(&self) -> Result<Vec<supplier::Model>, ServiceError> {
        supplier::Entity::find()
            .order_by_asc(supplier::Column::Name)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    /// Update a supplier. The edit form posts every field, so every field
    /// is written; blank optionals clear the stored value.
    #[instrument(skip(self, input))]
    pub async fn update_supplier(
        &self,
        supplier_id: Uuid,
        input: UpdateSupplierInput,
    ) -> Result<supplier::Model, ServiceError> {
        let supplier = self.get_supplier(supplier_id).await?;
        self.ensure_name_available(&input.name, Some(supplier_id))
            .await?;

        let mut supplier: supplier::ActiveModel = supplier.into();
        supplier.name = Set(input.name.clone());
        supplier.contact_person = Set(input.contact_person);
        supplier.email = Set(input.email);
        supplier.phone = Set(input.phone);
        supplier.address = Set(input.address);
        supplier.country = Set(input.country);

        let supplier = supplier.update(&*self.db).await.map_err(|e| {
            ServiceError::classify_unique_violation(e, "Supplier name", &input.name)
        })?;

        self.event_sender
            .send_or_log(Event::SupplierUpdated(supplier_id));

        info!("Supplier updated: {}", supplier_id);
        Ok(supplier)
    }

    /// Delete a supplier. Its supply edges go with it via the cascading
    /// foreign key.
    #[instrument(skip(self))]
    pub async fn delete_supplier(&self, supplier_id: Uuid) -> Result<(), ServiceError> {
        let supplier = self.get_supplier(supplier_id).await?;

        supplier::Entity::delete_by_id(supplier.id)
            .exec(&*self.db)
            .await?;

        self.event_sender
            .send_or_log(Event::SupplierDeleted(supplier_id));

        info!("Supplier deleted: {}", supplier_id);
        Ok(())
    }

    /// (id, label) pairs for the link-form dropdown
    #[instrument(skip(self))]
    pub async fn list_for_selection(&self) -> Result<Vec<SelectionOption>, ServiceError> {
        let suppliers = self.list_suppliers().await?;
        Ok(suppliers
            .into_iter()
            .map(|s| SelectionOption::new(s.id, s.name))
            .collect())
    }

    async fn ensure_name_available(
        &self,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = supplier::Entity::find().filter(supplier::Column::Name.eq(name));
        if let Some(id) = exclude {
            query = query.filter(supplier::Column::Id.ne(id));
        }

        if query.one(&*self.db).await?.is_some() {
            return Err(ServiceError::duplicate_key("Supplier name", name));
        }
        Ok(())
    }
}

/// Input for creating a supplier
#[derive(Debug, Deserialize)]
pub struct CreateSupplierInput {
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
}

/// Input for updating a supplier
#[derive(Debug, Deserialize)]
pub struct UpdateSupplierInput {
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
}
