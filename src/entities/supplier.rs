use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Supplier entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Company name, unique across suppliers
    #[validate(length(
        min = 1,
        max = 255,
        message = "Supplier name must be between 1 and 255 characters"
    ))]
    pub name: String,

    /// Primary contact at the supplier
    pub contact_person: Option<String>,

    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,

    pub phone: Option<String>,

    pub address: Option<String>,

    pub country: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Supplier entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::supply::Entity")]
    Supplies,
}

impl Related<super::supply::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplies.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;

        // One instant for both stamps so a fresh record has
        // created_at == updated_at.
        let now = Utc::now();
        if insert {
            active_model.created_at = Set(now);
        }
        active_model.updated_at = Set(now);

        let model: Model = active_model.clone().try_into().map_err(|_| {
            DbErr::Custom("Supplier active model is missing fields required for validation".to_string())
        })?;

        if let Err(err) = model.validate() {
            return Err(DbErr::Custom(format!("Validation error: {}", err)));
        }

        Ok(active_model)
    }
}
