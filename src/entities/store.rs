use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::Validate;

/// Store entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "stores")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Store name must be between 1 and 255 characters"
    ))]
    pub name: String,

    pub location: Option<String>,

    pub store_type: StoreType,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Store entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stock_level::Entity")]
    StockLevels,
}

impl Related<super::stock_level::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockLevels.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;

        let now = Utc::now();
        if insert {
            active_model.created_at = Set(now);
        }
        active_model.updated_at = Set(now);

        let model: Model = active_model.clone().try_into().map_err(|_| {
            DbErr::Custom("Store active model is missing fields required for validation".to_string())
        })?;

        if let Err(err) = model.validate() {
            return Err(DbErr::Custom(format!("Validation error: {}", err)));
        }

        Ok(active_model)
    }
}

/// Fixed store classification; the database stores the display string.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum, Display, EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
pub enum StoreType {
    #[sea_orm(string_value = "Retail")]
    Retail,
    #[sea_orm(string_value = "Warehouse")]
    Warehouse,
    #[sea_orm(string_value = "Distribution Center")]
    #[serde(rename = "Distribution Center")]
    #[strum(serialize = "Distribution Center")]
    DistributionCenter,
    #[sea_orm(string_value = "Outlet")]
    Outlet,
    #[sea_orm(string_value = "Flagship")]
    Flagship,
}
