use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250310_000005_create_stock_levels_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StockLevels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StockLevels::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StockLevels::ProductId).uuid().not_null())
                    .col(ColumnDef::new(StockLevels::StoreId).uuid().not_null())
                    .col(
                        ColumnDef::new(StockLevels::Quantity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(StockLevels::Aisle).string_len(50).null())
                    .col(
                        ColumnDef::new(StockLevels::LastUpdated)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_levels_product_id")
                            .from(StockLevels::Table, StockLevels::ProductId)
                            .to(
                                super::m20250310_000002_create_products_table::Products::Table,
                                super::m20250310_000002_create_products_table::Products::Id,
                            )
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_levels_store_id")
                            .from(StockLevels::Table, StockLevels::StoreId)
                            .to(
                                super::m20250310_000003_create_stores_table::Stores::Table,
                                super::m20250310_000003_create_stores_table::Stores::Id,
                            )
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One stocking edge per (product, store) pair; assign_stock upserts
        // against this.
        manager
            .create_index(
                Index::create()
                    .name("uq_stock_levels_product_store")
                    .table(StockLevels::Table)
                    .col(StockLevels::ProductId)
                    .col(StockLevels::StoreId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stock_levels_store_id")
                    .table(StockLevels::Table)
                    .col(StockLevels::StoreId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stock_levels_quantity")
                    .table(StockLevels::Table)
                    .col(StockLevels::Quantity)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StockLevels::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum StockLevels {
    Table,
    Id,
    ProductId,
    StoreId,
    Quantity,
    Aisle,
    LastUpdated,
}
