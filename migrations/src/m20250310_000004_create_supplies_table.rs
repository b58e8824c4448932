use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250310_000004_create_supplies_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Supplies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Supplies::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Supplies::SupplierId).uuid().not_null())
                    .col(ColumnDef::new(Supplies::ProductId).uuid().not_null())
                    .col(
                        ColumnDef::new(Supplies::Since)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Supplies::UnitPrice)
                            .decimal_len(19, 4)
                            .null(),
                    )
                    .col(ColumnDef::new(Supplies::LeadTimeDays).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_supplies_supplier_id")
                            .from(Supplies::Table, Supplies::SupplierId)
                            .to(
                                super::m20250310_000001_create_suppliers_table::Suppliers::Table,
                                super::m20250310_000001_create_suppliers_table::Suppliers::Id,
                            )
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_supplies_product_id")
                            .from(Supplies::Table, Supplies::ProductId)
                            .to(
                                super::m20250310_000002_create_products_table::Products::Table,
                                super::m20250310_000002_create_products_table::Products::Id,
                            )
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One supply edge per (supplier, product) pair; the link handler
        // upserts against this.
        manager
            .create_index(
                Index::create()
                    .name("uq_supplies_supplier_product")
                    .table(Supplies::Table)
                    .col(Supplies::SupplierId)
                    .col(Supplies::ProductId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_supplies_product_id")
                    .table(Supplies::Table)
                    .col(Supplies::ProductId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Supplies::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Supplies {
    Table,
    Id,
    SupplierId,
    ProductId,
    Since,
    UnitPrice,
    LeadTimeDays,
}
