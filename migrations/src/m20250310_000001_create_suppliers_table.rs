use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250310_000001_create_suppliers_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Suppliers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Suppliers::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Suppliers::Name)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Suppliers::ContactPerson)
                            .string_len(255)
                            .null(),
                    )
                    .col(ColumnDef::new(Suppliers::Email).string_len(255).null())
                    .col(ColumnDef::new(Suppliers::Phone).string_len(50).null())
                    .col(ColumnDef::new(Suppliers::Address).string_len(512).null())
                    .col(ColumnDef::new(Suppliers::Country).string_len(100).null())
                    .col(
                        ColumnDef::new(Suppliers::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Suppliers::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Suppliers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Suppliers {
    Table,
    Id,
    Name,
    ContactPerson,
    Email,
    Phone,
    Address,
    Country,
    CreatedAt,
    UpdatedAt,
}
