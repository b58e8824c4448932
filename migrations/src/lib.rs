pub use sea_orm_migration::prelude::*;

mod m20250310_000001_create_suppliers_table;
mod m20250310_000002_create_products_table;
mod m20250310_000003_create_stores_table;
mod m20250310_000004_create_supplies_table;
mod m20250310_000005_create_stock_levels_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250310_000001_create_suppliers_table::Migration),
            Box::new(m20250310_000002_create_products_table::Migration),
            Box::new(m20250310_000003_create_stores_table::Migration),
            Box::new(m20250310_000004_create_supplies_table::Migration),
            Box::new(m20250310_000005_create_stock_levels_table::Migration),
        ]
    }
}
