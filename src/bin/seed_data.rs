//! Seed data script - populates the database with realistic demo data
//!
//! Run with: cargo run --bin seed-data
//!
//! This creates:
//! - 3 suppliers
//! - 6 products
//! - 4 stores
//! - supply links with varying pricing/lead-time detail
//! - stock levels including several low-stock rows for the dashboard

use chrono::Utc;
use migrations::Migrator;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, Set};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use supplychain_api::entities::{product, stock_level, store, supplier, supply};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("=== Supplier Portal Seed Data ===");
    info!("Creating realistic demo data for exploration...");

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://supplychain.db?mode=rwc".to_string());

    let mut options = ConnectOptions::new(database_url.clone());
    options
        .max_connections(5)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10));

    info!("Connecting to database: {}", database_url);
    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;
    info!("Connected, schema is current");

    info!("Creating suppliers...");
    let suppliers = create_suppliers(&db).await?;
    info!("  Created {} suppliers", suppliers.len());

    info!("Creating products...");
    let products = create_products(&db).await?;
    info!("  Created {} products", products.len());

    info!("Creating stores...");
    let stores = create_stores(&db).await?;
    info!("  Created {} stores", stores.len());

    info!("Linking suppliers to products...");
    let link_count = create_supply_links(&db, &suppliers, &products).await?;
    info!("  Created {} supply links", link_count);

    info!("Recording stock levels...");
    let stock_count = create_stock_levels(&db, &products, &stores).await?;
    info!("  Created {} stock levels", stock_count);

    info!("=== Seed Data Complete ===");
    info!("");
    info!("Try these:");
    info!("  curl http://localhost:8080/suppliers/");
    info!("  curl http://localhost:8080/suppliers/products/");
    info!("  curl http://localhost:8080/suppliers/stores/");
    info!("  curl http://localhost:8080/suppliers/dashboard/");
    info!("");
    info!("Or explore interactively at: http://localhost:8080/swagger-ui");

    Ok(())
}

async fn create_suppliers(
    db: &sea_orm::DatabaseConnection,
) -> anyhow::Result<Vec<supplier::Model>> {
    let suppliers_data = vec![
        (
            "Acme Industrial Supply",
            Some("Dana Reyes"),
            Some("dana@acme-industrial.example"),
            Some("+1-555-0181"),
            Some("14 Harbor Road, Portland, OR"),
            Some("USA"),
        ),
        (
            "Shenzhen Bright Electronics",
            Some("Wei Lin"),
            Some("wei.lin@brightelec.example"),
            None,
            Some("88 Technology Ave, Shenzhen"),
            Some("China"),
        ),
        (
            "Nordic Timber AB",
            None,
            Some("sales@nordictimber.example"),
            Some("+46-8-555-0144"),
            None,
            Some("Sweden"),
        ),
    ];

    let mut created = Vec::new();

    for (name, contact_person, email, phone, address, country) in suppliers_data {
        let supplier = supplier::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            contact_person: Set(contact_person.map(str::to_string)),
            email: Set(email.map(str::to_string)),
            phone: Set(phone.map(str::to_string)),
            address: Set(address.map(str::to_string)),
            country: Set(country.map(str::to_string)),
            ..Default::default()
        };

        let model = supplier.insert(db).await?;
        created.push(model);
    }

    Ok(created)
}

async fn create_products(
    db: &sea_orm::DatabaseConnection,
) -> anyhow::Result<Vec<product::Model>> {
    let products_data = vec![
        (
            "LED Desk Lamp",
            "LMP-001",
            Some("Adjustable arm, 3 color temperatures, USB charging port."),
            Some("Lighting"),
            "pieces",
        ),
        (
            "Oak Shelf Board 120cm",
            "SHL-120",
            Some("Solid oak board, sanded and oiled, ready to mount."),
            Some("Furniture"),
            "pieces",
        ),
        (
            "AA Battery 4-Pack",
            "BAT-AA4",
            None,
            Some("Power"),
            "packs",
        ),
        (
            "HDMI Cable 2m",
            "CBL-HD2",
            Some("High speed HDMI 2.1 cable, braided jacket."),
            Some("Cables"),
            "pieces",
        ),
        (
            "Thermal Mug 450ml",
            "MUG-450",
            Some("Double-wall stainless steel, keeps drinks hot for 8 hours."),
            Some("Kitchen"),
            "pieces",
        ),
        ("Packing Tape Roll", "TPE-STD", None, None, "rolls"),
    ];

    let mut created = Vec::new();

    for (name, sku, description, category, unit_of_measure) in products_data {
        let product = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            sku: Set(sku.to_string()),
            description: Set(description.map(str::to_string)),
            category: Set(category.map(str::to_string)),
            unit_of_measure: Set(unit_of_measure.to_string()),
            ..Default::default()
        };

        let model = product.insert(db).await?;
        created.push(model);
    }

    Ok(created)
}

async fn create_stores(db: &sea_orm::DatabaseConnection) -> anyhow::Result<Vec<store::Model>> {
    let stores_data = vec![
        (
            "Downtown Flagship",
            Some("12 Market Street"),
            store::StoreType::Flagship,
        ),
        (
            "Riverside Retail",
            Some("3 Quay Lane"),
            store::StoreType::Retail,
        ),
        ("North Warehouse", None, store::StoreType::Warehouse),
        (
            "Airport Outlet",
            Some("Terminal 2, Gate Row C"),
            store::StoreType::Outlet,
        ),
    ];

    let mut created = Vec::new();

    for (name, location, store_type) in stores_data {
        let store = store::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            location: Set(location.map(str::to_string)),
            store_type: Set(store_type),
            ..Default::default()
        };

        let model = store.insert(db).await?;
        created.push(model);
    }

    Ok(created)
}

async fn create_supply_links(
    db: &sea_orm::DatabaseConnection,
    suppliers: &[supplier::Model],
    products: &[product::Model],
) -> anyhow::Result<usize> {
    let now = Utc::now();

    // (supplier idx, product idx, unit_price, lead_time_days)
    let links = vec![
        (0, 0, Some(dec!(18.50)), Some(14)),
        (0, 3, Some(dec!(4.20)), Some(7)),
        (0, 5, None, Some(3)),
        (1, 0, Some(dec!(16.90)), Some(30)),
        (1, 2, Some(dec!(1.75)), None),
        (1, 3, None, None),
        (2, 1, Some(dec!(24.00)), Some(21)),
        (2, 4, None, Some(10)),
    ];
    let link_count = links.len();

    for (supplier_idx, product_idx, unit_price, lead_time_days) in links {
        let link = supply::ActiveModel {
            id: Set(Uuid::new_v4()),
            supplier_id: Set(suppliers[supplier_idx].id),
            product_id: Set(products[product_idx].id),
            since: Set(now),
            unit_price: Set(unit_price),
            lead_time_days: Set(lead_time_days),
        };
        link.insert(db).await?;
    }

    Ok(link_count)
}

async fn create_stock_levels(
    db: &sea_orm::DatabaseConnection,
    products: &[product::Model],
    stores: &[store::Model],
) -> anyhow::Result<usize> {
    let now = Utc::now();

    // (product idx, store idx, quantity, aisle); several rows sit below
    // the default low-stock threshold of 10 so the dashboard has data
    let levels = vec![
        (0, 0, 25, Some("A-12")),
        (0, 1, 3, Some("A-2")),
        (1, 0, 7, Some("F-1")),
        (1, 2, 120, None),
        (2, 1, 9, Some("C-5")),
        (2, 3, 40, Some("K-1")),
        (3, 0, 12, Some("B-7")),
        (3, 2, 4, None),
        (4, 1, 18, Some("D-3")),
        (5, 2, 300, None),
    ];
    let level_count = levels.len();

    for (product_idx, store_idx, quantity, aisle) in levels {
        let level = stock_level::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(products[product_idx].id),
            store_id: Set(stores[store_idx].id),
            quantity: Set(quantity),
            aisle: Set(aisle.map(str::to_string)),
            last_updated: Set(now),
        };
        level.insert(db).await?;
    }

    Ok(level_count)
}
