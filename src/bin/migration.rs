//! Database migration runner
//!
//! Run with: cargo run --bin migration -- [up|down|fresh|status]

use migrations::Migrator;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), sea_orm::DbErr> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let command = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://supplychain.db?mode=rwc".to_string());

    let mut options = ConnectOptions::new(database_url.clone());
    options
        .max_connections(2)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10));

    info!("Connecting to database: {}", database_url);
    let db = Database::connect(options).await?;

    match command.as_str() {
        "up" => {
            info!("Applying pending migrations");
            Migrator::up(&db, None).await?;
            info!("Migrations applied");
        }
        "down" => {
            info!("Reverting last migration");
            Migrator::down(&db, Some(1)).await?;
            info!("Migration reverted");
        }
        "fresh" => {
            info!("Dropping all tables and reapplying migrations");
            Migrator::fresh(&db).await?;
            info!("Database recreated");
        }
        "status" => {
            Migrator::status(&db).await?;
        }
        other => {
            error!(
                "Unknown command '{}'; expected up, down, fresh or status",
                other
            );
            std::process::exit(2);
        }
    }

    Ok(())
}
