//! # Seed Data Generator
//!
//! Fills an empty database with the shop's rice catalog for development.
//!
//! ## Usage
//! ```bash
//! cargo run -p beras-db --bin seed
//! cargo run -p beras-db --bin seed -- --db ./data/kasir.db
//! ```
//!
//! Log output follows `RUST_LOG` (default `info,beras=debug,sqlx=warn`).

use std::env;

use beras_core::{Money, Product, ProductCategory};
use beras_db::{Database, DbConfig};
use rust_decimal::Decimal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// (name, price per unit, unit, category, stock, description)
const CATALOG: &[(&str, i64, &str, ProductCategory, i64, &str)] = &[
    ("Beras Pandan Wangi", 16_000, "kg", ProductCategory::Kiloan, 120, "Pulen dan wangi, dari Cianjur"),
    ("Beras Rojolele", 14_500, "kg", ProductCategory::Kiloan, 85, "Beras Delanggu, nasi pulen"),
    ("Beras IR64 Premium", 13_000, "kg", ProductCategory::Kiloan, 200, "Beras harian, agak pera"),
    ("Beras Setra Ramos", 15_000, "kg", ProductCategory::Kiloan, 60, ""),
    ("Beras Merah", 20_000, "kg", ProductCategory::Kiloan, 18, "Beras merah organik"),
    ("Beras Ketan Putih", 18_000, "liter", ProductCategory::Literan, 40, "Untuk kue dan tape"),
    ("Beras Ketan Hitam", 22_000, "liter", ProductCategory::Literan, 9, ""),
    ("Beras Hitam", 25_000, "liter", ProductCategory::Literan, 6, "Beras hitam organik"),
    ("Beras Pandan Wangi 25kg", 390_000, "karung", ProductCategory::Karungan, 12, ""),
    ("Beras IR64 25kg", 310_000, "karung", ProductCategory::Karungan, 25, ""),
    ("Beras Rojolele 10kg", 140_000, "karung", ProductCategory::Karungan, 8, ""),
    ("Beras Cianjur 5kg", 78_000, "karung", ProductCategory::Karungan, 30, "Kemasan karung kecil"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,beras=debug,sqlx=warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./kasir_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kasir Beras Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./kasir_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(argument = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    info!(path = %db_path, "Seeding database");
    let db = Database::new(DbConfig::new(&db_path)).await?;

    let existing = db.products().count().await?;
    if existing > 0 {
        warn!(
            existing,
            "Database already has products, skipping seed. Delete the file to regenerate."
        );
        return Ok(());
    }

    let mut inserted = 0;
    for &(name, price, unit, category, stock, description) in CATALOG {
        let mut product = Product::new(
            Uuid::new_v4().to_string(),
            name,
            Money::from_rupiah(price),
            unit,
            category,
            Decimal::from(stock),
        );
        if !description.is_empty() {
            product.description = Some(description.to_string());
        }

        match db.products().insert(&product).await {
            Ok(()) => inserted += 1,
            Err(e) => warn!(name = %name, error = %e, "Failed to insert product"),
        }
    }

    info!(inserted, "Seed complete");
    db.close().await;

    Ok(())
}
