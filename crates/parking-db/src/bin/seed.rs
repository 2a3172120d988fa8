//! # Seed Data Generator
//!
//! Populates the database with demo clients and parkings for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p parking-db --bin seed
//!
//! # Specify database path
//! cargo run -p parking-db --bin seed -- --db ./data/parking_base.db
//!
//! # Also park the first client at the first parking
//! cargo run -p parking-db --bin seed -- --with-occupancy
//! ```
//!
//! ## Generated Data
//! - Clients from a fixed list; every third one has no card, so entry
//!   rejections can be tried by hand
//! - Parkings of various sizes, one of them closed

use parking_core::{NewClient, NewParking, StayEstimate};
use parking_db::{Database, DbConfig};
use std::env;

/// (name, surname, credit_card, car_number)
const CLIENTS: &[(&str, &str, &str, &str)] = &[
    ("Ivan", "Petrov", "4276 1600 0000 0001", "A123BC77"),
    ("Anna", "Smirnova", "5469 3800 0000 0002", "B456EK99"),
    ("Oleg", "Sidorov", "", "C789MO50"),
    ("Maria", "Ivanova", "2200 7001 0000 0004", "E012PX77"),
    ("Pavel", "Kuznetsov", "4276 3800 0000 0005", "K345TY197"),
    ("Elena", "Popova", "", "M678HA777"),
    ("Dmitry", "Volkov", "5536 9100 0000 0007", "O901CE99"),
];

/// (address, count_places, opened)
const PARKINGS: &[(&str, i64, bool)] = &[
    ("Moscow, Tverskaya st., 1", 50, true),
    ("Moscow, Arbat st., 10", 12, true),
    ("Moscow, Lenina ave., 7", 3, true),
    ("Moscow, Sadovaya st., 24", 20, false),
    ("Moscow, Mira ave., 101", 1, true),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./parking_base.db");
    let mut with_occupancy = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--with-occupancy" | "-o" => with_occupancy = true,
            "--help" | "-h" => {
                println!("Parking Base Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>         Database file path (default: ./parking_base.db)");
                println!("  -o, --with-occupancy    Park the first client at the first parking");
                println!("  -h, --help              Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Parking Base Seed Data Generator");
    println!("===================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.clients().count().await? + db.parkings().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} clients/parkings", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Creating clients...");
    let mut client_ids = Vec::with_capacity(CLIENTS.len());
    for (name, surname, card, car) in CLIENTS {
        let client = db
            .clients()
            .create(&NewClient {
                name: name.to_string(),
                surname: surname.to_string(),
                credit_card: card.to_string(),
                car_number: car.to_string(),
            })
            .await?;
        let card_note = if client.has_payment_method() { "" } else { " (no card)" };
        println!("  #{} {} {}{}", client.id, client.name, client.surname, card_note);
        client_ids.push(client.id);
    }

    println!();
    println!("Creating parkings...");
    let mut parking_ids = Vec::with_capacity(PARKINGS.len());
    for (address, count_places, opened) in PARKINGS {
        let parking = db
            .parkings()
            .create(&NewParking::new(*address, *count_places).opened(*opened))
            .await?;
        let state = if parking.opened { "open" } else { "closed" };
        println!(
            "  #{} {} ({} places, {})",
            parking.id, parking.address, parking.count_places, state
        );
        parking_ids.push(parking.id);
    }

    if with_occupancy {
        if let (Some(&client_id), Some(&parking_id)) = (client_ids.first(), parking_ids.first()) {
            let outcome = db
                .allocator(StayEstimate::default())
                .enter(client_id, parking_id)
                .await?;
            println!();
            println!(
                "✓ Client #{} parked at #{} until {}",
                client_id, parking_id, outcome.occupancy.time_out
            );
        }
    }

    println!();
    println!(
        "✓ Seeded {} clients and {} parkings",
        client_ids.len(),
        parking_ids.len()
    );

    db.close().await;
    Ok(())
}
