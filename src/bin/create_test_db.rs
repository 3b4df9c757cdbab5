use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use general_store::{
    CustomerEmail, CustomerName, ProductName, create_customer, create_product, create_transaction,
    initialize_db,
};

/// A utility for creating a database with sample data for the general store
/// web server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let connection = Connection::open(output_path)?;

    initialize_db(&connection)?;

    println!("Creating sample customers and products...");

    let customers = [
        ("Ada Lovelace", "ada@example.com"),
        ("Grace Hopper", "grace@example.com"),
        ("Alan Turing", "alan@example.com"),
    ];

    for (name, email) in customers {
        create_customer(
            CustomerName::new_unchecked(name),
            CustomerEmail::new_unchecked(email),
            &connection,
        )?;
    }

    let products = [
        ("Flour (1kg)", 3.50, 40),
        ("Olive Oil (500ml)", 12.00, 12),
        ("Dish Brush", 4.25, 30),
        ("Tinned Tomatoes", 1.80, 96),
    ];

    for (name, price, quantity_in_stock) in products {
        create_product(
            ProductName::new_unchecked(name),
            price,
            quantity_in_stock,
            &connection,
        )?;
    }

    println!("Recording sample transactions...");

    let now = OffsetDateTime::now_utc();
    let transactions = [
        (1, 1, 2, now - Duration::days(7)),
        (1, 4, 6, now - Duration::days(3)),
        (2, 2, 1, now - Duration::days(2)),
        (3, 3, 1, now - Duration::hours(4)),
    ];

    for (customer_id, product_id, quantity, date) in transactions {
        create_transaction(customer_id, product_id, quantity, date, &connection)?;
    }

    println!("Success!");

    Ok(())
}
