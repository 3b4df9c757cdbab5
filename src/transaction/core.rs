//! Core transaction domain types and database operations.
//!
//! A transaction records a customer buying a quantity of a product at a point
//! in time. The sale price is not recorded, it is always derived from the
//! product's current price.

use rusqlite::{Connection, Row, params};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    Error,
    customer::CustomerId,
    database_id::DatabaseId,
    html::format_currency,
    product::ProductId,
};

/// Database identifier for a transaction.
pub type TransactionId = DatabaseId;

/// A purchase of a quantity of a product by a customer.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub quantity: i64,
    /// When the purchase was recorded, in UTC.
    pub date: OffsetDateTime,
}

/// Form data for recording a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionFormData {
    /// The ID of the customer making the purchase. Must match the customer ID
    /// in the URL.
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub quantity: i64,
}

pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            customer_id INTEGER NOT NULL REFERENCES customer(id),
            product_id INTEGER NOT NULL REFERENCES product(id),
            quantity INTEGER NOT NULL,
            date TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_transaction(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        customer_id: row.get(1)?,
        product_id: row.get(2)?,
        quantity: row.get(3)?,
        date: row.get(4)?,
    })
}

/// Inserts a transaction into the database.
///
/// # Errors
/// Returns [Error::InvalidQuantity] if `quantity` is below one, or
/// [Error::InvalidForeignKey] if the customer or product does not exist.
pub fn create_transaction(
    customer_id: CustomerId,
    product_id: ProductId,
    quantity: i64,
    date: OffsetDateTime,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if quantity < 1 {
        return Err(Error::InvalidQuantity);
    }

    connection.execute(
        "INSERT INTO \"transaction\" (customer_id, product_id, quantity, date)
        VALUES (?1, ?2, ?3, ?4)",
        params![customer_id, product_id, quantity, date],
    )?;

    let id = connection.last_insert_rowid();

    Ok(Transaction {
        id,
        customer_id,
        product_id,
        quantity,
        date,
    })
}

/// A product offered in the product dropdown of the new transaction form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChoice {
    pub id: ProductId,
    /// The product's name followed by its current price, e.g. "Widget ($2.50)".
    pub label: String,
}

/// Lists all products as dropdown choices, ordered by name.
pub fn get_product_choices(connection: &Connection) -> Result<Vec<ProductChoice>, Error> {
    connection
        .prepare("SELECT id, name, price FROM product ORDER BY name ASC;")?
        .query_map([], |row| {
            let name: String = row.get(1)?;
            let price: f64 = row.get(2)?;

            Ok(ProductChoice {
                id: row.get(0)?,
                label: format!("{name} ({})", format_currency(price)),
            })
        })?
        .map(|choice_result| choice_result.map_err(Error::from))
        .collect()
}
