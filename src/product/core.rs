//! Core product domain types and database operations.

use std::fmt::Display;

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, database_id::DatabaseId};

/// Database identifier for a product.
pub type ProductId = DatabaseId;

/// The maximum number of characters the name column allows.
const MAX_NAME_LENGTH: usize = 100;

/// A validated, non-empty product name of at most 100 characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductName(String);

impl ProductName {
    /// Create a product name.
    ///
    /// # Errors
    /// Returns [Error::EmptyName] if `name` is empty after trimming, or
    /// [Error::NameTooLong] if it is longer than 100 characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyName)
        } else if name.chars().count() > MAX_NAME_LENGTH {
            Err(Error::NameTooLong)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a product name without validation.
    ///
    /// The caller should ensure that the string is non-empty and no longer
    /// than 100 characters.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ProductName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validates a price submitted through a product form.
///
/// # Errors
/// Returns [Error::NegativePrice] if `price` is below zero.
pub fn validate_price(price: f64) -> Result<f64, Error> {
    if price < 0.0 {
        Err(Error::NegativePrice)
    } else {
        Ok(price)
    }
}

/// A product sold by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    /// The current price in dollars.
    pub price: f64,
    pub quantity_in_stock: i64,
}

/// Form data for product creation and editing.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductFormData {
    pub name: String,
    pub price: f64,
    pub quantity_in_stock: i64,
}

pub fn create_product_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS product (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            price REAL NOT NULL,
            quantity_in_stock INTEGER NOT NULL
        )",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_product(row: &Row) -> Result<Product, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;

    Ok(Product {
        id,
        name: ProductName::new_unchecked(&raw_name),
        price: row.get(2)?,
        quantity_in_stock: row.get(3)?,
    })
}

/// Retrieve a single product by ID.
///
/// # Errors
/// Returns [Error::NotFound] if `product_id` does not refer to a valid
/// product, or [Error::SqlError] if there is some other SQL error.
pub fn get_product(product_id: ProductId, connection: &Connection) -> Result<Product, Error> {
    connection
        .prepare("SELECT id, name, price, quantity_in_stock FROM product WHERE id = :id")?
        .query_one(&[(":id", &product_id)], map_row_to_product)
        .map_err(|error| error.into())
}



#[cfg(test)]
mod product_query_tests {
    use rusqlite::Connection;

    use crate::{Error, initialize_db};

    use super::{Product, ProductName, get_product};

    #[test]
    fn get_product_succeeds() {
        let connection = Connection::open_in_memory().unwrap();
        initialize_db(&connection).unwrap();
        connection
            .execute(
                "INSERT INTO product (name, price, quantity_in_stock) VALUES (?1, ?2, ?3)",
                ("Widget", 2.50, 10),
            )
            .unwrap();

        let product = get_product(1, &connection);

        assert_eq!(
            product,
            Ok(Product {
                id: 1,
                name: ProductName::new_unchecked("Widget"),
                price: 2.50,
                quantity_in_stock: 10,
            })
        );
    }

    #[test]
    fn get_product_with_invalid_id_returns_not_found() {
        let connection = Connection::open_in_memory().unwrap();
        initialize_db(&connection).unwrap();

        let product = get_product(1337, &connection);

        assert_eq!(product, Err(Error::NotFound));
    }
}
