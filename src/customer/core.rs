//! Core customer domain types and database operations.

use std::fmt::Display;

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, database_id::DatabaseId};

/// Database identifier for a customer.
pub type CustomerId = DatabaseId;

/// The maximum number of characters the name and email columns allow.
const MAX_FIELD_LENGTH: usize = 100;

/// A validated, non-empty customer name of at most 100 characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerName(String);

impl CustomerName {
    /// Create a customer name.
    ///
    /// # Errors
    /// Returns [Error::EmptyName] if `name` is empty after trimming, or
    /// [Error::NameTooLong] if it is longer than 100 characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyName)
        } else if name.chars().count() > MAX_FIELD_LENGTH {
            Err(Error::NameTooLong)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a customer name without validation.
    ///
    /// The caller should ensure that the string is non-empty and no longer
    /// than 100 characters.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CustomerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CustomerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated, non-empty customer email of at most 100 characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerEmail(String);

impl CustomerEmail {
    /// Create a customer email.
    ///
    /// # Errors
    /// Returns [Error::EmptyEmail] if `email` is empty after trimming, or
    /// [Error::EmailTooLong] if it is longer than 100 characters.
    pub fn new(email: &str) -> Result<Self, Error> {
        let email = email.trim();

        if email.is_empty() {
            Err(Error::EmptyEmail)
        } else if email.chars().count() > MAX_FIELD_LENGTH {
            Err(Error::EmailTooLong)
        } else {
            Ok(Self(email.to_string()))
        }
    }

    /// Create a customer email without validation.
    ///
    /// The caller should ensure that the string is non-empty and no longer
    /// than 100 characters.
    pub fn new_unchecked(email: &str) -> Self {
        Self(email.to_string())
    }
}

impl AsRef<str> for CustomerEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CustomerEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A customer of the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: CustomerName,
    pub email: CustomerEmail,
}

/// Form data for customer creation and editing.
#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerFormData {
    pub name: String,
    pub email: String,
}

pub fn create_customer_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS customer (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_customer(row: &Row) -> Result<Customer, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let raw_email: String = row.get(2)?;

    Ok(Customer {
        id,
        name: CustomerName::new_unchecked(&raw_name),
        email: CustomerEmail::new_unchecked(&raw_email),
    })
}

/// Retrieve a single customer by ID.
///
/// # Errors
/// Returns [Error::NotFound] if `customer_id` does not refer to a valid
/// customer, or [Error::SqlError] if there is some other SQL error.
pub fn get_customer(customer_id: CustomerId, connection: &Connection) -> Result<Customer, Error> {
    connection
        .prepare("SELECT id, name, email FROM customer WHERE id = :id")?
        .query_one(&[(":id", &customer_id)], map_row_to_customer)
        .map_err(|error| error.into())
}
