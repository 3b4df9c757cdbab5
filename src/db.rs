//! Database initialization for the application's domain tables.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error, customer::create_customer_table, product::create_product_table,
    transaction::create_transaction_table,
};

/// Create the tables for the application's domain models if they do not exist.
///
/// Table creation happens within a single exclusive transaction, so either
/// all tables are created or none are.
///
/// This function also enables SQLite's foreign key enforcement for
/// `connection`. The transaction table's foreign keys are declared without an
/// ON DELETE action, so deleting a customer or product requires deleting its
/// transactions first.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let sql_transaction =
        SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_customer_table(&sql_transaction)?;
    create_product_table(&sql_transaction)?;
    create_transaction_table(&sql_transaction)?;

    sql_transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn creates_all_tables() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        initialize(&connection).expect("Could not initialize database");

        let table_count: i64 = connection
            .query_one(
                "SELECT COUNT(*) FROM sqlite_master
                WHERE type = 'table' AND name IN ('customer', 'product', 'transaction')",
                [],
                |row| row.get(0),
            )
            .expect("Could not query sqlite_master");

        assert_eq!(table_count, 3);
    }

    #[test]
    fn is_idempotent() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        initialize(&connection).expect("Could not initialize database");

        assert_eq!(Ok(()), initialize(&connection));
    }

    #[test]
    fn enforces_foreign_keys() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        let result = connection.execute(
            "INSERT INTO \"transaction\" (customer_id, product_id, quantity, date)
            VALUES (42, 42, 1, '2025-01-01T00:00:00Z')",
            (),
        );

        assert!(result.is_err(), "want foreign key violation, got {result:?}");
    }
}
