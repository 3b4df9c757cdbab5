//! Defines the endpoint for deleting a customer and all of their
//! transactions.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::{Connection, params};

use crate::{AppState, Error, alert::Alert, customer::CustomerId};

/// The state needed for deleting a customer.
#[derive(Debug, Clone)]
pub struct DeleteCustomerState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteCustomerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle customer deletion. Returns a success alert or an error alert.
pub async fn delete_customer_endpoint(
    Path(customer_id): Path<CustomerId>,
    State(state): State<DeleteCustomerState>,
) -> Response {
    let mut connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_customer(customer_id, &mut connection) {
        Ok(transactions_deleted) => Alert::SuccessSimple {
            message: format!(
                "Customer deleted successfully along with {transactions_deleted} transaction(s)"
            ),
        }
        .into_response(),
        Err(Error::DeleteMissingCustomer) => Error::DeleteMissingCustomer.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting customer {customer_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

/// Deletes the customer with the given ID and all of their transactions in a
/// single database transaction, so a failure part way leaves both tables
/// untouched.
///
/// Returns the number of transactions that were deleted along with the
/// customer.
pub fn delete_customer(
    customer_id: CustomerId,
    connection: &mut Connection,
) -> Result<usize, Error> {
    let sql_transaction = connection.transaction()?;

    let transactions_deleted = sql_transaction.execute(
        "DELETE FROM \"transaction\" WHERE customer_id = ?1",
        params![customer_id],
    )?;

    let customers_deleted = sql_transaction.execute(
        "DELETE FROM customer WHERE id = ?1",
        params![customer_id],
    )?;

    // Dropping an uncommitted transaction rolls it back, so the deleted
    // transactions reappear when the customer does not exist.
    if customers_deleted == 0 {
        return Err(Error::DeleteMissingCustomer);
    }

    sql_transaction.commit()?;

    Ok(transactions_deleted)
}

#[cfg(test)]
mod delete_customer_tests {
    use rusqlite::{Connection, params};
    use time::macros::datetime;

    use crate::{Error, initialize_db};

    use super::delete_customer;

    fn get_test_connection() -> Connection {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize_db(&connection).expect("Could not initialize database");
        connection
            .execute(
                "INSERT INTO customer (id, name, email) VALUES
                (1, 'Ada', 'ada@x.com'),
                (2, 'Grace', 'grace@x.com')",
                (),
            )
            .expect("Could not insert test customers");
        connection
            .execute(
                "INSERT INTO product (id, name, price, quantity_in_stock)
                VALUES (1, 'Widget', 2.50, 10)",
                (),
            )
            .expect("Could not insert test product");
        connection
            .execute(
                "INSERT INTO \"transaction\" (customer_id, product_id, quantity, date)
                VALUES (1, 1, 1, ?1), (1, 1, 2, ?1), (2, 1, 3, ?1)",
                params![datetime!(2026-01-01 00:00:00 UTC)],
            )
            .expect("Could not insert test transactions");
        connection
    }

    fn count(connection: &Connection, sql: &str) -> i64 {
        connection
            .query_one(sql, [], |row| row.get(0))
            .expect("Could not count rows")
    }

    #[test]
    fn deletes_customer_and_their_transactions() {
        let mut connection = get_test_connection();

        let transactions_deleted = delete_customer(1, &mut connection);

        assert_eq!(Ok(2), transactions_deleted);
        assert_eq!(
            0,
            count(&connection, "SELECT COUNT(id) FROM customer WHERE id = 1")
        );
        assert_eq!(
            1,
            count(
                &connection,
                "SELECT COUNT(id) FROM \"transaction\" WHERE customer_id = 2"
            ),
            "other customers' transactions must be kept"
        );
    }

    #[test]
    fn missing_customer_leaves_transactions_untouched() {
        let mut connection = get_test_connection();

        let result = delete_customer(999, &mut connection);

        assert_eq!(Err(Error::DeleteMissingCustomer), result);
        assert_eq!(
            3,
            count(&connection, "SELECT COUNT(id) FROM \"transaction\""),
            "a failed delete must roll back"
        );
    }
}
