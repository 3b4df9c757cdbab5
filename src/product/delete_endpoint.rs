//! Defines the endpoint for deleting a product and all transactions that
//! reference it.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::{Connection, params};

use crate::{AppState, Error, alert::Alert, product::ProductId};

/// The state needed for deleting a product.
#[derive(Debug, Clone)]
pub struct DeleteProductState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteProductState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle product deletion. Returns a success alert or an error alert.
pub async fn delete_product_endpoint(
    Path(product_id): Path<ProductId>,
    State(state): State<DeleteProductState>,
) -> Response {
    let mut connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_product(product_id, &mut connection) {
        Ok(transactions_deleted) => Alert::SuccessSimple {
            message: format!(
                "Product deleted successfully along with {transactions_deleted} transaction(s)"
            ),
        }
        .into_response(),
        Err(Error::DeleteMissingProduct) => Error::DeleteMissingProduct.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting product {product_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

/// Deletes the product with the given ID and all transactions that reference
/// it in a single database transaction, so a failure part way leaves both
/// tables untouched.
///
/// Returns the number of transactions that were deleted along with the
/// product.
pub fn delete_product(product_id: ProductId, connection: &mut Connection) -> Result<usize, Error> {
    let sql_transaction = connection.transaction()?;

    let transactions_deleted = sql_transaction.execute(
        "DELETE FROM \"transaction\" WHERE product_id = ?1",
        params![product_id],
    )?;

    let products_deleted = sql_transaction.execute(
        "DELETE FROM product WHERE id = ?1",
        params![product_id],
    )?;

    // Dropping an uncommitted transaction rolls it back, so the deleted
    // transactions reappear when the product does not exist.
    if products_deleted == 0 {
        return Err(Error::DeleteMissingProduct);
    }

    sql_transaction.commit()?;

    Ok(transactions_deleted)
}


#[cfg(test)]
mod delete_product_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;

    use crate::{initialize_db, product::delete_product_endpoint};

    use super::DeleteProductState;

    fn get_delete_product_state() -> DeleteProductState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize_db(&connection).expect("Could not initialize database");
        connection
            .execute(
                "INSERT INTO product (id, name, price, quantity_in_stock)
                VALUES (1, 'Widget', 2.5, 10)",
                (),
            )
            .expect("Could not insert test product");

        DeleteProductState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn delete_product_endpoint_succeeds() {
        let state = get_delete_product_state();

        let response = delete_product_endpoint(Path(1), State(state))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn delete_product_endpoint_with_invalid_id_returns_not_found() {
        let state = get_delete_product_state();

        let response = delete_product_endpoint(Path(999999), State(state))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
