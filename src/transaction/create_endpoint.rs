//! Defines the endpoint for recording a transaction for a customer.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    customer::CustomerId,
    endpoints::{self, format_endpoint},
    transaction::{
        TransactionFormData, create_page::new_transaction_form_view, create_transaction,
        get_product_choices,
    },
};

/// The state needed for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for recording a transaction for the customer with the ID
/// taken from the URL, redirects to the customer's details page on success.
///
/// Redirects to the customer list when the customer ID in the submitted form
/// does not match the ID in the URL. Validation errors redisplay the form
/// with the product dropdown repopulated.
pub async fn create_transaction_endpoint(
    Path(customer_id): Path<CustomerId>,
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionFormData>,
) -> Response {
    if form.customer_id != customer_id {
        return (
            HxRedirect(endpoints::CUSTOMERS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response();
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let date = OffsetDateTime::now_utc();

    match create_transaction(customer_id, form.product_id, form.quantity, date, &connection) {
        Ok(_) => (
            HxRedirect(format_endpoint(endpoints::CUSTOMER_DETAILS_VIEW, customer_id)),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error @ (Error::InvalidQuantity | Error::InvalidForeignKey)) => {
            // Redisplaying the form requires the product dropdown to be
            // filled in again, it is not round-tripped through the form data.
            let product_choices = match get_product_choices(&connection) {
                Ok(product_choices) => product_choices,
                Err(error) => {
                    tracing::error!("could not get product choices: {error}");
                    return error.into_alert_response();
                }
            };

            new_transaction_form_view(
                customer_id,
                &product_choices,
                &form.quantity.to_string(),
                &format!("Error: {error}"),
            )
            .into_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while creating a transaction for customer \
                {customer_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
