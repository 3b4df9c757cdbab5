//! Defines the endpoint for updating a customer's details.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::{Connection, params};

use crate::{
    AppState, Error,
    customer::{
        CustomerEmail, CustomerFormData, CustomerId, CustomerName,
        edit_page::edit_customer_form_view,
    },
    endpoints::{self, format_endpoint},
};

/// The state needed for updating a customer.
#[derive(Debug, Clone)]
pub struct EditCustomerState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditCustomerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for updating the customer with the ID taken from the URL,
/// redirects to the customer list on success.
pub async fn edit_customer_endpoint(
    Path(customer_id): Path<CustomerId>,
    State(state): State<EditCustomerState>,
    Form(form): Form<CustomerFormData>,
) -> Response {
    let update_endpoint = format_endpoint(endpoints::PUT_CUSTOMER, customer_id);

    let name = match CustomerName::new(&form.name) {
        Ok(name) => name,
        Err(error) => {
            return edit_customer_form_view(
                &update_endpoint,
                &form.name,
                &form.email,
                &format!("Error: {error}"),
            )
            .into_response();
        }
    };

    let email = match CustomerEmail::new(&form.email) {
        Ok(email) => email,
        Err(error) => {
            return edit_customer_form_view(
                &update_endpoint,
                &form.name,
                &form.email,
                &format!("Error: {error}"),
            )
            .into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_customer(customer_id, name, email, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::CUSTOMERS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::UpdateMissingCustomer) => Error::UpdateMissingCustomer.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating customer {customer_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

/// Sets the name and email of the customer with the given ID.
pub fn update_customer(
    customer_id: CustomerId,
    name: CustomerName,
    email: CustomerEmail,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_updated = connection.execute(
        "UPDATE customer SET name = ?1, email = ?2 WHERE id = ?3",
        params![name.as_ref(), email.as_ref(), customer_id],
    )?;

    if rows_updated == 0 {
        return Err(Error::UpdateMissingCustomer);
    }

    Ok(())
}

#[cfg(test)]
mod edit_customer_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Form,
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;

    use crate::{
        customer::{
            Customer, CustomerEmail, CustomerFormData, CustomerName, edit_customer_endpoint,
            edit_endpoint::EditCustomerState, get_customer,
        },
        endpoints,
        initialize_db,
        test_utils::{
            assert_form_error_message, assert_hx_redirect, assert_valid_html, must_get_form,
            parse_html_fragment,
        },
    };

    fn get_test_state() -> EditCustomerState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize_db(&connection).expect("Could not initialize database");
        connection
            .execute(
                "INSERT INTO customer (id, name, email) VALUES (1, 'Ada', 'ada@x.com')",
                (),
            )
            .expect("Could not insert test customer");

        EditCustomerState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn updates_customer_and_redirects() {
        let state = get_test_state();
        let form = CustomerFormData {
            name: "Ada Lovelace".to_string(),
            email: "lovelace@x.com".to_string(),
        };
        let want = Customer {
            id: 1,
            name: CustomerName::new_unchecked("Ada Lovelace"),
            email: CustomerEmail::new_unchecked("lovelace@x.com"),
        };

        let response = edit_customer_endpoint(Path(1), State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::CUSTOMERS_VIEW);
        assert_eq!(
            Ok(want),
            get_customer(1, &state.db_connection.lock().unwrap())
        );
    }

    #[tokio::test]
    async fn returns_not_found_for_missing_customer() {
        let state = get_test_state();
        let form = CustomerFormData {
            name: "Ada Lovelace".to_string(),
            email: "lovelace@x.com".to_string(),
        };

        let response = edit_customer_endpoint(Path(999), State(state), Form(form)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn redisplays_form_on_empty_name() {
        let state = get_test_state();
        let form = CustomerFormData {
            name: "".to_string(),
            email: "lovelace@x.com".to_string(),
        };

        let response = edit_customer_endpoint(Path(1), State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Name cannot be empty");

        // The original record must be left untouched.
        let customer = get_customer(1, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(customer.name.as_ref(), "Ada");
    }
}
