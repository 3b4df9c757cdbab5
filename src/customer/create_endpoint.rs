//! Defines the endpoint for creating a new customer.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::{Connection, params};

use crate::{
    AppState, Error, endpoints,
    customer::{
        Customer, CustomerEmail, CustomerFormData, CustomerName,
        create_page::new_customer_form_view,
    },
};

/// The state needed for creating a customer.
#[derive(Debug, Clone)]
pub struct CreateCustomerState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCustomerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new customer, redirects to the customer
/// list on success.
///
/// Validation errors redisplay the form with the submitted values kept.
pub async fn create_customer_endpoint(
    State(state): State<CreateCustomerState>,
    Form(form): Form<CustomerFormData>,
) -> Response {
    let (name, email) = match validate_form(&form) {
        Ok(fields) => fields,
        Err(error) => {
            return new_customer_form_view(&form.name, &form.email, &format!("Error: {error}"))
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

    match create_customer(name, email, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::CUSTOMERS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a customer: {error}");

            error.into_alert_response()
        }
    }
}

fn validate_form(form: &CustomerFormData) -> Result<(CustomerName, CustomerEmail), Error> {
    let name = CustomerName::new(&form.name)?;
    let email = CustomerEmail::new(&form.email)?;

    Ok((name, email))
}

/// Inserts a customer into the database.
pub fn create_customer(
    name: CustomerName,
    email: CustomerEmail,
    connection: &Connection,
) -> Result<Customer, Error> {
    connection.execute(
        "INSERT INTO customer (name, email) VALUES (?1, ?2)",
        params![name.as_ref(), email.as_ref()],
    )?;

    let id = connection.last_insert_rowid();

    Ok(Customer { id, name, email })
}

#[cfg(test)]
mod create_customer_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Form,
        extract::State,
        http::{StatusCode, header::CONTENT_TYPE},
    };
    use rusqlite::Connection;

    use crate::{
        customer::{
            Customer, CustomerEmail, CustomerFormData, CustomerName, create_customer_endpoint,
            create_endpoint::CreateCustomerState, get_customer,
        },
        endpoints,
        initialize_db,
        test_utils::{
            assert_form_error_message, assert_form_input_with_value, assert_hx_redirect,
            assert_valid_html, get_header, must_get_form, parse_html_fragment,
        },
    };

    fn get_customer_state() -> CreateCustomerState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize_db(&connection).expect("Could not initialize database");

        CreateCustomerState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn can_create_customer() {
        let state = get_customer_state();
        let want = Customer {
            id: 1,
            name: CustomerName::new_unchecked("Ada Lovelace"),
            email: CustomerEmail::new_unchecked("ada@example.com"),
        };
        let form = CustomerFormData {
            name: want.name.to_string(),
            email: want.email.to_string(),
        };

        let response = create_customer_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::CUSTOMERS_VIEW);
        assert_eq!(
            Ok(want),
            get_customer(1, &state.db_connection.lock().unwrap())
        );
    }

    #[tokio::test]
    async fn create_customer_fails_on_empty_name() {
        let state = get_customer_state();
        let form = CustomerFormData {
            name: "".to_string(),
            email: "ada@example.com".to_string(),
        };

        let response = create_customer_endpoint(State(state), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            get_header(&response, CONTENT_TYPE.as_str()),
            "text/html; charset=utf-8"
        );
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Name cannot be empty");
        assert_form_input_with_value(&form, "email", "email", "ada@example.com");
    }

    #[tokio::test]
    async fn create_customer_fails_on_empty_email() {
        let state = get_customer_state();
        let form = CustomerFormData {
            name: "Ada Lovelace".to_string(),
            email: "".to_string(),
        };

        let response = create_customer_endpoint(State(state), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Email cannot be empty");
        assert_form_input_with_value(&form, "name", "text", "Ada Lovelace");
    }
}
