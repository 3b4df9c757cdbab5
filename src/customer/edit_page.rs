//! Defines the route handler for the page for editing a customer.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    customer::{CustomerId, get_customer},
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
};

/// The state needed for the edit customer page.
#[derive(Debug, Clone)]
pub struct EditCustomerPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditCustomerPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page for editing a customer, prefilled with the customer's
/// current details.
///
/// Responds with the not found page when no customer has the requested ID.
pub async fn get_edit_customer_page(
    Path(customer_id): Path<CustomerId>,
    State(state): State<EditCustomerPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let customer = get_customer(customer_id, &connection)?;
    let update_endpoint = format_endpoint(endpoints::PUT_CUSTOMER, customer_id);

    Ok(
        edit_customer_view(&update_endpoint, customer.name.as_ref(), customer.email.as_ref())
            .into_response(),
    )
}

fn edit_customer_view(update_endpoint: &str, name: &str, email: &str) -> Markup {
    let nav_bar = NavBar::new(endpoints::CUSTOMERS_VIEW).into_html();
    let form = edit_customer_form_view(update_endpoint, name, email, "");

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Edit Customer", &content)
}

/// The customer editing form.
pub(super) fn edit_customer_form_view(
    update_endpoint: &str,
    name: &str,
    email: &str,
    error_message: &str,
) -> Markup {
    html! {
        form
            hx-put=(update_endpoint)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label
                    for="name"
                    class=(FORM_LABEL_STYLE)
                {
                    "Name"
                }

                input
                    id="name"
                    type="text"
                    name="name"
                    value=(name)
                    placeholder="Customer Name"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label
                    for="email"
                    class=(FORM_LABEL_STYLE)
                {
                    "Email"
                }

                input
                    id="email"
                    type="email"
                    name="email"
                    value=(email)
                    placeholder="customer@example.com"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Customer" }
        }
    }
}
