//! Defines the route handler for the page for recording a transaction for a
//! customer.

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
    transaction::{ProductChoice, get_product_choices},
};

/// The state needed for the new transaction page.
#[derive(Debug, Clone)]
pub struct NewTransactionPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for NewTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page for recording a transaction for the customer with the ID
/// taken from the URL.
///
/// Responds with the not found page when no customer has the requested ID.
pub async fn get_new_transaction_page(
    Path(customer_id): Path<CustomerId>,
    State(state): State<NewTransactionPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let customer = get_customer(customer_id, &connection)?;
    let product_choices = get_product_choices(&connection)?;

    Ok(
        new_transaction_view(customer.name.as_ref(), customer_id, &product_choices)
            .into_response(),
    )
}

fn new_transaction_view(
    customer_name: &str,
    customer_id: CustomerId,
    product_choices: &[ProductChoice],
) -> Markup {
    let nav_bar = NavBar::new(endpoints::CUSTOMERS_VIEW).into_html();
    let form = new_transaction_form_view(customer_id, product_choices, "1", "");

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold" { "New Transaction for " (customer_name) }

            (form)
        }
    };

    base("New Transaction", &content)
}

/// The transaction form.
///
/// The customer's ID travels in a hidden input so the endpoint can check it
/// against the ID in the URL. `quantity` is used to refill the form when it
/// is redisplayed after a validation error.
pub(super) fn new_transaction_form_view(
    customer_id: CustomerId,
    product_choices: &[ProductChoice],
    quantity: &str,
    error_message: &str,
) -> Markup {
    let create_transaction_endpoint = format_endpoint(endpoints::POST_TRANSACTION, customer_id);

    html! {
        form
            hx-post=(create_transaction_endpoint)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            input type="hidden" name="customer_id" value=(customer_id);

            div
            {
                label
                    for="product_id"
                    class=(FORM_LABEL_STYLE)
                {
                    "Product"
                }

                select
                    id="product_id"
                    name="product_id"
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for choice in product_choices {
                        option value=(choice.id) { (choice.label) }
                    }
                }
            }

            div
            {
                label
                    for="quantity"
                    class=(FORM_LABEL_STYLE)
                {
                    "Quantity"
                }

                input
                    id="quantity"
                    type="number"
                    name="quantity"
                    value=(quantity)
                    step="1"
                    min="1"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Record Transaction" }
        }
    }
}
