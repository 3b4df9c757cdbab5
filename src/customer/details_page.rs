//! Defines the route handler for the customer details page, which shows a
//! customer's contact details and their purchase history.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::{Connection, params};
use time::{
    OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::{
    AppState, Error,
    customer::{Customer, CustomerId, get_customer},
    endpoints::{self, format_endpoint},
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_CONTAINER_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, TABLE_STYLE, base, format_currency,
    },
    navigation::NavBar,
    timezone::get_local_offset,
};

/// The state needed for the customer details page.
#[derive(Debug, Clone)]
pub struct CustomerDetailsPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CustomerDetailsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// One row of a customer's purchase history.
///
/// The price is the product's current price multiplied by the purchased
/// quantity, so it moves with the product's price rather than recording the
/// price at time of sale.
#[derive(Debug, PartialEq)]
struct PurchaseRow {
    product_name: String,
    quantity: i64,
    date: OffsetDateTime,
    price: f64,
}

/// Renders the details page for the customer with the ID taken from the URL.
pub async fn get_customer_details_page(
    Path(customer_id): Path<CustomerId>,
    State(state): State<CustomerDetailsPageState>,
) -> Result<Response, Error> {
    let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!(
            "could not get local time offset from timezone {}",
            &state.local_timezone
        );
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let customer = get_customer(customer_id, &connection)?;
    let purchases = get_purchase_history(customer_id, &connection)?;

    Ok(customer_details_view(&customer, &purchases, local_offset).into_response())
}

fn get_purchase_history(
    customer_id: CustomerId,
    connection: &Connection,
) -> Result<Vec<PurchaseRow>, Error> {
    connection
        .prepare(
            "SELECT p.name, t.quantity, t.date, p.price * t.quantity
            FROM \"transaction\" t
            INNER JOIN product p ON p.id = t.product_id
            WHERE t.customer_id = ?1
            ORDER BY t.date DESC;",
        )?
        .query_map(params![customer_id], |row| {
            Ok(PurchaseRow {
                product_name: row.get(0)?,
                quantity: row.get(1)?,
                date: row.get(2)?,
                price: row.get(3)?,
            })
        })?
        .map(|row_result| row_result.map_err(Error::from))
        .collect()
}

fn customer_details_view(
    customer: &Customer,
    purchases: &[PurchaseRow],
    local_offset: UtcOffset,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::CUSTOMERS_VIEW).into_html();
    let new_transaction_url = format_endpoint(endpoints::NEW_TRANSACTION_VIEW, customer.id);
    let edit_customer_url = format_endpoint(endpoints::EDIT_CUSTOMER_VIEW, customer.id);

    let table_row = |purchase: &PurchaseRow| {
        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                th
                    scope="row"
                    class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
                {
                    (purchase.product_name)
                }

                td class=(TABLE_CELL_STYLE) { (purchase.quantity) }
                td class=(TABLE_CELL_STYLE) { (purchase_time_label(purchase.date, local_offset)) }
                td class=(TABLE_CELL_STYLE) { (format_currency(purchase.price)) }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { (customer.name) }

                    a href=(edit_customer_url) class=(LINK_STYLE) { "Edit" }
                    a href=(new_transaction_url) class=(LINK_STYLE) { "New Transaction" }
                }

                p class="text-gray-600 dark:text-gray-300" { (customer.email) }

                h2 class="text-lg font-bold" { "Purchases" }

                section class=(TABLE_CONTAINER_STYLE)
                {
                    table class=(TABLE_STYLE)
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Product" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Quantity" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Price" }
                            }
                        }

                        tbody
                        {
                            @for purchase in purchases {
                                (table_row(purchase))
                            }

                            @if purchases.is_empty() {
                                tr
                                {
                                    td
                                        colspan="4"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No purchases yet. Record one "
                                        a href=(new_transaction_url) class=(LINK_STYLE)
                                        {
                                            "here"
                                        }
                                        "."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base(customer.name.as_ref(), &content)
}

const DATE_TIME_ATTRIBUTE_FORMAT: &[BorrowedFormatItem] = format_description!(
    "[year]-[month repr:numerical padding:zero]-[day padding:zero]T[hour]:[minute]:[second]"
);

const DATE_TIME_LABEL_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day padding:zero] [month repr:short] [year] [hour]:[minute]");

fn purchase_time_label(date: OffsetDateTime, local_offset: UtcOffset) -> Markup {
    let local_date = date.to_offset(local_offset);
    let datetime = local_date
        .format(DATE_TIME_ATTRIBUTE_FORMAT)
        .unwrap_or_else(|_| local_date.to_string());
    let label = local_date
        .format(DATE_TIME_LABEL_FORMAT)
        .unwrap_or_else(|_| local_date.to_string());

    html! {
        time datetime=(datetime) { (label) }
    }
}
