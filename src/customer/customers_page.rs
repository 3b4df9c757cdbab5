//! Displays all customers with links to their details and edit pages.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_CONTAINER_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, TABLE_STYLE, base, edit_delete_action_links,
    },
    navigation::NavBar,
};

/// The state needed for the [get_customers_page](crate::customer::get_customers_page) route handler.
#[derive(Debug, Clone)]
pub struct CustomersPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CustomersPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The customer data to display in the list view.
#[derive(Debug, PartialEq)]
struct CustomerTableRow {
    name: String,
    email: String,
    details_url: String,
    edit_url: String,
    delete_url: String,
}

fn customers_view(customers: &[CustomerTableRow]) -> Markup {
    let create_customer_page_url = endpoints::NEW_CUSTOMER_VIEW;
    let nav_bar = NavBar::new(endpoints::CUSTOMERS_VIEW).into_html();

    let table_row = |customer: &CustomerTableRow| {
        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                th
                    scope="row"
                    class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
                {
                    a href=(customer.details_url) class=(LINK_STYLE) { (customer.name) }
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (customer.email)
                }

                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        (edit_delete_action_links(
                            &customer.edit_url,
                            &customer.delete_url,
                            &format!(
                                "Are you sure you want to delete the customer '{}'? \
                                This will also delete all of their transactions and cannot be undone.",
                                customer.name
                            ),
                        ))
                    }
                }
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
                    h1 class="text-xl font-bold" { "Customers" }

                    a href=(create_customer_page_url) class=(LINK_STYLE)
                    {
                        "Add Customer"
                    }
                }

                section class=(TABLE_CONTAINER_STYLE)
                {
                    table class=(TABLE_STYLE)
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Email" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for customer in customers {
                                (table_row(customer))
                            }

                            @if customers.is_empty() {
                                tr
                                {
                                    td
                                        colspan="3"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No customers found. Create a customer "
                                        a href=(create_customer_page_url) class=(LINK_STYLE)
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

    base("Customers", &content)
}

/// Renders the customers page showing all customers.
pub async fn get_customers_page(State(state): State<CustomersPageState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let customers: Vec<CustomerTableRow> = get_all_customers(&connection)
        .inspect_err(|error| tracing::error!("could not get all customers: {error}"))?;

    Ok(customers_view(&customers).into_response())
}

fn get_all_customers(connection: &Connection) -> Result<Vec<CustomerTableRow>, Error> {
    connection
        .prepare("SELECT id, name, email FROM customer ORDER BY name ASC;")?
        .query_map([], |row| {
            let id = row.get(0)?;

            Ok(CustomerTableRow {
                name: row.get(1)?,
                email: row.get(2)?,
                details_url: format_endpoint(endpoints::CUSTOMER_DETAILS_VIEW, id),
                edit_url: format_endpoint(endpoints::EDIT_CUSTOMER_VIEW, id),
                delete_url: format_endpoint(endpoints::DELETE_CUSTOMER, id),
            })
        })?
        .map(|customer_result| customer_result.map_err(Error::from))
        .collect()
}

#[cfg(test)]
mod get_all_customers_tests {
    use rusqlite::Connection;

    use crate::{
        endpoints::{self, format_endpoint},
        initialize_db,
    };

    use super::{CustomerTableRow, get_all_customers};

    #[test]
    fn returns_all_customers_ordered_by_name() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");
        initialize_db(&connection).expect("Could not initialize database");
        connection
            .execute(
                "INSERT INTO customer (id, name, email) VALUES
                (1, 'Grace', 'grace@x.com'),
                (2, 'Ada', 'ada@x.com')",
                (),
            )
            .expect("Could not insert test customers");
        let want_customers = vec![
            CustomerTableRow {
                name: "Ada".to_owned(),
                email: "ada@x.com".to_owned(),
                details_url: format_endpoint(endpoints::CUSTOMER_DETAILS_VIEW, 2),
                edit_url: format_endpoint(endpoints::EDIT_CUSTOMER_VIEW, 2),
                delete_url: format_endpoint(endpoints::DELETE_CUSTOMER, 2),
            },
            CustomerTableRow {
                name: "Grace".to_owned(),
                email: "grace@x.com".to_owned(),
                details_url: format_endpoint(endpoints::CUSTOMER_DETAILS_VIEW, 1),
                edit_url: format_endpoint(endpoints::EDIT_CUSTOMER_VIEW, 1),
                delete_url: format_endpoint(endpoints::DELETE_CUSTOMER, 1),
            },
        ];

        let customers = get_all_customers(&connection);

        assert_eq!(Ok(want_customers), customers);
    }

    #[test]
    fn returns_empty_list_on_no_customers() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");
        initialize_db(&connection).expect("Could not initialize database");

        let customers = get_all_customers(&connection);

        assert_eq!(Ok(vec![]), customers);
    }
}
