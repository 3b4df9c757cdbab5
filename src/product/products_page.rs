//! Displays all products with links to their details and edit pages.

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
        format_currency,
    },
    navigation::NavBar,
};

/// The state needed for the [get_products_page](crate::product::get_products_page) route handler.
#[derive(Debug, Clone)]
pub struct ProductsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ProductsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The product data to display in the list view.
#[derive(Debug, PartialEq)]
struct ProductTableRow {
    name: String,
    price: f64,
    quantity_in_stock: i64,
    details_url: String,
    edit_url: String,
    delete_url: String,
}

fn products_view(products: &[ProductTableRow]) -> Markup {
    let create_product_page_url = endpoints::NEW_PRODUCT_VIEW;
    let nav_bar = NavBar::new(endpoints::PRODUCTS_VIEW).into_html();

    let table_row = |product: &ProductTableRow| {
        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                th
                    scope="row"
                    class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
                {
                    a href=(product.details_url) class=(LINK_STYLE) { (product.name) }
                }

                td class=(TABLE_CELL_STYLE) { (format_currency(product.price)) }
                td class=(TABLE_CELL_STYLE) { (product.quantity_in_stock) }

                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        (edit_delete_action_links(
                            &product.edit_url,
                            &product.delete_url,
                            &format!(
                                "Are you sure you want to delete the product '{}'? \
                                This will also delete all transactions for it and cannot be undone.",
                                product.name
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
                    h1 class="text-xl font-bold" { "Products" }

                    a href=(create_product_page_url) class=(LINK_STYLE)
                    {
                        "Add Product"
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
                                th scope="col" class=(TABLE_CELL_STYLE) { "Price" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "In Stock" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for product in products {
                                (table_row(product))
                            }

                            @if products.is_empty() {
                                tr
                                {
                                    td
                                        colspan="4"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No products found. Create a product "
                                        a href=(create_product_page_url) class=(LINK_STYLE)
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

    base("Products", &content)
}

/// Renders the products page showing all products.
pub async fn get_products_page(State(state): State<ProductsPageState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let products: Vec<ProductTableRow> = get_all_products(&connection)
        .inspect_err(|error| tracing::error!("could not get all products: {error}"))?;

    Ok(products_view(&products).into_response())
}

fn get_all_products(connection: &Connection) -> Result<Vec<ProductTableRow>, Error> {
    connection
        .prepare("SELECT id, name, price, quantity_in_stock FROM product ORDER BY name ASC;")?
        .query_map([], |row| {
            let id = row.get(0)?;

            Ok(ProductTableRow {
                name: row.get(1)?,
                price: row.get(2)?,
                quantity_in_stock: row.get(3)?,
                details_url: format_endpoint(endpoints::PRODUCT_DETAILS_VIEW, id),
                edit_url: format_endpoint(endpoints::EDIT_PRODUCT_VIEW, id),
                delete_url: format_endpoint(endpoints::DELETE_PRODUCT, id),
            })
        })?
        .map(|product_result| product_result.map_err(Error::from))
        .collect()
}


#[cfg(test)]
mod get_products_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        initialize_db,
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::{ProductsPageState, get_products_page};

    #[tokio::test]
    async fn lists_products_with_formatted_price() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");
        initialize_db(&connection).expect("Could not initialize database");
        connection
            .execute(
                "INSERT INTO product (name, price, quantity_in_stock) VALUES ('Widget', 2.5, 10)",
                (),
            )
            .expect("Could not insert test product");
        let state = ProductsPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = get_products_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let row_selector = Selector::parse("tbody tr").unwrap();
        let rows: Vec<_> = html.select(&row_selector).collect();
        assert_eq!(rows.len(), 1, "want 1 table row, got {}", rows.len());

        let row_text = rows[0].text().collect::<String>();
        assert!(row_text.contains("Widget"), "row should contain product name");
        assert!(
            row_text.contains("$2.50"),
            "row should contain the formatted price, got {row_text:?}"
        );
    }

    #[tokio::test]
    async fn shows_empty_state_with_no_products() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");
        initialize_db(&connection).expect("Could not initialize database");
        let state = ProductsPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = get_products_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let empty_cell_selector = Selector::parse("td[colspan='4']").unwrap();
        assert!(
            html.select(&empty_cell_selector).next().is_some(),
            "want an empty-state table cell"
        );
    }
}
