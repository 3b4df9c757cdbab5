//! Defines the route handler for the product details page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base, format_currency},
    navigation::NavBar,
    product::{Product, ProductId, get_product},
};

/// The state needed for the product details page.
#[derive(Debug, Clone)]
pub struct ProductDetailsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ProductDetailsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the details page for the product with the ID taken from the URL.
///
/// Responds with the not found page when no product has the requested ID.
pub async fn get_product_details_page(
    Path(product_id): Path<ProductId>,
    State(state): State<ProductDetailsPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let product = get_product(product_id, &connection)?;

    Ok(product_details_view(&product).into_response())
}

fn product_details_view(product: &Product) -> Markup {
    let nav_bar = NavBar::new(endpoints::PRODUCTS_VIEW).into_html();
    let edit_product_url = format_endpoint(endpoints::EDIT_PRODUCT_VIEW, product.id);

    let detail = |label: &str, value: Markup| {
        html!(
            div
            {
                dt class="text-sm font-medium text-gray-500 dark:text-gray-400" { (label) }
                dd class="text-gray-900 dark:text-white" { (value) }
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
                    h1 class="text-xl font-bold" { (product.name) }

                    a href=(edit_product_url) class=(LINK_STYLE) { "Edit" }
                }

                dl class="space-y-2"
                {
                    (detail("Price", html!( (format_currency(product.price)) )))
                    (detail("In Stock", html!( (product.quantity_in_stock) )))
                }
            }
        }
    );

    base(product.name.as_ref(), &content)
}

#[cfg(test)]
mod get_product_details_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        Error, initialize_db,
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::{ProductDetailsPageState, get_product_details_page};

    fn get_test_state() -> ProductDetailsPageState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize_db(&connection).expect("Could not initialize database");

        ProductDetailsPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn shows_product_details() {
        let state = get_test_state();
        state
            .db_connection
            .lock()
            .unwrap()
            .execute(
                "INSERT INTO product (id, name, price, quantity_in_stock)
                VALUES (1, 'Widget', 2.5, 10)",
                (),
            )
            .expect("Could not insert test product");

        let response = get_product_details_page(Path(1), State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let heading_selector = Selector::parse("h1").unwrap();
        let heading = html
            .select(&heading_selector)
            .next()
            .expect("page should have a heading");
        assert_eq!(heading.text().collect::<String>(), "Widget");

        let dd_selector = Selector::parse("dd").unwrap();
        let values: Vec<String> = html
            .select(&dd_selector)
            .map(|dd| dd.text().collect::<String>())
            .collect();
        assert_eq!(values, vec!["$2.50".to_owned(), "10".to_owned()]);
    }

    #[tokio::test]
    async fn returns_not_found_for_missing_product() {
        let state = get_test_state();

        let result = get_product_details_page(Path(999), State(state)).await;

        assert_eq!(result.expect_err("want error"), Error::NotFound);
    }
}
