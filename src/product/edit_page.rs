//! Defines the route handler for the page for editing a product.

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
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
    product::{ProductId, get_product},
};

/// The state needed for the edit product page.
#[derive(Debug, Clone)]
pub struct EditProductPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditProductPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page for editing a product, prefilled with the product's
/// current details.
///
/// Responds with the not found page when no product has the requested ID.
pub async fn get_edit_product_page(
    Path(product_id): Path<ProductId>,
    State(state): State<EditProductPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let product = get_product(product_id, &connection)?;
    let update_endpoint = format_endpoint(endpoints::PUT_PRODUCT, product_id);

    Ok(edit_product_view(
        &update_endpoint,
        product.id,
        product.name.as_ref(),
        &product.price.to_string(),
        &product.quantity_in_stock.to_string(),
    )
    .into_response())
}

fn edit_product_view(
    update_endpoint: &str,
    product_id: ProductId,
    name: &str,
    price: &str,
    quantity_in_stock: &str,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::PRODUCTS_VIEW).into_html();
    let form = edit_product_form_view(
        update_endpoint,
        product_id,
        name,
        price,
        quantity_in_stock,
        "",
    );

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Edit Product", &content)
}

/// The product editing form.
///
/// The form carries the product's ID in a hidden input so the update endpoint
/// can check it against the ID in the URL.
pub(super) fn edit_product_form_view(
    update_endpoint: &str,
    product_id: ProductId,
    name: &str,
    price: &str,
    quantity_in_stock: &str,
    error_message: &str,
) -> Markup {
    html! {
        form
            hx-put=(update_endpoint)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            input type="hidden" name="id" value=(product_id);

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
                    placeholder="Product Name"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label
                    for="price"
                    class=(FORM_LABEL_STYLE)
                {
                    "Price"
                }

                input
                    id="price"
                    type="number"
                    name="price"
                    value=(price)
                    step="0.01"
                    min="0"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label
                    for="quantity_in_stock"
                    class=(FORM_LABEL_STYLE)
                {
                    "Quantity In Stock"
                }

                input
                    id="quantity_in_stock"
                    type="number"
                    name="quantity_in_stock"
                    value=(quantity_in_stock)
                    step="1"
                    min="0"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Product" }
        }
    }
}

#[cfg(test)]
mod edit_product_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;

    use crate::{
        Error,
        endpoints::{self, format_endpoint},
        initialize_db,
        test_utils::{
            assert_form_input_with_value, assert_form_submit_button_with_text, assert_hx_endpoint,
            assert_valid_html, must_get_form, parse_html_document,
        },
    };

    use super::{EditProductPageState, get_edit_product_page};

    fn get_test_state() -> EditProductPageState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize_db(&connection).expect("Could not initialize database");

        EditProductPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn renders_prefilled_form() {
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

        let response = get_edit_product_page(Path(1), State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, &format_endpoint(endpoints::PUT_PRODUCT, 1), "hx-put");
        assert_form_input_with_value(&form, "id", "hidden", "1");
        assert_form_input_with_value(&form, "name", "text", "Widget");
        assert_form_input_with_value(&form, "price", "number", "2.5");
        assert_form_input_with_value(&form, "quantity_in_stock", "number", "10");
        assert_form_submit_button_with_text(&form, "Update Product");
    }

    #[tokio::test]
    async fn returns_not_found_for_missing_product() {
        let state = get_test_state();

        let result = get_edit_product_page(Path(999), State(state)).await;

        assert_eq!(result.expect_err("want error"), Error::NotFound);
    }
}
