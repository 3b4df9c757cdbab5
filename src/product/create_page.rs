//! Defines the route handler for the page for creating a product.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
};

/// Renders the page for creating a product.
pub async fn get_create_product_page() -> Response {
    new_product_view().into_response()
}

fn new_product_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::PRODUCTS_VIEW).into_html();
    let form = new_product_form_view("", "", "", "");

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Create Product", &content)
}

/// The product creation form.
///
/// The value arguments are used to refill the form when it is redisplayed
/// after a validation error.
pub(super) fn new_product_form_view(
    name: &str,
    price: &str,
    quantity_in_stock: &str,
    error_message: &str,
) -> Markup {
    let create_product_endpoint = endpoints::POST_PRODUCT;

    html! {
        form
            hx-post=(create_product_endpoint)
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
                    placeholder="0.00"
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
                    placeholder="0"
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

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Product" }
        }
    }
}
