//! Defines the route handler for the page for creating a customer.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
};

/// Renders the page for creating a customer.
pub async fn get_create_customer_page() -> Response {
    new_customer_view().into_response()
}

fn new_customer_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::CUSTOMERS_VIEW).into_html();
    let form = new_customer_form_view("", "", "");

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Create Customer", &content)
}

/// The customer creation form.
///
/// `name` and `email` are used to refill the form when it is redisplayed
/// after a validation error.
pub(super) fn new_customer_form_view(name: &str, email: &str, error_message: &str) -> Markup {
    let create_customer_endpoint = endpoints::POST_CUSTOMER;

    html! {
        form
            hx-post=(create_customer_endpoint)
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

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Customer" }
        }
    }
}
