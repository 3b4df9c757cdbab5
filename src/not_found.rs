//! The page to display when a route or entity cannot be found.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// The fallback route handler for unmatched routes.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Get a 404 page response.
///
/// This is the uniform not-found behavior: every missing route or entity
/// renders the same page with a 404 status code.
pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        error_view(
            "Not Found",
            "404",
            "Sorry, we can't find that page.",
            "Check the URL, or head back to the customer list.",
        ),
    )
        .into_response()
}
