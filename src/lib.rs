//! General Store is a web app for managing a small store's customers,
//! products, and the transactions recorded against them.
//!
//! This library provides an HTTP API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod customer;
mod database_id;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod product;
mod routing;
#[cfg(test)]
mod test_utils;
mod timezone;
mod transaction;

pub use app_state::AppState;
pub use customer::{CustomerEmail, CustomerName, create_customer};
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use product::{ProductName, create_product};
pub use routing::build_router;
pub use transaction::create_transaction;

use crate::{
    alert::{Alert, render_alert},
    internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used for a customer or product name.
    #[error("Name cannot be empty")]
    EmptyName,

    /// A customer or product name was longer than the column allows.
    #[error("Name cannot be longer than 100 characters")]
    NameTooLong,

    /// An empty string was used for a customer email.
    #[error("Email cannot be empty")]
    EmptyEmail,

    /// A customer email was longer than the column allows.
    #[error("Email cannot be longer than 100 characters")]
    EmailTooLong,

    /// A negative price was submitted for a product.
    #[error("Price cannot be negative")]
    NegativePrice,

    /// A transaction was submitted with a quantity below one.
    #[error("Quantity must be at least one")]
    InvalidQuantity,

    /// A query referenced a customer or product row that does not exist.
    #[error("the referenced customer or product does not exist")]
    InvalidForeignKey,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a customer that does not exist
    #[error("tried to update a customer that is not in the database")]
    UpdateMissingCustomer,

    /// Tried to delete a customer that does not exist
    #[error("tried to delete a customer that is not in the database")]
    DeleteMissingCustomer,

    /// Tried to update a product that does not exist
    #[error("tried to update a product that is not in the database")]
    UpdateMissingProduct,

    /// Tried to delete a product that does not exist
    #[error("tried to delete a product that is not in the database")]
    DeleteMissingProduct,

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_)) if sql_error.extended_code == 787 => {
                Error::InvalidForeignKey
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::UpdateMissingCustomer => render_alert(
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not update customer",
                    "The customer could not be found.",
                ),
            ),
            Error::DeleteMissingCustomer => render_alert(
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not delete customer",
                    "The customer could not be found. \
                    Try refreshing the page to see if the customer has already been deleted.",
                ),
            ),
            Error::UpdateMissingProduct => render_alert(
                StatusCode::NOT_FOUND,
                Alert::error("Could not update product", "The product could not be found."),
            ),
            Error::DeleteMissingProduct => render_alert(
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not delete product",
                    "The product could not be found. \
                    Try refreshing the page to see if the product has already been deleted.",
                ),
            ),
            Error::InvalidForeignKey => render_alert(
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid reference",
                    "The referenced customer or product does not exist.",
                ),
            ),
            _ => render_alert(
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                ),
            ),
        }
    }
}
