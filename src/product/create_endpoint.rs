//! Defines the endpoint for creating a new product.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::{Connection, params};

use crate::{
    AppState, Error, endpoints,
    product::{
        Product, ProductFormData, ProductName, create_page::new_product_form_view, validate_price,
    },
};

/// The state needed for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateProductState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new product, redirects to the product list
/// on success.
///
/// Validation errors redisplay the form with the submitted values kept.
pub async fn create_product_endpoint(
    State(state): State<CreateProductState>,
    Form(form): Form<ProductFormData>,
) -> Response {
    let redisplay_form = |error: &Error| {
        new_product_form_view(
            &form.name,
            &form.price.to_string(),
            &form.quantity_in_stock.to_string(),
            &format!("Error: {error}"),
        )
        .into_response()
    };

    let name = match ProductName::new(&form.name) {
        Ok(name) => name,
        Err(error) => return redisplay_form(&error),
    };

    let price = match validate_price(form.price) {
        Ok(price) => price,
        Err(error) => return redisplay_form(&error),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_product(name, price, form.quantity_in_stock, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::PRODUCTS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a product: {error}");

            error.into_alert_response()
        }
    }
}

/// Inserts a product into the database.
pub fn create_product(
    name: ProductName,
    price: f64,
    quantity_in_stock: i64,
    connection: &Connection,
) -> Result<Product, Error> {
    connection.execute(
        "INSERT INTO product (name, price, quantity_in_stock) VALUES (?1, ?2, ?3)",
        params![name.as_ref(), price, quantity_in_stock],
    )?;

    let id = connection.last_insert_rowid();

    Ok(Product {
        id,
        name,
        price,
        quantity_in_stock,
    })
}
