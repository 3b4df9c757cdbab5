//! Defines the endpoint for updating a product's details.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    alert::{Alert, render_alert},
    endpoints::{self, format_endpoint},
    product::{
        ProductId, ProductName, edit_page::edit_product_form_view, validate_price,
    },
};

/// The state needed for updating a product.
#[derive(Debug, Clone)]
pub struct EditProductState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditProductState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for updating a product.
///
/// Unlike [ProductFormData](crate::product::ProductFormData) this carries the
/// product's ID, which must match the ID in the URL.
#[derive(Debug, Serialize, Deserialize)]
pub struct EditProductFormData {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub quantity_in_stock: i64,
}

/// A route handler for updating the product with the ID taken from the URL,
/// redirects to the product list on success.
///
/// Rejects the update when the ID in the submitted form does not match the ID
/// in the URL.
pub async fn edit_product_endpoint(
    Path(product_id): Path<ProductId>,
    State(state): State<EditProductState>,
    Form(form): Form<EditProductFormData>,
) -> Response {
    if form.id != product_id {
        return render_alert(
            StatusCode::NOT_FOUND,
            Alert::error(
                "Could not update product",
                "The submitted product does not match the requested product.",
            ),
        );
    }

    let update_endpoint = format_endpoint(endpoints::PUT_PRODUCT, product_id);
    let redisplay_form = |error: &Error| {
        edit_product_form_view(
            &update_endpoint,
            product_id,
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

    match update_product(product_id, name, price, form.quantity_in_stock, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::PRODUCTS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::UpdateMissingProduct) => Error::UpdateMissingProduct.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating product {product_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

/// Sets the name, price, and stock quantity of the product with the given ID.
pub fn update_product(
    product_id: ProductId,
    name: ProductName,
    price: f64,
    quantity_in_stock: i64,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_updated = connection.execute(
        "UPDATE product SET name = ?1, price = ?2, quantity_in_stock = ?3 WHERE id = ?4",
        params![name.as_ref(), price, quantity_in_stock, product_id],
    )?;

    if rows_updated == 0 {
        return Err(Error::UpdateMissingProduct);
    }

    Ok(())
}
