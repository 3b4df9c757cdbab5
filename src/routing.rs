//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    customer::{
        create_customer_endpoint, delete_customer_endpoint, edit_customer_endpoint,
        get_create_customer_page, get_customer_details_page, get_customers_page,
        get_edit_customer_page,
    },
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    product::{
        create_product_endpoint, delete_product_endpoint, edit_product_endpoint,
        get_create_product_page, get_edit_product_page, get_product_details_page,
        get_products_page,
    },
    transaction::{create_transaction_endpoint, get_new_transaction_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::CUSTOMERS_VIEW, get(get_customers_page))
        .route(endpoints::NEW_CUSTOMER_VIEW, get(get_create_customer_page))
        .route(
            endpoints::CUSTOMER_DETAILS_VIEW,
            get(get_customer_details_page),
        )
        .route(endpoints::EDIT_CUSTOMER_VIEW, get(get_edit_customer_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page),
        )
        .route(endpoints::PRODUCTS_VIEW, get(get_products_page))
        .route(endpoints::NEW_PRODUCT_VIEW, get(get_create_product_page))
        .route(
            endpoints::PRODUCT_DETAILS_VIEW,
            get(get_product_details_page),
        )
        .route(endpoints::EDIT_PRODUCT_VIEW, get(get_edit_product_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(endpoints::POST_CUSTOMER, post(create_customer_endpoint))
        .route(endpoints::PUT_CUSTOMER, put(edit_customer_endpoint))
        .route(endpoints::DELETE_CUSTOMER, delete(delete_customer_endpoint))
        .route(endpoints::POST_PRODUCT, post(create_product_endpoint))
        .route(endpoints::PUT_PRODUCT, put(edit_product_endpoint))
        .route(endpoints::DELETE_PRODUCT, delete(delete_product_endpoint))
        .route(
            endpoints::POST_TRANSACTION,
            post(create_transaction_endpoint),
        );

    page_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the customer list.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::CUSTOMERS_VIEW)
}
