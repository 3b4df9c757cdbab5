//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/customers/{customer_id}', use [format_endpoint].

/// The root route which redirects to the customer list.
pub const ROOT: &str = "/";
/// The page for listing all customers.
pub const CUSTOMERS_VIEW: &str = "/customers";
/// The page for creating a new customer.
pub const NEW_CUSTOMER_VIEW: &str = "/customers/new";
/// The page showing a customer and its transactions.
pub const CUSTOMER_DETAILS_VIEW: &str = "/customers/{customer_id}";
/// The page for editing an existing customer.
pub const EDIT_CUSTOMER_VIEW: &str = "/customers/{customer_id}/edit";
/// The page for recording a new transaction for a customer.
pub const NEW_TRANSACTION_VIEW: &str = "/customers/{customer_id}/transactions/new";
/// The page for listing all products.
pub const PRODUCTS_VIEW: &str = "/products";
/// The page for creating a new product.
pub const NEW_PRODUCT_VIEW: &str = "/products/new";
/// The page showing a single product.
pub const PRODUCT_DETAILS_VIEW: &str = "/products/{product_id}";
/// The page for editing an existing product.
pub const EDIT_PRODUCT_VIEW: &str = "/products/{product_id}/edit";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a customer.
pub const POST_CUSTOMER: &str = "/api/customers";
/// The route to update a customer.
pub const PUT_CUSTOMER: &str = "/api/customers/{customer_id}";
/// The route to delete a customer along with its transactions.
pub const DELETE_CUSTOMER: &str = "/api/customers/{customer_id}";
/// The route to create a product.
pub const POST_PRODUCT: &str = "/api/products";
/// The route to update a product.
pub const PUT_PRODUCT: &str = "/api/products/{product_id}";
/// The route to delete a product along with its transactions.
pub const DELETE_PRODUCT: &str = "/api/products/{product_id}";
/// The route to record a transaction for a customer.
pub const POST_TRANSACTION: &str = "/api/customers/{customer_id}/transactions";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/customers/{customer_id}',
/// '{customer_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let param_start = match endpoint_path.find('{') {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
