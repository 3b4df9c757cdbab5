//! Products sold by the store, and the screens for managing them.

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod details_page;
mod edit_endpoint;
mod edit_page;
mod products_page;

pub use core::{
    Product, ProductFormData, ProductId, ProductName, create_product_table, get_product,
    map_row_to_product, validate_price,
};
pub use create_endpoint::{create_product, create_product_endpoint};
pub use create_page::get_create_product_page;
pub use delete_endpoint::{delete_product, delete_product_endpoint};
pub use details_page::get_product_details_page;
pub use edit_endpoint::{edit_product_endpoint, update_product};
pub use edit_page::get_edit_product_page;
pub use products_page::get_products_page;
