mod core;
mod create_endpoint;
mod create_page;
mod customers_page;
mod delete_endpoint;
mod details_page;
mod edit_endpoint;
mod edit_page;

pub use core::{
    Customer, CustomerEmail, CustomerFormData, CustomerId, CustomerName, create_customer_table,
    get_customer, map_row_to_customer,
};
pub use create_endpoint::{create_customer, create_customer_endpoint};
pub use create_page::get_create_customer_page;
pub use customers_page::get_customers_page;
pub use delete_endpoint::{delete_customer, delete_customer_endpoint};
pub use details_page::get_customer_details_page;
pub use edit_endpoint::{edit_customer_endpoint, update_customer};
pub use edit_page::get_edit_customer_page;
