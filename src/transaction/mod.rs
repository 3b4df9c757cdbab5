//! Transactions recording customers' purchases, and the screen for recording
//! them.

mod core;
mod create_endpoint;
mod create_page;

pub use core::{
    ProductChoice, Transaction, TransactionFormData, TransactionId, create_transaction,
    create_transaction_table, get_product_choices, map_row_to_transaction,
};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_new_transaction_page;
