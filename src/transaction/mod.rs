//! Transaction management: the home surface of the application.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and validation for new transactions
//! - Database functions for storing, querying, and deleting transactions
//! - The transactions list page, the creation form (page and modal) and the
//!   create/delete endpoints

mod create_endpoint;
mod create_page;
mod db;
mod delete_endpoint;
mod domain;
mod form;
mod list_page;

pub use create_endpoint::{TransactionFormData, create_transaction_endpoint};
pub use create_page::{get_create_transaction_page, get_transaction_modal};
pub use db::{
    create_transaction, create_transaction_table, delete_transaction, get_detailed_transactions,
    get_transaction,
};
pub use delete_endpoint::delete_transaction_endpoint;
pub use domain::{DetailedTransaction, NewTransaction, Transaction, TransactionId};
pub use list_page::get_transactions_page;
