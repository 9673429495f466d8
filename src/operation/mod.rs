//! Operation management: the income and expense types that categories
//! attach to.

mod admin_page;
mod create;
mod db;
mod delete;
mod domain;

pub use admin_page::get_operations_page;
pub use create::{OperationType, create_operation_endpoint};
pub use db::{
    create_operation, create_operation_table, delete_operation, get_all_operations, get_operation,
};
pub use delete::delete_operation_endpoint;
pub use domain::{Operation, OperationId, OperationName};
