//! Category management: categories group transactions under an operation.

mod admin_page;
mod create;
mod db;
mod delete;
mod domain;
mod options;

pub use admin_page::get_categories_page;
pub use create::create_category_endpoint;
pub use db::{
    create_category, create_category_table, delete_category, get_all_categories_with_operation,
    get_categories_by_operation, get_category,
};
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryId, CategoryName, CategoryWithOperation};
pub use options::get_category_options;

pub(crate) use options::category_options_view;
