//! Database initialization for the application's domain models.

use rusqlite::Connection;

use crate::{
    Error,
    category::create_category_table,
    currency::{create_currency_table, seed_default_currencies},
    operation::create_operation_table,
    transaction::create_transaction_table,
};

/// Create the tables for the domain models and seed the default currencies.
///
/// This function is idempotent.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    create_operation_table(connection)?;
    create_category_table(connection)?;
    create_currency_table(connection)?;
    create_transaction_table(connection)?;

    seed_default_currencies(connection)?;

    Ok(())
}
